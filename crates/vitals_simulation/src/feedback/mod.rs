//! Damage feedback (client presentation layer)
//!
//! Потребляет `Damaged` notifications, в health state не пишет:
//! - direction: из какого квадранта пришёл урон (чистая геометрия)
//! - overlay: direction indicator + major damage overlay через `DamageHud`

use bevy::prelude::*;

pub mod direction;
pub mod overlay;

pub use direction::{determine_damage_direction, direction_between, DamageDirection};
pub use overlay::{
    is_major_damage, present_damage_feedback, DamageFeedback, DamageHud, DAMAGE_OVERLAY_DELAY_SECONDS,
    DAMAGE_OVERLAY_REQUIRED_PERCENT,
};

/// Feedback Plugin (только клиент)
///
/// Требует `HealthPlugin` (регистрирует `Damaged`). HUD подключается
/// вставкой `DamageFeedback::new(hud)` resource.
pub struct FeedbackPlugin;

impl Plugin for FeedbackPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, present_damage_feedback);
    }
}
