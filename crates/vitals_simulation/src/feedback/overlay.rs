//! Damage overlay presentation — клиентская реакция на `Damaged`
//!
//! Сам HUD (рендер, UI assets) — внешний collaborator: инжектится через
//! `DamageHud` trait при создании `DamageFeedback` resource.

use bevy::prelude::*;

use crate::components::{Health, Player};
use crate::feedback::direction::{direction_between, DamageDirection};
use crate::health::Damaged;
use crate::logger::log;

/// Сколько секунд показывать direction indicator
pub const DAMAGE_OVERLAY_DELAY_SECONDS: f32 = 0.5;

/// Доля от оставшегося health, начиная с которой урон считается major
pub const DAMAGE_OVERLAY_REQUIRED_PERCENT: f32 = 0.25;

/// HUD collaborator (реализуется клиентом/движком)
pub trait DamageHud: Send + Sync {
    fn show_direction(&mut self, direction: DamageDirection, duration_secs: f32);

    fn show_major_damage_overlay(&mut self);
}

/// Presentation state + injected HUD
#[derive(Resource)]
pub struct DamageFeedback {
    hud: Box<dyn DamageHud>,
    major_overlay_displaying: bool,
}

impl DamageFeedback {
    pub fn new(hud: Box<dyn DamageHud>) -> Self {
        Self {
            hud,
            major_overlay_displaying: false,
        }
    }

    pub fn is_major_overlay_displaying(&self) -> bool {
        self.major_overlay_displaying
    }

    /// Клиент закрыл major damage overlay → можно показать снова
    pub fn major_overlay_closed(&mut self) {
        self.major_overlay_displaying = false;
    }

    /// Реакция на один Damaged
    ///
    /// `direction` = None, если у instigator'а или игрока нет позиции.
    pub fn on_damaged(&mut self, direction: Option<DamageDirection>, amount: u32, current_health: u32) {
        if let Some(direction) = direction {
            self.hud.show_direction(direction, DAMAGE_OVERLAY_DELAY_SECONDS);
        }

        if is_major_damage(amount, current_health) && !self.major_overlay_displaying {
            self.major_overlay_displaying = true;
            self.hud.show_major_damage_overlay();
        }
    }
}

/// Major damage: amount / current (после урона) ≥ 25%
///
/// current == 0 (смерть) → не major: overlay смерти — отдельная история.
pub fn is_major_damage(amount: u32, current_health: u32) -> bool {
    if current_health == 0 || amount == 0 {
        return false;
    }
    amount as f32 / current_health as f32 >= DAMAGE_OVERLAY_REQUIRED_PERCENT
}

/// Система: Damaged → direction indicator + major damage overlay
///
/// Только для Player entities. Без `DamageFeedback` resource (headless
/// сервер) система ничего не делает.
pub fn present_damage_feedback(
    mut damaged_events: EventReader<Damaged>,
    players: Query<(&Health, Option<&Transform>), With<Player>>,
    transforms: Query<&Transform>,
    feedback: Option<ResMut<DamageFeedback>>,
) {
    let Some(mut feedback) = feedback else {
        damaged_events.clear();
        return;
    };

    for event in damaged_events.read() {
        let Ok((health, player_transform)) = players.get(event.entity) else {
            continue;
        };

        let direction = event
            .instigator
            .and_then(|instigator| transforms.get(instigator).ok())
            .zip(player_transform)
            .map(|(attacker, defender)| direction_between(defender, attacker));

        if let Some(direction) = direction {
            log(&format!("Damage indicator for {:?}: {:?}", event.entity, direction));
        }

        feedback.on_damaged(direction, event.amount, health.current);
    }
}
