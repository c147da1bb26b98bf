//! Health & regeneration authority
//!
//! ECS ответственность:
//! - Game state: Health record, RegenState (ledger + cool-down)
//! - Rules: instant damage/heal, timed regen sources, baseline regen cool-down
//! - Events: HealthRequest (in) → Damaged / Healed / FullyHealed / Died (out)
//!
//! Presentation (direction indicator, overlays) живёт в `feedback` и только
//! читает notifications.

use std::time::Duration;

use bevy::prelude::*;

pub mod authority;
pub mod clock;
pub mod error;
pub mod events;
pub mod systems;

#[cfg(test)]
mod systems_tests;

// Re-export основных типов
pub use authority::{HealthChange, BASE_REGEN_ID};
pub use clock::{RegenClock, DEFAULT_REGEN_TICK_INTERVAL};
pub use error::InvalidInput;
pub use events::{Damaged, Died, FullyHealed, Healed, HealthRequest};
pub use systems::{process_health_requests, regen_tick, HealthNotifications};

/// Health Plugin
///
/// Регистрирует health системы в FixedUpdate.
///
/// Порядок выполнения:
/// 1. process_health_requests — damage/heal/activate/deactivate/restore
/// 2. regen_tick — periodic regen (edge-triggered на границах tick_interval)
pub struct HealthPlugin {
    /// Период regen tick (default 1s game time)
    pub tick_interval: Duration,
}

impl Default for HealthPlugin {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_REGEN_TICK_INTERVAL,
        }
    }
}

impl Plugin for HealthPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<HealthRequest>()
            .add_event::<Damaged>()
            .add_event::<Healed>()
            .add_event::<FullyHealed>()
            .add_event::<Died>();

        app.insert_resource(RegenClock::new(self.tick_interval));

        app.add_systems(
            FixedUpdate,
            (process_health_requests, regen_tick).chain(), // Последовательное выполнение
        );
    }
}
