//! Vitals Simulation Core
//!
//! ECS-симуляция здоровья на Bevy 0.16:
//! - Health record + instant damage/heal
//! - Timed regen/degen sources (зелья, яды) с независимыми сроками
//! - Baseline regen, подавляемый cool-down'ом после урона
//!
//! Presentation (direction indicator, overlays) — в `feedback`, только читает
//! notifications, health state не трогает.

use bevy::prelude::*;

// Публичные модули
pub mod components;
pub mod feedback;
pub mod health;
pub mod logger;

// Re-export базовых компонентов для удобства
pub use components::*;
pub use feedback::{DamageDirection, DamageFeedback, DamageHud, FeedbackPlugin};
pub use health::{
    Damaged, Died, FullyHealed, Healed, HealthChange, HealthPlugin, HealthRequest, InvalidInput, RegenClock,
    BASE_REGEN_ID,
};

/// Частота FixedUpdate (regen tick считается от fixed time)
pub const SIMULATION_HZ: f64 = 60.0;

/// Главный plugin симуляции (health authority)
///
/// Клиент дополнительно добавляет `FeedbackPlugin` + `DamageFeedback` resource.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
            .add_plugins(HealthPlugin::default());
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app() -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
