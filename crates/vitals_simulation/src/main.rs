//! Headless демо regen authority
//!
//! Игрок получает урон, пьёт зелье и попадает под яд; раз в секунду
//! печатается health + regen state.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use vitals_simulation::logger::{log_info, set_log_level, LogLevel};
use vitals_simulation::{create_headless_app, Health, HealthRequest, Player, RegenState, SimulationPlugin};

fn main() {
    let mut app = create_headless_app();
    // Debug логи authority (каждый regen '...' / смена состояния) демо не нужны
    set_log_level(LogLevel::Info);
    app.add_plugins(SimulationPlugin)
        // Детерминированное время: каждый update = один 60Hz шаг
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)));

    let player = app
        .world_mut()
        .spawn((Player, Health::new(100).with_regen(2, 3.0)))
        .id();
    let enemy = app.world_mut().spawn_empty().id();

    log_info("Starting vitals headless simulation");

    // Скрипт: (секунда, запрос)
    let script = [
        (1, HealthRequest::damage_from(player, 40, enemy)),
        (2, HealthRequest::activate_regen(player, "potion", 5, 4.0)),
        (3, HealthRequest::damage_from(player, 10, enemy)),
        (9, HealthRequest::activate_regen(player, "poison", -3, 3.0)),
        (16, HealthRequest::restore_full_health(player, None)),
    ];

    let mut last_second = 0;
    for _ in 0..20 * 60 {
        app.update();

        let elapsed = app.world().resource::<Time<Fixed>>().elapsed_secs() as u64;
        if elapsed == last_second {
            continue;
        }
        last_second = elapsed;

        for (_, request) in script.iter().filter(|(at, _)| *at == elapsed) {
            app.world_mut().send_event(request.clone());
        }

        let world = app.world();
        if let (Some(health), Some(state)) = (world.get::<Health>(player), world.get::<RegenState>(player)) {
            log_info(&format!(
                "t={:>2}s health {:>3}/{} state {:?} regen {:+}",
                elapsed,
                health.current,
                health.max,
                state.phase(),
                vitals_simulation::get_regen_value(state.ledger())
            ));
        }
    }

    log_info("Simulation complete!");
}
