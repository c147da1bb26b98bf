//! Тесты детерминизма regen authority
//!
//! Один и тот же скрипт запросов должен давать идентичный Health snapshot

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use vitals_simulation::{create_headless_app, world_snapshot, Health, HealthRequest, SimulationPlugin};

const STEP: Duration = Duration::from_millis(100);

#[test]
fn test_determinism_same_script() {
    const ENTITY_COUNT: u32 = 50;
    const TICK_COUNT: u32 = 300;

    let snapshot1 = run_simulation(ENTITY_COUNT, TICK_COUNT);
    let snapshot2 = run_simulation(ENTITY_COUNT, TICK_COUNT);

    assert_eq!(
        snapshot1, snapshot2,
        "Симуляция с одинаковым скриптом дала разные результаты!"
    );
}

#[test]
fn test_determinism_multiple_runs() {
    let snapshots: Vec<_> = (0..3).map(|_| run_simulation(20, 200)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(
            snapshots[0], *snapshot,
            "Прогон {} дал результат отличный от прогона 0",
            i
        );
    }
}

/// Запускает скриптованную симуляцию и возвращает snapshot Health
fn run_simulation(entity_count: u32, tick_count: u32) -> Vec<u8> {
    let mut app = create_headless_app();
    app.add_plugins(SimulationPlugin)
        .insert_resource(Time::<Fixed>::from_duration(STEP))
        .insert_resource(TimeUpdateStrategy::ManualDuration(STEP));
    app.update();

    let entities: Vec<Entity> = (0..entity_count)
        .map(|i| {
            let health = Health::new(50 + i).with_regen((i % 4) as i32, (i % 3) as f32);
            app.world_mut().spawn(health).id()
        })
        .collect();

    for tick in 0..tick_count {
        for (i, entity) in entities.iter().enumerate() {
            let i = i as u32;
            match (tick + i) % 23 {
                0 => {
                    app.world_mut().send_event(HealthRequest::damage(*entity, 7 + i % 11));
                }
                4 => {
                    app.world_mut()
                        .send_event(HealthRequest::activate_regen(*entity, "potion", 3, 1.5 + i as f32 * 0.1));
                }
                9 => {
                    app.world_mut()
                        .send_event(HealthRequest::activate_regen(*entity, "poison", -2, 2.0));
                }
                15 => {
                    app.world_mut().send_event(HealthRequest::deactivate_regen(*entity, "poison"));
                }
                _ => {}
            }
        }
        app.update();
    }

    world_snapshot::<Health>(app.world_mut())
}
