//! Tests for health systems (HealthPlugin + ручной FixedUpdate).

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::prelude::*;

    use crate::components::{Dead, Health, RegenPhase, RegenState};
    use crate::health::{Damaged, Died, FullyHealed, Healed, HealthPlugin, HealthRequest, RegenClock};

    /// App с HealthPlugin, без TimePlugin: время двигаем вручную
    fn health_app() -> App {
        let mut app = App::new();
        app.add_plugins(HealthPlugin::default())
            .insert_resource(Time::<Fixed>::default());
        app
    }

    /// Выставить fixed elapsed и прогнать один FixedUpdate
    fn step_at(app: &mut App, secs: u64, millis: u64) {
        let elapsed = Duration::from_secs(secs) + Duration::from_millis(millis);
        app.world_mut().resource_mut::<Time<Fixed>>().advance_to(elapsed);
        app.world_mut().run_schedule(FixedUpdate);
    }

    fn send(app: &mut App, request: HealthRequest) {
        app.world_mut().resource_mut::<Events<HealthRequest>>().send(request);
    }

    fn drain<E: Event>(app: &mut App) -> Vec<E> {
        app.world_mut().resource_mut::<Events<E>>().drain().collect()
    }

    fn spawn_health(app: &mut App, health: Health) -> Entity {
        app.world_mut().spawn(health).id()
    }

    #[test]
    fn test_health_requires_regen_state() {
        let mut app = health_app();
        let entity = spawn_health(&mut app, Health::new(100));

        let state = app.world().get::<RegenState>(entity);
        assert_eq!(state.map(RegenState::phase), Some(RegenPhase::Idle));
    }

    #[test]
    fn test_damage_request_emits_damaged() {
        let mut app = health_app();
        let attacker = app.world_mut().spawn_empty().id();
        let target = spawn_health(&mut app, Health::new(100).with_regen(1, 1.0));

        send(&mut app, HealthRequest::damage_from(target, 25, attacker));
        step_at(&mut app, 0, 100);

        assert_eq!(app.world().get::<Health>(target).map(|h| h.current), Some(75));
        assert_eq!(
            drain::<Damaged>(&mut app),
            vec![Damaged {
                entity: target,
                amount: 25,
                instigator: Some(attacker),
                resulting_health: 75,
            }]
        );
        assert_eq!(
            app.world().get::<RegenState>(target).map(RegenState::phase),
            Some(RegenPhase::Cooldown)
        );
    }

    #[test]
    fn test_request_without_health_is_noop() {
        let mut app = health_app();
        let scenery = app.world_mut().spawn_empty().id();

        send(&mut app, HealthRequest::damage(scenery, 10));
        send(&mut app, HealthRequest::activate_regen(scenery, "potion", 5, 3.0));
        step_at(&mut app, 0, 100);

        assert!(drain::<Damaged>(&mut app).is_empty());
        assert!(app.world().get::<RegenState>(scenery).is_none());
    }

    #[test]
    fn test_invalid_payloads_are_dropped() {
        let mut app = health_app();
        let target = spawn_health(&mut app, Health::new(100).with_current(50));

        send(&mut app, HealthRequest::damage(target, 0));
        send(&mut app, HealthRequest::heal(target, 0));
        send(&mut app, HealthRequest::activate_regen(target, "potion", 5, -1.0));
        step_at(&mut app, 0, 100);

        assert_eq!(app.world().get::<Health>(target).map(|h| h.current), Some(50));
        assert!(drain::<Damaged>(&mut app).is_empty());
        assert!(drain::<Healed>(&mut app).is_empty());
        assert!(app.world().get::<RegenState>(target).is_some_and(RegenState::is_idle));
    }

    #[test]
    fn test_death_and_revive_toggle_dead_marker() {
        let mut app = health_app();
        let killer = app.world_mut().spawn_empty().id();
        let target = spawn_health(&mut app, Health::new(30));

        send(&mut app, HealthRequest::damage_from(target, 50, killer));
        step_at(&mut app, 0, 100);

        assert!(app.world().get::<Dead>(target).is_some());
        assert_eq!(
            drain::<Died>(&mut app),
            vec![Died { entity: target, killer: Some(killer) }]
        );

        send(&mut app, HealthRequest::restore_full_health(target, None));
        step_at(&mut app, 0, 200);

        assert!(app.world().get::<Dead>(target).is_none());
        assert_eq!(
            drain::<FullyHealed>(&mut app),
            vec![FullyHealed { entity: target, instigator: None }]
        );
        assert_eq!(app.world().get::<Health>(target).map(|h| h.current), Some(30));
    }

    #[test]
    fn test_requests_applied_in_arrival_order() {
        let mut app = health_app();
        let removed_last = spawn_health(&mut app, Health::new(100).with_current(50).with_regen(0, 1.0));
        let activated_last = spawn_health(&mut app, Health::new(100).with_current(50).with_regen(0, 1.0));

        send(&mut app, HealthRequest::activate_regen(removed_last, "potion", 5, 10.0));
        send(&mut app, HealthRequest::deactivate_regen(removed_last, "potion"));
        send(&mut app, HealthRequest::deactivate_regen(activated_last, "potion"));
        send(&mut app, HealthRequest::activate_regen(activated_last, "potion", 5, 10.0));
        step_at(&mut app, 0, 100);
        step_at(&mut app, 1, 0);

        assert_eq!(app.world().get::<Health>(removed_last).map(|h| h.current), Some(50));
        assert_eq!(app.world().get::<Health>(activated_last).map(|h| h.current), Some(55));
    }

    #[test]
    fn test_base_regen_cancel_expires_with_cooldown() {
        let mut app = health_app();
        let target = spawn_health(&mut app, Health::new(100).with_regen(1, 1.0));

        send(&mut app, HealthRequest::damage(target, 10));
        send(&mut app, HealthRequest::deactivate_base_regen(target));
        step_at(&mut app, 0, 100);

        step_at(&mut app, 1, 0);
        assert_eq!(app.world().get::<Health>(target).map(|h| h.current), Some(90));

        step_at(&mut app, 2, 0);
        step_at(&mut app, 3, 0);
        assert_eq!(app.world().get::<Health>(target).map(|h| h.current), Some(92));
    }

    #[test]
    fn test_idle_entity_below_max_regenerates() {
        let mut app = health_app();
        let target = spawn_health(&mut app, Health::new(100).with_current(95).with_regen(2, 1.0));

        step_at(&mut app, 0, 100);
        step_at(&mut app, 1, 0);

        assert_eq!(
            drain::<Healed>(&mut app),
            vec![Healed { entity: target, delta: 2, resulting_health: 97 }]
        );
        assert_eq!(
            app.world().get::<RegenState>(target).map(RegenState::phase),
            Some(RegenPhase::Idle)
        );
    }

    #[test]
    fn test_regen_tick_emits_healed_once_per_interval() {
        let mut app = health_app();
        let target = spawn_health(&mut app, Health::new(100).with_current(10).with_regen(0, 1.0));

        send(&mut app, HealthRequest::activate_regen(target, "potion", 5, 10.0));
        step_at(&mut app, 0, 100);

        // Несколько fixed шагов внутри одной секунды → один tick
        step_at(&mut app, 1, 0);
        step_at(&mut app, 1, 100);
        step_at(&mut app, 1, 500);

        assert_eq!(
            drain::<Healed>(&mut app),
            vec![Healed { entity: target, delta: 5, resulting_health: 15 }]
        );
        assert_eq!(app.world().resource::<RegenClock>().ticks, 1);
    }

    #[test]
    fn test_degen_tick_emits_damaged_without_instigator() {
        let mut app = health_app();
        let target = spawn_health(&mut app, Health::new(100).with_regen(0, 1.0));

        send(&mut app, HealthRequest::activate_regen(target, "poison", -4, 5.0));
        step_at(&mut app, 0, 100);
        step_at(&mut app, 1, 0);

        assert_eq!(
            drain::<Damaged>(&mut app),
            vec![Damaged {
                entity: target,
                amount: 4,
                instigator: None,
                resulting_health: 96,
            }]
        );
    }

    #[test]
    fn test_despawned_entity_leaves_no_timers() {
        let mut app = health_app();
        let target = spawn_health(&mut app, Health::new(100).with_current(50));

        send(&mut app, HealthRequest::activate_regen(target, "potion", 5, 10.0));
        step_at(&mut app, 0, 100);
        app.world_mut().despawn(target);

        step_at(&mut app, 1, 0);
        step_at(&mut app, 2, 0);

        assert!(drain::<Healed>(&mut app).is_empty());
    }
}
