//! Health systems (FixedUpdate, строго последовательно)
//!
//! 1. process_health_requests — HealthRequest → authority → notifications
//! 2. regen_tick — раз в tick interval, только для entities, которым есть что тикать

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::components::{Dead, Health, RegenState};
use crate::health::authority::{self, HealthChange};
use crate::health::clock::RegenClock;
use crate::health::events::{Damaged, Died, FullyHealed, Healed, HealthRequest};
use crate::logger::{log, log_info, log_warning};

/// Все исходящие health notifications одним SystemParam
#[derive(SystemParam)]
pub struct HealthNotifications<'w> {
    damaged: EventWriter<'w, Damaged>,
    healed: EventWriter<'w, Healed>,
    fully_healed: EventWriter<'w, FullyHealed>,
    died: EventWriter<'w, Died>,
}

impl HealthNotifications<'_> {
    /// HealthChange → notification (+ Dead marker bookkeeping)
    fn publish(
        &mut self,
        commands: &mut Commands,
        entity: Entity,
        instigator: Option<Entity>,
        was_dead: bool,
        change: HealthChange,
    ) {
        match change {
            HealthChange::Damaged {
                amount,
                resulting_health,
                died,
            } => {
                self.damaged.write(Damaged {
                    entity,
                    amount,
                    instigator,
                    resulting_health,
                });

                if died {
                    self.died.write(Died {
                        entity,
                        killer: instigator,
                    });
                    commands.entity(entity).insert(Dead);
                    log_info(&format!("💀 Entity {:?} died (instigator: {:?})", entity, instigator));
                }
            }
            HealthChange::Healed {
                delta,
                resulting_health,
            } => {
                self.healed.write(Healed {
                    entity,
                    delta,
                    resulting_health,
                });

                if was_dead && resulting_health > 0 {
                    commands.entity(entity).remove::<Dead>();
                }
            }
            HealthChange::FullyHealed => {
                self.fully_healed.write(FullyHealed { entity, instigator });

                if was_dead {
                    commands.entity(entity).remove::<Dead>();
                }
            }
        }
    }
}

/// Система: обработка HealthRequest в порядке поступления
///
/// Невалидный payload (amount 0, duration <= 0) → warning + skip.
/// Target без Health → skip (неразрушаемые entities — нормальный случай).
pub fn process_health_requests(
    mut commands: Commands,
    mut requests: EventReader<HealthRequest>,
    mut targets: Query<(&mut Health, &mut RegenState, Has<Dead>)>,
    mut notifications: HealthNotifications,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed_secs();

    for request in requests.read() {
        let target = request.target();
        let Ok((mut health, mut state, was_dead)) = targets.get_mut(target) else {
            log(&format!("HealthRequest skipped: {:?} has no Health", target));
            continue;
        };

        match request {
            HealthRequest::DoDamage {
                amount, instigator, ..
            } => match authority::apply_damage(&mut health, &mut state, *amount, now) {
                Ok(Some(change)) => {
                    notifications.publish(&mut commands, target, *instigator, was_dead, change);
                }
                Ok(None) => {
                    log(&format!("Damage to dead entity {:?}: cool-down restarted only", target));
                }
                Err(err) => log_warning(&format!("DoDamage for {:?} rejected: {}", target, err)),
            },

            HealthRequest::Heal {
                amount, instigator, ..
            } => match authority::apply_heal(&mut health, *amount) {
                Ok(change) => {
                    notifications.publish(&mut commands, target, *instigator, was_dead, change);
                }
                Err(err) => log_warning(&format!("Heal for {:?} rejected: {}", target, err)),
            },

            HealthRequest::ActivateRegen {
                id,
                value,
                duration_secs,
                ..
            } => match authority::activate(&mut state, id, *value, *duration_secs, now) {
                Ok(replaced) => log(&format!(
                    "Regen '{}' ({:+}/tick, {}s) on {:?}{}",
                    id,
                    value,
                    duration_secs,
                    target,
                    if replaced.is_some() { " [replaced]" } else { "" }
                )),
                Err(err) => log_warning(&format!("ActivateRegen '{}' for {:?} rejected: {}", id, target, err)),
            },

            HealthRequest::DeactivateRegen { id, .. } => {
                if authority::deactivate(&mut state, id).is_some() {
                    log(&format!("Regen '{}' removed from {:?}", id, target));
                }
            }

            HealthRequest::RestoreFullHealth { instigator, .. } => {
                let change = authority::restore_full_health(&mut health);
                notifications.publish(&mut commands, target, *instigator, was_dead, change);
            }
        }
    }
}

/// Система: periodic regen tick
///
/// Срабатывает один раз на каждую границу `RegenClock::tick_interval`.
/// Idle entities, которым baseline не может сдвинуть health, пропускаются
/// без мутабельного доступа (change detection не дёргается).
pub fn regen_tick(
    mut commands: Commands,
    mut clock: ResMut<RegenClock>,
    mut entities: Query<(Entity, &mut Health, &mut RegenState, Has<Dead>)>,
    mut notifications: HealthNotifications,
    time: Res<Time<Fixed>>,
) {
    let Some(now) = clock.advance(time.elapsed()) else {
        return;
    };

    for (entity, mut health, mut state, was_dead) in entities.iter_mut() {
        if !authority::is_scheduled(&health, &state) {
            continue;
        }

        let before = state.phase();
        if let Some(change) = authority::tick(&mut health, &mut state, now) {
            notifications.publish(&mut commands, entity, None, was_dead, change);
        }

        let after = state.phase();
        if before != after {
            log(&format!(
                "Regen state {:?}: {:?} → {:?} at {:.1}s (health {}/{})",
                entity, before, after, now, health.current, health.max
            ));
        }
    }
}
