//! Regeneration authority — чистая логика над `Health` + `RegenState`
//!
//! Без Bevy systems: функции принимают компоненты и `now` (секунды fixed time)
//! и возвращают `HealthChange`, который systems превращают в notifications.
//!
//! Baseline regen (`Health::regen_rate`) в ledger не хранится, а добавляется
//! к net rate на каждом tick вне cool-down:
//!
//! `net = get_regen_value(ledger) + (cool-down активен ? 0 : regen_rate)`
//!
//! Урон только перезапускает cool-down. Timed sources (зелья, яды) cool-down
//! не затрагивает вообще.

use crate::components::{get_regen_value, Cooldown, Health, RegenSource, RegenState};
use crate::health::error::{validate_amount, validate_duration, InvalidInput};

/// Id baseline regen для `DeactivateRegen`
///
/// Baseline живёт вне ledger, поэтому снятие по этому id удаляет только
/// одноимённый timed source (если хост такой активировал). Под cool-down
/// baseline и так подавлен до его естественного окончания.
pub const BASE_REGEN_ID: &str = "baseRegen";

/// Результат мутации health (→ Damaged / Healed / FullyHealed)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthChange {
    Damaged {
        amount: u32,
        resulting_health: u32,
        /// health перешёл из > 0 в 0 этой мутацией
        died: bool,
    },
    Healed {
        delta: u32,
        resulting_health: u32,
    },
    FullyHealed,
}

/// Instant damage
///
/// - health = max(0, health - amount)
/// - cool-down рестартует всегда (даже для мёртвого), кроме `wait_before_regen <= 0`
/// - notification только если health был > 0
pub fn apply_damage(
    health: &mut Health,
    state: &mut RegenState,
    amount: u32,
    now: f32,
) -> Result<Option<HealthChange>, InvalidInput> {
    let amount = validate_amount(amount)?;

    let prior = health.current;
    health.take_damage(amount);
    restart_cooldown(health, state, now);

    if prior == 0 {
        return Ok(None);
    }

    Ok(Some(HealthChange::Damaged {
        amount,
        resulting_health: health.current,
        died: !health.is_alive(),
    }))
}

/// Instant heal (clamped к max). Healed отправляется даже при delta == 0.
pub fn apply_heal(health: &mut Health, amount: u32) -> Result<HealthChange, InvalidInput> {
    let amount = validate_amount(amount)?;
    let delta = health.heal(amount);

    Ok(HealthChange::Healed {
        delta,
        resulting_health: health.current,
    })
}

/// current = max безусловно. Ledger и cool-down не трогаются.
pub fn restore_full_health(health: &mut Health) -> HealthChange {
    health.restore_full();
    HealthChange::FullyHealed
}

/// Insert/replace timed source. Возвращает заменённый source (если был).
pub fn activate(
    state: &mut RegenState,
    id: &str,
    value: i32,
    duration_secs: f32,
    now: f32,
) -> Result<Option<RegenSource>, InvalidInput> {
    let duration_secs = validate_duration(duration_secs)?;

    let source = RegenSource {
        value,
        end_time: now + duration_secs,
    };
    Ok(state.insert_source(id, source))
}

/// Снимает source по id (idempotent)
pub fn deactivate(state: &mut RegenState, id: &str) -> Option<RegenSource> {
    let removed = state.ledger_mut().and_then(|ledger| ledger.remove(id));
    state.settle();
    removed
}

/// Нужен ли entity regen tick
///
/// Idle entity тикает только пока baseline может сдвинуть health
/// (rate > 0 и health < max, либо rate < 0 и health > 0).
pub fn is_scheduled(health: &Health, state: &RegenState) -> bool {
    !state.is_idle() || health.has_room_for(health.regen_rate)
}

/// Один regen tick для entity
///
/// Порядок:
/// 1. истёкший cool-down снимается
/// 2. net = сумма ledger + baseline (если cool-down не активен), применяется с clamp
/// 3. expiry ПОСЛЕ вклада: source с `end_time <= now` успевает сработать
///    в свой последний tick
/// 4. пустой ledger удаляется (Regenerating → Cooldown | Idle)
pub fn tick(health: &mut Health, state: &mut RegenState, now: f32) -> Option<HealthChange> {
    if state.cooldown().is_some_and(|cooldown| !cooldown.is_active(now)) {
        state.set_cooldown(None);
    }

    let baseline = if state.cooldown().is_some() { 0 } else { health.regen_rate };
    if state.ledger().is_none() && !health.has_room_for(baseline) {
        return None;
    }

    let net = get_regen_value(state.ledger()).saturating_add(baseline);
    let change = apply_net_rate(health, net);

    if let Some(ledger) = state.ledger_mut() {
        ledger.expire(now);
    }
    state.settle();

    change
}

fn apply_net_rate(health: &mut Health, net: i32) -> Option<HealthChange> {
    match net.signum() {
        1 => {
            let delta = health.apply_delta(net);
            Some(HealthChange::Healed {
                delta: delta.unsigned_abs(),
                resulting_health: health.current,
            })
        }
        -1 => {
            let prior = health.current;
            health.apply_delta(net);
            (prior > 0).then(|| HealthChange::Damaged {
                amount: net.unsigned_abs(),
                resulting_health: health.current,
                died: !health.is_alive(),
            })
        }
        _ => None,
    }
}

fn restart_cooldown(health: &Health, state: &mut RegenState, now: f32) {
    let cooldown = (health.wait_before_regen > 0.0).then(|| Cooldown {
        until: now + health.wait_before_regen,
    });
    state.set_cooldown(cooldown);
}
