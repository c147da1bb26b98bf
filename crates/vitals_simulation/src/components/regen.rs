//! Regen ledger + explicit regen state machine
//!
//! - `RegenSource` — один named timed modifier (value per tick + end_time)
//! - `RegenLedger` — все активные sources entity + cached aggregates
//! - `RegenState` — Idle / Cooldown / Regenerating
//!
//! Ledger живёт ТОЛЬКО внутри `RegenState::Regenerating`: пустой ledger
//! не существует, Idle entity не участвует в regen tick.

use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Один активный regen/degen source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegenSource {
    /// Signed units per tick (отрицательное = degeneration)
    pub value: i32,
    /// Абсолютное время окончания (секунды fixed time). INFINITY = без срока.
    pub end_time: f32,
}

/// Набор активных regen sources одной entity
///
/// Инвариант: `regen_value` и `soonest_end_time` всегда соответствуют `sources`
/// (пересчитываются при каждой мутации).
/// BTreeMap → детерминированный порядок обхода (tie-break по id).
#[derive(Debug, Clone, PartialEq)]
pub struct RegenLedger {
    sources: BTreeMap<String, RegenSource>,
    regen_value: i32,
    soonest_end_time: f32,
}

impl Default for RegenLedger {
    fn default() -> Self {
        Self {
            sources: BTreeMap::new(),
            regen_value: 0,
            soonest_end_time: f32::INFINITY,
        }
    }
}

impl RegenLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert или replace (тот же id не стакается)
    pub fn insert(&mut self, id: impl Into<String>, source: RegenSource) -> Option<RegenSource> {
        let previous = self.sources.insert(id.into(), source);
        self.recompute();
        previous
    }

    pub fn remove(&mut self, id: &str) -> Option<RegenSource> {
        let removed = self.sources.remove(id);
        if removed.is_some() {
            self.recompute();
        }
        removed
    }

    /// Удаляет sources с `end_time <= now`, возвращает их id
    pub fn expire(&mut self, now: f32) -> Vec<String> {
        if self.soonest_end_time > now {
            return Vec::new();
        }

        let expired: Vec<String> = self
            .sources
            .iter()
            .filter(|(_, source)| source.end_time <= now)
            .map(|(id, _)| id.clone())
            .collect();

        for id in &expired {
            self.sources.remove(id);
        }
        self.recompute();
        expired
    }

    pub fn get(&self, id: &str) -> Option<&RegenSource> {
        self.sources.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn sources(&self) -> impl Iterator<Item = (&str, &RegenSource)> {
        self.sources.iter().map(|(id, source)| (id.as_str(), source))
    }

    /// Net units per tick (cached signed sum)
    pub fn regen_value(&self) -> i32 {
        self.regen_value
    }

    /// Ближайший end_time (INFINITY если все sources бессрочные)
    pub fn soonest_end_time(&self) -> f32 {
        self.soonest_end_time
    }

    fn recompute(&mut self) {
        // Values приходят из payload'ов: сумма в i64, насыщение до i32
        let total: i64 = self.sources.values().map(|source| i64::from(source.value)).sum();
        self.regen_value = total.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        self.soonest_end_time = self
            .sources
            .values()
            .map(|source| source.end_time)
            .fold(f32::INFINITY, f32::min);
    }
}

/// Net regen value ledger'а. Простая signed сумма, без весов/clamp/приоритетов.
///
/// Absent ledger → 0.
pub fn get_regen_value(ledger: Option<&RegenLedger>) -> i32 {
    ledger.map_or(0, RegenLedger::regen_value)
}

/// Post-damage cool-down: baseline regen подавлен до `until`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cooldown {
    pub until: f32,
}

impl Cooldown {
    pub fn is_active(&self, now: f32) -> bool {
        now < self.until
    }
}

/// Regen state machine entity
///
/// - Idle — нет ledger, нет cool-down (тикает только baseline, пока есть куда)
/// - Cooldown — после урона, baseline подавлен, ledger нет
/// - Regenerating — ledger непустой (cool-down может идти параллельно)
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub enum RegenState {
    #[default]
    Idle,
    Cooldown(Cooldown),
    Regenerating {
        ledger: RegenLedger,
        cooldown: Option<Cooldown>,
    },
}

/// Bare tag состояния (для логов/assert'ов без доступа к ledger)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegenPhase {
    Idle,
    Cooldown,
    Regenerating,
}

impl RegenState {
    pub fn phase(&self) -> RegenPhase {
        match self {
            RegenState::Idle => RegenPhase::Idle,
            RegenState::Cooldown(_) => RegenPhase::Cooldown,
            RegenState::Regenerating { .. } => RegenPhase::Regenerating,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, RegenState::Idle)
    }

    pub fn ledger(&self) -> Option<&RegenLedger> {
        match self {
            RegenState::Regenerating { ledger, .. } => Some(ledger),
            _ => None,
        }
    }

    pub fn ledger_mut(&mut self) -> Option<&mut RegenLedger> {
        match self {
            RegenState::Regenerating { ledger, .. } => Some(ledger),
            _ => None,
        }
    }

    pub fn cooldown(&self) -> Option<&Cooldown> {
        match self {
            RegenState::Cooldown(cooldown) => Some(cooldown),
            RegenState::Regenerating { cooldown, .. } => cooldown.as_ref(),
            RegenState::Idle => None,
        }
    }

    /// Insert/replace source; Idle/Cooldown → Regenerating
    pub fn insert_source(&mut self, id: impl Into<String>, source: RegenSource) -> Option<RegenSource> {
        let (mut ledger, cooldown) = match std::mem::take(self) {
            RegenState::Regenerating { ledger, cooldown } => (ledger, cooldown),
            RegenState::Cooldown(cooldown) => (RegenLedger::new(), Some(cooldown)),
            RegenState::Idle => (RegenLedger::new(), None),
        };

        let previous = ledger.insert(id, source);
        *self = RegenState::Regenerating { ledger, cooldown };
        previous
    }

    /// Заменяет cool-down, не трогая ledger
    pub fn set_cooldown(&mut self, cooldown: Option<Cooldown>) {
        match std::mem::take(self) {
            RegenState::Regenerating { ledger, .. } => {
                *self = RegenState::Regenerating { ledger, cooldown };
            }
            RegenState::Idle | RegenState::Cooldown(_) => {
                *self = cooldown.map_or(RegenState::Idle, RegenState::Cooldown);
            }
        }
    }

    /// Пустой ledger удаляется целиком: Regenerating → Cooldown | Idle
    pub fn settle(&mut self) {
        if let RegenState::Regenerating { ledger, cooldown } = self {
            if ledger.is_empty() {
                *self = cooldown.map_or(RegenState::Idle, RegenState::Cooldown);
            }
        }
    }
}
