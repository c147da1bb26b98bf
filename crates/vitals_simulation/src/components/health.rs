//! Health record: current/max health + baseline regen параметры

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::regen::RegenState;

/// Здоровье entity
///
/// Инвариант: 0 ≤ current ≤ max, max > 0
///
/// Мутируется только regen authority (`health::authority`) — в ответ на
/// `HealthRequest` события и periodic regen tick.
/// Автоматически добавляет `RegenState` (Idle) через Required Components.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[require(RegenState)]
pub struct Health {
    pub current: u32,
    pub max: u32,
    /// Baseline regen (units per regen tick), работает вне cool-down
    pub regen_rate: i32,
    /// Секунды без урона, после которых baseline regen возобновляется
    pub wait_before_regen: f32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100) // Default 100 HP
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        let max = max.max(1);
        Self {
            current: max,
            max,
            regen_rate: 1,
            wait_before_regen: 5.0,
        }
    }

    /// Builder: baseline regen rate + cool-down после урона
    pub fn with_regen(mut self, regen_rate: i32, wait_before_regen: f32) -> Self {
        self.regen_rate = regen_rate;
        self.wait_before_regen = wait_before_regen;
        self
    }

    /// Builder: стартовое здоровье (clamped к max)
    pub fn with_current(mut self, current: u32) -> Self {
        self.current = current.min(self.max);
        self
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// Возвращает фактически снятое количество
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_sub(amount);
        before - self.current
    }

    /// Возвращает фактически добавленное количество (0 если уже full)
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_add(amount).min(self.max);
        self.current - before
    }

    pub fn restore_full(&mut self) {
        self.current = self.max;
    }

    /// Signed delta (regen tick). Clamp в [0, max], возвращает фактический delta.
    pub fn apply_delta(&mut self, delta: i32) -> i32 {
        let before = self.current as i64;
        let after = (before + delta as i64).clamp(0, self.max as i64);
        self.current = after as u32;
        (after - before) as i32
    }

    /// Есть ли куда двигаться baseline regen'у с данным знаком rate
    pub fn has_room_for(&self, rate: i32) -> bool {
        match rate.signum() {
            1 => self.current < self.max,
            -1 => self.current > 0,
            _ => false,
        }
    }
}

/// Компонент-маркер: entity мертв (Health == 0)
///
/// Вставляется когда урон опускает health до 0, снимается при любом
/// восстановлении health выше 0. Деспавн не автоматический.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Dead;
