//! Regen clock — edge-triggered tick по целым интервалам fixed time
//!
//! # Почему не timer += delta?
//!
//! - **Детерминизм:** индекс интервала = elapsed / interval (целочисленно, Duration)
//! - **Точность:** не дрейфует, в отличие от накопления f32 delta
//! - Один tick на интервал, даже если FixedUpdate прогнал несколько шагов

use std::time::Duration;

use bevy::prelude::*;

/// Default период regen tick (1 секунда game time)
pub const DEFAULT_REGEN_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Глобальные часы regen authority
#[derive(Resource, Debug, Clone)]
pub struct RegenClock {
    tick_interval: Duration,
    /// Индекс последнего обработанного интервала
    last_tick: u64,
    /// Счётчик выполненных ticks (для логов/тестов)
    pub ticks: u64,
}

impl Default for RegenClock {
    fn default() -> Self {
        Self::new(DEFAULT_REGEN_TICK_INTERVAL)
    }
}

impl RegenClock {
    pub fn new(tick_interval: Duration) -> Self {
        // Нулевой интервал → деление на 0; минимум 1 ms
        let tick_interval = tick_interval.max(Duration::from_millis(1));
        Self {
            tick_interval,
            last_tick: 0,
            ticks: 0,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Возвращает `Some(now)` если elapsed пересёк новую границу интервала
    pub fn advance(&mut self, elapsed: Duration) -> Option<f32> {
        let index = (elapsed.as_nanos() / self.tick_interval.as_nanos()) as u64;
        if index <= self.last_tick {
            return None;
        }

        self.last_tick = index;
        self.ticks += 1;
        Some(elapsed.as_secs_f32())
    }
}
