//! Health events: входящие requests + исходящие notifications
//!
//! Architecture: один enum `HealthRequest` для всех входящих операций,
//! чтобы authority обрабатывала их строго в порядке поступления
//! (damage → deactivate в одном кадре ≠ deactivate → damage).

use bevy::prelude::*;

/// Входящие запросы к regen authority
///
/// Отправляются gameplay системами (combat, consumables, respawn).
/// Target без `Health` → no-op.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum HealthRequest {
    /// Мгновенный урон + рестарт cool-down baseline regen
    DoDamage {
        target: Entity,
        amount: u32,
        instigator: Option<Entity>,
        /// Тип урона (fire, fall, ...) — на этом слое игнорируется
        damage_type: Option<String>,
    },

    /// Мгновенное лечение (clamped к max)
    Heal {
        target: Entity,
        amount: u32,
        instigator: Option<Entity>,
    },

    /// Named timed regen/degen source (тот же id → replace)
    ActivateRegen {
        target: Entity,
        id: String,
        /// Signed units per regen tick
        value: i32,
        duration_secs: f32,
    },

    /// Снять source по id (отсутствующий id → no-op)
    DeactivateRegen { target: Entity, id: String },

    /// current = max, ledger не трогается
    RestoreFullHealth {
        target: Entity,
        instigator: Option<Entity>,
    },
}

impl HealthRequest {
    pub fn damage(target: Entity, amount: u32) -> Self {
        HealthRequest::DoDamage {
            target,
            amount,
            instigator: None,
            damage_type: None,
        }
    }

    pub fn damage_from(target: Entity, amount: u32, instigator: Entity) -> Self {
        HealthRequest::DoDamage {
            target,
            amount,
            instigator: Some(instigator),
            damage_type: None,
        }
    }

    pub fn heal(target: Entity, amount: u32) -> Self {
        HealthRequest::Heal {
            target,
            amount,
            instigator: None,
        }
    }

    pub fn activate_regen(target: Entity, id: impl Into<String>, value: i32, duration_secs: f32) -> Self {
        HealthRequest::ActivateRegen {
            target,
            id: id.into(),
            value,
            duration_secs,
        }
    }

    pub fn deactivate_regen(target: Entity, id: impl Into<String>) -> Self {
        HealthRequest::DeactivateRegen {
            target,
            id: id.into(),
        }
    }

    /// Deactivate baseline regen (`BASE_REGEN_ID`)
    pub fn deactivate_base_regen(target: Entity) -> Self {
        Self::deactivate_regen(target, super::authority::BASE_REGEN_ID)
    }

    pub fn restore_full_health(target: Entity, instigator: Option<Entity>) -> Self {
        HealthRequest::RestoreFullHealth { target, instigator }
    }

    pub fn target(&self) -> Entity {
        match self {
            HealthRequest::DoDamage { target, .. }
            | HealthRequest::Heal { target, .. }
            | HealthRequest::ActivateRegen { target, .. }
            | HealthRequest::DeactivateRegen { target, .. }
            | HealthRequest::RestoreFullHealth { target, .. } => *target,
        }
    }
}

/// Событие: entity получил урон (instant damage или degen tick)
///
/// Используется для UI (direction indicator, major damage overlay), звуков.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct Damaged {
    pub entity: Entity,
    pub amount: u32,
    /// None для regen tick (self-inflicted degeneration)
    pub instigator: Option<Entity>,
    pub resulting_health: u32,
}

/// Событие: entity вылечен (instant heal или regen tick)
///
/// `delta` = фактически применённое (0 если уже был full).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct Healed {
    pub entity: Entity,
    pub delta: u32,
    pub resulting_health: u32,
}

/// Событие: health восстановлен до max (RestoreFullHealth)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct FullyHealed {
    pub entity: Entity,
    pub instigator: Option<Entity>,
}

/// Событие: health упал до 0
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct Died {
    pub entity: Entity,
    pub killer: Option<Entity>,
}
