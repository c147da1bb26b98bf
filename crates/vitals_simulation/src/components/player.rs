//! Player control marker component
//!
//! Отмечает entity которым управляет игрок. Damage feedback (direction
//! indicator, major damage overlay) показывается только для player entities.

use bevy::prelude::Component;

/// Marker component для player-controlled entity
///
/// # Архитектурная заметка
/// - `present_damage_feedback` использует `With<Player>` filter
/// - Regen authority игнорирует этот marker: health/regen одинаковы для всех
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;
