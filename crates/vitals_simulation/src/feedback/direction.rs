//! Damage direction — откуда пришёл урон относительно взгляда defender'а
//!
//! Чистая геометрия: health values не трогает.

use bevy::prelude::*;

/// Screen-relative направление атаки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum DamageDirection {
    Forward,
    Right,
    Left,
    Backward,
}

/// Signed угол (градусы) от facing к атакующему вокруг +Y, в горизонтальной плоскости
///
/// Положительный = против часовой стрелки при взгляде сверху (атакующий слева).
pub fn signed_horizontal_angle(defender_position: Vec3, defender_facing: Vec3, attacker_position: Vec3) -> f32 {
    let facing = Vec3::new(defender_facing.x, 0.0, defender_facing.z).normalize_or_zero();
    let to_attacker = attacker_position - defender_position;
    let to_attacker = Vec3::new(to_attacker.x, 0.0, to_attacker.z).normalize_or_zero();

    let sin = Vec3::Y.dot(facing.cross(to_attacker));
    let cos = facing.dot(to_attacker);
    sin.atan2(cos).to_degrees()
}

/// Квадранты: Forward (-45°, 45°], Right (-135°, -45°], Left (45°, 135°], иначе Backward
///
/// Атакующий в той же точке (нулевой вектор) → 0° → Forward.
pub fn determine_damage_direction(
    defender_position: Vec3,
    defender_facing: Vec3,
    attacker_position: Vec3,
) -> DamageDirection {
    let angle = signed_horizontal_angle(defender_position, defender_facing, attacker_position);
    classify_angle(angle)
}

/// То же для Bevy Transforms (facing = `Transform::forward()`, т.е. -Z)
pub fn direction_between(defender: &Transform, attacker: &Transform) -> DamageDirection {
    determine_damage_direction(defender.translation, *defender.forward(), attacker.translation)
}

pub fn classify_angle(angle: f32) -> DamageDirection {
    if angle <= 45.0 && angle > -45.0 {
        DamageDirection::Forward
    } else if angle <= -45.0 && angle > -135.0 {
        DamageDirection::Right
    } else if angle <= 135.0 && angle > 45.0 {
        DamageDirection::Left
    } else {
        DamageDirection::Backward
    }
}
