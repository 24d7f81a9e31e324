//! Volley construction: aim, crit roll, multishot fan.
//!
//! These are pure functions over the loadout; the player system spawns whatever
//! they return.

use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::common::rng::SimRng;
use crate::common::tunables::Tunables;
use crate::plugins::projectiles::{Element, Projectile};

use super::loadout::Loadout;

/// Damage scale applied to plain multishot extras.
pub const MULTI_SHOT_DAMAGE_FACTOR: f32 = 0.7;
/// Damage scale of element auto-casts.
pub const AUTO_CAST_DAMAGE_SCALE: f32 = 0.85;

/// Unit aim direction on the X/Z plane, or `None` when the target sits on top of us.
pub fn aim_direction(origin: Vec3, target: Vec3) -> Option<Vec3> {
    let d = (target - origin).with_y(0.0);
    if d.length_squared() == 0.0 {
        return None;
    }
    Some(d.normalize())
}

/// Rotate a ground-plane direction by `angle` radians about the vertical axis.
pub fn rotate_horizontal(direction: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(
        direction.x * c - direction.z * s,
        0.0,
        direction.x * s + direction.z * c,
    )
    .normalize_or_zero()
}

/// Directions of the `extra` projectiles spread evenly around the primary.
pub fn fan(direction: Vec3, extra: u32) -> impl Iterator<Item = Vec3> {
    let step = TAU / (extra + 1) as f32;
    (1..=extra).map(move |i| rotate_horizontal(direction, step * i as f32))
}

fn roll_crit(damage: f32, loadout: &Loadout, rng: &mut SimRng) -> f32 {
    if rng.chance(loadout.crit_chance) {
        damage * loadout.crit_multiplier
    } else {
        damage
    }
}

/// A plain shot: one primary projectile plus `multi_shot_count` weaker extras.
pub fn plain_volley(
    loadout: &Loadout,
    origin: Vec3,
    target: Vec3,
    tunables: &Tunables,
    rng: &mut SimRng,
) -> Vec<Projectile> {
    let Some(direction) = aim_direction(origin, target) else {
        debug!("shot skipped: target on top of the player");
        return Vec::new();
    };
    let damage = roll_crit(loadout.projectile_damage, loadout, rng);
    let modifiers = loadout.projectile_modifiers();
    let shot = |dir: Vec3, damage: f32| {
        Projectile::new(dir, tunables.projectile_speed, damage, tunables.projectile_lifetime)
            .with_modifiers(modifiers)
    };

    std::iter::once(shot(direction, damage))
        .chain(fan(direction, loadout.multi_shot_count).map(|d| shot(d, damage * MULTI_SHOT_DAMAGE_FACTOR)))
        .collect()
}

/// An elemental shot. Extras share the primary's damage and payload.
pub fn elemental_volley(
    loadout: &Loadout,
    origin: Vec3,
    target: Vec3,
    element: Element,
    damage_scale: f32,
    tunables: &Tunables,
    rng: &mut SimRng,
) -> Vec<Projectile> {
    let Some(direction) = aim_direction(origin, target) else {
        debug!(?element, "elemental shot skipped: target on top of the player");
        return Vec::new();
    };
    let damage = roll_crit(loadout.projectile_damage * damage_scale, loadout, rng);
    let modifiers = loadout.projectile_modifiers();
    let payload = loadout.payload_for(element);
    let shot = |dir: Vec3| {
        Projectile::new(
            dir,
            tunables.elemental_projectile_speed,
            damage,
            tunables.projectile_lifetime,
        )
        .with_element(element)
        .with_modifiers(modifiers)
        .with_payload(payload)
    };

    std::iter::once(shot(direction))
        .chain(fan(direction, loadout.multi_shot_count).map(shot))
        .collect()
}
