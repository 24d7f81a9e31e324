//! Projectiles plugin: straight-line shots with a lifetime.
//!
//! Projectiles are spawned by the player (shots, auto-casts, lightning markers)
//! and by collision resolution (chain links). They only move here; hits are
//! resolved in the collision stage of the *next* tick, so a fresh projectile is
//! tested from its muzzle position first.

use bevy::prelude::*;

use crate::plugins::registry::{Active, EntityKind, Position, GROUND_Y};
use crate::plugins::session::SimSet;

pub mod components;

pub use components::{AreaOfEffect, Element, Modifiers, Payload, Projectile};

pub fn plugin(app: &mut App) {
    app.add_systems(FixedUpdate, advance_projectiles.in_set(SimSet::Entities));
}

pub fn spawn_projectile(commands: &mut Commands, projectile: Projectile, origin: Vec3) -> Entity {
    let appearance = projectile.appearance();
    commands
        .spawn((
            Name::new("Projectile"),
            EntityKind::Projectile,
            Position(origin.with_y(GROUND_Y)),
            Active(true),
            appearance,
            projectile,
        ))
        .id()
}

impl Projectile {
    /// Age the projectile and move it. Returns false once it has expired.
    pub fn advance(&mut self, position: &mut Vec3, dt: f32) -> bool {
        self.age += dt;
        if self.age >= self.lifetime {
            return false;
        }
        *position += self.direction() * self.speed * dt;
        position.y = GROUND_Y;
        true
    }
}

pub fn advance_projectiles(
    time: Res<Time>,
    mut q: Query<(&mut Projectile, &mut Position, &mut Active)>,
) {
    let dt = time.delta_secs();
    for (mut projectile, mut pos, mut active) in &mut q {
        if !active.is_active() {
            continue;
        }
        if !projectile.advance(&mut pos.0, dt) {
            active.deactivate();
        }
    }
}
