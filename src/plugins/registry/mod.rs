//! Entity registry: the components every simulation entity carries, and the
//! end-of-frame prune.
//!
//! The `World` owns all simulation entities. Each one has:
//! - `Position`: arena-space 3D position, Y pinned to a per-kind ground height.
//! - `Active`: cleared when the entity should leave the simulation.
//! - `EntityKind`: tagged discriminant, so systems dispatch with a `match`
//!   instead of probing for marker components.
//! - `Appearance`: what the rendering collaborator should draw.
//!
//! Inactive entities are never despawned mid-frame; `prune_inactive` runs last
//! in the simulation chain.

use bevy::prelude::*;

use crate::plugins::enemies::EnemyLifeState;

/// Ground height for the player, enemies and projectiles.
pub const GROUND_Y: f32 = 0.5;
/// Resting height for XP orbs (before bobbing).
pub const ORB_GROUND_Y: f32 = 0.3;

// -----------------------------------------------------------------------------
// Components
// -----------------------------------------------------------------------------

#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Deref, DerefMut)]
pub struct Position(pub Vec3);

impl Position {
    /// Offset from `self` to `other` on the X/Z plane.
    #[inline]
    pub fn horizontal_offset_to(&self, other: Vec3) -> Vec3 {
        let mut d = other - self.0;
        d.y = 0.0;
        d
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Active(pub bool);

impl Default for Active {
    fn default() -> Self {
        Self(true)
    }
}

impl Active {
    #[inline]
    pub fn is_active(self) -> bool {
        self.0
    }

    #[inline]
    pub fn deactivate(&mut self) {
        self.0 = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyVariant {
    Standard,
    Fast,
    Tank,
    Boss,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Enemy(EnemyVariant),
    Projectile,
    XpOrb,
}

impl EntityKind {
    /// Whether the entity has a health pool that combat can reduce.
    pub fn is_damageable(self) -> bool {
        match self {
            EntityKind::Player | EntityKind::Enemy(_) => true,
            EntityKind::Projectile | EntityKind::XpOrb => false,
        }
    }

    /// Whether the player's weapons should target it.
    pub fn is_enemy_faction(self) -> bool {
        matches!(self, EntityKind::Enemy(_))
    }

    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Player => "player",
            EntityKind::Enemy(EnemyVariant::Standard) => "standard enemy",
            EntityKind::Enemy(EnemyVariant::Fast) => "fast enemy",
            EntityKind::Enemy(EnemyVariant::Tank) => "tank enemy",
            EntityKind::Enemy(EnemyVariant::Boss) => "boss",
            EntityKind::Projectile => "projectile",
            EntityKind::XpOrb => "xp orb",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Sphere,
    Dodecahedron,
    Cone,
    Cube,
    Octahedron,
    Icosahedron,
}

/// Visual description handed to the rendering collaborator.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub shape: Shape,
    pub color: Color,
    /// Arena units.
    pub radius: f32,
}

impl Appearance {
    pub const fn new(shape: Shape, color: Color, radius: f32) -> Self {
        Self {
            shape,
            color,
            radius,
        }
    }
}

// -----------------------------------------------------------------------------
// Prune
// -----------------------------------------------------------------------------

/// Despawn every inactive entity.
///
/// Enemies killed outside collision resolution stay around as `Slain` until the
/// next collision pass has credited the kill.
pub fn prune_inactive(
    mut commands: Commands,
    q: Query<(Entity, &EntityKind, &Active, Option<&EnemyLifeState>)>,
) {
    let mut pruned = 0usize;
    for (entity, kind, active, life) in &q {
        if active.is_active() || matches!(life, Some(EnemyLifeState::Slain)) {
            continue;
        }
        if matches!(kind, EntityKind::Player) {
            continue;
        }
        commands.entity(entity).despawn();
        pruned += 1;
    }
    if pruned > 0 {
        trace!(pruned, "pruned inactive entities");
    }
}
