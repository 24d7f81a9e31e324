//! Tunable gameplay constants.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    /// Render scale: screen pixels per arena unit.
    pub pixels_per_unit: f32,
    /// The player is clamped to `[-arena_half_extent, arena_half_extent]` on X and Z.
    pub arena_half_extent: f32,
    /// Enemy-to-player distance that counts as contact.
    pub contact_distance: f32,
    pub projectile_speed: f32,
    pub elemental_projectile_speed: f32,
    pub projectile_lifetime: f32,
    /// Seconds between element auto-casts.
    pub auto_cast_cooldown: f32,
    /// Number of upgrades offered per level.
    pub upgrade_choices: usize,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_unit: 20.0,
            arena_half_extent: 24.0,
            contact_distance: 1.0,
            projectile_speed: 26.0,
            elemental_projectile_speed: 24.0,
            projectile_lifetime: 1.8,
            auto_cast_cooldown: 3.5,
            upgrade_choices: 3,
        }
    }
}
