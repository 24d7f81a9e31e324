//! Wave clock and enemy spawning.
//!
//! ```text
//! elapsed += dt, timer += dt
//! timer >= interval  -> timer = 0, spawn a batch at the current wave
//! interval = max(0.45, 1.2 - wave * 0.05)
//! elapsed > wave * 18 -> wave += 1
//! ```

use bevy::prelude::*;

use crate::common::rng::SimRng;
use crate::plugins::registry::{Active, EnemyVariant, EntityKind, GROUND_Y};

use super::spawn_enemy;

pub const WAVE_DURATION_SECONDS: f32 = 18.0;
pub const BASE_SPAWN_INTERVAL: f32 = 1.2;
pub const MIN_SPAWN_INTERVAL: f32 = 0.45;
pub const SPAWN_INTERVAL_STEP: f32 = 0.05;
pub const POPULATION_CAP: usize = 80;
pub const SPAWN_RADIUS_VARIANCE: f32 = 8.0;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SpawnDirector {
    pub wave: u32,
    pub elapsed: f32,
    pub spawn_timer: f32,
    pub spawn_interval: f32,
}

impl Default for SpawnDirector {
    fn default() -> Self {
        Self {
            wave: 1,
            elapsed: 0.0,
            spawn_timer: 0.0,
            spawn_interval: BASE_SPAWN_INTERVAL,
        }
    }
}

impl SpawnDirector {
    /// Maximum number of live enemies for the current wave.
    pub fn population_cap(&self) -> usize {
        (12 + self.wave as usize * 4).min(POPULATION_CAP)
    }

    /// Enemies to spawn in one batch given the current live count.
    pub fn batch_size(&self, live: usize) -> usize {
        let slots = self.population_cap().saturating_sub(live);
        slots.min(2 + self.wave as usize / 2)
    }

    /// Advance both clocks. Returns true when a batch is due this tick.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        self.spawn_timer += dt;
        if self.spawn_timer >= self.spawn_interval {
            self.spawn_timer = 0.0;
            return true;
        }
        false
    }

    /// Recompute the spawn interval and roll the wave over when its time is up.
    /// Returns true on a wave advance.
    pub fn advance_wave(&mut self) -> bool {
        self.spawn_interval =
            (BASE_SPAWN_INTERVAL - self.wave as f32 * SPAWN_INTERVAL_STEP).max(MIN_SPAWN_INTERVAL);
        if self.elapsed > self.wave as f32 * WAVE_DURATION_SECONDS {
            self.wave += 1;
            return true;
        }
        false
    }
}

/// Per-spawn parameters for one enemy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub variant: EnemyVariant,
    pub speed: f32,
    pub health: f32,
    pub contact_damage: f32,
}

/// Variant ladder: boss, then tank, then fast, falling back to standard.
pub fn roll_variant(wave: u32, rng: &mut SimRng) -> EnemyVariant {
    if wave % 10 == 0 && rng.chance(0.15) {
        EnemyVariant::Boss
    } else if wave >= 5 && rng.chance(0.25) {
        EnemyVariant::Tank
    } else if wave >= 3 && rng.chance(0.30) {
        EnemyVariant::Fast
    } else {
        EnemyVariant::Standard
    }
}

pub fn stats_for(variant: EnemyVariant, wave: u32) -> EnemyStats {
    let w = wave as f32;
    let (speed, health, contact_damage) = match variant {
        EnemyVariant::Boss => (2.0 + 0.1 * w, 150.0 + 15.0 * w, 25.0 + 2.0 * w),
        EnemyVariant::Tank => (1.5 + 0.08 * w, 40.0 + 5.0 * w, 12.0 + 1.5 * w),
        EnemyVariant::Fast => (5.0 + 0.15 * w, 6.0 + w, 5.0 + 0.8 * w),
        EnemyVariant::Standard => (
            2.4 + 0.1 * w,
            14.0 + 2.0 * w + 3.0 * (wave / 5) as f32,
            8.0 + 1.1 * w + 2.0 * (wave / 8) as f32,
        ),
    };
    EnemyStats {
        variant,
        speed,
        health,
        contact_damage,
    }
}

/// A point on a jittered ring around the arena origin.
pub fn ring_position(wave: u32, rng: &mut SimRng) -> Vec3 {
    let angle = rng.angle();
    let radius = 26.0 + wave as f32 * 0.4 + (rng.unit() - 0.5) * SPAWN_RADIUS_VARIANCE;
    Vec3::new(angle.cos() * radius, GROUND_Y, angle.sin() * radius)
}

pub fn spawn_waves(
    mut commands: Commands,
    time: Res<Time>,
    mut director: ResMut<SpawnDirector>,
    mut rng: ResMut<SimRng>,
    q_kinds: Query<(&EntityKind, &Active)>,
) {
    if director.tick(time.delta_secs()) {
        let live = q_kinds
            .iter()
            .filter(|(kind, active)| kind.is_enemy_faction() && active.is_active())
            .count();
        let count = director.batch_size(live);
        let wave = director.wave;

        for _ in 0..count {
            let variant = roll_variant(wave, &mut rng);
            let at = ring_position(wave, &mut rng);
            spawn_enemy(&mut commands, stats_for(variant, wave), at);
        }
        if count > 0 {
            debug!(wave, count, live, "spawned enemy batch");
        }
    }

    if director.advance_wave() {
        info!(wave = director.wave, "wave advanced");
    }
}
