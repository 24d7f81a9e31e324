//! Enemies plugin: the four enemy variants, their chase AI, status ticks and the
//! wave spawner.
//!
//! ---------------------------
//! HOW THIS IS DESIGNED (ECS)
//! ---------------------------
//! Variants differ only by numbers, so there is one `Enemy` component carrying
//! speed and contact damage; the variant itself lives in `EntityKind::Enemy(..)`.
//! `Health`, `StatusEffects` and `EnemyLifeState` describe gameplay truth.
//!
//! Damage can land from three places: projectile hits (collision), lightning
//! strikes (player) and burn ticks (here). Only the collision pass credits kills,
//! so a death outside it parks the enemy in `EnemyLifeState::Slain`:
//!
//! ```text
//! Alive --(hit in collision)-------------------> Dead  (credited immediately)
//! Alive --(burn tick / lightning)--> Slain --(next collision pass)--> Dead
//! Alive --(touches player)---------------------> Dead  (no credit)
//! ```

use bevy::prelude::*;

use crate::plugins::player::Player;
use crate::plugins::registry::{Active, Appearance, EnemyVariant, EntityKind, Position, Shape, GROUND_Y};
use crate::plugins::session::SimSet;

pub mod spawn;
pub mod status;

pub use spawn::{EnemyStats, SpawnDirector};
pub use status::StatusEffects;

/// Below this horizontal distance an enemy stops steering toward the player.
const ARRIVAL_EPSILON: f32 = 0.001;
const BOSS_SPIN_RATE: f32 = 0.5;

// -----------------------------------------------------------------------------
// Components
// -----------------------------------------------------------------------------

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Enemy {
    pub speed: f32,
    pub contact_damage: f32,
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }
}

/// Enemy lifecycle state machine (see module docs).
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnemyLifeState {
    #[default]
    Alive,
    Slain,
    Dead,
}

/// Cosmetic rotation; only bosses carry it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Spin {
    pub angle: f32,
}

impl EnemyVariant {
    pub fn appearance(self) -> Appearance {
        match self {
            EnemyVariant::Standard => {
                Appearance::new(Shape::Dodecahedron, Color::srgb_u8(0xe6, 0x7e, 0x22), 0.7)
            }
            EnemyVariant::Fast => Appearance::new(Shape::Cone, Color::srgb_u8(0xf3, 0x9c, 0x12), 0.4),
            EnemyVariant::Tank => Appearance::new(Shape::Cube, Color::srgb_u8(0xc0, 0x39, 0x2b), 0.45),
            EnemyVariant::Boss => {
                Appearance::new(Shape::Octahedron, Color::srgb_u8(0x8b, 0x00, 0x00), 1.2)
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Plugin wiring
// -----------------------------------------------------------------------------

pub fn plugin(app: &mut App) {
    app.init_resource::<SpawnDirector>();
    app.add_systems(FixedUpdate, spawn::spawn_waves.in_set(SimSet::Spawn));
    app.add_systems(FixedUpdate, pursue_player.in_set(SimSet::Entities));
}

// -----------------------------------------------------------------------------
// Spawn + damage rules
// -----------------------------------------------------------------------------

pub fn spawn_enemy(commands: &mut Commands, stats: EnemyStats, at: Vec3) -> Entity {
    let mut e = commands.spawn((
        Name::new(EntityKind::Enemy(stats.variant).label()),
        EntityKind::Enemy(stats.variant),
        Enemy {
            speed: stats.speed,
            contact_damage: stats.contact_damage,
        },
        Health::new(stats.health),
        StatusEffects::default(),
        EnemyLifeState::Alive,
        Position(at.with_y(GROUND_Y)),
        Active(true),
        stats.variant.appearance(),
    ));
    if stats.variant == EnemyVariant::Boss {
        e.insert(Spin::default());
    }
    e.id()
}

/// Subtract `amount`; the enemy goes inactive once health reaches zero.
///
/// Returns true only for the hit that took it out.
pub fn damage_enemy(health: &mut Health, active: &mut Active, amount: f32) -> bool {
    health.current -= amount;
    if health.is_depleted() && active.is_active() {
        active.deactivate();
        return true;
    }
    false
}

// -----------------------------------------------------------------------------
// Rules: chase + status ticks
// -----------------------------------------------------------------------------

/// Step toward the player, then tick statuses. Burn deaths become `Slain`.
pub fn pursue_player(
    time: Res<Time>,
    q_player: Query<(&Player, &Position), Without<Enemy>>,
    mut q: Query<
        (
            &Enemy,
            &mut Position,
            &mut Health,
            &mut StatusEffects,
            &mut Active,
            &mut EnemyLifeState,
            Option<&mut Spin>,
        ),
        Without<Player>,
    >,
) {
    let Ok((player, player_pos)) = q_player.single() else {
        return;
    };
    if !player.is_alive() {
        return;
    }
    let dt = time.delta_secs();

    for (enemy, mut pos, mut health, mut status, mut active, mut life, spin) in &mut q {
        if !active.is_active() {
            continue;
        }

        let to_player = pos.horizontal_offset_to(player_pos.0);
        let dist = to_player.length();
        if dist > ARRIVAL_EPSILON {
            let step = enemy.speed * status.speed_multiplier() * dt;
            pos.0 += to_player / dist * step;
        }
        pos.y = GROUND_Y;

        let burn = status.tick(dt);
        if burn > 0.0 && damage_enemy(&mut health, &mut active, burn) {
            *life = EnemyLifeState::Slain;
        }

        if let Some(mut spin) = spin {
            spin.angle += BOSS_SPIN_RATE * dt;
        }
    }
}

#[cfg(test)]
mod tests;
