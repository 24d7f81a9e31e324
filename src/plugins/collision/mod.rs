//! Collision resolution.
//!
//! Runs once per tick, after spawning and before entities move. Skipped entirely
//! while the player is dead. Passes, strictly in order:
//!
//! ```text
//! 0. pending kills   Slain enemies (burn / lightning deaths) get credited
//! 1. contact         enemy within reach hurts the player and is consumed
//! 2. projectile hits damage, payload, chain, knockback, pierce, credit
//! 3. xp pickup       orbs within pickup radius feed the level-up queue
//! ```
//!
//! A player death during pass 1 fires the session-over latch and ends the
//! resolution for this tick.

use bevy::prelude::*;

use crate::common::rng::SimRng;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::enemies::{damage_enemy, Enemy, EnemyLifeState, Health, StatusEffects};
use crate::plugins::pickups::{spawn_xp_orb, XpOrb};
use crate::plugins::player::{ChainLightning, Player};
use crate::plugins::progression::LevelUpQueue;
use crate::plugins::projectiles::{spawn_projectile, Payload, Projectile};
use crate::plugins::registry::{Active, Position};
use crate::plugins::session::{SessionLatch, SessionOver, SimSet};

pub mod chain;

use chain::plan_chain;

/// Base XP of a kill; a random 0..=4 is added on top.
const KILL_XP_BASE: u32 = 6;
const KILL_XP_SPREAD: u32 = 5;
const KNOCKBACK_SCALE: f32 = 0.5;

pub fn plugin(app: &mut App) {
    app.add_systems(FixedUpdate, resolve_collisions.in_set(SimSet::Collision));
}

type Enemies<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static Enemy,
        &'static mut Position,
        &'static mut Health,
        &'static mut StatusEffects,
        &'static mut Active,
        &'static mut EnemyLifeState,
    ),
    Without<Player>,
>;

type Projectiles<'w, 's> =
    Query<'w, 's, (&'static mut Projectile, &'static Position, &'static mut Active), Without<Enemy>>;

type Orbs<'w, 's> = Query<
    'w,
    's,
    (&'static XpOrb, &'static Position, &'static mut Active),
    (Without<Enemy>, Without<Projectile>),
>;

/// Everything a credited kill touches.
struct KillLedger<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    rng: &'a mut SimRng,
    player: &'a mut Player,
}

impl KillLedger<'_, '_, '_> {
    /// Credit a kill: mark the enemy dead, count it, life-steal, drop an orb.
    fn enemy_killed(&mut self, at: Vec3, active: &mut Active, life: &mut EnemyLifeState) {
        active.deactivate();
        *life = EnemyLifeState::Dead;
        self.player.kills += 1;

        if self.player.loadout.life_steal > 0.0 {
            self.player.heal(self.player.loadout.life_steal);
        }

        let value = KILL_XP_BASE + self.rng.below(KILL_XP_SPREAD);
        let bob_phase = self.rng.angle();
        spawn_xp_orb(self.commands, at, value, bob_phase);
    }
}

#[allow(clippy::too_many_arguments)]
pub fn resolve_collisions(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut rng: ResMut<SimRng>,
    mut level_ups: ResMut<LevelUpQueue>,
    mut latch: ResMut<SessionLatch>,
    mut session_over: MessageWriter<SessionOver>,
    mut next_state: ResMut<NextState<GameState>>,
    mut q_player: Query<(&mut Player, &Position), Without<Enemy>>,
    mut q_enemies: Enemies,
    mut q_projectiles: Projectiles,
    mut q_orbs: Orbs,
) {
    let Ok((mut player, player_pos)) = q_player.single_mut() else {
        return;
    };
    if !player.is_alive() {
        return;
    }
    let player_at = player_pos.0;

    let mut ledger = KillLedger {
        commands: &mut commands,
        rng: &mut rng,
        player: &mut player,
    };

    credit_pending_kills(&mut ledger, &mut q_enemies);

    if resolve_contact(ledger.player, player_at, tunables.contact_distance, &mut q_enemies) {
        if latch.trigger() {
            let over = SessionOver {
                level: ledger.player.level,
                kills: ledger.player.kills,
            };
            info!(level = over.level, kills = over.kills, "player died, session over");
            session_over.write(over);
            next_state.set(GameState::GameOver);
        }
        return;
    }

    resolve_projectile_hits(&mut ledger, &mut q_projectiles, &mut q_enemies);

    let gained = collect_orbs(ledger.player, player_at, &mut q_orbs);
    if gained > 0 {
        level_ups.pending += gained;
        info!(level = ledger.player.level, gained, "level up");
    }
}

/// Pass 0.
fn credit_pending_kills(ledger: &mut KillLedger, q_enemies: &mut Enemies) {
    for (_, _, pos, _, _, mut active, mut life) in q_enemies.iter_mut() {
        if *life == EnemyLifeState::Slain {
            ledger.enemy_killed(pos.0, &mut active, &mut life);
        }
    }
}

/// Pass 1. Returns true if the player died.
fn resolve_contact(
    player: &mut Player,
    player_at: Vec3,
    reach: f32,
    q_enemies: &mut Enemies,
) -> bool {
    for (_, enemy, pos, _, _, mut active, mut life) in q_enemies.iter_mut() {
        if !active.is_active() || pos.distance(player_at) >= reach {
            continue;
        }
        player.apply_damage(enemy.contact_damage);
        active.deactivate();
        *life = EnemyLifeState::Dead;
        if !player.is_alive() {
            return true;
        }
    }
    false
}

/// Pass 2.
fn resolve_projectile_hits(
    ledger: &mut KillLedger,
    q_projectiles: &mut Projectiles,
    q_enemies: &mut Enemies,
) {
    let chain = ledger.player.loadout.chain;
    let roster: Vec<Entity> = q_enemies
        .iter()
        .filter(|(.., active, _)| active.is_active())
        .map(|(e, ..)| e)
        .collect();

    for (mut projectile, proj_pos, mut proj_active) in q_projectiles.iter_mut() {
        if projectile.cosmetic || !proj_active.is_active() {
            continue;
        }
        let proj_at = proj_pos.0;

        for &target in &roster {
            let Some(struck_at) = strike(&projectile, proj_at, target, q_enemies) else {
                continue;
            };

            if let Some(chain) = chain {
                let hop_damage = projectile.damage * chain.damage_multiplier;
                chain_lightning(ledger, target, struck_at, hop_damage, chain, q_enemies);
            }

            if projectile.modifiers.piercing {
                projectile.record_hit(target);
            } else {
                proj_active.deactivate();
            }

            finish_hit(ledger, target, proj_at, projectile.modifiers.knockback, q_enemies);

            if !proj_active.is_active() {
                break;
            }
        }
    }
}

/// Test the projectile against one enemy; on a hit apply damage and payload and
/// return the enemy's position.
fn strike(projectile: &Projectile, proj_at: Vec3, target: Entity, q_enemies: &mut Enemies) -> Option<Vec3> {
    let Ok((_, _, pos, mut health, mut status, mut active, _)) = q_enemies.get_mut(target) else {
        return None;
    };
    if !active.is_active() {
        return None;
    }
    if projectile.modifiers.piercing && projectile.has_hit(target) {
        return None;
    }
    if pos.distance(proj_at) >= projectile.hit_radius() {
        return None;
    }

    damage_enemy(&mut health, &mut active, projectile.damage);
    match projectile.payload {
        Some(Payload::Burn { dps, duration }) => status.apply_burn(dps, duration),
        Some(Payload::Slow { factor, duration }) => status.apply_slow(factor, duration),
        None => {}
    }
    Some(pos.0)
}

/// Knockback, then credit the kill if the hit was lethal.
fn finish_hit(
    ledger: &mut KillLedger,
    target: Entity,
    proj_at: Vec3,
    knockback: Option<f32>,
    q_enemies: &mut Enemies,
) {
    let Ok((_, _, mut pos, health, _, mut active, mut life)) = q_enemies.get_mut(target) else {
        return;
    };
    if let Some(force) = knockback {
        let away = (pos.0 - proj_at).with_y(0.0).normalize_or_zero();
        pos.0 += away * force * KNOCKBACK_SCALE;
    }
    if health.is_depleted() && *life != EnemyLifeState::Dead {
        ledger.enemy_killed(pos.0, &mut active, &mut life);
    }
}

fn chain_lightning(
    ledger: &mut KillLedger,
    start: Entity,
    start_at: Vec3,
    hop_damage: f32,
    chain: ChainLightning,
    q_enemies: &mut Enemies,
) {
    let candidates: Vec<(Entity, Vec3)> = q_enemies
        .iter()
        .filter(|(.., active, _)| active.is_active())
        .map(|(e, _, pos, ..)| (e, pos.0))
        .collect();

    for hop in plan_chain(start, start_at, &candidates, chain) {
        spawn_projectile(ledger.commands, Projectile::chain_link(hop.to - hop.from), hop.from);

        let Ok((_, _, pos, mut health, _, mut active, mut life)) = q_enemies.get_mut(hop.target) else {
            continue;
        };
        if damage_enemy(&mut health, &mut active, hop_damage) {
            ledger.enemy_killed(pos.0, &mut active, &mut life);
        }
    }
}

/// Pass 3. Returns the number of levels gained.
fn collect_orbs(player: &mut Player, player_at: Vec3, q_orbs: &mut Orbs) -> u32 {
    let mut gained = 0;
    for (orb, pos, mut active) in q_orbs.iter_mut() {
        if !active.is_active() || pos.distance(player_at) >= player.loadout.pickup_radius {
            continue;
        }
        active.deactivate();
        gained += player.gain_xp(orb.value);
    }
    gained
}
