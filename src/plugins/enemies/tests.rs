//! Unit tests for the enemies module: status rules, spawn ladder and chase AI.

use bevy::prelude::*;

use super::spawn::*;
use super::*;
use crate::common::rng::SimRng;
use crate::common::test_utils::{run_system_once, set_delta};
use crate::plugins::player::Player;
use crate::plugins::registry::{Active, EnemyVariant, EntityKind, Position};

const EPS: f32 = 1e-4;

fn spawn_player_at(world: &mut World, at: Vec3) -> Entity {
    world
        .spawn((Player::default(), EntityKind::Player, Position(at), Active(true)))
        .id()
}

fn spawn_standard_at(world: &mut World, at: Vec3, health: f32) -> Entity {
    world
        .spawn((
            EntityKind::Enemy(EnemyVariant::Standard),
            Enemy {
                speed: 2.0,
                contact_damage: 8.0,
            },
            Health::new(health),
            StatusEffects::default(),
            EnemyLifeState::Alive,
            Position(at),
            Active(true),
        ))
        .id()
}

// -----------------------------------------------------------------------------
// StatusEffects
// -----------------------------------------------------------------------------

#[test]
fn slow_keeps_strongest_factor_and_longest_duration() {
    let mut s = StatusEffects::default();
    s.apply_slow(0.6, 2.5);
    s.apply_slow(0.8, 4.0);
    assert_eq!(s.slow_factor(), 0.6);
    assert_eq!(s.slow_remaining(), 4.0);
    assert_eq!(s.speed_multiplier(), 0.6);
}

#[test]
fn slow_with_no_duration_is_ignored() {
    let mut s = StatusEffects::default();
    s.apply_slow(0.2, 0.0);
    assert_eq!(s, StatusEffects::default());
    assert_eq!(s.speed_multiplier(), 1.0);
}

#[test]
fn slow_expires_and_resets_factor() {
    let mut s = StatusEffects::default();
    s.apply_slow(0.5, 0.25);
    s.tick(0.1);
    assert_eq!(s.speed_multiplier(), 0.5);
    s.tick(0.2);
    assert_eq!(s.slow_remaining(), 0.0);
    assert_eq!(s.slow_factor(), 1.0);
    assert_eq!(s.speed_multiplier(), 1.0);
}

#[test]
fn burn_ticks_damage_then_expires() {
    let mut s = StatusEffects::default();
    s.apply_burn(4.0, 3.0);

    let mut total = 0.0;
    for _ in 0..30 {
        total += s.tick(0.1);
    }
    assert!((total - 12.0).abs() < 1e-3, "total burn {total}");
    assert!(!s.is_burning());
    assert_eq!(s.burn_dps(), 0.0);
    assert_eq!(s.tick(0.1), 0.0);
}

#[test]
fn burn_never_weakens_and_ignores_non_positive_inputs() {
    let mut s = StatusEffects::default();
    s.apply_burn(5.5, 3.6);
    s.apply_burn(4.0, 1.0);
    assert_eq!(s.burn_dps(), 5.5);
    assert_eq!(s.burn_remaining(), 3.6);

    s.apply_burn(0.0, 10.0);
    s.apply_burn(10.0, -1.0);
    assert_eq!(s.burn_dps(), 5.5);
    assert_eq!(s.burn_remaining(), 3.6);
}

#[test]
fn expired_burn_does_not_linger_into_weaker_reapplication() {
    let mut s = StatusEffects::default();
    s.apply_burn(10.0, 0.1);
    s.tick(0.2);
    s.apply_burn(2.0, 1.0);
    assert_eq!(s.burn_dps(), 2.0);
}

// -----------------------------------------------------------------------------
// Damage
// -----------------------------------------------------------------------------

#[test]
fn damage_enemy_reports_only_the_killing_hit() {
    let mut health = Health::new(10.0);
    let mut active = Active(true);
    assert!(!damage_enemy(&mut health, &mut active, 4.0));
    assert!(active.is_active());
    assert!(damage_enemy(&mut health, &mut active, 6.0));
    assert!(!active.is_active());
    assert!(!damage_enemy(&mut health, &mut active, 6.0));
    assert!(health.current < 0.0);
}

// -----------------------------------------------------------------------------
// Spawn rules
// -----------------------------------------------------------------------------

#[test]
fn population_cap_and_batch_size_scale_with_wave() {
    let mut d = SpawnDirector::default();
    assert_eq!(d.population_cap(), 16);
    assert_eq!(d.batch_size(0), 2);
    assert_eq!(d.batch_size(15), 1);
    assert_eq!(d.batch_size(16), 0);
    assert_eq!(d.batch_size(40), 0);

    d.wave = 30;
    assert_eq!(d.population_cap(), 80);
    assert_eq!(d.batch_size(0), 17);
    assert_eq!(d.batch_size(75), 5);
}

#[test]
fn spawn_interval_shrinks_to_floor() {
    let mut d = SpawnDirector::default();
    d.advance_wave();
    assert!((d.spawn_interval - 1.15).abs() < EPS);

    d.wave = 40;
    d.advance_wave();
    assert_eq!(d.spawn_interval, MIN_SPAWN_INTERVAL);
}

#[test]
fn wave_advances_only_after_its_duration() {
    let mut d = SpawnDirector::default();
    d.elapsed = 18.0;
    assert!(!d.advance_wave());
    assert_eq!(d.wave, 1);

    d.elapsed = 18.01;
    assert!(d.advance_wave());
    assert_eq!(d.wave, 2);
    assert!(!d.advance_wave());
}

#[test]
fn first_batch_is_due_after_one_interval() {
    let mut d = SpawnDirector::default();
    assert!(!d.tick(1.0));
    assert!(d.tick(0.2));
    assert_eq!(d.spawn_timer, 0.0);
}

#[test]
fn variant_ladder_respects_wave_gates() {
    let mut rng = SimRng::seeded(11);
    for _ in 0..500 {
        assert_eq!(roll_variant(1, &mut rng), EnemyVariant::Standard);
        assert_eq!(roll_variant(2, &mut rng), EnemyVariant::Standard);
        let w3 = roll_variant(3, &mut rng);
        assert!(matches!(w3, EnemyVariant::Standard | EnemyVariant::Fast));
        assert_ne!(roll_variant(9, &mut rng), EnemyVariant::Boss);
    }

    let seen_boss = (0..500).any(|_| roll_variant(10, &mut rng) == EnemyVariant::Boss);
    assert!(seen_boss);
}

#[test]
fn stats_follow_wave_formulas() {
    let s = stats_for(EnemyVariant::Standard, 1);
    assert!((s.speed - 2.5).abs() < EPS);
    assert_eq!(s.health, 16.0);
    assert!((s.contact_damage - 9.1).abs() < EPS);

    let s = stats_for(EnemyVariant::Standard, 10);
    assert_eq!(s.health, 14.0 + 20.0 + 6.0);
    assert!((s.contact_damage - (8.0 + 11.0 + 2.0)).abs() < EPS);

    let b = stats_for(EnemyVariant::Boss, 10);
    assert_eq!(b.health, 300.0);
    assert_eq!(b.contact_damage, 45.0);
    assert!((b.speed - 3.0).abs() < EPS);

    let t = stats_for(EnemyVariant::Tank, 5);
    assert_eq!(t.health, 65.0);

    let f = stats_for(EnemyVariant::Fast, 3);
    assert_eq!(f.health, 9.0);
}

#[test]
fn ring_positions_sit_on_the_jittered_ring() {
    let mut rng = SimRng::seeded(5);
    for _ in 0..200 {
        let p = ring_position(1, &mut rng);
        let r = Vec2::new(p.x, p.z).length();
        assert!((22.4 - EPS..=30.4 + EPS).contains(&r), "radius {r}");
        assert_eq!(p.y, GROUND_Y);
    }
}

#[test]
fn spawn_system_never_exceeds_cap() {
    let mut world = World::new();
    world.insert_resource(SimRng::seeded(1));
    world.insert_resource(SpawnDirector::default());
    set_delta(&mut world, 1.5);
    for i in 0..15 {
        spawn_standard_at(&mut world, Vec3::new(i as f32, 0.5, 30.0), 10.0);
    }

    run_system_once(&mut world, spawn::spawn_waves);

    let live = world
        .query::<(&EntityKind, &Active)>()
        .iter(&world)
        .filter(|(k, a)| k.is_enemy_faction() && a.is_active())
        .count();
    assert_eq!(live, 16);
}

#[test]
fn spawn_system_tags_bosses_with_spin() {
    let mut world = World::new();
    let stats = stats_for(EnemyVariant::Boss, 10);
    run_system_once(&mut world, move |mut commands: Commands| {
        spawn_enemy(&mut commands, stats, Vec3::new(3.0, 9.0, 4.0));
    });

    let (kind, pos, _spin) = world
        .query::<(&EntityKind, &Position, &Spin)>()
        .single(&world)
        .expect("one boss");
    assert_eq!(*kind, EntityKind::Enemy(EnemyVariant::Boss));
    assert_eq!(pos.y, GROUND_Y);
}

// -----------------------------------------------------------------------------
// Chase AI
// -----------------------------------------------------------------------------

#[test]
fn enemies_step_toward_the_player() {
    let mut world = World::new();
    set_delta(&mut world, 0.5);
    spawn_player_at(&mut world, Vec3::new(0.0, 0.5, 0.0));
    let e = spawn_standard_at(&mut world, Vec3::new(10.0, 0.5, 0.0), 10.0);

    run_system_once(&mut world, pursue_player);

    let p = world.get::<Position>(e).expect("position");
    assert!((p.x - 9.0).abs() < 1e-3);
    assert_eq!(p.z, 0.0);
    assert_eq!(p.y, GROUND_Y);
}

#[test]
fn slowed_enemies_move_slower() {
    let mut world = World::new();
    set_delta(&mut world, 0.5);
    spawn_player_at(&mut world, Vec3::new(0.0, 0.5, 0.0));
    let e = spawn_standard_at(&mut world, Vec3::new(0.0, 0.5, 10.0), 10.0);
    world
        .get_mut::<StatusEffects>(e)
        .expect("status")
        .apply_slow(0.5, 2.0);

    run_system_once(&mut world, pursue_player);

    let p = world.get::<Position>(e).expect("position");
    assert!((p.z - 9.5).abs() < 1e-3);
}

#[test]
fn enemies_freeze_when_the_player_is_dead() {
    let mut world = World::new();
    set_delta(&mut world, 0.5);
    let player = spawn_player_at(&mut world, Vec3::ZERO);
    world.get_mut::<Player>(player).expect("player").die();
    let e = spawn_standard_at(&mut world, Vec3::new(10.0, 0.5, 0.0), 10.0);

    run_system_once(&mut world, pursue_player);

    assert_eq!(world.get::<Position>(e).expect("position").x, 10.0);
}

#[test]
fn burn_death_parks_enemy_as_slain() {
    let mut world = World::new();
    set_delta(&mut world, 0.5);
    spawn_player_at(&mut world, Vec3::ZERO);
    let e = spawn_standard_at(&mut world, Vec3::new(10.0, 0.5, 0.0), 1.0);
    world
        .get_mut::<StatusEffects>(e)
        .expect("status")
        .apply_burn(4.0, 3.0);

    run_system_once(&mut world, pursue_player);

    assert!(!world.get::<Active>(e).expect("active").is_active());
    assert_eq!(*world.get::<EnemyLifeState>(e).expect("life"), EnemyLifeState::Slain);
}
