use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use super::*;
use crate::common::rng::SimRng;
use crate::plugins::enemies::{EnemyLifeState, SpawnDirector};
use crate::plugins::player::Player;
use crate::plugins::progression::{LevelUpQueue, PendingUpgrade, UpgradeOffer};
use crate::plugins::registry::{Active, EnemyVariant, EntityKind, Position};

#[test]
fn latch_fires_once() {
    let mut latch = SessionLatch::default();
    assert!(!latch.is_over());
    assert!(latch.trigger());
    assert!(!latch.trigger());
    assert!(latch.is_over());
}

fn session_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.init_state::<GameState>();
    app.insert_resource(SimRng::seeded(3));
    app.insert_resource(Tunables::default());
    app.init_resource::<SpawnDirector>();
    app.init_resource::<LevelUpQueue>();
    app.init_resource::<PendingUpgrade>();
    app.init_resource::<MoveIntent>();
    plugin(&mut app);
    app
}

fn running(app: &mut App) -> bool {
    app.world_mut()
        .run_system_cached(simulation_running)
        .expect("condition runs")
}

#[test]
fn simulation_gate_follows_pause_and_game_over() {
    let mut app = session_app();
    app.update();
    assert!(running(&mut app));

    app.world_mut().resource_mut::<PendingUpgrade>().offers.push(UpgradeOffer {
        id: "regen",
        name: "Regeneration",
        description: "",
        icon: "",
    });
    assert!(!running(&mut app));

    app.world_mut().resource_mut::<PendingUpgrade>().offers.clear();
    assert!(running(&mut app));

    app.world_mut().resource_mut::<SessionLatch>().trigger();
    assert!(!running(&mut app));
}

#[test]
fn restart_wipes_the_session_and_respawns_the_player() {
    let mut app = session_app();
    app.update();

    let mut dead = Player::default();
    dead.die();
    app.world_mut()
        .spawn((dead, EntityKind::Player, Position::default(), Active(true)));
    app.world_mut()
        .spawn((EntityKind::Projectile, Position::default(), Active(true)));
    app.world_mut().resource_mut::<SessionLatch>().trigger();
    app.world_mut().resource_mut::<SpawnDirector>().wave = 7;
    app.world_mut().resource_mut::<LevelUpQueue>().pending = 2;
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::GameOver);
    app.update();

    app.world_mut().write_message(RestartSession);
    app.update();
    app.update();

    let world = app.world_mut();
    let kinds: Vec<EntityKind> = world.query::<&EntityKind>().iter(world).copied().collect();
    assert_eq!(kinds, vec![EntityKind::Player]);
    let player = world.query::<&Player>().single(world).expect("fresh player");
    assert!(player.is_alive());
    assert_eq!(player.kills, 0);

    assert!(!world.resource::<SessionLatch>().is_over());
    assert_eq!(world.resource::<SpawnDirector>().wave, 1);
    assert_eq!(world.resource::<LevelUpQueue>().pending, 0);
    assert_eq!(*world.resource::<State<GameState>>().get(), GameState::Playing);
}

#[test]
fn game_over_releases_and_prunes_uncredited_kills() {
    let mut app = session_app();
    let step = Duration::from_millis(100);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(step));
    app.insert_resource(Time::<Fixed>::from_duration(step));
    app.update();

    let slain = app
        .world_mut()
        .spawn((
            EntityKind::Enemy(EnemyVariant::Standard),
            Position::default(),
            Active(false),
            EnemyLifeState::Slain,
        ))
        .id();
    let live = app
        .world_mut()
        .spawn((EntityKind::Projectile, Position::default(), Active(true)))
        .id();

    app.update();
    app.update();
    assert!(
        app.world().get::<EntityKind>(slain).is_some(),
        "slain enemies wait for a collision pass while the session runs"
    );

    app.world_mut().resource_mut::<SessionLatch>().trigger();
    app.update();
    app.update();

    assert!(app.world().get::<EntityKind>(slain).is_none());
    assert!(app.world().get::<EntityKind>(live).is_some());
}
