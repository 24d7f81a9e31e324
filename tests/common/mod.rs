//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime, `StatesPlugin` the state machine.
//! - we then call `arena_survivors::game::configure_headless` to install gameplay plugins.
//!
//! Time is driven manually: every `app.update()` advances 100 ms and the fixed
//! timestep is also 100 ms, so each frame after the first runs exactly one
//! simulation tick. The first update only runs `Startup` (zero delta).

#![allow(dead_code)]

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use arena_survivors::common::rng::SimRng;
use arena_survivors::common::state::GameState;
use arena_survivors::plugins::enemies::{spawn_enemy, EnemyStats};
use arena_survivors::plugins::player::Player;
use arena_survivors::plugins::registry::EnemyVariant;

pub const TICK: Duration = Duration::from_millis(100);

pub fn app_headless() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_resource(SimRng::seeded(0x5eed));

    arena_survivors::game::configure_headless(&mut app);

    app.insert_resource(TimeUpdateStrategy::ManualDuration(TICK));
    app.insert_resource(Time::<Fixed>::from_duration(TICK));
    app
}

/// Headless app that has already run `Startup`.
pub fn booted() -> App {
    let mut app = app_headless();
    app.update();
    app
}

pub fn player(app: &mut App) -> Player {
    let world = app.world_mut();
    world
        .query::<&Player>()
        .single(world)
        .expect("exactly one player")
        .clone()
}

pub fn player_mut(app: &mut App) -> Mut<'_, Player> {
    let world = app.world_mut();
    let e = world
        .query_filtered::<Entity, With<Player>>()
        .single(world)
        .expect("exactly one player");
    world.get_mut::<Player>(e).expect("player component")
}

pub fn state(app: &App) -> GameState {
    *app.world().resource::<State<GameState>>().get()
}

/// A standing enemy with chosen health.
pub fn spawn_dummy(app: &mut App, at: Vec3, health: f32, contact_damage: f32) -> Entity {
    let stats = EnemyStats {
        variant: EnemyVariant::Standard,
        speed: 0.0,
        health,
        contact_damage,
    };
    let world = app.world_mut();
    let e = spawn_enemy(&mut world.commands(), stats, at);
    world.flush();
    e
}

pub fn tick(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}
