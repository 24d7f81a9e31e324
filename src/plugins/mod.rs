//! Feature plugins.

use bevy::prelude::*;

pub mod collision;
pub mod core;
pub mod enemies;
pub mod pickups;
pub mod player;
pub mod progression;
pub mod projectiles;
pub mod registry;
pub mod session;

// Render-only
pub mod camera;
pub mod controls;
pub mod lighting;
pub mod physics;
pub mod visuals;
pub mod world;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    session::plugin(app);
    player::plugin(app);
    enemies::plugin(app);
    projectiles::plugin(app);
    pickups::plugin(app);
    collision::plugin(app);
    progression::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    physics::plugin(app);
    visuals::plugin(app);
    world::plugin(app);
    controls::plugin(app);
    lighting::plugin(app);
    camera::plugin(app);
}
