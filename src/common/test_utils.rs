//! Test helpers.
//!
//! Systems that use `Commands` enqueue structural changes; we call `world.flush()`
//! after running so queued commands are applied before assertions.

use std::time::Duration;

use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// A generic clock whose last delta is `dt` seconds, as simulation systems see it
/// inside `FixedUpdate`.
pub fn time_with_delta(dt: f32) -> Time {
    let mut t = Time::<()>::default();
    t.advance_by(Duration::from_secs_f32(dt));
    t
}

/// Replace the world's clock with one that reports `dt`.
pub fn set_delta(world: &mut World, dt: f32) {
    world.insert_resource(time_with_delta(dt));
}
