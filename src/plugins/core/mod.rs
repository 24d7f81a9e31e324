//! Core plugin: shared resources and global settings.
//!
//! Resources are only initialised when absent, so a test can insert a seeded
//! `SimRng` or custom `Tunables` before configuring the app.

use bevy::prelude::*;

use crate::common::rng::SimRng;
use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    app.init_resource::<Tunables>();
    app.init_resource::<SimRng>();
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));
}

#[cfg(test)]
mod tests;
