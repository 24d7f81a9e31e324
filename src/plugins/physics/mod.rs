//! Physics plugin (render-only).
//!
//! The simulation moves entities itself; avian2d is only here to interpolate the
//! visual transforms between fixed steps.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    app.init_resource::<Tunables>();
    let ppu = app.world().resource::<Tunables>().pixels_per_unit;
    app.add_plugins(PhysicsPlugins::default().with_length_unit(ppu));
    app.insert_resource(Gravity(Vec2::ZERO));
}
