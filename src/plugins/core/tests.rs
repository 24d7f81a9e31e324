use bevy::prelude::*;

use crate::common::rng::SimRng;
use crate::common::tunables::Tunables;
use crate::plugins::core;

#[test]
fn inserts_resources() {
    let mut app = App::new();
    core::plugin(&mut app);
    assert!(app.world().get_resource::<Tunables>().is_some());
    assert!(app.world().get_resource::<SimRng>().is_some());
    assert!(app.world().get_resource::<ClearColor>().is_some());
}

#[test]
fn keeps_preinserted_overrides() {
    let mut app = App::new();
    app.insert_resource(Tunables {
        arena_half_extent: 10.0,
        ..default()
    });
    core::plugin(&mut app);
    assert_eq!(app.world().resource::<Tunables>().arena_half_extent, 10.0);
}
