//! World plugin (render-only): arena walls and a checkered floor.
//!
//! The simulation clamps the player itself; the walls only show where the edge is.

use bevy::prelude::*;

use crate::common::tunables::Tunables;

/// Floor tile edge, in arena units.
const TILE_UNITS: f32 = 2.0;
const WALL_UNITS: f32 = 1.0;

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, (spawn_arena, spawn_floor));
}

fn spawn_arena(mut commands: Commands, tunables: Res<Tunables>) {
    let wall_color = Color::srgb(0.25, 0.27, 0.33);
    let ppu = tunables.pixels_per_unit;
    let half = tunables.arena_half_extent * ppu;
    let thickness = WALL_UNITS * ppu;

    let mut spawn_wall = |name: &'static str, pos: Vec2, size: Vec2| {
        commands.spawn((
            Name::new(name),
            Sprite {
                color: wall_color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(pos.extend(0.5)),
        ));
    };

    let span = half * 2.0 + thickness * 2.0;
    spawn_wall("WallTop", Vec2::new(0.0, half + thickness * 0.5), Vec2::new(span, thickness));
    spawn_wall("WallBottom", Vec2::new(0.0, -half - thickness * 0.5), Vec2::new(span, thickness));
    spawn_wall("WallLeft", Vec2::new(-half - thickness * 0.5, 0.0), Vec2::new(thickness, half * 2.0));
    spawn_wall("WallRight", Vec2::new(half + thickness * 0.5, 0.0), Vec2::new(thickness, half * 2.0));
}

/// Spawn a simple floor grid from solid-colour sprites, so the project has no assets.
fn spawn_floor(mut commands: Commands, tunables: Res<Tunables>) {
    let ppu = tunables.pixels_per_unit;
    let tile_px = TILE_UNITS * ppu;
    let n = (tunables.arena_half_extent / TILE_UNITS).ceil() as i32;

    (-n..=n)
        .flat_map(|y| (-n..=n).map(move |x| (x, y)))
        .for_each(|(x, y)| {
            let color = if (x + y) % 2 == 0 {
                Color::srgb(0.14, 0.14, 0.16)
            } else {
                Color::srgb(0.12, 0.12, 0.14)
            };
            commands.spawn((
                Sprite::from_color(color, Vec2::splat(tile_px)),
                Transform::from_xyz(x as f32 * tile_px, y as f32 * tile_px, 0.0),
            ));
        });
}
