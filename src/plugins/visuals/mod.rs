//! Visuals plugin (render-only): draws every entity that carries an `Appearance`.
//!
//! The arena is viewed top-down:
//!
//! ```text
//! arena X -> screen  X * pixels_per_unit
//! arena Z -> screen -Y * pixels_per_unit
//! arena Y -> dropped (draw order comes from the entity kind)
//! ```
//!
//! Meshes are unit-radius primitives scaled by the appearance radius, so one
//! handle per shape and one material per colour are enough. Transforms are
//! written in `FixedPostUpdate` and smoothed by avian's `TranslationInterpolation`.

use avian2d::prelude::*;
use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use bevy_firefly::prelude::Occluder2d;

use crate::common::tunables::Tunables;
use crate::plugins::enemies::Spin;
use crate::plugins::registry::{Appearance, EntityKind, Position, Shape};

#[derive(Resource, Default)]
struct VisualCache {
    meshes: HashMap<Shape, Handle<Mesh>>,
    materials: HashMap<[u8; 4], Handle<ColorMaterial>>,
}

pub fn plugin(app: &mut App) {
    app.init_resource::<VisualCache>()
        .add_systems(Update, attach_visuals)
        .add_systems(FixedPostUpdate, sync_transforms);
}

/// Screen-space translation for an arena position.
pub fn project(position: Vec3, pixels_per_unit: f32, z: f32) -> Vec3 {
    Vec3::new(position.x * pixels_per_unit, -position.z * pixels_per_unit, z)
}

/// Draw order: orbs under enemies under the player under projectiles.
pub fn layer(kind: EntityKind) -> f32 {
    match kind {
        EntityKind::XpOrb => 1.0,
        EntityKind::Enemy(_) => 2.0,
        EntityKind::Player => 3.0,
        EntityKind::Projectile => 4.0,
    }
}

fn mesh_for(shape: Shape) -> Mesh {
    match shape {
        Shape::Sphere => Circle::new(1.0).into(),
        Shape::Dodecahedron => RegularPolygon::new(1.0, 5).into(),
        Shape::Cone => RegularPolygon::new(1.0, 3).into(),
        Shape::Cube => Rectangle::new(2.0, 2.0).into(),
        Shape::Octahedron => Rhombus::new(2.0, 2.0).into(),
        Shape::Icosahedron => RegularPolygon::new(1.0, 6).into(),
    }
}

fn attach_visuals(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut cache: ResMut<VisualCache>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    q: Query<(Entity, &Appearance, &Position, &EntityKind), Added<Appearance>>,
) {
    let ppu = tunables.pixels_per_unit;
    for (e, appearance, pos, kind) in &q {
        let mesh = cache
            .meshes
            .entry(appearance.shape)
            .or_insert_with(|| meshes.add(mesh_for(appearance.shape)))
            .clone();
        let material = cache
            .materials
            .entry(appearance.color.to_srgba().to_u8_array())
            .or_insert_with(|| materials.add(ColorMaterial::from(appearance.color)))
            .clone();

        let radius_px = appearance.radius * ppu;
        let mut ec = commands.entity(e);
        ec.try_insert((
            Mesh2d(mesh),
            MeshMaterial2d(material),
            Transform::from_translation(project(pos.0, ppu, layer(*kind)))
                .with_scale(Vec3::splat(radius_px)),
            TranslationInterpolation,
        ));
        if kind.is_enemy_faction() {
            ec.try_insert(Occluder2d::circle(radius_px));
        }
    }
}

fn sync_transforms(
    tunables: Res<Tunables>,
    mut q: Query<(&Position, &EntityKind, &mut Transform, Option<&Spin>)>,
) {
    let ppu = tunables.pixels_per_unit;
    for (pos, kind, mut tf, spin) in &mut q {
        tf.translation = project(pos.0, ppu, layer(*kind));
        if let Some(spin) = spin {
            tf.rotation = Quat::from_rotation_z(spin.angle);
        }
    }
}
