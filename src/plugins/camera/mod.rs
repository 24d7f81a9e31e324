//! Camera plugin (render-only).
//!
//! The B0001 subtlety: a system cannot have `Query<&Transform>` and
//! `Query<&mut Transform>` at the same time unless Bevy can prove the queries are
//! disjoint. We encode disjointness with `Without<...>` filters.
//!
//! ```text
//! Startup:    spawn MainCamera
//! PostUpdate: follow_player eases toward the player's interpolated transform
//! ```

use bevy::prelude::*;
use bevy_firefly::prelude::*;

use crate::plugins::player::Player;

#[derive(Component)]
pub struct MainCamera {
    pub responsiveness: f32,
}

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_camera).add_systems(
        PostUpdate,
        follow_player.before(TransformSystems::Propagate),
    );
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera { responsiveness: 5.0 },
        FireflyConfig::default(),
        Transform::from_xyz(0.0, 0.0, 999.0),
    ));
}

/// Exponential ease: `alpha = 1 - e^(-responsiveness * dt)`.
fn follow_alpha(responsiveness: f32, dt: f32) -> f32 {
    1.0 - (-responsiveness * dt).exp()
}

fn follow_player(
    time: Res<Time>,
    // Disjointness proof: Player entities are not MainCamera entities.
    q_player: Query<&Transform, (With<Player>, Without<MainCamera>)>,
    // Disjointness proof: MainCamera entities are not Player entities.
    mut q_cam: Query<(&mut Transform, &MainCamera), Without<Player>>,
) {
    let Ok(tf_player) = q_player.single() else {
        return;
    };
    let Ok((mut tf_cam, main_cam)) = q_cam.single_mut() else {
        return;
    };

    let alpha = follow_alpha(main_cam.responsiveness, time.delta_secs());
    let target = tf_player.translation.truncate();
    let eased = tf_cam.translation.truncate().lerp(target, alpha);
    tf_cam.translation.x = eased.x;
    tf_cam.translation.y = eased.y;
}
