//! Lighting plugin (Firefly) (render-only).
//!
//! A point light rides on the player and reddens as health drops. Enemies carry
//! occluders (see visuals), so the horde casts shadows away from the player.

use bevy::prelude::*;
use bevy_firefly::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::player::Player;

/// Light reach in arena units.
const LIGHT_REACH: f32 = 22.0;

const HEALTHY: Color = Color::srgb(1.0, 0.9, 0.75);
const WOUNDED: Color = Color::srgb(1.0, 0.35, 0.3);

#[derive(Component)]
pub struct PlayerLight;

pub fn plugin(app: &mut App) {
    if !app.is_plugin_added::<FireflyPlugin>() {
        app.add_plugins(FireflyPlugin);
    }

    app.add_systems(Startup, setup).add_systems(
        PostUpdate,
        (tint_by_health, follow_player_light).before(TransformSystems::Propagate),
    );
}

fn setup(mut commands: Commands, tunables: Res<Tunables>) {
    commands.spawn((
        Name::new("PlayerLight"),
        PlayerLight,
        PointLight2d {
            color: HEALTHY,
            radius: LIGHT_REACH * tunables.pixels_per_unit,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 10.0),
    ));
}

/// 0 at full health, 1 when dead.
fn wound_ratio(player: &Player) -> f32 {
    if player.max_health <= 0.0 {
        return 1.0;
    }
    (1.0 - player.health / player.max_health).clamp(0.0, 1.0)
}

fn tint_by_health(q_player: Query<&Player>, mut q_light: Query<&mut PointLight2d, With<PlayerLight>>) {
    let Ok(player) = q_player.single() else {
        return;
    };
    let Ok(mut light) = q_light.single_mut() else {
        return;
    };
    light.color = HEALTHY.mix(&WOUNDED, wound_ratio(player));
}

fn follow_player_light(
    q_player: Query<&Transform, (With<Player>, Without<PlayerLight>)>,
    mut q_light: Query<&mut Transform, (With<PlayerLight>, Without<Player>)>,
) {
    let Ok(tf_player) = q_player.single() else {
        return;
    };
    let Ok(mut tf_light) = q_light.single_mut() else {
        return;
    };

    tf_light.translation.x = tf_player.translation.x;
    tf_light.translation.y = tf_player.translation.y;
}
