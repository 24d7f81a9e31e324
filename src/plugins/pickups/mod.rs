//! XP orbs: dropped on every credited kill, bob in place, and drift toward the
//! player once inside the magnet radius. Pickup itself is resolved by collision.

use bevy::prelude::*;

use crate::plugins::player::Player;
use crate::plugins::registry::{Active, Appearance, EntityKind, Position, Shape, ORB_GROUND_Y};
use crate::plugins::session::SimSet;

const BOB_RATE: f32 = 3.0;
const BOB_AMPLITUDE: f32 = 0.08;
const MAGNET_PULL_SPEED: f32 = 12.0;
const MAGNET_EPSILON: f32 = 0.001;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct XpOrb {
    pub value: u32,
    pub bob_phase: f32,
}

pub fn plugin(app: &mut App) {
    app.add_systems(FixedUpdate, drift_orbs.in_set(SimSet::Entities));
}

pub fn spawn_xp_orb(commands: &mut Commands, at: Vec3, value: u32, bob_phase: f32) -> Entity {
    commands
        .spawn((
            Name::new("XpOrb"),
            EntityKind::XpOrb,
            XpOrb { value, bob_phase },
            Position(at.with_y(ORB_GROUND_Y)),
            Active(true),
            Appearance::new(Shape::Icosahedron, Color::srgb_u8(0x2e, 0xcc, 0x71), 0.3),
        ))
        .id()
}

/// Horizontal magnet step toward `player`, or `None` when out of range.
pub fn magnet_step(orb: Vec3, player: Vec3, magnet_radius: f32, dt: f32) -> Option<Vec3> {
    if magnet_radius <= 0.0 {
        return None;
    }
    let to_player = (player - orb).with_y(0.0);
    let dist = to_player.length();
    if dist <= MAGNET_EPSILON || dist > magnet_radius {
        return None;
    }
    let pull = MAGNET_PULL_SPEED * (1.0 - dist / magnet_radius);
    Some((orb + to_player / dist * pull * dt).with_y(ORB_GROUND_Y))
}

pub fn drift_orbs(
    time: Res<Time>,
    q_player: Query<(&Player, &Position), Without<XpOrb>>,
    mut q: Query<(&mut XpOrb, &mut Position, &Active), Without<Player>>,
) {
    let dt = time.delta_secs();
    let magnet = q_player
        .single()
        .ok()
        .map(|(player, pos)| (pos.0, player.loadout.magnet_radius));

    for (mut orb, mut pos, active) in &mut q {
        if !active.is_active() {
            continue;
        }
        orb.bob_phase += BOB_RATE * dt;
        pos.y = ORB_GROUND_Y + orb.bob_phase.sin() * BOB_AMPLITUDE;

        if let Some((player_at, radius)) = magnet
            && let Some(next) = magnet_step(pos.0, player_at, radius, dt)
        {
            pos.0 = next;
        }
    }
}
