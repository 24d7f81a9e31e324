//! Controls plugin (render-only): keyboard input and a console-style upgrade picker.
//!
//! - WASD / arrows write the `MoveIntent` resource (diagonals normalised).
//! - While an offer is outstanding, digits 1..N pick the matching upgrade.
//! - After the session ends, R restarts it.
//!
//! Offers and the final score are logged; there is no HUD.

use bevy::prelude::*;

use crate::plugins::player::MoveIntent;
use crate::plugins::progression::{PendingUpgrade, UpgradeChosen, UpgradeOffered};
use crate::plugins::session::{RestartSession, SessionLatch, SessionOver};

const PICK_KEYS: [KeyCode; 3] = [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3];

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (
            gather_move_intent,
            pick_upgrade,
            request_restart,
            announce_offers,
            announce_session_over,
        ),
    );
}

fn axis(keys: &ButtonInput<KeyCode>, negative: [KeyCode; 2], positive: [KeyCode; 2]) -> f32 {
    let mut v = 0.0;
    if keys.any_pressed(negative) {
        v -= 1.0;
    }
    if keys.any_pressed(positive) {
        v += 1.0;
    }
    v
}

fn gather_move_intent(keys: Res<ButtonInput<KeyCode>>, mut intent: ResMut<MoveIntent>) {
    // Up on screen is -Z in the arena.
    let raw = Vec2::new(
        axis(&keys, [KeyCode::KeyA, KeyCode::ArrowLeft], [KeyCode::KeyD, KeyCode::ArrowRight]),
        axis(&keys, [KeyCode::KeyW, KeyCode::ArrowUp], [KeyCode::KeyS, KeyCode::ArrowDown]),
    );
    intent.0 = raw.normalize_or_zero();
}

fn pick_upgrade(
    keys: Res<ButtonInput<KeyCode>>,
    pending: Res<PendingUpgrade>,
    mut chosen: MessageWriter<UpgradeChosen>,
) {
    if !pending.is_outstanding() {
        return;
    }
    let picked = PICK_KEYS
        .iter()
        .zip(&pending.offers)
        .find(|(key, _)| keys.just_pressed(**key));
    if let Some((_, offer)) = picked {
        chosen.write(UpgradeChosen::new(offer.id));
    }
}

fn request_restart(
    keys: Res<ButtonInput<KeyCode>>,
    latch: Res<SessionLatch>,
    mut restart: MessageWriter<RestartSession>,
) {
    if latch.is_over() && keys.just_pressed(KeyCode::KeyR) {
        restart.write(RestartSession);
    }
}

fn announce_offers(mut offered: MessageReader<UpgradeOffered>) {
    for offer in offered.read() {
        info!("Level {}! Choose an upgrade:", offer.level);
        for (i, o) in offer.offers.iter().enumerate() {
            info!("  [{}] {} {}: {}", i + 1, o.icon, o.name, o.description);
        }
    }
}

fn announce_session_over(mut over: MessageReader<SessionOver>) {
    for o in over.read() {
        info!("Game over at level {} with {} kills. Press R to restart.", o.level, o.kills);
    }
}
