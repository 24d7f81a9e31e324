//! Progression: level-up queue, upgrade offers and the resume path.
//!
//! ```text
//! FixedUpdate / Progression stage:
//!   queued level-ups && no outstanding offer
//!     -> roll offers, store in PendingUpgrade, write UpgradeOffered,
//!        NextState(AwaitingUpgrade)
//!
//! Update (AwaitingUpgrade):
//!   UpgradeChosen { id } in the offer
//!     -> apply, pop one level-up
//!     -> more queued ? re-offer : NextState(Playing)
//! ```

use bevy::prelude::*;

use crate::common::rng::SimRng;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::player::Player;
use crate::plugins::session::SimSet;

pub mod catalog;

pub use catalog::{apply_upgrade, random_upgrades, UpgradeDef};

/// Level-ups gained but not yet turned into an upgrade pick.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LevelUpQueue {
    pub pending: u32,
}

/// What the UI shows for one offered upgrade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeOffer {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

impl From<&'static UpgradeDef> for UpgradeOffer {
    fn from(def: &'static UpgradeDef) -> Self {
        Self {
            id: def.id,
            name: def.name,
            description: def.description,
            icon: def.icon,
        }
    }
}

/// The offer currently waiting for a choice; empty when none is outstanding.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct PendingUpgrade {
    pub offers: Vec<UpgradeOffer>,
}

impl PendingUpgrade {
    pub fn is_outstanding(&self) -> bool {
        !self.offers.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.offers.iter().any(|o| o.id == id)
    }
}

/// Pause-for-upgrade request.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct UpgradeOffered {
    pub level: u32,
    pub offers: Vec<UpgradeOffer>,
}

#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct UpgradeChosen {
    pub id: String,
}

impl UpgradeChosen {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<LevelUpQueue>()
        .init_resource::<PendingUpgrade>()
        .add_message::<UpgradeOffered>()
        .add_message::<UpgradeChosen>()
        .add_systems(FixedUpdate, offer_upgrades.in_set(SimSet::Progression))
        .add_systems(
            Update,
            apply_chosen_upgrade.run_if(in_state(GameState::AwaitingUpgrade)),
        );
}

fn roll_offer(
    rng: &mut SimRng,
    tunables: &Tunables,
    level: u32,
    pending: &mut PendingUpgrade,
    offered: &mut MessageWriter<UpgradeOffered>,
) {
    pending.offers = random_upgrades(rng, tunables.upgrade_choices)
        .into_iter()
        .map(UpgradeOffer::from)
        .collect();
    info!(
        level,
        offers = ?pending.offers.iter().map(|o| o.id).collect::<Vec<_>>(),
        "upgrade offered"
    );
    offered.write(UpgradeOffered {
        level,
        offers: pending.offers.clone(),
    });
}

fn offer_upgrades(
    mut rng: ResMut<SimRng>,
    tunables: Res<Tunables>,
    queue: Res<LevelUpQueue>,
    mut pending: ResMut<PendingUpgrade>,
    mut offered: MessageWriter<UpgradeOffered>,
    mut next_state: ResMut<NextState<GameState>>,
    q_player: Query<&Player>,
) {
    if queue.pending == 0 || pending.is_outstanding() {
        return;
    }
    let Ok(player) = q_player.single() else {
        return;
    };
    if !player.is_alive() {
        return;
    }

    roll_offer(&mut rng, &tunables, player.level, &mut pending, &mut offered);
    next_state.set(GameState::AwaitingUpgrade);
}

fn apply_chosen_upgrade(
    mut chosen: MessageReader<UpgradeChosen>,
    mut rng: ResMut<SimRng>,
    tunables: Res<Tunables>,
    mut queue: ResMut<LevelUpQueue>,
    mut pending: ResMut<PendingUpgrade>,
    mut offered: MessageWriter<UpgradeOffered>,
    mut next_state: ResMut<NextState<GameState>>,
    mut q_player: Query<&mut Player>,
) {
    let Ok(mut player) = q_player.single_mut() else {
        return;
    };

    for choice in chosen.read() {
        if !pending.is_outstanding() {
            break;
        }
        if !pending.contains(&choice.id) {
            warn!(id = %choice.id, "ignoring upgrade that was not offered");
            continue;
        }
        if !apply_upgrade(&mut player, &choice.id) {
            warn!(id = %choice.id, "unknown upgrade id");
            continue;
        }
        info!(id = %choice.id, level = player.level, "upgrade applied");

        queue.pending = queue.pending.saturating_sub(1);
        pending.offers.clear();

        if queue.pending > 0 {
            roll_offer(&mut rng, &tunables, player.level, &mut pending, &mut offered);
        } else {
            next_state.set(GameState::Playing);
        }
    }
}
