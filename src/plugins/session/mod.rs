//! Session orchestrator.
//!
//! # Frame order
//! One chained system set in `FixedUpdate`:
//!
//! ```text
//! Input -> Spawn -> Collision -> Entities -> Progression -> Prune
//! ```
//!
//! Every set but `Prune` is gated by [`simulation_running`]: it stops while an upgrade
//! offer is outstanding (`GameState::AwaitingUpgrade`) and after the player dies
//! (`GameState::GameOver`). The gate also checks the resources directly, so the
//! remaining fixed steps of the frame that raised the pause are frozen too.
//!
//! # Restart
//! A `RestartSession` message despawns every simulation entity, resets the
//! session resources and spawns a fresh player.

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::enemies::{EnemyLifeState, SpawnDirector};
use crate::plugins::player::{player_bundle, MoveIntent};
use crate::plugins::progression::{LevelUpQueue, PendingUpgrade};
use crate::plugins::registry::{prune_inactive, EntityKind};

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    Input,
    Spawn,
    Collision,
    Entities,
    Progression,
    Prune,
}

/// Fires once per session when the player dies.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionLatch {
    over: bool,
}

impl SessionLatch {
    /// Returns true the first time only.
    pub fn trigger(&mut self) -> bool {
        if self.over {
            return false;
        }
        self.over = true;
        true
    }

    pub fn is_over(&self) -> bool {
        self.over
    }
}

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOver {
    pub level: u32,
    pub kills: u32,
}

#[derive(Message, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestartSession;

pub fn plugin(app: &mut App) {
    app.init_resource::<SessionLatch>()
        .add_message::<SessionOver>()
        .add_message::<RestartSession>();

    app.configure_sets(
        FixedUpdate,
        (
            SimSet::Input,
            SimSet::Spawn,
            SimSet::Collision,
            SimSet::Entities,
            SimSet::Progression,
            SimSet::Prune,
        )
            .chain(),
    );
    for set in [
        SimSet::Input,
        SimSet::Spawn,
        SimSet::Collision,
        SimSet::Entities,
        SimSet::Progression,
    ] {
        app.configure_sets(FixedUpdate, set.run_if(simulation_running));
    }

    // Prune is ungated so the tick that pauses or ends the session still clears
    // what it deactivated.
    app.add_systems(
        FixedUpdate,
        (
            release_uncredited_kills.run_if(session_is_over),
            prune_inactive,
        )
            .chain()
            .in_set(SimSet::Prune),
    );
    app.add_systems(Update, restart_session);
}

/// Run condition for the simulation chain.
pub fn simulation_running(
    state: Res<State<GameState>>,
    pending: Res<PendingUpgrade>,
    latch: Res<SessionLatch>,
) -> bool {
    *state.get() == GameState::Playing && !pending.is_outstanding() && !latch.is_over()
}

fn session_is_over(latch: Res<SessionLatch>) -> bool {
    latch.is_over()
}

/// No collision pass will credit `Slain` enemies once the player is dead.
fn release_uncredited_kills(mut q_life: Query<&mut EnemyLifeState>) {
    for mut life in &mut q_life {
        if *life == EnemyLifeState::Slain {
            *life = EnemyLifeState::Dead;
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn restart_session(
    mut commands: Commands,
    mut restarts: MessageReader<RestartSession>,
    q_sim: Query<Entity, With<EntityKind>>,
    mut latch: ResMut<SessionLatch>,
    mut director: ResMut<SpawnDirector>,
    mut level_ups: ResMut<LevelUpQueue>,
    mut pending: ResMut<PendingUpgrade>,
    mut intent: ResMut<MoveIntent>,
    tunables: Res<Tunables>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if restarts.read().count() == 0 {
        return;
    }

    let despawned = q_sim.iter().count();
    for e in &q_sim {
        commands.entity(e).despawn();
    }

    *latch = SessionLatch::default();
    *director = SpawnDirector::default();
    *level_ups = LevelUpQueue::default();
    *pending = PendingUpgrade::default();
    *intent = MoveIntent::default();

    commands.spawn(player_bundle(&tunables));
    next_state.set(GameState::Playing);
    info!(despawned, "session restarted");
}

#[cfg(test)]
mod tests;
