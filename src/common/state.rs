//! Global state machine.
//!
//! `Playing -> AwaitingUpgrade -> Playing` is the level-up pause.
//! `GameOver` is terminal until a restart is requested.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Playing,
    AwaitingUpgrade,
    GameOver,
}
