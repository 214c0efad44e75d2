//! Runtime-level errors.

use game_core::world::MapId;
use game_core::{BattleError, ContentError, EventError, ItemUseError};

/// Errors surfaced while driving a play session.
///
/// Mode errors (`NotExploring`, `NotInDialogue`, `NotInBattle`,
/// `SessionEnded`) and recoverable battle refusals leave the session
/// untouched; content errors mean the world data is broken.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Event(#[from] EventError),

    #[error(transparent)]
    Battle(#[from] BattleError),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Item(#[from] ItemUseError),

    #[error("command requires the exploring mode")]
    NotExploring,

    #[error("no dialogue is awaiting acknowledgment")]
    NotInDialogue,

    #[error("no battle is in progress")]
    NotInBattle,

    #[error("the session has ended")]
    SessionEnded,

    #[error("auto events on map `{map}` re-triggered more than {limit} times")]
    AutoChainLoop { map: MapId, limit: u32 },
}

impl RuntimeError {
    /// True when the caller can simply issue a different command.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Battle(error) => error.is_recoverable(),
            Self::Item(error) => !matches!(error, ItemUseError::Content(_)),
            Self::NotExploring | Self::NotInDialogue | Self::NotInBattle | Self::SessionEnded => {
                true
            }
            Self::Event(_) | Self::Content(_) | Self::AutoChainLoop { .. } => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
