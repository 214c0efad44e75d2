//! Battle command failures.

use crate::world::{ContentError, ItemId, SkillId};

/// Why a battle command was refused or failed.
///
/// Recoverable variants return control to the command menu without
/// consuming the turn; [`BattleError::Content`] aborts the battle.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    #[error("no command is expected in the current phase")]
    NotAwaitingCommand,

    #[error("not enough MP for `{0}`")]
    InsufficientMp(SkillId),

    #[error("skill `{0}` is not known")]
    SkillNotKnown(SkillId),

    #[error("item `{0}` cannot be used here")]
    ItemNotUsable(ItemId),

    #[error("item `{0}` is not carried")]
    ItemNotCarried(ItemId),

    #[error("the party is empty")]
    EmptyParty,

    #[error(transparent)]
    Content(#[from] ContentError),
}

impl BattleError {
    /// True when the command can simply be re-entered.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Content(_))
    }
}
