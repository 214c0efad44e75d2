//! Scripted event operations.

use crate::world::{ActorId, BattleId, EndingId, FlagId, ItemId, QuestId};

/// One operation of an event step list.
///
/// A closed sum type: the interpreter matches exhaustively, so a new
/// operation kind is a compile-time concern. [`EventStep::Unknown`] is
/// the deliberate "unrecognized operation" policy: authored content can
/// carry it and execution continues immediately.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventStep {
    /// Present a line of dialogue; suspends until acknowledged.
    /// `speaker: None` is an anonymous system line.
    ShowDialogue {
        #[cfg_attr(feature = "serde", serde(default))]
        speaker: Option<ActorId>,
        text: String,
    },

    /// Write a flag value.
    SetFlag { flag: FlagId, value: bool },

    /// Merge items into the inventory.
    GiveItem { item: ItemId, qty: u32 },

    /// Remove items from the inventory (stacks at zero are pruned).
    RemoveItem { item: ItemId, qty: u32 },

    /// Add to the gold balance.
    GiveGold { amount: u32 },

    /// Recruit an actor into the party; idempotent.
    AddPartyMember { actor: ActorId },

    /// Activate a quest; no-op if already active or completed.
    StartQuest { quest: QuestId },

    /// Force-complete an active quest and grant its reward.
    CompleteQuest { quest: QuestId },

    /// Hand control to the battle engine; suspends until the battle
    /// resolves.
    StartBattle { battle: BattleId },

    /// Terminal: transition to an ending presentation.
    EndGame { ending: EndingId },

    /// Terminal: transition to the game-over presentation.
    GameOver,

    /// Explicit no-op; execution continues with the next step.
    Unknown,
}
