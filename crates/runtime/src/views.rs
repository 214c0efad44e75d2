//! Read-only snapshots handed to presenters.
//!
//! Presentation layers never hold references into live session state;
//! they get owned snapshots assembled at the moment of the callback.

use game_core::BattlePhase;
use game_core::world::Position;

/// One visible NPC on the current map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NpcView {
    pub name: String,
    pub at: Position,
}

/// The current map as the player sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapView {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Row-major walkability, `true` meaning blocked.
    pub blocked: Vec<Vec<bool>>,
    pub player: Position,
    pub npcs: Vec<NpcView>,
    pub exits: Vec<Position>,
}

/// One enemy line of the battle screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnemyView {
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
}

/// One party member line of the battle or menu screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberView {
    pub name: String,
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub max_mp: u32,
}

/// The battle screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleView {
    pub name: String,
    pub phase: BattlePhase,
    pub enemies: Vec<EnemyView>,
    pub party: Vec<MemberView>,
}
