//! Map geometry, exits, NPC placements, and scripted events.

use crate::event::{EventCondition, EventStep};

use super::ids::{ActorId, EnemyId, EventId, MapId};

/// Tile coordinate on a map grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the adjacent tile one step in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.vector();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal facing/movement direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const fn vector(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Trigger class that causes a map event to be considered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TriggerKind {
    /// Checked on map load and whenever the interpreter queue drains.
    Auto,
    /// Checked when the player's position changes to a new tile.
    Touch,
    /// Checked against the faced (and stood-on) tile on interact.
    Action,
}

/// A map-scripted, trigger-gated sequence of operations.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapEvent {
    pub id: EventId,
    pub trigger: TriggerKind,
    /// Tile the trigger applies to; `None` for map-wide auto events.
    #[cfg_attr(feature = "serde", serde(default))]
    pub at: Option<Position>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub condition: Option<EventCondition>,
    pub steps: Vec<EventStep>,
}

/// Transition tile leading to another map.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapExit {
    pub at: Position,
    pub to_map: MapId,
    pub spawn: Position,
    #[cfg_attr(feature = "serde", serde(default))]
    pub condition: Option<EventCondition>,
}

/// A visible NPC standing on a tile; blocks movement while visible.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpcPlacement {
    pub actor: ActorId,
    pub at: Position,
    #[cfg_attr(feature = "serde", serde(default))]
    pub condition: Option<EventCondition>,
}

/// One weighted row of a random-encounter table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterEntry {
    pub enemy: EnemyId,
    pub weight: u32,
}

/// Per-map random encounter configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterTable {
    /// Roll probability per step, in per-mille (80 = 8%).
    pub rate_permille: u32,
    pub entries: Vec<EncounterEntry>,
}

/// Map definition: collision grid plus everything anchored to tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDefinition {
    pub id: MapId,
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Row-major collision grid; a non-zero cell blocks movement.
    pub collision: Vec<Vec<u8>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub encounters: Option<EncounterTable>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub exits: Vec<MapExit>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub events: Vec<MapEvent>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub npcs: Vec<NpcPlacement>,
}

impl MapDefinition {
    /// Returns true if `position` is out of bounds or on a blocked cell.
    pub fn blocks(&self, position: Position) -> bool {
        if position.x < 0
            || position.y < 0
            || position.x >= self.width as i32
            || position.y >= self.height as i32
        {
            return true;
        }
        self.collision
            .get(position.y as usize)
            .and_then(|row| row.get(position.x as usize))
            .is_none_or(|cell| *cell != 0)
    }
}
