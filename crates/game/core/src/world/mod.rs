//! Read-only world data.
//!
//! The [`WorldOracle`] trait exposes the immutable content database
//! (actors, items, equipment, skills, enemies, maps, battles, quests,
//! endings) behind keyed lookups. The engine owns no content; it queries
//! templates through the oracle and value-copies them when it needs a
//! mutable instance.

mod error;
mod ids;
mod map;
mod rng;
#[cfg(test)]
pub(crate) mod test_support;
mod types;

pub use error::ContentError;
pub use ids::{
    ActorId, BattleId, EndingId, EnemyId, EquipmentId, EventId, FlagId, ItemId, MapId, QuestId,
    SkillId,
};
pub use map::{
    Direction, EncounterEntry, EncounterTable, MapDefinition, MapEvent, MapExit, NpcPlacement,
    Position, TriggerKind,
};
pub use rng::{DiceStream, PcgRng, RngOracle, compute_seed};
pub use types::{
    ActorTemplate, BattleDefinition, BattleEnemy, CombatSpec, DropEntry, EndingDefinition,
    EnemyMove, EnemyTemplate, EquipSlot, EquipmentDefinition, EquipmentSlots, GrowthTable,
    ItemDefinition, ItemEffect, ItemGrant, ItemKind, QuestDefinition, QuestReward, QuestTarget,
    SkillDefinition, SkillEffect, StatBlock, StatMods,
};

/// Initial value of one world-state flag.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlagInit {
    pub flag: FlagId,
    pub value: bool,
}

/// New-game parameters: starting map, spawn tile, initial party roster,
/// and the initial flag set.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StartConfig {
    pub map: MapId,
    pub spawn: Position,
    pub party: Vec<ActorId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: Vec<FlagInit>,
}

/// Read-only keyed access to the content database.
///
/// Every `*` accessor returns `None` for an unknown key; the matching
/// `require_*` accessor converts that into a [`ContentError`] for call
/// sites where a dangling reference is a content bug.
pub trait WorldOracle: Send + Sync {
    fn start(&self) -> &StartConfig;

    fn actor(&self, id: &ActorId) -> Option<&ActorTemplate>;
    fn item(&self, id: &ItemId) -> Option<&ItemDefinition>;
    fn equipment(&self, id: &EquipmentId) -> Option<&EquipmentDefinition>;
    fn skill(&self, id: &SkillId) -> Option<&SkillDefinition>;
    fn enemy(&self, id: &EnemyId) -> Option<&EnemyTemplate>;
    fn map(&self, id: &MapId) -> Option<&MapDefinition>;
    fn battle(&self, id: &BattleId) -> Option<&BattleDefinition>;
    fn quest(&self, id: &QuestId) -> Option<&QuestDefinition>;
    fn ending(&self, id: &EndingId) -> Option<&EndingDefinition>;

    /// All quest definitions, used to match kill-count progress.
    fn quests(&self) -> Vec<&QuestDefinition>;

    fn require_actor(&self, id: &ActorId) -> Result<&ActorTemplate, ContentError> {
        self.actor(id)
            .ok_or_else(|| ContentError::UnknownActor(id.clone()))
    }

    fn require_item(&self, id: &ItemId) -> Result<&ItemDefinition, ContentError> {
        self.item(id)
            .ok_or_else(|| ContentError::UnknownItem(id.clone()))
    }

    fn require_equipment(&self, id: &EquipmentId) -> Result<&EquipmentDefinition, ContentError> {
        self.equipment(id)
            .ok_or_else(|| ContentError::UnknownEquipment(id.clone()))
    }

    fn require_skill(&self, id: &SkillId) -> Result<&SkillDefinition, ContentError> {
        self.skill(id)
            .ok_or_else(|| ContentError::UnknownSkill(id.clone()))
    }

    fn require_enemy(&self, id: &EnemyId) -> Result<&EnemyTemplate, ContentError> {
        self.enemy(id)
            .ok_or_else(|| ContentError::UnknownEnemy(id.clone()))
    }

    fn require_map(&self, id: &MapId) -> Result<&MapDefinition, ContentError> {
        self.map(id)
            .ok_or_else(|| ContentError::UnknownMap(id.clone()))
    }

    fn require_battle(&self, id: &BattleId) -> Result<&BattleDefinition, ContentError> {
        self.battle(id)
            .ok_or_else(|| ContentError::UnknownBattle(id.clone()))
    }

    fn require_quest(&self, id: &QuestId) -> Result<&QuestDefinition, ContentError> {
        self.quest(id)
            .ok_or_else(|| ContentError::UnknownQuest(id.clone()))
    }

    fn require_ending(&self, id: &EndingId) -> Result<&EndingDefinition, ContentError> {
        self.ending(id)
            .ok_or_else(|| ContentError::UnknownEnding(id.clone()))
    }
}
