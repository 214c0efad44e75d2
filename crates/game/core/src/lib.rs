//! Deterministic RPG rules shared across clients.
//!
//! `game-core` defines the canonical gameplay semantics: immutable world
//! data behind [`world::WorldOracle`], mutable session state, the
//! scripted event interpreter, and the turn-based battle engine. It is
//! pure logic; loading content and driving play sessions live in the
//! supporting crates that depend on the types re-exported here.
pub mod battle;
pub mod config;
pub mod event;
pub mod state;
pub mod world;

pub use battle::{
    BattleError, BattleEvent, BattlePhase, BattleSession, EnemyInstance, PlayerCommand,
    RoundOutcome, RoundReport, VictorySummary,
};
pub use config::GameConfig;
pub use event::{
    EventCondition, EventError, EventInterpreter, EventSignal, EventStep, InterpreterStatus,
    condition_satisfied,
};
pub use state::{
    FlagSet, Inventory, ItemStack, ItemUse, ItemUseError, LevelUp, Party, PartyMember,
    QuestCompletion, QuestLog, SessionState,
};
pub use world::{
    ActorId, ActorTemplate, BattleDefinition, BattleEnemy, BattleId, CombatSpec, ContentError,
    DiceStream, Direction, DropEntry, EncounterEntry, EncounterTable, EndingDefinition, EndingId,
    EnemyId, EnemyMove, EnemyTemplate, EquipSlot, EquipmentDefinition, EquipmentId,
    EquipmentSlots, EventId, FlagId, FlagInit, GrowthTable, ItemDefinition, ItemEffect, ItemGrant,
    ItemId, ItemKind, MapDefinition, MapEvent, MapExit, MapId, NpcPlacement, PcgRng, Position,
    QuestDefinition, QuestId, QuestReward, QuestTarget, RngOracle, SkillDefinition, SkillEffect,
    SkillId, StartConfig, StatBlock, StatMods, TriggerKind, WorldOracle, compute_seed,
};
