//! Immutable world-data templates.
//!
//! Templates are owned by the world database and never mutated at
//! runtime. Live instances (party members, battle enemies) are created
//! by value-copying a template at the ownership boundary; a template and
//! an instance never share state.

use crate::event::EventStep;

use super::ids::{ActorId, BattleId, EndingId, EnemyId, EquipmentId, ItemId, QuestId, SkillId};

/// Base combat statistics shared by actors and enemies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatBlock {
    pub max_hp: u32,
    pub max_mp: u32,
    pub atk: u32,
    pub def: u32,
    pub spd: u32,
}

/// Per-level stat deltas applied on level-up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GrowthTable {
    pub max_hp: u32,
    pub max_mp: u32,
    pub atk: u32,
    pub def: u32,
    pub spd: u32,
}

/// An (item, quantity) pair used for starting inventories and rewards.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemGrant {
    pub item: ItemId,
    pub qty: u32,
}

/// Equipped weapon/armor slots, referenced by equipment key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EquipmentSlots {
    pub weapon: Option<EquipmentId>,
    pub armor: Option<EquipmentId>,
}

/// Combat-capable half of an actor template.
///
/// Pure NPCs (shopkeepers, the king) omit this; only actors carrying a
/// combat spec can be recruited into the party.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatSpec {
    pub stats: StatBlock,
    pub growth: GrowthTable,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<SkillId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment: EquipmentSlots,
    #[cfg_attr(feature = "serde", serde(default))]
    pub starting_items: Vec<ItemGrant>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub starting_gold: u32,
}

/// Actor template: a named character that can appear on maps and, if it
/// carries a [`CombatSpec`], join the party.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorTemplate {
    pub id: ActorId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub combat: Option<CombatSpec>,
}

/// Item definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub kind: ItemKind,
}

impl ItemDefinition {
    /// Returns the consumable effects, or `None` for non-consumables.
    pub fn consumable_effects(&self) -> Option<&[ItemEffect]> {
        match &self.kind {
            ItemKind::Consumable { effects } => Some(effects),
            ItemKind::KeyItem => None,
        }
    }
}

/// Item category with type-specific data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    /// Usable from the menu or in battle; consumed on use.
    Consumable { effects: Vec<ItemEffect> },

    /// Plot-relevant item; cannot be used or discarded.
    KeyItem,
}

/// Effect applied when a consumable is used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemEffect {
    /// Restore hit points, capped at max HP.
    HealHp(u32),

    /// Restore mana, capped at max MP.
    RestoreMp(u32),
}

/// Equipment slot kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EquipSlot {
    Weapon,
    Armor,
}

/// Additive stat modifiers contributed by an equipped piece.
///
/// Total stats are always `base + Σ equipment mods`, recomputed on
/// demand rather than cached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatMods {
    pub atk: u32,
    pub def: u32,
    pub max_mp: u32,
}

/// Equipment definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipmentDefinition {
    pub id: EquipmentId,
    pub name: String,
    pub slot: EquipSlot,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mods: StatMods,
}

/// Skill definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub id: SkillId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mp_cost: u32,
    pub effect: SkillEffect,
}

/// What a skill does when it resolves.
///
/// Multipliers are integer per-mille values (1200 = x1.2) so damage math
/// stays deterministic and float-free.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillEffect {
    /// Offensive skill: `(atk * power - def * defense_factor) * variance`.
    Damage {
        power_permille: u32,
        defense_factor_permille: u32,
    },

    /// Restorative skill, capped at the target's max HP.
    HealHp(u32),
}

/// One move an enemy can select from its AI pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EnemyMove {
    Attack,
    PowerAttack,
    Defend,
}

/// A chance-gated item grant awarded on enemy defeat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropEntry {
    pub item: ItemId,
    /// Grant probability in per-mille (200 = 20%).
    pub chance_permille: u32,
    pub qty: u32,
}

/// Enemy template; battle sessions materialize an independent copy.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub id: EnemyId,
    pub name: String,
    pub stats: StatBlock,
    pub exp_reward: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gold_reward: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub drops: Vec<DropEntry>,
    /// Fixed ordered list of selectable combat actions.
    pub pattern: Vec<EnemyMove>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub boss: bool,
}

/// One roster entry of a scripted battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleEnemy {
    pub enemy: EnemyId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub qty: u32,
}

/// Scripted battle: an enemy roster paired with victory/defeat step
/// lists that are queued into the event interpreter when the battle
/// session ends.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleDefinition {
    pub id: BattleId,
    pub name: String,
    pub enemies: Vec<BattleEnemy>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub victory: Vec<EventStep>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defeat: Vec<EventStep>,
}

/// Kill-count objective of a quest.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestTarget {
    pub enemy: EnemyId,
    pub count: u32,
}

/// Reward granted exactly once when a quest completes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuestReward {
    pub exp: u32,
    pub gold: u32,
    pub items: Vec<ItemGrant>,
}

/// Quest definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestDefinition {
    pub id: QuestId,
    pub name: String,
    pub target: QuestTarget,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reward: QuestReward,
}

/// Ending definition shown by the terminal `EndGame` step.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndingDefinition {
    pub id: EndingId,
    pub title: String,
    pub text: String,
}
