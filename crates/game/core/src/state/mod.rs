//! Mutable session state.
//!
//! [`SessionState`] is the explicit context object threaded through the
//! event interpreter and battle engine; there are no ambient globals.
//! It owns independent runtime copies of world-data templates, and the
//! templates themselves are never mutated.

mod flags;
mod inventory;
mod party;
mod quest;

pub use flags::FlagSet;
pub use inventory::{Inventory, ItemStack};
pub use party::{LevelUp, Party, PartyMember};
pub use quest::QuestLog;

use crate::config::GameConfig;
use crate::world::{ActorId, ContentError, EnemyId, ItemEffect, ItemId, QuestId, WorldOracle};

/// A quest finished and its reward was granted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestCompletion {
    pub quest: QuestId,
    pub name: String,
    pub level_ups: Vec<LevelUp>,
}

/// Outcome of using a consumable item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemUse {
    pub item_name: String,
    pub healed_hp: u32,
    pub restored_mp: u32,
}

/// Failures when trying to use an item. All but [`ItemUseError::Content`]
/// are recoverable refusals with no side effects.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ItemUseError {
    #[error("item `{0}` is not carried")]
    NotCarried(ItemId),

    #[error("item `{0}` cannot be used")]
    NotUsable(ItemId),

    #[error("the party is empty")]
    EmptyParty,

    #[error(transparent)]
    Content(#[from] ContentError),
}

/// All mutable state of one play session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub flags: FlagSet,
    pub party: Party,
    pub inventory: Inventory,
    pub gold: u32,
    pub quests: QuestLog,
}

impl SessionState {
    /// Builds the new-game state from the world's start configuration:
    /// initial flags and the starting party, with each recruit's
    /// starting items and gold merged into the session.
    pub fn new_game(world: &dyn WorldOracle) -> Result<Self, ContentError> {
        let start = world.start();
        let mut state = Self {
            flags: FlagSet::from_inits(&start.flags),
            ..Self::default()
        };
        for actor in start.party.clone() {
            state.recruit(world, &actor)?;
        }
        Ok(state)
    }

    /// Recruits an actor into the party; idempotent. A new recruit's
    /// starting items and gold are merged into the shared pools.
    pub fn recruit(
        &mut self,
        world: &dyn WorldOracle,
        actor: &ActorId,
    ) -> Result<bool, ContentError> {
        let template = world.require_actor(actor)?;
        if !self.party.recruit(template)? {
            return Ok(false);
        }
        if let Some(combat) = &template.combat {
            for grant in &combat.starting_items {
                world.require_item(&grant.item)?;
                self.inventory.give(grant.item.clone(), grant.qty);
            }
            self.gold = self.gold.saturating_add(combat.starting_gold);
        }
        Ok(true)
    }

    /// Activates a quest; returns false when it is already active or
    /// completed.
    pub fn start_quest(
        &mut self,
        world: &dyn WorldOracle,
        quest: &QuestId,
    ) -> Result<bool, ContentError> {
        world.require_quest(quest)?;
        Ok(self.quests.start(quest.clone()))
    }

    /// Completes an active quest and grants its reward exactly once.
    /// Returns `None` when the quest was not active.
    pub fn complete_quest(
        &mut self,
        world: &dyn WorldOracle,
        quest: &QuestId,
        config: &GameConfig,
    ) -> Result<Option<QuestCompletion>, ContentError> {
        let definition = world.require_quest(quest)?.clone();
        if !self.quests.mark_completed(quest) {
            return Ok(None);
        }
        for grant in &definition.reward.items {
            world.require_item(&grant.item)?;
            self.inventory.give(grant.item.clone(), grant.qty);
        }
        self.gold = self.gold.saturating_add(definition.reward.gold);
        let level_ups = self.grant_party_exp(definition.reward.exp, config);
        Ok(Some(QuestCompletion {
            quest: definition.id,
            name: definition.name,
            level_ups,
        }))
    }

    /// Records an enemy defeat against active kill-count quests and
    /// completes every quest whose target count is now reached.
    pub fn record_enemy_defeated(
        &mut self,
        world: &dyn WorldOracle,
        enemy: &EnemyId,
        config: &GameConfig,
    ) -> Result<Vec<QuestCompletion>, ContentError> {
        let ready = self.quests.record_kill(world, enemy);
        let mut completions = Vec::new();
        for quest in ready {
            if let Some(completion) = self.complete_quest(world, &quest, config)? {
                completions.push(completion);
            }
        }
        Ok(completions)
    }

    /// Grants experience to every party member. Returns all level-ups
    /// in party order.
    pub fn grant_party_exp(&mut self, amount: u32, config: &GameConfig) -> Vec<LevelUp> {
        if amount == 0 {
            return Vec::new();
        }
        let mut level_ups = Vec::new();
        for member in self.party.iter_mut() {
            level_ups.extend(member.grant_exp(amount, config));
        }
        level_ups
    }

    /// Applies one consumable to the lead member, then decrements the
    /// stack. Refuses without side effects when the item is absent or
    /// not consumable.
    pub fn use_consumable(
        &mut self,
        world: &dyn WorldOracle,
        item: &ItemId,
    ) -> Result<ItemUse, ItemUseError> {
        let definition = world.require_item(item)?;
        let Some(effects) = definition.consumable_effects() else {
            return Err(ItemUseError::NotUsable(item.clone()));
        };
        if self.inventory.quantity(item) == 0 {
            return Err(ItemUseError::NotCarried(item.clone()));
        }
        if self.party.is_empty() {
            return Err(ItemUseError::EmptyParty);
        }

        let effects = effects.to_vec();
        let item_name = definition.name.clone();
        let mut healed_hp = 0;
        let mut restored_mp = 0;
        if let Some(hero) = self.party.hero_mut() {
            for effect in &effects {
                match effect {
                    ItemEffect::HealHp(amount) => healed_hp += hero.heal_hp(*amount),
                    ItemEffect::RestoreMp(amount) => {
                        restored_mp += hero.restore_mp(*amount, world);
                    }
                }
            }
        }
        self.inventory.consume_one(item);
        Ok(ItemUse {
            item_name,
            healed_hp,
            restored_mp,
        })
    }
}
