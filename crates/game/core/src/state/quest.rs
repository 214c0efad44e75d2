//! Quest progress tracking.

use std::collections::BTreeMap;

use crate::world::{EnemyId, QuestId, WorldOracle};

/// Active/completed quest lists plus per-quest kill counts.
///
/// Invariant: a quest id is in at most one of {active, completed}.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuestLog {
    active: Vec<QuestId>,
    completed: Vec<QuestId>,
    kills: BTreeMap<QuestId, u32>,
}

impl QuestLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self, quest: &QuestId) -> bool {
        self.active.contains(quest)
    }

    pub fn is_completed(&self, quest: &QuestId) -> bool {
        self.completed.contains(quest)
    }

    pub fn active_ids(&self) -> &[QuestId] {
        &self.active
    }

    pub fn completed_ids(&self) -> &[QuestId] {
        &self.completed
    }

    pub fn kill_count(&self, quest: &QuestId) -> u32 {
        self.kills.get(quest).copied().unwrap_or(0)
    }

    /// Activates a quest. Returns false if it is already active or
    /// completed.
    pub fn start(&mut self, quest: QuestId) -> bool {
        if self.is_active(&quest) || self.is_completed(&quest) {
            return false;
        }
        self.active.push(quest);
        true
    }

    /// Moves a quest from active to completed. Returns false if it was
    /// not active, so rewards cannot be granted twice.
    pub fn mark_completed(&mut self, quest: &QuestId) -> bool {
        let Some(index) = self.active.iter().position(|id| id == quest) else {
            return false;
        };
        let id = self.active.remove(index);
        self.kills.remove(&id);
        self.completed.push(id);
        true
    }

    /// Records a kill against every active quest targeting `enemy` and
    /// returns the quests whose target count is now reached.
    pub fn record_kill(&mut self, world: &dyn WorldOracle, enemy: &EnemyId) -> Vec<QuestId> {
        let mut ready = Vec::new();
        for definition in world.quests() {
            if definition.target.enemy != *enemy || !self.is_active(&definition.id) {
                continue;
            }
            let count = self.kills.entry(definition.id.clone()).or_insert(0);
            *count += 1;
            if *count >= definition.target.count {
                ready.push(definition.id.clone());
            }
        }
        ready
    }
}
