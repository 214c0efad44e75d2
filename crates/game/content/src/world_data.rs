//! In-memory content database.

use std::collections::BTreeMap;

use game_core::EventStep;
use game_core::world::{
    ActorId, ActorTemplate, BattleDefinition, BattleId, EndingDefinition, EndingId, EnemyId,
    EnemyTemplate, EquipmentDefinition, EquipmentId, ItemDefinition, ItemId, MapDefinition, MapId,
    QuestDefinition, QuestId, SkillDefinition, SkillId, StartConfig, WorldOracle,
};

fn note(problems: &mut Vec<String>, ok: bool, message: impl FnOnce() -> String) {
    if !ok {
        problems.push(message());
    }
}

/// Owned content database backing the [`WorldOracle`] queries.
///
/// Built either from the built-in campaign or by the RON loader; once
/// constructed and validated it is only ever read.
#[derive(Clone, Debug)]
pub struct WorldData {
    pub start: StartConfig,
    pub actors: BTreeMap<ActorId, ActorTemplate>,
    pub items: BTreeMap<ItemId, ItemDefinition>,
    pub equipment: BTreeMap<EquipmentId, EquipmentDefinition>,
    pub skills: BTreeMap<SkillId, SkillDefinition>,
    pub enemies: BTreeMap<EnemyId, EnemyTemplate>,
    pub maps: BTreeMap<MapId, MapDefinition>,
    pub battles: BTreeMap<BattleId, BattleDefinition>,
    pub quests: BTreeMap<QuestId, QuestDefinition>,
    pub endings: BTreeMap<EndingId, EndingDefinition>,
}

impl WorldData {
    /// Cross-checks every reference in the database.
    ///
    /// Dangling keys in content are authoring bugs; catching them at
    /// load time means the engine's `require_*` lookups only fail for
    /// content that skipped validation.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();

        note(
            &mut problems,
            self.maps.contains_key(&self.start.map),
            || format!("start map `{}` does not exist", self.start.map),
        );
        for actor in &self.start.party {
            note(&mut problems, self.actors.contains_key(actor), || {
                format!("starting party member `{actor}` does not exist")
            });
        }

        for (id, actor) in &self.actors {
            let Some(combat) = &actor.combat else {
                continue;
            };
            for skill in &combat.skills {
                note(&mut problems, self.skills.contains_key(skill), || {
                    format!("actor `{id}` references unknown skill `{skill}`")
                });
            }
            for equipment in [&combat.equipment.weapon, &combat.equipment.armor]
                .into_iter()
                .flatten()
            {
                note(&mut problems, self.equipment.contains_key(equipment), || {
                    format!("actor `{id}` references unknown equipment `{equipment}`")
                });
            }
            for grant in &combat.starting_items {
                note(&mut problems, self.items.contains_key(&grant.item), || {
                    format!("actor `{id}` starts with unknown item `{}`", grant.item)
                });
            }
        }

        for (id, enemy) in &self.enemies {
            for drop in &enemy.drops {
                note(&mut problems, self.items.contains_key(&drop.item), || {
                    format!("enemy `{id}` drops unknown item `{}`", drop.item)
                });
            }
        }

        for (id, battle) in &self.battles {
            note(&mut problems, !battle.enemies.is_empty(), || {
                format!("battle `{id}` has an empty roster")
            });
            for entry in &battle.enemies {
                note(&mut problems, self.enemies.contains_key(&entry.enemy), || {
                    format!("battle `{id}` references unknown enemy `{}`", entry.enemy)
                });
            }
            for step in battle.victory.iter().chain(&battle.defeat) {
                self.validate_step(step, &format!("battle `{id}`"), &mut problems);
            }
        }

        for (id, quest) in &self.quests {
            note(
                &mut problems,
                self.enemies.contains_key(&quest.target.enemy),
                || format!("quest `{id}` targets unknown enemy `{}`", quest.target.enemy),
            );
            for grant in &quest.reward.items {
                note(&mut problems, self.items.contains_key(&grant.item), || {
                    format!("quest `{id}` rewards unknown item `{}`", grant.item)
                });
            }
        }

        for (id, map) in &self.maps {
            let grid_matches = map.collision.len() == map.height as usize
                && map
                    .collision
                    .iter()
                    .all(|row| row.len() == map.width as usize);
            note(&mut problems, grid_matches, || {
                format!("map `{id}` collision grid does not match its size")
            });
            for exit in &map.exits {
                note(&mut problems, self.maps.contains_key(&exit.to_map), || {
                    format!("map `{id}` exit leads to unknown map `{}`", exit.to_map)
                });
            }
            for npc in &map.npcs {
                note(&mut problems, self.actors.contains_key(&npc.actor), || {
                    format!("map `{id}` places unknown actor `{}`", npc.actor)
                });
            }
            if let Some(encounters) = &map.encounters {
                for entry in &encounters.entries {
                    note(&mut problems, self.enemies.contains_key(&entry.enemy), || {
                        format!("map `{id}` encounter uses unknown enemy `{}`", entry.enemy)
                    });
                }
            }
            for event in &map.events {
                let context = format!("map `{id}` event `{}`", event.id);
                for step in &event.steps {
                    self.validate_step(step, &context, &mut problems);
                }
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }

    fn validate_step(&self, step: &EventStep, context: &str, problems: &mut Vec<String>) {
        match step {
            EventStep::GiveItem { item, .. } | EventStep::RemoveItem { item, .. } => {
                note(problems, self.items.contains_key(item), || {
                    format!("{context} references unknown item `{item}`")
                });
            }
            EventStep::AddPartyMember { actor } => match self.actors.get(actor) {
                None => problems.push(format!("{context} recruits unknown actor `{actor}`")),
                Some(template) => note(problems, template.combat.is_some(), || {
                    format!("{context} recruits non-playable actor `{actor}`")
                }),
            },
            EventStep::StartQuest { quest } | EventStep::CompleteQuest { quest } => {
                note(problems, self.quests.contains_key(quest), || {
                    format!("{context} references unknown quest `{quest}`")
                });
            }
            EventStep::StartBattle { battle } => {
                note(problems, self.battles.contains_key(battle), || {
                    format!("{context} references unknown battle `{battle}`")
                });
            }
            EventStep::EndGame { ending } => {
                note(problems, self.endings.contains_key(ending), || {
                    format!("{context} references unknown ending `{ending}`")
                });
            }
            EventStep::ShowDialogue { .. }
            | EventStep::SetFlag { .. }
            | EventStep::GiveGold { .. }
            | EventStep::GameOver
            | EventStep::Unknown => {}
        }
    }
}

impl WorldOracle for WorldData {
    fn start(&self) -> &StartConfig {
        &self.start
    }

    fn actor(&self, id: &ActorId) -> Option<&ActorTemplate> {
        self.actors.get(id)
    }

    fn item(&self, id: &ItemId) -> Option<&ItemDefinition> {
        self.items.get(id)
    }

    fn equipment(&self, id: &EquipmentId) -> Option<&EquipmentDefinition> {
        self.equipment.get(id)
    }

    fn skill(&self, id: &SkillId) -> Option<&SkillDefinition> {
        self.skills.get(id)
    }

    fn enemy(&self, id: &EnemyId) -> Option<&EnemyTemplate> {
        self.enemies.get(id)
    }

    fn map(&self, id: &MapId) -> Option<&MapDefinition> {
        self.maps.get(id)
    }

    fn battle(&self, id: &BattleId) -> Option<&BattleDefinition> {
        self.battles.get(id)
    }

    fn quest(&self, id: &QuestId) -> Option<&QuestDefinition> {
        self.quests.get(id)
    }

    fn ending(&self, id: &EndingId) -> Option<&EndingDefinition> {
        self.endings.get(id)
    }

    fn quests(&self) -> Vec<&QuestDefinition> {
        self.quests.values().collect()
    }
}
