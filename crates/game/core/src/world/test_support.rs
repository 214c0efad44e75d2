//! In-memory world fixture shared by unit tests.

use std::collections::BTreeMap;

use crate::event::EventStep;

use super::{
    ActorId, ActorTemplate, BattleDefinition, BattleEnemy, BattleId, CombatSpec, DropEntry,
    EndingDefinition, EndingId, EnemyId, EnemyMove, EnemyTemplate, EquipSlot, EquipmentDefinition,
    EquipmentId, EquipmentSlots, GrowthTable, ItemDefinition, ItemEffect, ItemGrant, ItemId,
    ItemKind, MapDefinition, MapId, Position, QuestDefinition, QuestId, QuestReward, QuestTarget,
    SkillDefinition, SkillEffect, SkillId, StatBlock, StatMods, StartConfig, WorldOracle,
};

/// Small but complete content database for exercising the rules layer
/// without touching the loader crate.
pub(crate) struct TestWorld {
    start: StartConfig,
    actors: BTreeMap<ActorId, ActorTemplate>,
    items: BTreeMap<ItemId, ItemDefinition>,
    equipment: BTreeMap<EquipmentId, EquipmentDefinition>,
    skills: BTreeMap<SkillId, SkillDefinition>,
    enemies: BTreeMap<EnemyId, EnemyTemplate>,
    maps: BTreeMap<MapId, MapDefinition>,
    battles: BTreeMap<BattleId, BattleDefinition>,
    quests: BTreeMap<QuestId, QuestDefinition>,
    endings: BTreeMap<EndingId, EndingDefinition>,
}

impl TestWorld {
    /// A cut-down rescue campaign: one hero, a handful of enemies, the
    /// boss battle, the slime hunt quest, and the good ending.
    pub(crate) fn rescue_campaign() -> Self {
        let mut world = Self {
            start: StartConfig {
                map: MapId::new("village"),
                spawn: Position::new(2, 2),
                party: vec![ActorId::new("hero")],
                flags: Vec::new(),
            },
            actors: BTreeMap::new(),
            items: BTreeMap::new(),
            equipment: BTreeMap::new(),
            skills: BTreeMap::new(),
            enemies: BTreeMap::new(),
            maps: BTreeMap::new(),
            battles: BTreeMap::new(),
            quests: BTreeMap::new(),
            endings: BTreeMap::new(),
        };

        world.add_actor(ActorTemplate {
            id: ActorId::new("hero"),
            name: "Hero".into(),
            combat: Some(CombatSpec {
                stats: StatBlock {
                    max_hp: 30,
                    max_mp: 10,
                    atk: 6,
                    def: 3,
                    spd: 4,
                },
                growth: GrowthTable {
                    max_hp: 5,
                    max_mp: 2,
                    atk: 2,
                    def: 1,
                    spd: 1,
                },
                skills: vec![SkillId::new("slash")],
                equipment: EquipmentSlots {
                    weapon: Some(EquipmentId::new("wood_sword")),
                    armor: Some(EquipmentId::new("cloth_armor")),
                },
                starting_items: vec![ItemGrant {
                    item: ItemId::new("potion"),
                    qty: 2,
                }],
                starting_gold: 0,
            }),
        });
        world.add_actor(ActorTemplate {
            id: ActorId::new("king"),
            name: "King".into(),
            combat: None,
        });
        world.add_actor(ActorTemplate {
            id: ActorId::new("princess"),
            name: "Princess".into(),
            combat: None,
        });

        world.add_item(ItemDefinition {
            id: ItemId::new("potion"),
            name: "Potion".into(),
            description: "Restores 20 HP.".into(),
            kind: ItemKind::Consumable {
                effects: vec![ItemEffect::HealHp(20)],
            },
        });
        world.add_item(ItemDefinition {
            id: ItemId::new("castle_key"),
            name: "Castle Key".into(),
            description: "Opens the castle gate.".into(),
            kind: ItemKind::KeyItem,
        });

        world.add_equipment(EquipmentDefinition {
            id: EquipmentId::new("wood_sword"),
            name: "Wooden Sword".into(),
            slot: EquipSlot::Weapon,
            mods: StatMods {
                atk: 2,
                def: 0,
                max_mp: 0,
            },
        });
        world.add_equipment(EquipmentDefinition {
            id: EquipmentId::new("cloth_armor"),
            name: "Cloth Armor".into(),
            slot: EquipSlot::Armor,
            mods: StatMods {
                atk: 0,
                def: 1,
                max_mp: 0,
            },
        });

        world.add_skill(SkillDefinition {
            id: SkillId::new("slash"),
            name: "Slash".into(),
            mp_cost: 3,
            effect: SkillEffect::Damage {
                power_permille: 1200,
                defense_factor_permille: 600,
            },
        });

        world.add_enemy(EnemyTemplate {
            id: EnemyId::new("slime"),
            name: "Slime".into(),
            stats: StatBlock {
                max_hp: 12,
                max_mp: 0,
                atk: 3,
                def: 1,
                spd: 2,
            },
            exp_reward: 4,
            gold_reward: 3,
            drops: vec![DropEntry {
                item: ItemId::new("potion"),
                chance_permille: 200,
                qty: 1,
            }],
            pattern: vec![EnemyMove::Attack],
            boss: false,
        });
        world.add_enemy(EnemyTemplate {
            id: EnemyId::new("goblin"),
            name: "Goblin".into(),
            stats: StatBlock {
                max_hp: 18,
                max_mp: 0,
                atk: 5,
                def: 2,
                spd: 3,
            },
            exp_reward: 8,
            gold_reward: 6,
            drops: Vec::new(),
            pattern: vec![EnemyMove::Attack, EnemyMove::Attack, EnemyMove::Defend],
            boss: false,
        });
        world.add_enemy(EnemyTemplate {
            id: EnemyId::new("dark_knight"),
            name: "Dark Knight".into(),
            stats: StatBlock {
                max_hp: 60,
                max_mp: 0,
                atk: 10,
                def: 6,
                spd: 5,
            },
            exp_reward: 40,
            gold_reward: 50,
            drops: vec![DropEntry {
                item: ItemId::new("castle_key"),
                chance_permille: 1000,
                qty: 1,
            }],
            pattern: vec![
                EnemyMove::Attack,
                EnemyMove::Attack,
                EnemyMove::PowerAttack,
            ],
            boss: true,
        });

        world.maps.insert(
            MapId::new("village"),
            MapDefinition {
                id: MapId::new("village"),
                name: "Village".into(),
                width: 5,
                height: 5,
                collision: vec![vec![0; 5]; 5],
                encounters: None,
                exits: Vec::new(),
                events: Vec::new(),
                npcs: Vec::new(),
            },
        );

        world.battles.insert(
            BattleId::new("boss_dark_knight"),
            BattleDefinition {
                id: BattleId::new("boss_dark_knight"),
                name: "Dark Knight".into(),
                enemies: vec![BattleEnemy {
                    enemy: EnemyId::new("dark_knight"),
                    qty: 1,
                }],
                victory: vec![
                    EventStep::ShowDialogue {
                        speaker: None,
                        text: "The Dark Knight falls.".into(),
                    },
                    EventStep::SetFlag {
                        flag: super::FlagId::new("boss_defeated"),
                        value: true,
                    },
                ],
                defeat: vec![EventStep::GameOver],
            },
        );

        world.quests.insert(
            QuestId::new("slime_hunt"),
            QuestDefinition {
                id: QuestId::new("slime_hunt"),
                name: "Slime Hunt".into(),
                target: QuestTarget {
                    enemy: EnemyId::new("slime"),
                    count: 2,
                },
                reward: QuestReward {
                    exp: 10,
                    gold: 15,
                    items: vec![ItemGrant {
                        item: ItemId::new("potion"),
                        qty: 1,
                    }],
                },
            },
        );

        world.endings.insert(
            EndingId::new("good_end"),
            EndingDefinition {
                id: EndingId::new("good_end"),
                title: "Peace Returns".into(),
                text: "The princess is home and the realm is safe.".into(),
            },
        );

        world
    }

    fn add_actor(&mut self, template: ActorTemplate) {
        self.actors.insert(template.id.clone(), template);
    }

    fn add_item(&mut self, definition: ItemDefinition) {
        self.items.insert(definition.id.clone(), definition);
    }

    fn add_equipment(&mut self, definition: EquipmentDefinition) {
        self.equipment.insert(definition.id.clone(), definition);
    }

    fn add_skill(&mut self, definition: SkillDefinition) {
        self.skills.insert(definition.id.clone(), definition);
    }

    fn add_enemy(&mut self, template: EnemyTemplate) {
        self.enemies.insert(template.id.clone(), template);
    }
}

impl WorldOracle for TestWorld {
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
