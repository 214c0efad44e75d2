//! The built-in "Rescue the Princess" campaign.
//!
//! Four maps, one boss, one side quest. Ships compiled in so the game
//! runs without any data files on disk; the RON loader exists for
//! replacing or extending it.

use std::collections::BTreeMap;

use game_core::EventStep;
use game_core::event::EventCondition;
use game_core::world::{
    ActorId, ActorTemplate, BattleDefinition, BattleEnemy, BattleId, CombatSpec, DropEntry,
    EncounterEntry, EncounterTable, EndingDefinition, EndingId, EnemyId, EnemyMove, EnemyTemplate,
    EquipSlot, EquipmentDefinition, EquipmentId, EquipmentSlots, EventId, FlagId, FlagInit,
    GrowthTable, ItemDefinition, ItemEffect, ItemGrant, ItemId, ItemKind, MapDefinition, MapEvent,
    MapExit, MapId, NpcPlacement, Position, QuestDefinition, QuestId, QuestReward, QuestTarget,
    SkillDefinition, SkillEffect, SkillId, StartConfig, StatBlock, StatMods, TriggerKind,
};

use crate::world_data::WorldData;

fn say(speaker: &str, text: &str) -> EventStep {
    EventStep::ShowDialogue {
        speaker: Some(ActorId::new(speaker)),
        text: text.to_owned(),
    }
}

fn narrate(text: &str) -> EventStep {
    EventStep::ShowDialogue {
        speaker: None,
        text: text.to_owned(),
    }
}

fn set(flag: &str, value: bool) -> EventStep {
    EventStep::SetFlag {
        flag: FlagId::new(flag),
        value,
    }
}

/// Builds the campaign database. Always passes [`WorldData::validate`];
/// there is a test pinning that.
pub fn rescue_the_princess() -> WorldData {
    let mut world = WorldData {
        start: StartConfig {
            map: MapId::new("village_01"),
            spawn: Position::new(6, 10),
            party: vec![ActorId::new("hero")],
            flags: ["met_king", "got_castle_key", "boss_defeated", "princess_rescued"]
                .into_iter()
                .map(|flag| FlagInit {
                    flag: FlagId::new(flag),
                    value: false,
                })
                .collect(),
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

    actors(&mut world);
    items(&mut world);
    enemies(&mut world);
    maps(&mut world);

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
                narrate("The Dark Knight is defeated!"),
                set("boss_defeated", true),
            ],
            defeat: vec![narrate("The hero has fallen..."), EventStep::GameOver],
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
            title: "The Princess Rescued".into(),
            text: "The hero saved the princess, and light returned to the land.\n\n\
                   In the kingdom at peace, the hero and the princess lived \
                   happily ever after.\n\n~ FIN ~"
                .into(),
        },
    );

    world
}

fn actors(world: &mut WorldData) {
    world.actors.insert(
        ActorId::new("hero"),
        ActorTemplate {
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
                starting_gold: 10,
            }),
        },
    );
    for (id, name) in [
        ("princess", "Princess"),
        ("king", "King"),
        ("villager_a", "Villager"),
    ] {
        world.actors.insert(
            ActorId::new(id),
            ActorTemplate {
                id: ActorId::new(id),
                name: name.into(),
                combat: None,
            },
        );
    }
}

fn items(world: &mut WorldData) {
    world.items.insert(
        ItemId::new("potion"),
        ItemDefinition {
            id: ItemId::new("potion"),
            name: "Potion".into(),
            description: "Restores 20 HP.".into(),
            kind: ItemKind::Consumable {
                effects: vec![ItemEffect::HealHp(20)],
            },
        },
    );
    world.items.insert(
        ItemId::new("castle_key"),
        ItemDefinition {
            id: ItemId::new("castle_key"),
            name: "Castle Key".into(),
            description: "Opens the castle gate.".into(),
            kind: ItemKind::KeyItem,
        },
    );

    world.equipment.insert(
        EquipmentId::new("wood_sword"),
        EquipmentDefinition {
            id: EquipmentId::new("wood_sword"),
            name: "Wooden Sword".into(),
            slot: EquipSlot::Weapon,
            mods: StatMods {
                atk: 2,
                def: 0,
                max_mp: 0,
            },
        },
    );
    world.equipment.insert(
        EquipmentId::new("cloth_armor"),
        EquipmentDefinition {
            id: EquipmentId::new("cloth_armor"),
            name: "Cloth Armor".into(),
            slot: EquipSlot::Armor,
            mods: StatMods {
                atk: 0,
                def: 1,
                max_mp: 0,
            },
        },
    );

    world.skills.insert(
        SkillId::new("slash"),
        SkillDefinition {
            id: SkillId::new("slash"),
            name: "Slash".into(),
            mp_cost: 2,
            effect: SkillEffect::Damage {
                power_permille: 1200,
                defense_factor_permille: 600,
            },
        },
    );
}

fn enemies(world: &mut WorldData) {
    world.enemies.insert(
        EnemyId::new("slime"),
        EnemyTemplate {
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
            gold_reward: 2,
            drops: vec![DropEntry {
                item: ItemId::new("potion"),
                chance_permille: 200,
                qty: 1,
            }],
            pattern: vec![EnemyMove::Attack],
            boss: false,
        },
    );
    world.enemies.insert(
        EnemyId::new("goblin"),
        EnemyTemplate {
            id: EnemyId::new("goblin"),
            name: "Goblin".into(),
            stats: StatBlock {
                max_hp: 18,
                max_mp: 0,
                atk: 5,
                def: 2,
                spd: 3,
            },
            exp_reward: 7,
            gold_reward: 5,
            drops: vec![DropEntry {
                item: ItemId::new("potion"),
                chance_permille: 150,
                qty: 1,
            }],
            pattern: vec![EnemyMove::Attack, EnemyMove::Attack, EnemyMove::Defend],
            boss: false,
        },
    );
    world.enemies.insert(
        EnemyId::new("dark_knight"),
        EnemyTemplate {
            id: EnemyId::new("dark_knight"),
            name: "Dark Knight".into(),
            stats: StatBlock {
                max_hp: 60,
                max_mp: 0,
                atk: 10,
                def: 6,
                spd: 4,
            },
            exp_reward: 40,
            gold_reward: 30,
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
        },
    );
}

fn maps(world: &mut WorldData) {
    world.maps.insert(MapId::new("village_01"), village());
    world.maps.insert(MapId::new("castle_entrance"), castle_entrance());
    world.maps.insert(MapId::new("castle_hall"), castle_hall());
    world.maps.insert(MapId::new("castle_tower"), castle_tower());
}

fn village() -> MapDefinition {
    MapDefinition {
        id: MapId::new("village_01"),
        name: "Starting Village".into(),
        width: 16,
        height: 16,
        collision: vec![
            vec![1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            vec![1, 0, 0, 1, 1, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 1],
            vec![1, 0, 0, 1, 1, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 1],
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            vec![1, 0, 0, 1, 1, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 1],
            vec![1, 0, 0, 1, 1, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 1],
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            vec![1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
        ],
        encounters: Some(EncounterTable {
            rate_permille: 80,
            entries: vec![
                EncounterEntry {
                    enemy: EnemyId::new("slime"),
                    weight: 70,
                },
                EncounterEntry {
                    enemy: EnemyId::new("goblin"),
                    weight: 30,
                },
            ],
        }),
        exits: vec![MapExit {
            at: Position::new(15, 8),
            to_map: MapId::new("castle_entrance"),
            spawn: Position::new(1, 5),
            condition: None,
        }],
        events: vec![
            MapEvent {
                id: EventId::new("ev_king_intro"),
                trigger: TriggerKind::Action,
                at: Some(Position::new(6, 6)),
                condition: Some(EventCondition::expects(FlagId::new("met_king"), false)),
                steps: vec![
                    say(
                        "king",
                        "Hero... the princess has been taken by the Dark Knight! \
                         Make for the castle!",
                    ),
                    set("met_king", true),
                    say(
                        "king",
                        "The castle gate is sealed. The key should be found \
                         somewhere inside the castle.",
                    ),
                ],
            },
            MapEvent {
                id: EventId::new("ev_king_repeat"),
                trigger: TriggerKind::Action,
                at: Some(Position::new(6, 6)),
                condition: Some(EventCondition::expects(FlagId::new("met_king"), true)),
                steps: vec![say("king", "The princess... I am counting on you!")],
            },
            MapEvent {
                id: EventId::new("ev_villager_quest"),
                trigger: TriggerKind::Action,
                at: Some(Position::new(4, 10)),
                condition: Some(EventCondition::expects(
                    FlagId::new("accepted_slime_hunt"),
                    false,
                )),
                steps: vec![
                    say(
                        "villager_a",
                        "Monsters lurk in the tall grass. Could you thin out \
                         the slimes? Two should do it.",
                    ),
                    EventStep::StartQuest {
                        quest: QuestId::new("slime_hunt"),
                    },
                    set("accepted_slime_hunt", true),
                ],
            },
            MapEvent {
                id: EventId::new("ev_villager_hint"),
                trigger: TriggerKind::Action,
                at: Some(Position::new(4, 10)),
                condition: Some(EventCondition::expects(
                    FlagId::new("accepted_slime_hunt"),
                    true,
                )),
                steps: vec![say(
                    "villager_a",
                    "Monsters come out in the grass. Go easy on your potions.",
                )],
            },
        ],
        npcs: vec![
            NpcPlacement {
                actor: ActorId::new("king"),
                at: Position::new(6, 6),
                condition: None,
            },
            NpcPlacement {
                actor: ActorId::new("villager_a"),
                at: Position::new(4, 10),
                condition: None,
            },
        ],
    }
}

fn castle_entrance() -> MapDefinition {
    MapDefinition {
        id: MapId::new("castle_entrance"),
        name: "Castle Gate".into(),
        width: 12,
        height: 10,
        collision: vec![
            vec![1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            vec![1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
        ],
        encounters: None,
        exits: vec![
            MapExit {
                at: Position::new(0, 5),
                to_map: MapId::new("village_01"),
                spawn: Position::new(14, 8),
                condition: None,
            },
            MapExit {
                at: Position::new(11, 5),
                to_map: MapId::new("castle_hall"),
                spawn: Position::new(1, 5),
                condition: Some(EventCondition::expects(FlagId::new("got_castle_key"), true)),
            },
        ],
        events: vec![
            MapEvent {
                id: EventId::new("ev_gate_locked"),
                trigger: TriggerKind::Action,
                at: Some(Position::new(11, 5)),
                condition: Some(EventCondition::expects(
                    FlagId::new("got_castle_key"),
                    false,
                )),
                steps: vec![narrate("The gate is locked tight...")],
            },
            // The key chest sits outside the gate it opens; behind the
            // gate the key would be unreachable.
            MapEvent {
                id: EventId::new("ev_key_chest"),
                trigger: TriggerKind::Action,
                at: Some(Position::new(9, 0)),
                condition: Some(EventCondition::expects(
                    FlagId::new("got_castle_key"),
                    false,
                )),
                steps: vec![
                    narrate("You opened the chest!"),
                    EventStep::GiveItem {
                        item: ItemId::new("castle_key"),
                        qty: 1,
                    },
                    set("got_castle_key", true),
                    narrate("You obtained the Castle Key!"),
                ],
            },
            MapEvent {
                id: EventId::new("ev_key_chest_empty"),
                trigger: TriggerKind::Action,
                at: Some(Position::new(9, 0)),
                condition: Some(EventCondition::expects(
                    FlagId::new("got_castle_key"),
                    true,
                )),
                steps: vec![narrate("The chest is empty.")],
            },
        ],
        npcs: Vec::new(),
    }
}

fn castle_hall() -> MapDefinition {
    MapDefinition {
        id: MapId::new("castle_hall"),
        name: "Castle Hall".into(),
        width: 14,
        height: 12,
        collision: vec![
            vec![1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            vec![1, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1],
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            vec![1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
        ],
        encounters: None,
        exits: vec![
            MapExit {
                at: Position::new(0, 5),
                to_map: MapId::new("castle_entrance"),
                spawn: Position::new(10, 5),
                condition: None,
            },
            MapExit {
                at: Position::new(13, 2),
                to_map: MapId::new("castle_tower"),
                spawn: Position::new(1, 4),
                condition: None,
            },
        ],
        events: vec![
            MapEvent {
                id: EventId::new("ev_hall_chest"),
                trigger: TriggerKind::Action,
                at: Some(Position::new(7, 9)),
                condition: Some(EventCondition::expects(
                    FlagId::new("opened_hall_chest"),
                    false,
                )),
                steps: vec![
                    narrate("You opened the chest!"),
                    EventStep::GiveItem {
                        item: ItemId::new("potion"),
                        qty: 2,
                    },
                    set("opened_hall_chest", true),
                    narrate("You found 2 Potions!"),
                ],
            },
            MapEvent {
                id: EventId::new("ev_hall_chest_empty"),
                trigger: TriggerKind::Action,
                at: Some(Position::new(7, 9)),
                condition: Some(EventCondition::expects(
                    FlagId::new("opened_hall_chest"),
                    true,
                )),
                steps: vec![narrate("The chest is empty.")],
            },
        ],
        npcs: Vec::new(),
    }
}

fn castle_tower() -> MapDefinition {
    MapDefinition {
        id: MapId::new("castle_tower"),
        name: "Castle Tower (Top Floor)".into(),
        width: 10,
        height: 8,
        collision: vec![
            vec![1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            vec![1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
        ],
        encounters: None,
        exits: vec![MapExit {
            at: Position::new(0, 4),
            to_map: MapId::new("castle_hall"),
            spawn: Position::new(12, 2),
            condition: None,
        }],
        events: vec![
            MapEvent {
                id: EventId::new("ev_boss_fight"),
                trigger: TriggerKind::Touch,
                at: Some(Position::new(7, 3)),
                condition: Some(EventCondition::expects(
                    FlagId::new("boss_defeated"),
                    false,
                )),
                steps: vec![
                    narrate("The Dark Knight bars the way!"),
                    EventStep::StartBattle {
                        battle: BattleId::new("boss_dark_knight"),
                    },
                ],
            },
            MapEvent {
                id: EventId::new("ev_after_boss"),
                trigger: TriggerKind::Auto,
                at: None,
                condition: Some(
                    EventCondition::expects(FlagId::new("boss_defeated"), true)
                        .and(FlagId::new("princess_rescued"), false),
                ),
                steps: vec![
                    say("princess", "Thank you... you came for me."),
                    set("princess_rescued", true),
                    EventStep::EndGame {
                        ending: EndingId::new("good_end"),
                    },
                ],
            },
        ],
        npcs: vec![NpcPlacement {
            actor: ActorId::new("princess"),
            at: Position::new(8, 3),
            condition: Some(EventCondition::expects(FlagId::new("boss_defeated"), true)),
        }],
    }
}
