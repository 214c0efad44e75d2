//! World database loader.

use std::path::Path;

use game_core::world::{
    ActorTemplate, BattleDefinition, EndingDefinition, EnemyTemplate, EquipmentDefinition,
    ItemDefinition, MapDefinition, QuestDefinition, SkillDefinition, StartConfig,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};
use crate::world_data::WorldData;

/// World database structure for RON files.
///
/// Flat catalog lists; the loader indexes them by id and rejects
/// duplicates and dangling references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldCatalog {
    pub start: StartConfig,
    #[serde(default)]
    pub actors: Vec<ActorTemplate>,
    #[serde(default)]
    pub items: Vec<ItemDefinition>,
    #[serde(default)]
    pub equipment: Vec<EquipmentDefinition>,
    #[serde(default)]
    pub skills: Vec<SkillDefinition>,
    #[serde(default)]
    pub enemies: Vec<EnemyTemplate>,
    #[serde(default)]
    pub maps: Vec<MapDefinition>,
    #[serde(default)]
    pub battles: Vec<BattleDefinition>,
    #[serde(default)]
    pub quests: Vec<QuestDefinition>,
    #[serde(default)]
    pub endings: Vec<EndingDefinition>,
}

/// Loader for a full world database from a RON file.
pub struct WorldLoader;

impl WorldLoader {
    /// Load and validate a world database from a RON file.
    pub fn load(path: &Path) -> LoadResult<WorldData> {
        let content = read_file(path)?;
        let catalog: WorldCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse world RON: {}", e))?;
        Self::build(catalog)
    }

    /// Index a parsed catalog into a validated [`WorldData`].
    pub fn build(catalog: WorldCatalog) -> LoadResult<WorldData> {
        let mut world = WorldData {
            start: catalog.start,
            actors: Default::default(),
            items: Default::default(),
            equipment: Default::default(),
            skills: Default::default(),
            enemies: Default::default(),
            maps: Default::default(),
            battles: Default::default(),
            quests: Default::default(),
            endings: Default::default(),
        };

        macro_rules! index {
            ($entries:expr, $table:expr, $kind:literal) => {
                for entry in $entries {
                    let id = entry.id.clone();
                    if $table.insert(id.clone(), entry).is_some() {
                        anyhow::bail!("duplicate {} id `{}`", $kind, id);
                    }
                }
            };
        }
        index!(catalog.actors, world.actors, "actor");
        index!(catalog.items, world.items, "item");
        index!(catalog.equipment, world.equipment, "equipment");
        index!(catalog.skills, world.skills, "skill");
        index!(catalog.enemies, world.enemies, "enemy");
        index!(catalog.maps, world.maps, "map");
        index!(catalog.battles, world.battles, "battle");
        index!(catalog.quests, world.quests, "quest");
        index!(catalog.endings, world.endings, "ending");

        world
            .validate()
            .map_err(|problems| anyhow::anyhow!("invalid world data: {}", problems.join("; ")))?;
        Ok(world)
    }
}
