//! Turn-based battle sessions.
//!
//! A [`BattleSession`] owns independent runtime copies of the enemy
//! templates it fights. One accepted player command resolves a full
//! round: the player's action, then, if the battle continues, one move
//! from every surviving enemy. Refused commands leave the round
//! untouched so the caller can simply re-prompt.

use crate::config::GameConfig;
use crate::event::EventStep;
use crate::state::{ItemUseError, LevelUp, QuestCompletion, SessionState};
use crate::world::{
    BattleId, ContentError, DiceStream, DropEntry, EnemyId, EnemyMove, EnemyTemplate, ItemGrant,
    ItemId, SkillEffect, SkillId, WorldOracle,
};

use super::error::BattleError;
use super::formula::physical_damage;

/// Where the session is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum BattlePhase {
    /// Encounter banner; no commands accepted yet.
    Intro,
    /// Waiting for the player's round command.
    Command,
    Victory,
    Defeat,
}

/// What the player does this round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayerCommand {
    Attack,
    Skill(SkillId),
    UseItem(ItemId),
    Defend,
}

/// One presentable thing that happened during a round, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BattleEvent {
    PlayerAttacked { target: String, damage: u32 },
    PlayerCast { skill: String, target: String, damage: u32 },
    PlayerHealed { source: String, amount: u32 },
    PlayerUsedItem { item: String, healed_hp: u32, restored_mp: u32 },
    PlayerDefended,
    EnemyDefeated { name: String },
    EnemyAttacked { name: String, damage: u32, power: bool },
    EnemyDefended { name: String },
    DropGranted { item: String, qty: u32 },
}

/// Mutable copy of an enemy template living only for this battle.
#[derive(Clone, Debug)]
pub struct EnemyInstance {
    pub enemy: EnemyId,
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    atk: u32,
    def: u32,
    exp_reward: u32,
    gold_reward: u32,
    drops: Vec<DropEntry>,
    pattern: Vec<EnemyMove>,
    /// Cycles through `pattern`; wraps, never resets mid-battle.
    cursor: usize,
    defending: bool,
    counted: bool,
}

impl EnemyInstance {
    fn from_template(template: &EnemyTemplate) -> Self {
        Self {
            enemy: template.id.clone(),
            name: template.name.clone(),
            hp: template.stats.max_hp,
            max_hp: template.stats.max_hp,
            atk: template.stats.atk,
            def: template.stats.def,
            exp_reward: template.exp_reward,
            gold_reward: template.gold_reward,
            drops: template.drops.clone(),
            pattern: template.pattern.clone(),
            cursor: 0,
            defending: false,
            counted: false,
        }
    }

    pub fn is_down(&self) -> bool {
        self.hp == 0
    }

    /// Pops the next pattern move, advancing the cycling cursor.
    fn next_move(&mut self) -> EnemyMove {
        if self.pattern.is_empty() {
            return EnemyMove::Attack;
        }
        let chosen = self.pattern[self.cursor % self.pattern.len()];
        self.cursor = (self.cursor + 1) % self.pattern.len();
        chosen
    }
}

/// Everything granted when the last enemy falls.
#[derive(Clone, Debug, Default)]
pub struct VictorySummary {
    pub exp: u32,
    pub gold: u32,
    pub drops: Vec<ItemGrant>,
    pub level_ups: Vec<LevelUp>,
    pub completed_quests: Vec<QuestCompletion>,
}

/// How a resolved round left the battle.
#[derive(Clone, Debug)]
pub enum RoundOutcome {
    Continue,
    Victory(VictorySummary),
    Defeat,
}

/// Ordered events plus the terminal state of one resolved round.
#[derive(Clone, Debug)]
pub struct RoundReport {
    pub events: Vec<BattleEvent>,
    pub outcome: RoundOutcome,
}

/// A running battle.
pub struct BattleSession {
    battle: Option<BattleId>,
    name: String,
    enemies: Vec<EnemyInstance>,
    phase: BattlePhase,
    victory_script: Vec<EventStep>,
    defeat_script: Vec<EventStep>,
}

impl BattleSession {
    /// Starts a scripted battle from its definition.
    pub fn start(world: &dyn WorldOracle, battle: &BattleId) -> Result<Self, ContentError> {
        let definition = world.require_battle(battle)?;
        let mut enemies = Vec::new();
        for entry in &definition.enemies {
            let template = world.require_enemy(&entry.enemy)?;
            for _ in 0..entry.qty.max(1) {
                enemies.push(EnemyInstance::from_template(template));
            }
        }
        if enemies.is_empty() {
            return Err(ContentError::EmptyBattleRoster(battle.clone()));
        }
        Ok(Self {
            battle: Some(battle.clone()),
            name: definition.name.clone(),
            enemies,
            phase: BattlePhase::Intro,
            victory_script: definition.victory.clone(),
            defeat_script: definition.defeat.clone(),
        })
    }

    /// Starts a random encounter against a single enemy. Encounters
    /// carry no scripts; control simply returns to the map afterwards.
    pub fn encounter(world: &dyn WorldOracle, enemy: &EnemyId) -> Result<Self, ContentError> {
        let template = world.require_enemy(enemy)?;
        Ok(Self {
            battle: None,
            name: template.name.clone(),
            enemies: vec![EnemyInstance::from_template(template)],
            phase: BattlePhase::Intro,
            victory_script: Vec::new(),
            defeat_script: Vec::new(),
        })
    }

    pub fn battle_id(&self) -> Option<&BattleId> {
        self.battle.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn enemies(&self) -> &[EnemyInstance] {
        &self.enemies
    }

    /// Leaves the encounter banner and opens the command menu.
    pub fn finish_intro(&mut self) {
        if self.phase == BattlePhase::Intro {
            self.phase = BattlePhase::Command;
        }
    }

    /// Takes the script owed to the event interpreter for how the
    /// battle ended. Empty for encounters and unfinished battles.
    pub fn take_script(&mut self) -> Vec<EventStep> {
        match self.phase {
            BattlePhase::Victory => std::mem::take(&mut self.victory_script),
            BattlePhase::Defeat => std::mem::take(&mut self.defeat_script),
            BattlePhase::Intro | BattlePhase::Command => Vec::new(),
        }
    }

    /// Resolves one full round from a player command.
    ///
    /// Validation happens before any mutation, so a recoverable refusal
    /// (unknown skill, missing MP, missing item) leaves the round
    /// unconsumed. Victory and defeat are checked inside the round; a
    /// battle never outlives the blow that decided it.
    pub fn player_command(
        &mut self,
        command: PlayerCommand,
        state: &mut SessionState,
        world: &dyn WorldOracle,
        config: &GameConfig,
        dice: &mut DiceStream<'_>,
    ) -> Result<RoundReport, BattleError> {
        if self.phase != BattlePhase::Command {
            return Err(BattleError::NotAwaitingCommand);
        }
        if state.party.is_empty() {
            return Err(BattleError::EmptyParty);
        }

        let mut events = Vec::new();
        let mut hero_defending = false;

        match command {
            PlayerCommand::Attack => {
                let atk = self
                    .hero_stat(state, world, |hero, world| hero.effective_atk(world));
                self.strike_first_alive(
                    atk,
                    config.attack_power_permille,
                    config.attack_defense_factor_permille,
                    config,
                    dice,
                    None,
                    &mut events,
                );
            }
            PlayerCommand::Skill(skill_id) => {
                let definition = world.require_skill(&skill_id)?.clone();
                {
                    let hero = state.party.hero().ok_or(BattleError::EmptyParty)?;
                    if !hero.skills.contains(&skill_id) {
                        return Err(BattleError::SkillNotKnown(skill_id));
                    }
                    if hero.mp < definition.mp_cost {
                        return Err(BattleError::InsufficientMp(skill_id));
                    }
                }
                if let Some(hero) = state.party.hero_mut() {
                    hero.mp -= definition.mp_cost;
                }
                match definition.effect {
                    SkillEffect::Damage {
                        power_permille,
                        defense_factor_permille,
                    } => {
                        let atk = self
                            .hero_stat(state, world, |hero, world| hero.effective_atk(world));
                        self.strike_first_alive(
                            atk,
                            power_permille,
                            defense_factor_permille,
                            config,
                            dice,
                            Some(definition.name.clone()),
                            &mut events,
                        );
                    }
                    SkillEffect::HealHp(amount) => {
                        let healed = state
                            .party
                            .hero_mut()
                            .map_or(0, |hero| hero.heal_hp(amount));
                        events.push(BattleEvent::PlayerHealed {
                            source: definition.name.clone(),
                            amount: healed,
                        });
                    }
                }
            }
            PlayerCommand::UseItem(item) => {
                let outcome = state.use_consumable(world, &item).map_err(|error| {
                    match error {
                        ItemUseError::NotCarried(id) => BattleError::ItemNotCarried(id),
                        ItemUseError::NotUsable(id) => BattleError::ItemNotUsable(id),
                        ItemUseError::EmptyParty => BattleError::EmptyParty,
                        ItemUseError::Content(inner) => BattleError::Content(inner),
                    }
                })?;
                events.push(BattleEvent::PlayerUsedItem {
                    item: outcome.item_name,
                    healed_hp: outcome.healed_hp,
                    restored_mp: outcome.restored_mp,
                });
            }
            PlayerCommand::Defend => {
                hero_defending = true;
                events.push(BattleEvent::PlayerDefended);
            }
        }

        if self.enemies.iter().all(EnemyInstance::is_down) {
            let summary = self.grant_victory(state, world, config, dice, &mut events)?;
            self.phase = BattlePhase::Victory;
            return Ok(RoundReport {
                events,
                outcome: RoundOutcome::Victory(summary),
            });
        }

        self.enemy_turns(state, world, config, dice, hero_defending, &mut events);

        if state.party.hero().is_some_and(|hero| hero.is_down()) {
            self.phase = BattlePhase::Defeat;
            return Ok(RoundReport {
                events,
                outcome: RoundOutcome::Defeat,
            });
        }

        Ok(RoundReport {
            events,
            outcome: RoundOutcome::Continue,
        })
    }

    fn hero_stat(
        &self,
        state: &SessionState,
        world: &dyn WorldOracle,
        pick: impl Fn(&crate::state::PartyMember, &dyn WorldOracle) -> u32,
    ) -> u32 {
        state.party.hero().map_or(0, |hero| pick(hero, world))
    }

    /// Applies one player-side hit to the first living enemy.
    fn strike_first_alive(
        &mut self,
        atk: u32,
        power_permille: u32,
        defense_factor_permille: u32,
        config: &GameConfig,
        dice: &mut DiceStream<'_>,
        skill_name: Option<String>,
        events: &mut Vec<BattleEvent>,
    ) {
        let Some(target) = self.enemies.iter_mut().find(|enemy| !enemy.is_down()) else {
            return;
        };
        let variance = dice.range(config.variance_min_permille, config.variance_max_permille);
        let damage = physical_damage(
            atk,
            target.def,
            power_permille,
            defense_factor_permille,
            variance,
            target.defending,
        );
        target.hp = target.hp.saturating_sub(damage);
        let name = target.name.clone();
        let downed = target.is_down();
        match skill_name {
            Some(skill) => events.push(BattleEvent::PlayerCast {
                skill,
                target: name.clone(),
                damage,
            }),
            None => events.push(BattleEvent::PlayerAttacked {
                target: name.clone(),
                damage,
            }),
        }
        if downed {
            events.push(BattleEvent::EnemyDefeated { name });
        }
    }

    /// Every surviving enemy takes one pattern move, in roster order.
    fn enemy_turns(
        &mut self,
        state: &mut SessionState,
        world: &dyn WorldOracle,
        config: &GameConfig,
        dice: &mut DiceStream<'_>,
        hero_defending: bool,
        events: &mut Vec<BattleEvent>,
    ) {
        let hero_def = self.hero_stat(state, world, |hero, world| hero.effective_def(world));
        for enemy in &mut self.enemies {
            if enemy.is_down() {
                continue;
            }
            enemy.defending = false;
            match enemy.next_move() {
                EnemyMove::Attack => {
                    let variance =
                        dice.range(config.variance_min_permille, config.variance_max_permille);
                    let damage = physical_damage(
                        enemy.atk,
                        hero_def,
                        config.attack_power_permille,
                        config.attack_defense_factor_permille,
                        variance,
                        hero_defending,
                    );
                    if let Some(hero) = state.party.hero_mut() {
                        hero.take_damage(damage);
                    }
                    events.push(BattleEvent::EnemyAttacked {
                        name: enemy.name.clone(),
                        damage,
                        power: false,
                    });
                }
                EnemyMove::PowerAttack => {
                    let variance =
                        dice.range(config.variance_min_permille, config.variance_max_permille);
                    let damage = physical_damage(
                        enemy.atk,
                        hero_def,
                        config.power_attack_power_permille,
                        config.power_attack_defense_factor_permille,
                        variance,
                        hero_defending,
                    );
                    if let Some(hero) = state.party.hero_mut() {
                        hero.take_damage(damage);
                    }
                    events.push(BattleEvent::EnemyAttacked {
                        name: enemy.name.clone(),
                        damage,
                        power: true,
                    });
                }
                EnemyMove::Defend => {
                    enemy.defending = true;
                    events.push(BattleEvent::EnemyDefended {
                        name: enemy.name.clone(),
                    });
                }
            }
            if state.party.hero().is_some_and(|hero| hero.is_down()) {
                break;
            }
        }
    }

    /// Tallies and grants rewards for every defeated enemy exactly once.
    fn grant_victory(
        &mut self,
        state: &mut SessionState,
        world: &dyn WorldOracle,
        config: &GameConfig,
        dice: &mut DiceStream<'_>,
        events: &mut Vec<BattleEvent>,
    ) -> Result<VictorySummary, BattleError> {
        let mut summary = VictorySummary::default();
        let mut defeated = Vec::new();
        for enemy in &mut self.enemies {
            if enemy.counted {
                continue;
            }
            enemy.counted = true;
            summary.exp = summary.exp.saturating_add(enemy.exp_reward);
            summary.gold = summary.gold.saturating_add(enemy.gold_reward);
            for drop in &enemy.drops {
                if dice.chance(drop.chance_permille) {
                    summary.drops.push(ItemGrant {
                        item: drop.item.clone(),
                        qty: drop.qty,
                    });
                }
            }
            defeated.push(enemy.enemy.clone());
        }

        for grant in &summary.drops {
            let definition = world.require_item(&grant.item)?;
            state.inventory.give(grant.item.clone(), grant.qty);
            events.push(BattleEvent::DropGranted {
                item: definition.name.clone(),
                qty: grant.qty,
            });
        }
        state.gold = state.gold.saturating_add(summary.gold);
        summary.level_ups = state.grant_party_exp(summary.exp, config);
        for enemy in defeated {
            summary
                .completed_quests
                .extend(state.record_enemy_defeated(world, &enemy, config)?);
        }
        Ok(summary)
    }
}
