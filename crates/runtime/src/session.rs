//! The play-session orchestrator.
//!
//! [`Session`] owns the world data, the mutable session state, the
//! event interpreter, and the current battle, and exposes the command
//! surface a frontend drives: movement, interaction, dialogue
//! acknowledgment, battle commands, and menu item use. Every suspension
//! of the underlying machines is reflected in [`SessionMode`]; the
//! frontend reads the mode and issues the one command that answers it.

use tracing::{debug, info};

use game_core::world::{
    DiceStream, Direction, EndingId, MapDefinition, MapId, PcgRng, Position, TriggerKind,
};
use game_core::{
    BattlePhase, BattleSession, EventInterpreter, EventSignal, EventStep, GameConfig, ItemId,
    ItemUse, PlayerCommand, RoundOutcome, SessionState, WorldOracle, condition_satisfied,
};

use crate::error::{Result, RuntimeError};
use crate::presenter::Presenter;
use crate::views::{BattleView, EnemyView, MapView, MemberView, NpcView};

/// What the session is waiting for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionMode {
    /// Free map movement; move/interact/menu commands are accepted.
    Exploring,
    /// A dialogue line awaits [`Session::acknowledge`].
    Dialogue,
    /// A battle awaits [`Session::battle_command`].
    Battle,
    /// Terminal; no commands are accepted.
    Ended(EndState),
}

/// How a session ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EndState {
    Ending(EndingId),
    GameOver,
}

/// What a movement command did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    Blocked,
    ChangedMap,
    TriggeredEvent,
    StartedEncounter,
}

/// One running play session over a world database.
pub struct Session<W: WorldOracle> {
    world: W,
    config: GameConfig,
    state: SessionState,
    interpreter: EventInterpreter,
    battle: Option<BattleSession>,
    mode: SessionMode,
    map: MapId,
    position: Position,
    facing: Direction,
    rng: PcgRng,
    game_seed: u64,
    nonce: u64,
}

impl<W: WorldOracle> Session<W> {
    /// Creates a session at the world's start configuration.
    ///
    /// `game_seed` fixes every roll of the run; two sessions with the
    /// same seed and command sequence play out identically.
    pub fn new(world: W, config: GameConfig, game_seed: u64) -> Result<Self> {
        let state = SessionState::new_game(&world)?;
        Self::from_state(world, config, state, game_seed)
    }

    /// Creates a session around an already-prepared state, placed at
    /// the world's start location.
    pub fn from_state(
        world: W,
        config: GameConfig,
        state: SessionState,
        game_seed: u64,
    ) -> Result<Self> {
        let start = world.start();
        let map = start.map.clone();
        let position = start.spawn;
        world.require_map(&map)?;
        info!(map = %map, seed = game_seed, "session created");
        Ok(Self {
            world,
            config,
            state,
            interpreter: EventInterpreter::new(),
            battle: None,
            mode: SessionMode::Exploring,
            map,
            position,
            facing: Direction::Down,
            rng: PcgRng,
            game_seed,
            nonce: 0,
        })
    }

    /// Runs map-load auto events for the starting map.
    pub fn start(&mut self, presenter: &mut dyn Presenter) -> Result<()> {
        presenter.map_updated(&self.map_view()?);
        self.check_auto_events(presenter)
    }

    pub fn mode(&self) -> &SessionMode {
        &self.mode
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn map_id(&self) -> &MapId {
        &self.map
    }

    /// Snapshot of the current map with visible NPCs.
    pub fn map_view(&self) -> Result<MapView> {
        let map = self.world.require_map(&self.map)?;
        let blocked = (0..map.height as i32)
            .map(|y| {
                (0..map.width as i32)
                    .map(|x| map.blocks(Position::new(x, y)))
                    .collect()
            })
            .collect();
        let npcs = map
            .npcs
            .iter()
            .filter(|npc| condition_satisfied(npc.condition.as_ref(), &self.state.flags))
            .map(|npc| {
                let name = self
                    .world
                    .actor(&npc.actor)
                    .map_or_else(|| npc.actor.as_str().to_owned(), |actor| actor.name.clone());
                NpcView { name, at: npc.at }
            })
            .collect();
        Ok(MapView {
            name: map.name.clone(),
            width: map.width,
            height: map.height,
            blocked,
            player: self.position,
            npcs,
            exits: map.exits.iter().map(|exit| exit.at).collect(),
        })
    }

    /// Snapshot of the running battle, if any.
    pub fn battle_view(&self) -> Option<BattleView> {
        let battle = self.battle.as_ref()?;
        Some(BattleView {
            name: battle.name().to_owned(),
            phase: battle.phase(),
            enemies: battle
                .enemies()
                .iter()
                .map(|enemy| EnemyView {
                    name: enemy.name.clone(),
                    hp: enemy.hp,
                    max_hp: enemy.max_hp,
                })
                .collect(),
            party: self
                .state
                .party
                .iter()
                .map(|member| MemberView {
                    name: member.name.clone(),
                    level: member.level,
                    hp: member.hp,
                    max_hp: member.max_hp,
                    mp: member.mp,
                    max_mp: member.max_mp,
                })
                .collect(),
        })
    }

    /// Moves the player one tile.
    ///
    /// Exit tiles are honored before collision, so a gate can sit on a
    /// blocked cell and still transport once its condition holds. After
    /// a step, touch events take precedence over random encounters; an
    /// encounter is rolled only when the step left the session
    /// exploring.
    pub fn move_player(
        &mut self,
        direction: Direction,
        presenter: &mut dyn Presenter,
    ) -> Result<MoveOutcome> {
        self.require_exploring()?;
        self.facing = direction;
        let target = self.position.step(direction);
        let map = self.world.require_map(&self.map)?;

        if let Some(exit) = map.exits.iter().find(|exit| {
            exit.at == target && condition_satisfied(exit.condition.as_ref(), &self.state.flags)
        }) {
            let to_map = exit.to_map.clone();
            let spawn = exit.spawn;
            self.enter_map(to_map, spawn, presenter)?;
            return Ok(MoveOutcome::ChangedMap);
        }

        if map.blocks(target) || self.npc_occupies(map, target) {
            return Ok(MoveOutcome::Blocked);
        }

        self.position = target;
        presenter.map_updated(&self.map_view()?);

        if let Some(steps) = self.find_event(TriggerKind::Touch, Some(target)) {
            self.run_event(steps, presenter)?;
            return Ok(MoveOutcome::TriggeredEvent);
        }

        if self.mode == SessionMode::Exploring && self.roll_encounter(presenter)? {
            return Ok(MoveOutcome::StartedEncounter);
        }
        Ok(MoveOutcome::Moved)
    }

    /// Activates the action event on the faced tile, if any.
    pub fn interact(&mut self, presenter: &mut dyn Presenter) -> Result<bool> {
        self.require_exploring()?;
        let target = self.position.step(self.facing);
        if let Some(steps) = self.find_event(TriggerKind::Action, Some(target)) {
            self.run_event(steps, presenter)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Confirms the dialogue line currently on screen.
    pub fn acknowledge(&mut self, presenter: &mut dyn Presenter) -> Result<()> {
        if self.mode != SessionMode::Dialogue {
            return Err(RuntimeError::NotInDialogue);
        }
        self.interpreter.acknowledge_dialogue()?;
        self.mode = SessionMode::Exploring;
        self.pump(presenter)?;
        self.settle(presenter)
    }

    /// Issues the player's round command to the running battle.
    ///
    /// Recoverable refusals (missing MP, missing item) surface as
    /// errors without consuming the round.
    pub fn battle_command(
        &mut self,
        command: PlayerCommand,
        presenter: &mut dyn Presenter,
    ) -> Result<()> {
        if self.mode != SessionMode::Battle {
            return Err(RuntimeError::NotInBattle);
        }
        let Some(battle) = self.battle.as_mut() else {
            return Err(RuntimeError::NotInBattle);
        };

        let mut dice = DiceStream::new(&self.rng, self.game_seed, self.nonce);
        self.nonce += 1;
        let report =
            battle.player_command(command, &mut self.state, &self.world, &self.config, &mut dice)?;

        match report.outcome {
            RoundOutcome::Continue => {
                if let Some(view) = self.battle_view() {
                    presenter.battle_round(&report.events, &view);
                }
                Ok(())
            }
            RoundOutcome::Victory(summary) => {
                if let Some(view) = self.battle_view() {
                    presenter.battle_round(&report.events, &view);
                }
                presenter.victory(&summary);
                for completion in &summary.completed_quests {
                    presenter.quest_completed(completion);
                }
                self.finish_battle(presenter)
            }
            RoundOutcome::Defeat => {
                if let Some(view) = self.battle_view() {
                    presenter.battle_round(&report.events, &view);
                }
                self.finish_battle(presenter)
            }
        }
    }

    /// Uses a consumable from the field menu.
    pub fn use_item(&mut self, item: &ItemId) -> Result<ItemUse> {
        self.require_exploring()?;
        Ok(self.state.use_consumable(&self.world, item)?)
    }

    fn require_exploring(&self) -> Result<()> {
        match &self.mode {
            SessionMode::Exploring => Ok(()),
            SessionMode::Ended(_) => Err(RuntimeError::SessionEnded),
            SessionMode::Dialogue | SessionMode::Battle => Err(RuntimeError::NotExploring),
        }
    }

    fn npc_occupies(&self, map: &MapDefinition, at: Position) -> bool {
        map.npcs.iter().any(|npc| {
            npc.at == at && condition_satisfied(npc.condition.as_ref(), &self.state.flags)
        })
    }

    /// First satisfied event of the given trigger class, in authored
    /// order. `at: None` matches map-wide events only.
    fn find_event(&self, trigger: TriggerKind, at: Option<Position>) -> Option<Vec<EventStep>> {
        let map = self.world.map(&self.map)?;
        map.events
            .iter()
            .filter(|event| event.trigger == trigger && event.at == at)
            .find(|event| condition_satisfied(event.condition.as_ref(), &self.state.flags))
            .map(|event| event.steps.clone())
    }

    fn enter_map(
        &mut self,
        map: MapId,
        spawn: Position,
        presenter: &mut dyn Presenter,
    ) -> Result<()> {
        self.world.require_map(&map)?;
        info!(from = %self.map, to = %map, "map transition");
        self.map = map;
        self.position = spawn;
        self.facing = Direction::Down;
        presenter.map_updated(&self.map_view()?);
        self.check_auto_events(presenter)
    }

    fn run_event(&mut self, steps: Vec<EventStep>, presenter: &mut dyn Presenter) -> Result<()> {
        self.interpreter.begin(&steps)?;
        self.pump(presenter)?;
        self.settle(presenter)
    }

    /// Re-checks auto events whenever the session settles back into
    /// exploring. Bounded: content whose auto events keep their own
    /// condition true would otherwise loop forever.
    fn check_auto_events(&mut self, presenter: &mut dyn Presenter) -> Result<()> {
        let mut chain = 0u32;
        while self.mode == SessionMode::Exploring {
            let Some(steps) = self.find_event(TriggerKind::Auto, None) else {
                break;
            };
            chain += 1;
            if chain > self.config.auto_chain_limit {
                return Err(RuntimeError::AutoChainLoop {
                    map: self.map.clone(),
                    limit: self.config.auto_chain_limit,
                });
            }
            debug!(map = %self.map, chain, "auto event triggered");
            self.interpreter.begin(&steps)?;
            self.pump(presenter)?;
        }
        Ok(())
    }

    /// After a pump left us exploring, give auto events their chance.
    fn settle(&mut self, presenter: &mut dyn Presenter) -> Result<()> {
        if self.mode == SessionMode::Exploring {
            self.check_auto_events(presenter)?;
        }
        Ok(())
    }

    /// Drives the interpreter until it suspends, ends, or drains.
    fn pump(&mut self, presenter: &mut dyn Presenter) -> Result<()> {
        loop {
            match self
                .interpreter
                .advance(&mut self.state, &self.world, &self.config)?
            {
                EventSignal::Dialogue { speaker, text } => {
                    self.mode = SessionMode::Dialogue;
                    let name = speaker.as_ref().map(|id| {
                        self.world
                            .actor(id)
                            .map_or_else(|| id.as_str().to_owned(), |actor| actor.name.clone())
                    });
                    presenter.dialogue(name.as_deref(), &text);
                    return Ok(());
                }
                EventSignal::BattleRequested { battle } => {
                    let mut session = BattleSession::start(&self.world, &battle)?;
                    session.finish_intro();
                    self.battle = Some(session);
                    self.mode = SessionMode::Battle;
                    if let Some(view) = self.battle_view() {
                        presenter.battle_started(&view);
                    }
                    return Ok(());
                }
                EventSignal::Ending { ending } => {
                    let definition = self.world.require_ending(&ending)?;
                    presenter.ending(definition);
                    info!(ending = %ending, "session ended");
                    self.mode = SessionMode::Ended(EndState::Ending(ending));
                    return Ok(());
                }
                EventSignal::GameOver => {
                    presenter.game_over();
                    info!("session ended in game over");
                    self.mode = SessionMode::Ended(EndState::GameOver);
                    return Ok(());
                }
                EventSignal::Drained => {
                    self.mode = SessionMode::Exploring;
                    return Ok(());
                }
            }
        }
    }

    /// Rolls the per-step encounter chance; on a hit, opens a battle
    /// against one weighted pick from the map's table.
    fn roll_encounter(&mut self, presenter: &mut dyn Presenter) -> Result<bool> {
        let map = self.world.require_map(&self.map)?;
        let Some(table) = &map.encounters else {
            return Ok(false);
        };
        if table.entries.is_empty() {
            return Ok(false);
        }

        let mut dice = DiceStream::new(&self.rng, self.game_seed, self.nonce);
        self.nonce += 1;
        if !dice.chance(table.rate_permille) {
            return Ok(false);
        }
        let weights: Vec<u32> = table.entries.iter().map(|entry| entry.weight).collect();
        let Some(index) = dice.pick_weighted(&weights) else {
            return Ok(false);
        };
        let enemy = table.entries[index].enemy.clone();
        debug!(map = %self.map, enemy = %enemy, "random encounter");

        let mut session = BattleSession::encounter(&self.world, &enemy)?;
        session.finish_intro();
        self.battle = Some(session);
        self.mode = SessionMode::Battle;
        if let Some(view) = self.battle_view() {
            presenter.battle_started(&view);
        }
        Ok(true)
    }

    /// Closes the finished battle and routes its outcome.
    ///
    /// Scripted battles hand their victory/defeat script back to the
    /// suspended interpreter; encounters simply return to the map (or
    /// end the session on defeat).
    fn finish_battle(&mut self, presenter: &mut dyn Presenter) -> Result<()> {
        let Some(mut battle) = self.battle.take() else {
            return Err(RuntimeError::NotInBattle);
        };
        let won = battle.phase() == BattlePhase::Victory;
        let script = battle.take_script();
        let scripted = battle.battle_id().is_some();

        if scripted {
            self.interpreter.resume_with_script(script)?;
            self.mode = SessionMode::Exploring;
            self.pump(presenter)?;
            self.settle(presenter)
        } else if won {
            self.mode = SessionMode::Exploring;
            self.settle(presenter)
        } else {
            presenter.game_over();
            self.mode = SessionMode::Ended(EndState::GameOver);
            Ok(())
        }
    }
}
