//! The event interpreter: a resumable step-sequencer.
//!
//! Executes an ordered list of scripted operations one at a time.
//! Synchronous steps mutate session state and continue immediately;
//! steps needing external completion (dialogue acknowledgment, a battle
//! outcome) suspend the run and surface an [`EventSignal`] to the
//! caller, which resumes the interpreter through an explicit
//! continuation call. No timers, no nested callbacks: every transition
//! is a plain method call, which keeps the machine unit-testable.

use std::collections::VecDeque;

use crate::config::GameConfig;
use crate::state::SessionState;
use crate::world::{ActorId, BattleId, ContentError, EndingId, WorldOracle};

use super::step::EventStep;

/// What the interpreter needs from the outside world to continue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventSignal {
    /// A dialogue line is on screen; call
    /// [`EventInterpreter::acknowledge_dialogue`] when the player
    /// confirms it.
    Dialogue {
        speaker: Option<ActorId>,
        text: String,
    },

    /// A scripted battle must be fought; resume with
    /// [`EventInterpreter::resume_with_script`] once it resolves.
    BattleRequested { battle: BattleId },

    /// Terminal: show the named ending. The run is over.
    Ending { ending: EndingId },

    /// Terminal: show the game-over screen. The run is over.
    GameOver,

    /// The queue drained; control returns to idle map state. The caller
    /// should re-check auto triggers for the current map.
    Drained,
}

/// Interpreter lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterpreterStatus {
    /// No run in flight.
    Idle,
    /// Mid-run; `advance` may be called.
    Running,
    /// Suspended on a dialogue line.
    AwaitingDialogue,
    /// Suspended on a battle outcome.
    AwaitingBattle,
}

/// Errors from driving the interpreter.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EventError {
    /// A new run was requested while one is suspended. Re-entrancy is
    /// refused; the in-flight run must finish first.
    #[error("an event run is already in flight")]
    AlreadyActive,

    #[error("interpreter is not mid-run")]
    NotRunning,

    #[error("interpreter is not awaiting dialogue acknowledgment")]
    NotAwaitingDialogue,

    #[error("interpreter is not awaiting a battle outcome")]
    NotAwaitingBattle,

    /// A step referenced a dangling content key. The run is aborted;
    /// mutations from earlier steps stay committed.
    #[error(transparent)]
    Content(#[from] ContentError),
}

/// Single-threaded, resumable executor for event step lists.
#[derive(Debug, Default)]
pub struct EventInterpreter {
    queue: VecDeque<EventStep>,
    status: InterpreterStatusInner,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum InterpreterStatusInner {
    #[default]
    Idle,
    Running,
    AwaitingDialogue,
    AwaitingBattle,
}

impl EventInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> InterpreterStatus {
        match self.status {
            InterpreterStatusInner::Idle => InterpreterStatus::Idle,
            InterpreterStatusInner::Running => InterpreterStatus::Running,
            InterpreterStatusInner::AwaitingDialogue => InterpreterStatus::AwaitingDialogue,
            InterpreterStatusInner::AwaitingBattle => InterpreterStatus::AwaitingBattle,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.status == InterpreterStatusInner::Idle
    }

    /// Starts a fresh run from a copy of `steps`.
    ///
    /// Refused while a run is suspended; the world data's step list is
    /// never consumed in place, so re-triggering an event later always
    /// starts from the full list.
    pub fn begin(&mut self, steps: &[EventStep]) -> Result<(), EventError> {
        if self.status != InterpreterStatusInner::Idle {
            return Err(EventError::AlreadyActive);
        }
        self.queue = steps.iter().cloned().collect();
        self.status = InterpreterStatusInner::Running;
        Ok(())
    }

    /// Confirms the currently displayed dialogue line.
    pub fn acknowledge_dialogue(&mut self) -> Result<(), EventError> {
        if self.status != InterpreterStatusInner::AwaitingDialogue {
            return Err(EventError::NotAwaitingDialogue);
        }
        self.status = InterpreterStatusInner::Running;
        Ok(())
    }

    /// Resumes a battle-suspended run, prepending the battle's captured
    /// victory or defeat step list ahead of the remaining queue.
    pub fn resume_with_script(&mut self, script: Vec<EventStep>) -> Result<(), EventError> {
        if self.status != InterpreterStatusInner::AwaitingBattle {
            return Err(EventError::NotAwaitingBattle);
        }
        for step in script.into_iter().rev() {
            self.queue.push_front(step);
        }
        self.status = InterpreterStatusInner::Running;
        Ok(())
    }

    /// Drops the in-flight run. Used when a step fails or the session
    /// ends; already-applied mutations are not rolled back.
    pub fn abort(&mut self) {
        self.queue.clear();
        self.status = InterpreterStatusInner::Idle;
    }

    /// Pops and executes steps until one suspends or the queue drains.
    pub fn advance(
        &mut self,
        state: &mut SessionState,
        world: &dyn WorldOracle,
        config: &GameConfig,
    ) -> Result<EventSignal, EventError> {
        if self.status != InterpreterStatusInner::Running {
            return Err(EventError::NotRunning);
        }

        loop {
            let Some(step) = self.queue.pop_front() else {
                self.status = InterpreterStatusInner::Idle;
                return Ok(EventSignal::Drained);
            };

            match self.execute(step, state, world, config) {
                Ok(Some(signal)) => return Ok(signal),
                Ok(None) => continue,
                Err(error) => {
                    self.abort();
                    return Err(error);
                }
            }
        }
    }

    /// Executes one step. `Ok(None)` means the step completed
    /// synchronously and the run continues.
    fn execute(
        &mut self,
        step: EventStep,
        state: &mut SessionState,
        world: &dyn WorldOracle,
        config: &GameConfig,
    ) -> Result<Option<EventSignal>, EventError> {
        match step {
            EventStep::ShowDialogue { speaker, text } => {
                self.status = InterpreterStatusInner::AwaitingDialogue;
                Ok(Some(EventSignal::Dialogue { speaker, text }))
            }
            EventStep::SetFlag { flag, value } => {
                state.flags.set(flag, value);
                Ok(None)
            }
            EventStep::GiveItem { item, qty } => {
                world.require_item(&item)?;
                state.inventory.give(item, qty);
                Ok(None)
            }
            EventStep::RemoveItem { item, qty } => {
                world.require_item(&item)?;
                state.inventory.remove(&item, qty);
                Ok(None)
            }
            EventStep::GiveGold { amount } => {
                state.gold = state.gold.saturating_add(amount);
                Ok(None)
            }
            EventStep::AddPartyMember { actor } => {
                state.recruit(world, &actor)?;
                Ok(None)
            }
            EventStep::StartQuest { quest } => {
                state.start_quest(world, &quest)?;
                Ok(None)
            }
            EventStep::CompleteQuest { quest } => {
                state.complete_quest(world, &quest, config)?;
                Ok(None)
            }
            EventStep::StartBattle { battle } => {
                world.require_battle(&battle)?;
                self.status = InterpreterStatusInner::AwaitingBattle;
                Ok(Some(EventSignal::BattleRequested { battle }))
            }
            EventStep::EndGame { ending } => {
                world.require_ending(&ending)?;
                self.abort();
                Ok(Some(EventSignal::Ending { ending }))
            }
            EventStep::GameOver => {
                self.abort();
                Ok(Some(EventSignal::GameOver))
            }
            EventStep::Unknown => Ok(None),
        }
    }
}
