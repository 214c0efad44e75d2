//! Presentation seam between the session and its frontend.

use game_core::world::EndingDefinition;
use game_core::{BattleEvent, QuestCompletion, VictorySummary};

use crate::views::{BattleView, MapView};

/// Callbacks the session invokes as play unfolds.
///
/// All methods default to no-ops so a frontend only implements what it
/// renders. The session never waits on a presenter; suspensions are
/// modeled in the session mode, and the frontend answers them through
/// explicit session calls.
pub trait Presenter {
    /// A dialogue line is on screen, awaiting acknowledgment.
    fn dialogue(&mut self, speaker: Option<&str>, text: &str) {
        let _ = (speaker, text);
    }

    /// The player entered a map or their surroundings changed.
    fn map_updated(&mut self, view: &MapView) {
        let _ = view;
    }

    /// A battle began; the command menu is open.
    fn battle_started(&mut self, view: &BattleView) {
        let _ = view;
    }

    /// A round resolved; `events` are in resolution order.
    fn battle_round(&mut self, events: &[BattleEvent], view: &BattleView) {
        let _ = (events, view);
    }

    /// The battle was won.
    fn victory(&mut self, summary: &VictorySummary) {
        let _ = summary;
    }

    /// A quest's target was reached and its reward granted.
    fn quest_completed(&mut self, completion: &QuestCompletion) {
        let _ = completion;
    }

    /// Terminal: the named ending plays.
    fn ending(&mut self, ending: &EndingDefinition) {
        let _ = ending;
    }

    /// Terminal: the game-over screen.
    fn game_over(&mut self) {}
}

/// Presenter that renders nothing. Used by tests and headless drivers.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {}
