//! Scripted event sequencing.
//!
//! An event is an ordered, finite list of [`EventStep`]s gated by a
//! trigger condition. The [`EventInterpreter`] consumes a fresh copy of
//! the list per run, suspending for anything that needs external
//! completion and resuming through explicit continuation calls.

mod condition;
mod interpreter;
mod step;

pub use condition::{EventCondition, condition_satisfied};
pub use interpreter::{EventError, EventInterpreter, EventSignal, InterpreterStatus};
pub use step::EventStep;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::state::SessionState;
    use crate::world::test_support::TestWorld;
    use crate::world::{ActorId, FlagId, ItemId};

    fn fresh() -> (TestWorld, SessionState, GameConfig) {
        let world = TestWorld::rescue_campaign();
        let state = SessionState::new_game(&world).expect("campaign state");
        (world, state, GameConfig::default())
    }

    #[test]
    fn run_executes_sync_steps_in_order() {
        let (world, mut state, config) = fresh();
        let mut interpreter = EventInterpreter::new();
        interpreter
            .begin(&[
                EventStep::SetFlag {
                    flag: FlagId::new("a"),
                    value: true,
                },
                EventStep::GiveItem {
                    item: ItemId::new("potion"),
                    qty: 2,
                },
                EventStep::GiveGold { amount: 10 },
            ])
            .unwrap();

        let signal = interpreter.advance(&mut state, &world, &config).unwrap();
        assert_eq!(signal, EventSignal::Drained);
        assert!(state.flags.get(&FlagId::new("a")));
        assert_eq!(state.inventory.quantity(&ItemId::new("potion")), 4); // 2 starting + 2
        assert_eq!(state.gold, 10);
        assert!(interpreter.is_idle());
    }

    #[test]
    fn dialogue_suspends_until_acknowledged() {
        let (world, mut state, config) = fresh();
        let mut interpreter = EventInterpreter::new();
        interpreter
            .begin(&[
                EventStep::SetFlag {
                    flag: FlagId::new("a"),
                    value: true,
                },
                EventStep::ShowDialogue {
                    speaker: Some(ActorId::new("king")),
                    text: "Save her!".into(),
                },
                EventStep::SetFlag {
                    flag: FlagId::new("b"),
                    value: true,
                },
            ])
            .unwrap();

        let signal = interpreter.advance(&mut state, &world, &config).unwrap();
        assert!(matches!(signal, EventSignal::Dialogue { .. }));
        assert!(state.flags.get(&FlagId::new("a")));
        assert!(!state.flags.get(&FlagId::new("b")));
        assert_eq!(interpreter.status(), InterpreterStatus::AwaitingDialogue);

        // A second run is refused while suspended.
        assert_eq!(
            interpreter.begin(&[EventStep::GameOver]),
            Err(EventError::AlreadyActive)
        );

        interpreter.acknowledge_dialogue().unwrap();
        let signal = interpreter.advance(&mut state, &world, &config).unwrap();
        assert_eq!(signal, EventSignal::Drained);
        assert!(state.flags.get(&FlagId::new("b")));
    }

    #[test]
    fn unknown_step_is_a_no_op() {
        let (world, mut state, config) = fresh();
        let mut interpreter = EventInterpreter::new();
        interpreter
            .begin(&[
                EventStep::Unknown,
                EventStep::SetFlag {
                    flag: FlagId::new("after"),
                    value: true,
                },
            ])
            .unwrap();
        let signal = interpreter.advance(&mut state, &world, &config).unwrap();
        assert_eq!(signal, EventSignal::Drained);
        assert!(state.flags.get(&FlagId::new("after")));
    }

    #[test]
    fn dangling_item_aborts_but_keeps_committed_steps() {
        let (world, mut state, config) = fresh();
        let mut interpreter = EventInterpreter::new();
        interpreter
            .begin(&[
                EventStep::SetFlag {
                    flag: FlagId::new("before"),
                    value: true,
                },
                EventStep::GiveItem {
                    item: ItemId::new("no_such_item"),
                    qty: 1,
                },
                EventStep::SetFlag {
                    flag: FlagId::new("after"),
                    value: true,
                },
            ])
            .unwrap();

        let error = interpreter
            .advance(&mut state, &world, &config)
            .unwrap_err();
        assert!(matches!(error, EventError::Content(_)));
        assert!(state.flags.get(&FlagId::new("before")));
        assert!(!state.flags.get(&FlagId::new("after")));
        assert!(interpreter.is_idle());
    }

    #[test]
    fn battle_suspension_resumes_with_script() {
        let (world, mut state, config) = fresh();
        let mut interpreter = EventInterpreter::new();
        interpreter
            .begin(&[EventStep::StartBattle {
                battle: "boss_dark_knight".into(),
            }])
            .unwrap();

        let signal = interpreter.advance(&mut state, &world, &config).unwrap();
        assert!(matches!(signal, EventSignal::BattleRequested { .. }));
        assert_eq!(interpreter.status(), InterpreterStatus::AwaitingBattle);

        interpreter
            .resume_with_script(vec![EventStep::SetFlag {
                flag: FlagId::new("boss_defeated"),
                value: true,
            }])
            .unwrap();
        let signal = interpreter.advance(&mut state, &world, &config).unwrap();
        assert_eq!(signal, EventSignal::Drained);
        assert!(state.flags.get(&FlagId::new("boss_defeated")));
    }

    #[test]
    fn end_game_is_terminal() {
        let (world, mut state, config) = fresh();
        let mut interpreter = EventInterpreter::new();
        interpreter
            .begin(&[
                EventStep::EndGame {
                    ending: "good_end".into(),
                },
                EventStep::SetFlag {
                    flag: FlagId::new("never"),
                    value: true,
                },
            ])
            .unwrap();

        let signal = interpreter.advance(&mut state, &world, &config).unwrap();
        assert!(matches!(signal, EventSignal::Ending { .. }));
        assert!(interpreter.is_idle());
        assert!(!state.flags.get(&FlagId::new("never")));
    }
}
