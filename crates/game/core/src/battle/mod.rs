//! Turn-based battle resolution.
//!
//! Battles run as their own state machine, suspended from the event
//! interpreter (scripted battles) or entered directly from map movement
//! (random encounters). All randomness flows through the caller's
//! [`DiceStream`](crate::world::DiceStream), so a battle transcript is
//! reproducible from the session seed.

mod error;
mod formula;
mod session;

pub use error::BattleError;
pub use formula::physical_damage;
pub use session::{
    BattleEvent, BattlePhase, BattleSession, EnemyInstance, PlayerCommand, RoundOutcome,
    RoundReport, VictorySummary,
};
