//! Session orchestration over the deterministic game rules.
//!
//! This crate wires the world oracle, session state, event interpreter,
//! and battle engine from `game-core` into one command surface a
//! frontend can drive. Consumers embed [`Session`], implement
//! [`Presenter`] for their rendering, and issue commands as the player
//! acts; [`SessionMode`] tells them what the session is waiting for.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the orchestrator and its command surface
//! - [`presenter`] is the rendering seam
//! - [`views`] are the owned snapshots handed to presenters
//! - [`error`] collects the runtime-level error type
pub mod error;
pub mod presenter;
pub mod session;
pub mod views;

pub use error::{Result, RuntimeError};
pub use presenter::{NullPresenter, Presenter};
pub use session::{EndState, MoveOutcome, Session, SessionMode};
pub use views::{BattleView, EnemyView, MapView, MemberView, NpcView};
