//! Manor - procedural room-drafting exploration engine
//!
//! A manor is explored room by room on a fixed grid. Stepping through a
//! door into an unexplored cell drafts one of three rooms that fit the
//! cell, and doors get harder to open the deeper the player goes.
//!
//! All randomness is passed in as `&mut impl Rng`, so a seed plus the same
//! sequence of intents reproduces a run exactly.

pub mod core;
pub mod doors;
pub mod draft;
pub mod error;
pub mod game;
pub mod geometry;
pub mod interact;
pub mod player;
pub mod rooms;
pub mod simulator;

pub use error::ManorError;
pub use game::{GameEvent, GamePhase, Intent, ManorGame, ManorSnapshot};
