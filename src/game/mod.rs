//! Exploration state machine.
//!
//! `Menu -> Playing <-> Draft`, `Playing <-> Interact`, and the terminal
//! `GameOver` and `Win` phases. Presentation layers read [`ManorSnapshot`]
//! and send [`Intent`]s.

pub mod logic;
pub mod snapshot;
pub mod types;

pub use logic::*;
pub use snapshot::*;
pub use types::*;
