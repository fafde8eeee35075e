//! Door rarity, lock state and the unlock protocol.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
