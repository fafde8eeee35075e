//! Draft compatibility engine: which rooms fit a newly discovered cell,
//! which three are offered, and rerolling them.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
