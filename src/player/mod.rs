//! Player position, counters and permanent tools.
//!
//! Room entry payouts, door costs and object rewards all reach the player
//! through [`ResourceEffect`] and [`PlayerResources::apply`].

pub mod effects;
pub mod types;

pub use effects::*;
pub use types::*;
