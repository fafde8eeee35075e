//! Interact sub-state: room objects, the shop and junction control.
//!
//! Every reward or cost goes through [`crate::player::PlayerResources::apply_all`],
//! so an action either fully happens or leaves the run untouched.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
