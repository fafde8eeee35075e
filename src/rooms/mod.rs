//! Room specifications, the catalog, rotation topology and the factory
//! that turns a drafted (spec, rotation) pair into a placed room.

pub mod catalog;
pub mod factory;
pub mod topology;
pub mod types;

pub use catalog::*;
pub use factory::*;
pub use topology::*;
pub use types::*;
