pub mod config;
pub mod constants;

pub use config::{GridBounds, ManorConfig, StartingResources};
