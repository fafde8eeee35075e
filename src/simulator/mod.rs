//! Headless auto-play simulator for balance checks.
//!
//! Plays many seeded runs to look at:
//! - How often the far end of the manor is reached
//! - Steps left over and how deep runs get
//! - Draft pool sizes, cancels and rerolls
//! - Door unlock and key spending rates
//!
//! Every run goes through `ManorGame`, so results match real play.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::SimReport;
pub use runner::{play, run_simulation, simulate_single_run, RunOutcome, RunStats};
