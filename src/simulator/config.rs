//! Simulation configuration.

use crate::core::ManorConfig;

/// Configuration for a batch of auto-played runs.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of runs to play
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random). Run `i` uses `seed + i`.
    pub seed: Option<u64>,

    /// Intents per run before the run is counted as timed out
    pub max_actions_per_run: u32,

    /// Manor every run is played in
    pub manor: ManorConfig,

    /// Spend dice to redraw drafts with no affordable option
    pub use_rerolls: bool,

    /// Use room objects and shops when possible
    pub collect_objects: bool,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            max_actions_per_run: 2_000,
            manor: ManorConfig::default(),
            use_rerolls: true,
            collect_objects: true,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// A fast seeded batch for smoke checks.
    pub fn quick() -> Self {
        Self {
            num_runs: 100,
            seed: Some(42),
            ..Default::default()
        }
    }

    /// Runs in a smaller manor.
    pub fn small_manor(rows: usize, cols: usize) -> Self {
        Self {
            manor: ManorConfig::small(rows, cols),
            ..Default::default()
        }
    }

    /// Moves only: no objects, shops or rerolls.
    pub fn walk_only() -> Self {
        Self {
            use_rerolls: false,
            collect_objects: false,
            ..Default::default()
        }
    }
}
