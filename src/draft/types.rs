//! Draft options and the inputs a draft is computed from.

use crate::core::GridBounds;
use crate::geometry::Direction;
use crate::rooms::{openings, RoomSpec};
use serde::{Deserialize, Serialize};

/// One room the player may place, with the rotation it would be placed at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftOption {
    pub spec: RoomSpec,
    pub rotation: u16,
}

impl DraftOption {
    pub fn key(&self) -> &str {
        &self.spec.key
    }

    pub fn cost(&self) -> u32 {
        self.spec.cost_gems
    }

    pub fn openings(&self) -> Vec<Direction> {
        openings(self.spec.shape, self.rotation)
    }
}

/// Everything needed to (re)compute the options for one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftRequest {
    pub row: usize,
    pub col: usize,
    /// Direction the player moved to reach the cell.
    pub entry: Direction,
    /// Exploration depth of the cell, fed to the rarity sampler.
    pub depth: usize,
    pub bounds: GridBounds,
    pub total_rows: usize,
    /// Catalog keys that must never be offered.
    pub exclude_keys: Vec<String>,
    /// Fill the first slot from hallway rooms when possible.
    pub favor_hallways: bool,
}

impl DraftRequest {
    /// The opening every option must have: the one facing back the way
    /// the player came.
    pub fn required_opening(&self) -> Direction {
        self.entry.opposite()
    }
}

/// A pending draft: the request and the options currently on offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftState {
    pub request: DraftRequest,
    pub options: Vec<DraftOption>,
    /// Size of the candidate pool the options were drawn from.
    pub pool_size: usize,
    pub rerolls: u32,
}
