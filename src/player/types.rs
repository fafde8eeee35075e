//! Player resource data structures.

use crate::core::StartingResources;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Countable player resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    Steps,
    Gems,
    Coins,
    Keys,
    Dice,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Steps,
        Resource::Gems,
        Resource::Coins,
        Resource::Keys,
        Resource::Dice,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Resource::Steps => "steps",
            Resource::Gems => "gems",
            Resource::Coins => "coins",
            Resource::Keys => "keys",
            Resource::Dice => "dice",
        }
    }
}

/// Tools the player keeps for the rest of the run. At most one of each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PermanentTool {
    Shovel,
    Hammer,
    Lockpick,
}

impl PermanentTool {
    pub const ALL: [PermanentTool; 3] = [
        PermanentTool::Shovel,
        PermanentTool::Hammer,
        PermanentTool::Lockpick,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PermanentTool::Shovel => "Shovel",
            PermanentTool::Hammer => "Hammer",
            PermanentTool::Lockpick => "Lockpick Kit",
        }
    }
}

/// Position and inventory of the player for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerResources {
    /// Grid row of the current room.
    pub row: usize,
    /// Grid column of the current room.
    pub col: usize,
    pub(crate) steps: u32,
    pub(crate) gems: u32,
    pub(crate) coins: u32,
    pub(crate) keys: u32,
    pub(crate) dice: u32,
    pub(crate) tools: BTreeSet<PermanentTool>,
}

impl PlayerResources {
    pub fn new(position: (usize, usize), start: &StartingResources) -> Self {
        Self {
            row: position.0,
            col: position.1,
            steps: start.steps,
            gems: start.gems,
            coins: start.coins,
            keys: start.keys,
            dice: start.dice,
            tools: BTreeSet::new(),
        }
    }

    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn gems(&self) -> u32 {
        self.gems
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn keys(&self) -> u32 {
        self.keys
    }

    pub fn dice(&self) -> u32 {
        self.dice
    }

    pub fn amount(&self, resource: Resource) -> u32 {
        match resource {
            Resource::Steps => self.steps,
            Resource::Gems => self.gems,
            Resource::Coins => self.coins,
            Resource::Keys => self.keys,
            Resource::Dice => self.dice,
        }
    }

    pub(crate) fn counter_mut(&mut self, resource: Resource) -> &mut u32 {
        match resource {
            Resource::Steps => &mut self.steps,
            Resource::Gems => &mut self.gems,
            Resource::Coins => &mut self.coins,
            Resource::Keys => &mut self.keys,
            Resource::Dice => &mut self.dice,
        }
    }

    pub fn has_tool(&self, tool: PermanentTool) -> bool {
        self.tools.contains(&tool)
    }

    pub fn tools(&self) -> impl Iterator<Item = PermanentTool> + '_ {
        self.tools.iter().copied()
    }

    /// Whether at least one step remains.
    pub fn can_move(&self) -> bool {
        self.steps > 0
    }
}
