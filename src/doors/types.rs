//! Door data structures.

use serde::{Deserialize, Serialize};

/// Difficulty tier of a single door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common = 0,
    Rare = 1,
    Epic = 2,
}

impl Rarity {
    pub const ALL: [Rarity; 3] = [Rarity::Common, Rarity::Rare, Rarity::Epic];

    pub fn from_level(level: usize) -> Self {
        Self::ALL.get(level).copied().unwrap_or(Rarity::Epic)
    }

    pub fn level(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
        }
    }

    /// Lock state a freshly generated door of this rarity starts in.
    pub fn default_lock_state(&self) -> DoorLockState {
        match self {
            Rarity::Common => DoorLockState::Unlocked,
            Rarity::Rare => DoorLockState::Locked,
            Rarity::Epic => DoorLockState::DoubleLocked,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoorLockState {
    Unlocked,
    Locked,
    DoubleLocked,
}

impl DoorLockState {
    pub fn label(&self) -> &'static str {
        match self {
            DoorLockState::Unlocked => "unlocked",
            DoorLockState::Locked => "locked",
            DoorLockState::DoubleLocked => "double locked",
        }
    }
}

/// A door on one face of a room.
///
/// The lock state only ever moves towards `Unlocked`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    rarity: Rarity,
    state: DoorLockState,
}

impl Door {
    /// A door in the default state for its rarity.
    pub fn new(rarity: Rarity) -> Self {
        Self {
            rarity,
            state: rarity.default_lock_state(),
        }
    }

    /// A door with an explicit starting state, used by entry logic that
    /// overrides the rarity default while a room is being built.
    pub fn with_state(rarity: Rarity, state: DoorLockState) -> Self {
        Self { rarity, state }
    }

    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    pub fn state(&self) -> DoorLockState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.state == DoorLockState::Unlocked
    }

    /// Unlocks without any cost.
    pub fn force_unlock(&mut self) {
        self.state = DoorLockState::Unlocked;
    }
}
