//! Errors reported by the manor engine.
//!
//! Illegal requests are rejected without touching game state; the caller
//! shows the `Display` text to the player. Config and catalog faults are
//! programming errors surfaced at construction time.

use crate::doors::DoorLockState;
use crate::game::GamePhase;
use crate::geometry::Direction;
use crate::player::{PermanentTool, Resource};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ManorError {
    #[error("You cannot exit the manor to the {}.", .0.name())]
    OutOfBounds(Direction),

    #[error("No door to the {}.", .0.name())]
    NoDoor(Direction),

    #[error("The {} opening is not aligned right now.", .0.name())]
    InactiveOpening(Direction),

    #[error("The {} door is {}.", .direction.name(), .state.label())]
    DoorLocked {
        direction: Direction,
        state: DoorLockState,
    },

    #[error("Not enough gems: need {cost}, have {available}.")]
    InsufficientGems { cost: u32, available: u32 },

    #[error("Not enough {}: need {needed}, have {available}.", .resource.name())]
    InsufficientResource {
        resource: Resource,
        needed: u32,
        available: u32,
    },

    #[error("No dice left to redraw.")]
    NoRerolls,

    #[error("There is no choice number {0}.")]
    InvalidChoice(usize),

    #[error("Nothing to do here.")]
    NothingToInteract,

    #[error("That has already been used.")]
    ObjectAlreadyUsed,

    #[error("You need the {}.", .0.name())]
    MissingTool(PermanentTool),

    #[error("You already own the {}.", .0.name())]
    ToolAlreadyOwned(PermanentTool),

    #[error("Not possible while {}.", .0.label())]
    NotAllowed(GamePhase),

    #[error("The run is over.")]
    RunOver,

    #[error("Unknown room: {0}")]
    UnknownRoom(String),

    #[error("Invalid manor config: {0}")]
    InvalidConfig(String),
}

impl ManorError {
    /// True for rejections a player can trigger through normal input.
    pub fn is_illegal_request(&self) -> bool {
        !matches!(
            self,
            ManorError::UnknownRoom(_) | ManorError::InvalidConfig(_)
        )
    }
}
