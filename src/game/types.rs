//! Phases, input intents and the events a run emits.

use crate::doors::UnlockMethod;
use crate::geometry::Direction;
use crate::player::ResourceEffect;
use serde::{Deserialize, Serialize};

/// High-level state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the run starts
    Menu,
    /// Free to move between rooms
    Playing,
    /// Choosing a room for a newly discovered cell
    Draft,
    /// Using objects in the current room
    Interact,
    /// Out of steps (terminal)
    GameOver,
    /// Reached the goal cell (terminal)
    Win,
}

impl GamePhase {
    pub fn label(&self) -> &'static str {
        match self {
            GamePhase::Menu => "in the menu",
            GamePhase::Playing => "exploring",
            GamePhase::Draft => "drafting",
            GamePhase::Interact => "interacting",
            GamePhase::GameOver => "out of steps",
            GamePhase::Win => "victorious",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Win)
    }
}

/// Discrete input accepted by [`super::ManorGame::handle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Start,
    Move(Direction),
    /// Pick a draft option by index.
    Select(usize),
    Reroll,
    /// Leave a draft or the interact sub-state.
    Cancel,
    /// Enter the interact sub-state.
    Interact,
    /// Take an interact action by index.
    Act(usize),
}

/// Something that happened while handling an intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted,
    DoorOpened {
        direction: Direction,
        method: UnlockMethod,
    },
    StepSpent {
        steps_left: u32,
    },
    DraftOffered {
        row: usize,
        col: usize,
        options: usize,
    },
    /// No room fits the cell; the player stays where they were.
    DraftUnavailable {
        row: usize,
        col: usize,
    },
    DraftRerolled,
    DraftCancelled,
    RoomPlaced {
        key: String,
        row: usize,
        col: usize,
        rotation: u16,
    },
    RoomEntered {
        key: String,
        row: usize,
        col: usize,
    },
    ResourceChanged(ResourceEffect),
    JunctionRotated(Direction, Direction),
    InteractOpened {
        actions: usize,
    },
    InteractClosed,
    GameOver,
    Won,
}

impl GameEvent {
    /// Player-facing text for the event.
    pub fn message(&self) -> String {
        match self {
            GameEvent::RunStarted => "You step into the manor.".to_string(),
            GameEvent::DoorOpened { direction, method } => match method {
                UnlockMethod::AlreadyOpen => format!("The {} door is open.", direction.name()),
                UnlockMethod::Lockpick => {
                    format!("You pick the lock of the {} door.", direction.name())
                }
                UnlockMethod::Key => format!("You unlock the {} door with a key.", direction.name()),
            },
            GameEvent::StepSpent { steps_left } => format!("{} steps left.", steps_left),
            GameEvent::DraftOffered { options, .. } => {
                format!("Choose one of {} rooms to draft.", options)
            }
            GameEvent::DraftUnavailable { .. } => "No room fits behind this door.".to_string(),
            GameEvent::DraftRerolled => "You roll a die for new rooms.".to_string(),
            GameEvent::DraftCancelled => "You close the door without drafting.".to_string(),
            GameEvent::RoomPlaced { key, .. } => format!("You draft the {}.", key),
            GameEvent::RoomEntered { key, .. } => format!("You enter the {}.", key),
            GameEvent::ResourceChanged(effect) => effect.describe(),
            GameEvent::JunctionRotated(a, b) => {
                format!("The room turns: {} and {} line up.", a.name(), b.name())
            }
            GameEvent::InteractOpened { actions } => format!("{} things to do here.", actions),
            GameEvent::InteractClosed => "You stop looking around.".to_string(),
            GameEvent::GameOver => "You are out of steps. The day is over.".to_string(),
            GameEvent::Won => "You reached the far end of the manor!".to_string(),
        }
    }
}
