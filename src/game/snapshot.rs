//! Read-only view of a run for presentation layers.

use super::logic::ManorGame;
use super::types::GamePhase;
use crate::doors::DoorLockState;
use crate::draft::DraftOption;
use crate::geometry::Direction;
use crate::interact::InteractAction;
use crate::player::PlayerResources;
use crate::rooms::{RoomCatalog, RoomEffect};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoorView {
    pub direction: Direction,
    pub state: DoorLockState,
    /// False for inactive junction openings.
    pub passable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomView {
    pub row: usize,
    pub col: usize,
    pub key: String,
    pub name: String,
    pub rotation: u16,
    pub doors: Vec<DoorView>,
    pub effects: Vec<RoomEffect>,
    pub unused_objects: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManorSnapshot {
    pub phase: GamePhase,
    pub rows: usize,
    pub cols: usize,
    pub player: PlayerResources,
    pub rooms: Vec<RoomView>,
    /// Index into `rooms` of the room the player stands in.
    pub current_room: Option<usize>,
    pub draft_options: Vec<DraftOption>,
    pub actions: Vec<InteractAction>,
    pub last_message: Option<String>,
}

impl ManorSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl<C: RoomCatalog> ManorGame<C> {
    pub fn snapshot(&self) -> ManorSnapshot {
        let rooms: Vec<RoomView> = self
            .rooms()
            .map(|((row, col), room)| RoomView {
                row,
                col,
                key: room.key().to_string(),
                name: room.name().to_string(),
                rotation: room.rotation,
                doors: room
                    .doors
                    .iter()
                    .map(|(dir, door)| DoorView {
                        direction: *dir,
                        state: door.state(),
                        passable: room.is_passable(*dir),
                    })
                    .collect(),
                effects: room.effects.clone(),
                unused_objects: room.objects.iter().filter(|o| !o.used).count(),
            })
            .collect();
        let position = self.player().position();
        let current_room = rooms.iter().position(|r| (r.row, r.col) == position);

        ManorSnapshot {
            phase: self.phase(),
            rows: self.config().rows,
            cols: self.config().cols,
            player: self.player().clone(),
            rooms,
            current_room,
            draft_options: self
                .draft()
                .map(|d| d.options.clone())
                .unwrap_or_default(),
            actions: match self.phase() {
                GamePhase::Playing | GamePhase::Interact => self.available_actions(),
                _ => Vec::new(),
            },
            last_message: self.last_message().map(str::to_string),
        }
    }
}
