//! Room specifications and placed room instances.

use crate::doors::{Door, Rarity};
use crate::geometry::Direction;
use crate::interact::ObjectKind;
use crate::player::{Resource, ResourceEffect};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Topology of a room before rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomShape {
    /// Open on all four sides.
    FourWay,
    /// Open North, East and West.
    TShape,
    /// Open North and East.
    LShape,
    /// Open North and South.
    Straight,
    /// Open South only.
    DeadEnd,
    /// Irregular exits handled outside the rotation logic.
    Special,
}

/// Catalog rarity label of a room, distinct from door rarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoomTier {
    Commonplace,
    Standard,
    Unusual,
    Rare,
}

impl RoomTier {
    pub fn name(&self) -> &'static str {
        match self {
            RoomTier::Commonplace => "Commonplace",
            RoomTier::Standard => "Standard",
            RoomTier::Unusual => "Unusual",
            RoomTier::Rare => "Rare",
        }
    }

    /// Whether rooms of this tier suit a draft slot rolled at `rarity`.
    pub fn fits(&self, rarity: Rarity) -> bool {
        match rarity {
            Rarity::Common => matches!(self, RoomTier::Commonplace | RoomTier::Standard),
            Rarity::Rare => matches!(
                self,
                RoomTier::Standard | RoomTier::Unusual | RoomTier::Rare
            ),
            Rarity::Epic => matches!(self, RoomTier::Unusual | RoomTier::Rare),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomTag {
    Blueprint,
    Hallway,
    DeadEnd,
    Mechanical,
    Permanent,
    Special,
}

/// Structural logic a room runs when entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EntryBehavior {
    #[default]
    None,
    /// Only two openings are usable at a time; the pair can be rotated.
    RotatingJunction,
    /// Four doors, exactly one of them locked at random.
    SingleChoiceEntry,
}

/// Passive category of a room, each tied to one entry payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PassiveTag {
    #[default]
    Neutral,
    Commerce,
    Garden,
    Rest,
    Corridor,
    Penalty,
}

/// Immutable catalog entry describing a draftable room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSpec {
    pub key: String,
    pub name: String,
    pub description: String,
    pub shape: RoomShape,
    pub tier: RoomTier,
    /// Gems paid up front to draft this room.
    pub cost_gems: u32,
    pub tags: Vec<RoomTag>,
    pub entry_behavior: EntryBehavior,
    pub passive_tag: PassiveTag,
    /// Objects placed in every instance of this room.
    pub objects: Vec<ObjectKind>,
}

impl RoomSpec {
    pub fn has_tag(&self, tag: RoomTag) -> bool {
        self.tags.contains(&tag)
    }
}

/// Coin prices offered by a commerce room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopTerms {
    pub key_price: u32,
    pub die_price: u32,
    pub meal_price: u32,
    pub meal_steps: u32,
}

/// Per-room effect payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomEffect {
    /// The two openings of a rotating junction that can be crossed.
    ActivePair(Direction, Direction),
    /// The one door a single-choice entry locked.
    LockedDirection(Direction),
    Shop(ShopTerms),
    GardenYield { gems: u32, claimed: bool },
    RestBonus { steps: u32, claimed: bool },
    /// Draft slots favour hallway rooms while this room stands.
    HallwayFavored,
    Penalty { steps: u32, claimed: bool },
}

/// An object sitting in a placed room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomObject {
    pub kind: ObjectKind,
    pub used: bool,
}

impl RoomObject {
    pub fn new(kind: ObjectKind) -> Self {
        Self { kind, used: false }
    }
}

/// A room placed on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub spec: RoomSpec,
    /// Clockwise rotation in degrees: 0, 90, 180 or 270.
    pub rotation: u16,
    pub doors: BTreeMap<Direction, Door>,
    pub effects: Vec<RoomEffect>,
    pub objects: Vec<RoomObject>,
}

impl Room {
    pub fn key(&self) -> &str {
        &self.spec.key
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn door(&self, direction: Direction) -> Option<&Door> {
        self.doors.get(&direction)
    }

    pub fn door_mut(&mut self, direction: Direction) -> Option<&mut Door> {
        self.doors.get_mut(&direction)
    }

    /// Directions with a door, clockwise from North.
    pub fn openings(&self) -> Vec<Direction> {
        self.doors.keys().copied().collect()
    }

    pub fn active_pair(&self) -> Option<(Direction, Direction)> {
        self.effects.iter().find_map(|e| match e {
            RoomEffect::ActivePair(a, b) => Some((*a, *b)),
            _ => None,
        })
    }

    pub fn locked_direction(&self) -> Option<Direction> {
        self.effects.iter().find_map(|e| match e {
            RoomEffect::LockedDirection(d) => Some(*d),
            _ => None,
        })
    }

    pub fn shop_terms(&self) -> Option<ShopTerms> {
        self.effects.iter().find_map(|e| match e {
            RoomEffect::Shop(terms) => Some(*terms),
            _ => None,
        })
    }

    pub fn favors_hallways(&self) -> bool {
        self.effects.contains(&RoomEffect::HallwayFavored)
    }

    /// Whether the opening can be crossed right now. A door must exist
    /// and, for a rotating junction, belong to the active pair.
    pub fn is_passable(&self, direction: Direction) -> bool {
        if !self.doors.contains_key(&direction) {
            return false;
        }
        match self.active_pair() {
            Some((a, b)) => direction == a || direction == b,
            None => true,
        }
    }

    /// Takes every unclaimed payout, marking it claimed.
    pub fn claim_payouts(&mut self) -> Vec<ResourceEffect> {
        let mut payouts = Vec::new();
        for effect in &mut self.effects {
            match effect {
                RoomEffect::GardenYield { gems, claimed } if !*claimed => {
                    *claimed = true;
                    if *gems > 0 {
                        payouts.push(ResourceEffect::Gain(Resource::Gems, *gems));
                    }
                }
                RoomEffect::RestBonus { steps, claimed } if !*claimed => {
                    *claimed = true;
                    payouts.push(ResourceEffect::Gain(Resource::Steps, *steps));
                }
                RoomEffect::Penalty { steps, claimed } if !*claimed => {
                    *claimed = true;
                    payouts.push(ResourceEffect::Lose(Resource::Steps, *steps));
                }
                _ => {}
            }
        }
        payouts
    }

    pub fn has_unused_objects(&self) -> bool {
        self.objects.iter().any(|o| !o.used)
    }
}
