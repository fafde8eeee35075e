//! Room catalog lookup and the built-in room table.

use super::types::{EntryBehavior, PassiveTag, RoomShape, RoomSpec, RoomTag, RoomTier};
use crate::interact::{Loot, ObjectKind};
use crate::player::PermanentTool;

/// Read-only source of room specifications.
pub trait RoomCatalog {
    /// Look up one spec by its key.
    fn spec_by_key(&self, key: &str) -> Option<&RoomSpec>;

    /// Every spec, in a stable order.
    fn specs(&self) -> &[RoomSpec];
}

/// Catalog backed by an in-memory table.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    specs: Vec<RoomSpec>,
}

impl StaticCatalog {
    pub fn from_specs(specs: Vec<RoomSpec>) -> Self {
        Self { specs }
    }

    /// The built-in room table.
    pub fn standard() -> Self {
        use EntryBehavior::*;
        use ObjectKind::*;
        use PassiveTag::*;
        use RoomShape::*;
        use RoomTag::*;
        use RoomTier::*;

        let specs = vec![
            RoomSpec::new("ENTRANCE_HALL", "Entrance Hall", TShape, Standard, 0)
                .describe("Where every run begins. Three doors lead onward.")
                .tagged(&[Permanent, Blueprint]),
            RoomSpec::new("ANTECHAMBER", "Antechamber", FourWay, Rare, 0)
                .describe("The room at the top of the manor. Reach it to win.")
                .tagged(&[Permanent]),
            RoomSpec::new("FOUNDATION", "The Foundation", Straight, Standard, 0)
                .describe("Bare stone leading down towards the basement.")
                .tagged(&[Blueprint]),
            RoomSpec::new("SPARE_ROOM", "Spare Room", LShape, Standard, 0)
                .describe("An empty room waiting for a purpose.")
                .tagged(&[Blueprint]),
            RoomSpec::new("ROTUNDA", "Rotunda", FourWay, Rare, 3)
                .describe("A circular room. Only two of its doors line up at a time.")
                .tagged(&[Blueprint, Mechanical])
                .entry(RotatingJunction),
            RoomSpec::new("PARLOR", "Parlor", LShape, Standard, 0)
                .describe("A sitting room with a heavy chest in the corner.")
                .tagged(&[Blueprint])
                .holding(&[Chest]),
            RoomSpec::new("BILLIARD_ROOM", "Billiard Room", Straight, Standard, 0)
                .describe("Green felt and a rack of worn balls.")
                .tagged(&[Blueprint]),
            RoomSpec::new("GALLERY", "Gallery", Straight, Standard, 0)
                .describe("Portraits watch you cross.")
                .tagged(&[Blueprint]),
            RoomSpec::new("CLOSET", "Closet", RoomShape::DeadEnd, Commonplace, 0)
                .describe("A cramped dead end stuffed with odds and ends.")
                .tagged(&[Blueprint, RoomTag::DeadEnd])
                .holding(&[Loose(Loot::Keys(1)), Loose(Loot::Coins(2))]),
            RoomSpec::new("WALKIN_CLOSET", "Walk-in Closet", RoomShape::DeadEnd, Commonplace, 0)
                .describe("Racks of coats and a locker at the back.")
                .tagged(&[Blueprint, RoomTag::DeadEnd])
                .holding(&[Locker, Loose(Loot::Gems(1))]),
            RoomSpec::new("STOREROOM", "Storeroom", RoomShape::DeadEnd, Commonplace, 0)
                .describe("Shelves of preserves and a forgotten die.")
                .tagged(&[Blueprint, RoomTag::DeadEnd])
                .holding(&[Loose(Loot::Food(5)), Loose(Loot::Dice(1))]),
            RoomSpec::new("HALLWAY", "Hallway", Straight, Commonplace, 0)
                .describe("A plain corridor.")
                .tagged(&[Hallway]),
            RoomSpec::new("FOYER", "Foyer", TShape, Standard, 0)
                .describe("While the Foyer stands, hallways turn up more often.")
                .tagged(&[Hallway])
                .passive(Corridor),
            RoomSpec::new("VESTIBULE", "Vestibule", FourWay, Standard, 0)
                .describe("Four doors, one of them always locked.")
                .tagged(&[Hallway])
                .entry(SingleChoiceEntry),
            RoomSpec::new("GREAT_HALL", "Great Hall", FourWay, Standard, 0)
                .describe("A wide hall with doors on every side.")
                .tagged(&[Hallway]),
            RoomSpec::new("AQUARIUM", "Aquarium", TShape, Unusual, 1)
                .describe("Counts as more than one kind of room.")
                .tagged(&[Blueprint, Hallway]),
            RoomSpec::new("SECRET_PASSAGE", "Secret Passage", RoomShape::DeadEnd, Unusual, 1)
                .describe("It looks like a dead end, but something is hidden here.")
                .tagged(&[Blueprint, RoomTag::DeadEnd])
                .holding(&[DigSpot]),
            RoomSpec::new("GARAGE", "Garage", RoomShape::DeadEnd, Standard, 0)
                .describe("Keys hang by the door next to an old shovel.")
                .tagged(&[Blueprint, RoomTag::DeadEnd])
                .holding(&[Loose(Loot::Keys(2)), Loose(Loot::Tool(PermanentTool::Shovel))]),
            RoomSpec::new("VAULT", "Vault", RoomShape::DeadEnd, Unusual, 2)
                .describe("Stacks of coins behind a thick door.")
                .tagged(&[Blueprint, RoomTag::DeadEnd])
                .holding(&[Loose(Loot::Coins(10))]),
            RoomSpec::new("SECURITY", "Security", LShape, Unusual, 2)
                .describe("Monitors, switches and a lockpick kit.")
                .tagged(&[Blueprint, Mechanical])
                .holding(&[Loose(Loot::Tool(PermanentTool::Lockpick))]),
            RoomSpec::new("UTILITY_CLOSET", "Utility Closet", RoomShape::DeadEnd, Standard, 0)
                .describe("Breakers, fuses and a hammer on a hook.")
                .tagged(&[Blueprint])
                .holding(&[Loose(Loot::Tool(PermanentTool::Hammer))]),
            RoomSpec::new("COMMISSARY", "Commissary", LShape, Standard, 1)
                .describe("A small shop that takes coins.")
                .tagged(&[Blueprint])
                .passive(Commerce),
            RoomSpec::new("GREENHOUSE", "Greenhouse", LShape, Unusual, 1)
                .describe("Glass walls and soft soil. Gems sometimes surface.")
                .tagged(&[Blueprint])
                .passive(Garden)
                .holding(&[DigSpot]),
            RoomSpec::new("TERRACE", "Terrace", RoomShape::DeadEnd, Commonplace, 0)
                .describe("Planters along an open balcony.")
                .tagged(&[Blueprint, RoomTag::DeadEnd])
                .passive(Garden),
            RoomSpec::new("BEDROOM", "Bedroom", LShape, Standard, 0)
                .describe("A soft bed. Resting here restores a few steps.")
                .tagged(&[Blueprint])
                .passive(Rest),
            RoomSpec::new("WEIGHT_ROOM", "Weight Room", Straight, Standard, 0)
                .describe("Crossing it is exhausting.")
                .tagged(&[Blueprint])
                .passive(Penalty),
        ];

        Self { specs }
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl RoomCatalog for StaticCatalog {
    fn spec_by_key(&self, key: &str) -> Option<&RoomSpec> {
        self.specs.iter().find(|spec| spec.key == key)
    }

    fn specs(&self) -> &[RoomSpec] {
        &self.specs
    }
}

impl RoomSpec {
    /// A plain spec with no tags, entry logic, passive tag or objects.
    pub fn new(key: &str, name: &str, shape: RoomShape, tier: RoomTier, cost_gems: u32) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            description: String::new(),
            shape,
            tier,
            cost_gems,
            tags: Vec::new(),
            entry_behavior: EntryBehavior::None,
            passive_tag: PassiveTag::Neutral,
            objects: Vec::new(),
        }
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn tagged(mut self, tags: &[RoomTag]) -> Self {
        self.tags.extend_from_slice(tags);
        self
    }

    pub fn entry(mut self, behavior: EntryBehavior) -> Self {
        self.entry_behavior = behavior;
        self
    }

    pub fn passive(mut self, tag: PassiveTag) -> Self {
        self.passive_tag = tag;
        self
    }

    pub fn holding(mut self, objects: &[ObjectKind]) -> Self {
        self.objects.extend_from_slice(objects);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{GOAL_ROOM_KEY, START_ROOM_KEY};
    use crate::rooms::topology::canonical_openings;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_unique() {
        let catalog = StaticCatalog::standard();
        let keys: HashSet<&str> = catalog.specs().iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys.len(), catalog.specs().len());
    }

    #[test]
    fn test_lookup() {
        let catalog = StaticCatalog::standard();
        assert!(catalog.spec_by_key(START_ROOM_KEY).is_some());
        assert!(catalog.spec_by_key(GOAL_ROOM_KEY).is_some());
        assert!(catalog.spec_by_key("NOWHERE").is_none());

        let rotunda = catalog.spec_by_key("ROTUNDA").unwrap();
        assert_eq!(rotunda.entry_behavior, EntryBehavior::RotatingJunction);
        assert_eq!(rotunda.cost_gems, 3);
    }

    #[test]
    fn test_every_passive_tag_is_used() {
        let catalog = StaticCatalog::standard();
        for tag in [
            PassiveTag::Commerce,
            PassiveTag::Garden,
            PassiveTag::Rest,
            PassiveTag::Corridor,
            PassiveTag::Penalty,
        ] {
            assert!(
                catalog.specs().iter().any(|s| s.passive_tag == tag),
                "no room carries {:?}",
                tag
            );
        }
    }

    #[test]
    fn test_has_dead_end_rooms() {
        // A free dead end fits any cell, so every draft pool is non-empty
        let catalog = StaticCatalog::standard();
        assert!(catalog
            .specs()
            .iter()
            .any(|s| s.shape == RoomShape::DeadEnd && s.cost_gems == 0));
    }

    #[test]
    fn test_every_room_can_be_placed() {
        let catalog = StaticCatalog::standard();
        for spec in catalog.specs() {
            assert!(
                !canonical_openings(spec.shape).is_empty(),
                "{} has no openings and could never be drafted",
                spec.key
            );
        }
    }

    #[test]
    fn test_every_tool_lies_in_some_room() {
        let catalog = StaticCatalog::standard();
        for tool in PermanentTool::ALL {
            assert!(
                catalog
                    .specs()
                    .iter()
                    .any(|s| s.objects.contains(&ObjectKind::Loose(Loot::Tool(tool)))),
                "{} is never found",
                tool.name()
            );
        }
    }
}
