//! Interactive objects, shop items and the actions offered in a room.

use crate::geometry::Direction;
use crate::player::{PermanentTool, Resource, ResourceEffect};
use serde::{Deserialize, Serialize};

/// Something lying around that can be picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Loot {
    Gems(u32),
    Coins(u32),
    Keys(u32),
    Dice(u32),
    /// Food restores this many steps.
    Food(u32),
    Tool(PermanentTool),
}

impl Loot {
    pub fn effect(&self) -> ResourceEffect {
        match *self {
            Loot::Gems(n) => ResourceEffect::Gain(Resource::Gems, n),
            Loot::Coins(n) => ResourceEffect::Gain(Resource::Coins, n),
            Loot::Keys(n) => ResourceEffect::Gain(Resource::Keys, n),
            Loot::Dice(n) => ResourceEffect::Gain(Resource::Dice, n),
            Loot::Food(n) => ResourceEffect::Gain(Resource::Steps, n),
            Loot::Tool(tool) => ResourceEffect::GrantTool(tool),
        }
    }

    pub fn name(&self) -> String {
        match self {
            Loot::Gems(n) => format!("{} gems", n),
            Loot::Coins(n) => format!("{} coins", n),
            Loot::Keys(n) => format!("{} keys", n),
            Loot::Dice(n) => format!("{} dice", n),
            Loot::Food(n) => format!("food (+{} steps)", n),
            Loot::Tool(tool) => tool.name().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    Loose(Loot),
    /// Needs a shovel.
    DigSpot,
    /// Opens with a hammer, or by spending a key.
    Chest,
    /// Opens by spending a key.
    Locker,
}

impl ObjectKind {
    pub fn name(&self) -> String {
        match self {
            ObjectKind::Loose(loot) => loot.name(),
            ObjectKind::DigSpot => "dig spot".to_string(),
            ObjectKind::Chest => "chest".to_string(),
            ObjectKind::Locker => "locker".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShopItem {
    Key,
    Die,
    Meal,
}

impl ShopItem {
    pub const ALL: [ShopItem; 3] = [ShopItem::Key, ShopItem::Die, ShopItem::Meal];

    pub fn name(&self) -> &'static str {
        match self {
            ShopItem::Key => "key",
            ShopItem::Die => "die",
            ShopItem::Meal => "meal",
        }
    }
}

/// One discrete choice in the Interact sub-state. Object actions carry the
/// index of the object in the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractAction {
    Collect(usize),
    Dig(usize),
    OpenChest(usize),
    OpenLocker(usize),
    Buy(ShopItem),
    RotateJunction,
}

impl InteractAction {
    pub fn label(&self) -> String {
        match self {
            InteractAction::Collect(i) => format!("Collect object {}", i),
            InteractAction::Dig(i) => format!("Dig at spot {}", i),
            InteractAction::OpenChest(i) => format!("Open chest {}", i),
            InteractAction::OpenLocker(i) => format!("Open locker {}", i),
            InteractAction::Buy(item) => format!("Buy a {}", item.name()),
            InteractAction::RotateJunction => "Rotate the junction".to_string(),
        }
    }
}

/// What an action did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractOutcome {
    /// Resource changes applied to the player.
    Effects(Vec<ResourceEffect>),
    /// The junction's new active pair.
    Rotated(Direction, Direction),
}
