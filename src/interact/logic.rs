//! Object, shop and junction actions.

use super::types::{InteractAction, InteractOutcome, ObjectKind, ShopItem};
use crate::core::constants::{
    CHEST_COINS, CHEST_GEMS, DIG_SPOT_COINS, DIG_SPOT_GEMS, LOCKER_COINS, LOCKER_DICE,
};
use crate::error::ManorError;
use crate::player::{PermanentTool, PlayerResources, Resource, ResourceEffect};
use crate::rooms::Room;

/// Actions the room offers right now, in a stable order: objects first,
/// then shop items, then junction control.
pub fn available_actions(room: &Room) -> Vec<InteractAction> {
    let mut actions: Vec<InteractAction> = room
        .objects
        .iter()
        .enumerate()
        .filter(|(_, obj)| !obj.used)
        .map(|(i, obj)| match obj.kind {
            ObjectKind::Loose(_) => InteractAction::Collect(i),
            ObjectKind::DigSpot => InteractAction::Dig(i),
            ObjectKind::Chest => InteractAction::OpenChest(i),
            ObjectKind::Locker => InteractAction::OpenLocker(i),
        })
        .collect();

    if room.shop_terms().is_some() {
        actions.extend(ShopItem::ALL.iter().map(|item| InteractAction::Buy(*item)));
    }
    if room.active_pair().is_some() {
        actions.push(InteractAction::RotateJunction);
    }
    actions
}

pub fn has_interactions(room: &Room) -> bool {
    !available_actions(room).is_empty()
}

/// Carries out one action. On error neither the room nor the player changes.
pub fn perform(
    room: &mut Room,
    player: &mut PlayerResources,
    action: InteractAction,
) -> Result<InteractOutcome, ManorError> {
    let (index, effects) = match action {
        InteractAction::Collect(i) => match object_kind(room, i)? {
            ObjectKind::Loose(loot) => {
                if let ResourceEffect::GrantTool(tool) = loot.effect() {
                    if player.has_tool(tool) {
                        return Err(ManorError::ToolAlreadyOwned(tool));
                    }
                }
                (Some(i), vec![loot.effect()])
            }
            _ => return Err(ManorError::NothingToInteract),
        },
        InteractAction::Dig(i) => {
            expect_kind(room, i, ObjectKind::DigSpot)?;
            if !player.has_tool(PermanentTool::Shovel) {
                return Err(ManorError::MissingTool(PermanentTool::Shovel));
            }
            (
                Some(i),
                vec![
                    ResourceEffect::Gain(Resource::Coins, DIG_SPOT_COINS),
                    ResourceEffect::Gain(Resource::Gems, DIG_SPOT_GEMS),
                ],
            )
        }
        InteractAction::OpenChest(i) => {
            expect_kind(room, i, ObjectKind::Chest)?;
            let mut effects = Vec::new();
            if !player.has_tool(PermanentTool::Hammer) {
                if player.keys() == 0 {
                    return Err(ManorError::MissingTool(PermanentTool::Hammer));
                }
                effects.push(ResourceEffect::Spend(Resource::Keys, 1));
            }
            effects.push(ResourceEffect::Gain(Resource::Coins, CHEST_COINS));
            effects.push(ResourceEffect::Gain(Resource::Gems, CHEST_GEMS));
            (Some(i), effects)
        }
        InteractAction::OpenLocker(i) => {
            expect_kind(room, i, ObjectKind::Locker)?;
            (
                Some(i),
                vec![
                    ResourceEffect::Spend(Resource::Keys, 1),
                    ResourceEffect::Gain(Resource::Coins, LOCKER_COINS),
                    ResourceEffect::Gain(Resource::Dice, LOCKER_DICE),
                ],
            )
        }
        InteractAction::Buy(item) => {
            let terms = room.shop_terms().ok_or(ManorError::NothingToInteract)?;
            let (price, goods) = match item {
                ShopItem::Key => (terms.key_price, ResourceEffect::Gain(Resource::Keys, 1)),
                ShopItem::Die => (terms.die_price, ResourceEffect::Gain(Resource::Dice, 1)),
                ShopItem::Meal => (
                    terms.meal_price,
                    ResourceEffect::Gain(Resource::Steps, terms.meal_steps),
                ),
            };
            (None, vec![ResourceEffect::Spend(Resource::Coins, price), goods])
        }
        InteractAction::RotateJunction => {
            let (a, b) = room
                .rotate_active_pair()
                .ok_or(ManorError::NothingToInteract)?;
            return Ok(InteractOutcome::Rotated(a, b));
        }
    };

    player.apply_all(&effects)?;
    if let Some(i) = index {
        room.objects[i].used = true;
    }
    tracing::debug!(room = %room.spec.key, ?action, "interaction done");
    Ok(InteractOutcome::Effects(effects))
}

fn object_kind(room: &Room, index: usize) -> Result<ObjectKind, ManorError> {
    let object = room
        .objects
        .get(index)
        .ok_or(ManorError::InvalidChoice(index))?;
    if object.used {
        return Err(ManorError::ObjectAlreadyUsed);
    }
    Ok(object.kind)
}

fn expect_kind(room: &Room, index: usize, kind: ObjectKind) -> Result<(), ManorError> {
    if object_kind(room, index)? == kind {
        Ok(())
    } else {
        Err(ManorError::NothingToInteract)
    }
}
