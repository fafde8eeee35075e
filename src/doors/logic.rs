//! Depth-weighted rarity sampling and door unlock resolution.

use super::types::{Door, DoorLockState, Rarity};
use crate::core::constants::{
    COMMON_WEIGHT_FALLOFF, EPIC_WEIGHT_FLOOR, EPIC_WEIGHT_SLOPE, RARE_WEIGHT_BASE,
};
use crate::player::{PermanentTool, PlayerResources};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Relative weights of (Common, Rare, Epic) at normalised depth `x` in [0, 1].
pub fn rarity_weights(x: f64) -> [f64; 3] {
    let common = (1.0 - COMMON_WEIGHT_FALLOFF * x).max(0.0);
    let rare = RARE_WEIGHT_BASE + RARE_WEIGHT_BASE * (1.0 - (2.0 * x - 1.0).abs());
    let epic = EPIC_WEIGHT_FLOOR + EPIC_WEIGHT_SLOPE * x;
    [common, rare.max(0.0), epic.max(0.0)]
}

/// Samples a door rarity for a room `row` levels deep in a manor of
/// `total_rows` levels.
///
/// The first row is always Common and the last always Epic. Rows in
/// between shift from Common towards Epic with depth, peaking on Rare
/// around the middle.
pub fn level_by_row(row: usize, total_rows: usize, rng: &mut impl Rng) -> Rarity {
    if row == 0 {
        return Rarity::Common;
    }
    if row + 1 >= total_rows {
        return Rarity::Epic;
    }

    let x = row as f64 / (total_rows - 1) as f64;
    match WeightedIndex::new(rarity_weights(x)) {
        Ok(dist) => Rarity::from_level(dist.sample(rng)),
        Err(_) => Rarity::Common,
    }
}

/// How a door was got through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnlockMethod {
    /// Door was already unlocked.
    AlreadyOpen,
    /// Lockpick bypassed a single lock for free.
    Lockpick,
    /// One key was spent.
    Key,
}

impl Door {
    /// Works out how the player could open this door, without changing
    /// anything. None means the door stays shut.
    pub fn unlock_method(&self, player: &PlayerResources) -> Option<UnlockMethod> {
        match self.state() {
            DoorLockState::Unlocked => Some(UnlockMethod::AlreadyOpen),
            DoorLockState::Locked if player.has_tool(PermanentTool::Lockpick) => {
                Some(UnlockMethod::Lockpick)
            }
            DoorLockState::Locked | DoorLockState::DoubleLocked if player.keys() > 0 => {
                Some(UnlockMethod::Key)
            }
            DoorLockState::Locked | DoorLockState::DoubleLocked => None,
        }
    }

    /// Tries to open the door, paying with the player's resources.
    ///
    /// On failure neither the door nor the player changes.
    pub fn try_open(&mut self, player: &mut PlayerResources) -> Option<UnlockMethod> {
        let method = self.unlock_method(player)?;
        if method == UnlockMethod::Key && !player.spend_key() {
            return None;
        }
        tracing::debug!(
            rarity = self.rarity().name(),
            from = self.state().label(),
            ?method,
            "door opened"
        );
        self.force_unlock();
        Some(method)
    }

    /// Boolean form of [`Door::try_open`].
    pub fn open(&mut self, player: &mut PlayerResources) -> bool {
        self.try_open(player).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StartingResources;
    use crate::player::{Resource, ResourceEffect};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn broke_player() -> PlayerResources {
        PlayerResources::new((0, 0), &StartingResources::default())
    }

    #[test]
    fn test_first_and_last_rows_are_fixed() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(level_by_row(0, 9, &mut rng), Rarity::Common);
            assert_eq!(level_by_row(8, 9, &mut rng), Rarity::Epic);
        }
    }

    #[test]
    fn test_middle_rows_reach_every_tier() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [0u32; 3];
        for _ in 0..3000 {
            let rarity = level_by_row(4, 9, &mut rng);
            seen[rarity.level()] += 1;
        }
        assert!(seen.iter().all(|&n| n > 0), "every tier should appear: {:?}", seen);
    }

    #[test]
    fn test_depth_shifts_distribution() {
        let mut rng = StdRng::seed_from_u64(7);
        let count_epic = |row: usize, rng: &mut StdRng| {
            (0..2000)
                .filter(|_| level_by_row(row, 9, rng) == Rarity::Epic)
                .count()
        };
        let shallow = count_epic(1, &mut rng);
        let deep = count_epic(7, &mut rng);
        assert!(
            deep > shallow,
            "deep rows should roll more epic doors ({} vs {})",
            deep,
            shallow
        );
    }

    #[test]
    fn test_weights_are_non_negative() {
        for step in 0..=20 {
            let weights = rarity_weights(step as f64 / 20.0);
            assert!(weights.iter().all(|w| *w >= 0.0));
        }
        // Common weight vanishes past two thirds depth
        assert_eq!(rarity_weights(0.8)[0], 0.0);
        // Rare weight peaks at mid-depth
        assert!(rarity_weights(0.5)[1] > rarity_weights(0.1)[1]);
    }

    #[test]
    fn test_unlocked_door_opens_for_free() {
        let mut door = Door::new(Rarity::Common);
        let mut player = broke_player();
        let before = player.clone();
        assert_eq!(door.try_open(&mut player), Some(UnlockMethod::AlreadyOpen));
        assert_eq!(player, before);
    }

    #[test]
    fn test_locked_door_without_means_stays_locked() {
        let mut door = Door::new(Rarity::Rare);
        let mut player = broke_player();
        assert!(!door.open(&mut player));
        assert_eq!(door.state(), DoorLockState::Locked);
    }

    #[test]
    fn test_lockpick_opens_locked_door_for_free() {
        let mut door = Door::new(Rarity::Rare);
        let mut player = broke_player();
        player
            .apply(ResourceEffect::GrantTool(PermanentTool::Lockpick))
            .unwrap();
        player.apply(ResourceEffect::Gain(Resource::Keys, 1)).unwrap();

        assert_eq!(door.try_open(&mut player), Some(UnlockMethod::Lockpick));
        assert!(door.is_unlocked());
        assert_eq!(player.keys(), 1, "lockpick must not spend a key");
    }

    #[test]
    fn test_key_opens_locked_door() {
        let mut door = Door::new(Rarity::Rare);
        let mut player = broke_player();
        player.apply(ResourceEffect::Gain(Resource::Keys, 1)).unwrap();

        assert!(door.open(&mut player));
        assert!(door.is_unlocked());
        assert_eq!(player.keys(), 0);
    }

    #[test]
    fn test_lockpick_does_not_bypass_double_lock() {
        let mut door = Door::new(Rarity::Epic);
        let mut player = broke_player();
        player
            .apply(ResourceEffect::GrantTool(PermanentTool::Lockpick))
            .unwrap();

        assert!(!door.open(&mut player));
        assert_eq!(door.state(), DoorLockState::DoubleLocked);
    }

    #[test]
    fn test_key_opens_double_lock() {
        let mut door = Door::new(Rarity::Epic);
        let mut player = broke_player();
        player.apply(ResourceEffect::Gain(Resource::Keys, 2)).unwrap();

        assert_eq!(door.try_open(&mut player), Some(UnlockMethod::Key));
        assert!(door.is_unlocked());
        assert_eq!(player.keys(), 1);

        // Absorbing: a second open costs nothing
        assert_eq!(door.try_open(&mut player), Some(UnlockMethod::AlreadyOpen));
        assert_eq!(player.keys(), 1);
    }
}
