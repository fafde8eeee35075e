//! Builds room instances and runs their entry-time logic.

use super::catalog::RoomCatalog;
use super::topology::openings;
use super::types::{EntryBehavior, PassiveTag, Room, RoomEffect, RoomObject, ShopTerms};
use crate::core::constants::{
    GARDEN_GEM_YIELD_MAX, PENALTY_STEP_LOSS, REST_STEP_BONUS, SHOP_DIE_PRICE, SHOP_KEY_PRICE,
    SHOP_MEAL_PRICE, SHOP_MEAL_STEPS,
};
use crate::doors::{level_by_row, Door, DoorLockState, Rarity};
use crate::error::ManorError;
use crate::geometry::Direction;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

/// Instantiates rooms from a catalog for a manor `total_rows` deep.
pub struct RoomFactory<'a, C: RoomCatalog> {
    catalog: &'a C,
    total_rows: usize,
}

impl<'a, C: RoomCatalog> RoomFactory<'a, C> {
    pub fn new(catalog: &'a C, total_rows: usize) -> Self {
        Self {
            catalog,
            total_rows,
        }
    }

    /// Builds the room `key` at exploration `depth` with the given rotation.
    ///
    /// Each opening gets its own door rarity roll, then entry logic runs once.
    pub fn generate<R: Rng>(
        &self,
        key: &str,
        depth: usize,
        rotation: u16,
        rng: &mut R,
    ) -> Result<Room, ManorError> {
        let spec = self
            .catalog
            .spec_by_key(key)
            .ok_or_else(|| ManorError::UnknownRoom(key.to_string()))?;

        let mut doors = BTreeMap::new();
        for dir in openings(spec.shape, rotation) {
            let rarity = level_by_row(depth, self.total_rows, rng);
            doors.insert(dir, Door::new(rarity));
        }

        let mut room = Room {
            spec: spec.clone(),
            rotation,
            doors,
            effects: Vec::new(),
            objects: spec.objects.iter().copied().map(RoomObject::new).collect(),
        };
        apply_entry_logic(&mut room, rng);

        tracing::debug!(
            key,
            depth,
            rotation,
            doors = room.doors.len(),
            "generated room"
        );
        Ok(room)
    }
}

/// Convenience wrapper around [`RoomFactory::generate`].
pub fn generate_room<C: RoomCatalog, R: Rng>(
    catalog: &C,
    total_rows: usize,
    key: &str,
    depth: usize,
    rotation: u16,
    rng: &mut R,
) -> Result<Room, ManorError> {
    RoomFactory::new(catalog, total_rows).generate(key, depth, rotation, rng)
}

/// Runs the room's entry behaviour and passive tag.
///
/// Safe to call on every entry: anything already set up is left alone.
pub fn apply_entry_logic<R: Rng>(room: &mut Room, rng: &mut R) {
    match room.spec.entry_behavior {
        EntryBehavior::RotatingJunction => setup_junction(room, rng),
        EntryBehavior::SingleChoiceEntry => setup_single_choice(room, rng),
        EntryBehavior::None => {}
    }
    apply_passive(room, rng);
}

fn setup_junction<R: Rng>(room: &mut Room, rng: &mut R) {
    if room.active_pair().is_some() {
        return;
    }
    let present = room.openings();
    if present.len() < 2 {
        return;
    }
    let mut pair: Vec<Direction> = present.choose_multiple(rng, 2).copied().collect();
    pair.sort();
    room.effects.push(RoomEffect::ActivePair(pair[0], pair[1]));
}

fn setup_single_choice<R: Rng>(room: &mut Room, rng: &mut R) {
    if room.locked_direction().is_some() {
        return;
    }
    let locked = Direction::CLOCKWISE[rng.gen_range(0..Direction::CLOCKWISE.len())];
    for dir in Direction::CLOCKWISE {
        let rarity = room.door(dir).map(|d| d.rarity()).unwrap_or(Rarity::Rare);
        let state = if dir == locked {
            DoorLockState::Locked
        } else {
            DoorLockState::Unlocked
        };
        room.doors.insert(dir, Door::with_state(rarity, state));
    }
    room.effects.push(RoomEffect::LockedDirection(locked));
}

fn apply_passive<R: Rng>(room: &mut Room, rng: &mut R) {
    let already = room.effects.iter().any(|e| {
        matches!(
            e,
            RoomEffect::Shop(_)
                | RoomEffect::GardenYield { .. }
                | RoomEffect::RestBonus { .. }
                | RoomEffect::HallwayFavored
                | RoomEffect::Penalty { .. }
        )
    });
    if already {
        return;
    }

    let effect = match room.spec.passive_tag {
        PassiveTag::Neutral => return,
        PassiveTag::Commerce => RoomEffect::Shop(ShopTerms {
            key_price: SHOP_KEY_PRICE,
            die_price: SHOP_DIE_PRICE,
            meal_price: SHOP_MEAL_PRICE,
            meal_steps: SHOP_MEAL_STEPS,
        }),
        PassiveTag::Garden => RoomEffect::GardenYield {
            gems: rng.gen_range(0..=GARDEN_GEM_YIELD_MAX),
            claimed: false,
        },
        PassiveTag::Rest => RoomEffect::RestBonus {
            steps: REST_STEP_BONUS,
            claimed: false,
        },
        PassiveTag::Corridor => RoomEffect::HallwayFavored,
        PassiveTag::Penalty => RoomEffect::Penalty {
            steps: PENALTY_STEP_LOSS,
            claimed: false,
        },
    };
    room.effects.push(effect);
}

impl Room {
    /// Moves each member of the active pair to the next opening clockwise
    /// that this room actually has. Returns the new pair, or None for rooms
    /// without one.
    pub fn rotate_active_pair(&mut self) -> Option<(Direction, Direction)> {
        let (a, b) = self.active_pair()?;
        let next = |dir: Direction| {
            let mut candidate = dir;
            for _ in 0..Direction::CLOCKWISE.len() {
                candidate = candidate.clockwise();
                if self.doors.contains_key(&candidate) {
                    break;
                }
            }
            candidate
        };
        let (mut first, mut second) = (next(a), next(b));
        if first > second {
            std::mem::swap(&mut first, &mut second);
        }

        for effect in &mut self.effects {
            if let RoomEffect::ActivePair(x, y) = effect {
                *x = first;
                *y = second;
            }
        }
        tracing::debug!(room = %self.spec.key, ?first, ?second, "rotated active pair");
        Some((first, second))
    }

    /// Makes the opening at `direction` crossable: unlocks its door and,
    /// for a rotating junction, turns the pair until it includes it.
    pub fn force_traversable(&mut self, direction: Direction) {
        let Some(door) = self.door_mut(direction) else {
            return;
        };
        door.force_unlock();

        for _ in 0..Direction::CLOCKWISE.len() {
            match self.active_pair() {
                Some((a, b)) if a != direction && b != direction => {
                    self.rotate_active_pair();
                }
                _ => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rooms::catalog::StaticCatalog;
    use crate::rooms::types::{RoomShape, RoomSpec, RoomTier};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn junction_with_pair(a: Direction, b: Direction) -> Room {
        let catalog = StaticCatalog::standard();
        let mut rng = StdRng::seed_from_u64(1);
        let mut room = generate_room(&catalog, 9, "ROTUNDA", 0, 0, &mut rng).unwrap();
        room.effects = vec![RoomEffect::ActivePair(a, b)];
        room
    }

    #[test]
    fn test_generate_uses_rotated_openings() {
        let catalog = StaticCatalog::standard();
        let mut rng = StdRng::seed_from_u64(3);
        let room = generate_room(&catalog, 9, "HALLWAY", 0, 90, &mut rng).unwrap();
        assert_eq!(room.openings(), vec![Direction::East, Direction::West]);
        assert_eq!(room.rotation, 90);
        // Depth 0 doors are always Common
        assert!(room.doors.values().all(|d| d.is_unlocked()));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let catalog = StaticCatalog::standard();
        let mut rng = StdRng::seed_from_u64(3);
        let result = generate_room(&catalog, 9, "BALLROOM", 2, 0, &mut rng);
        assert_eq!(result, Err(ManorError::UnknownRoom("BALLROOM".to_string())));
    }

    #[test]
    fn test_deepest_row_doors_are_double_locked() {
        let catalog = StaticCatalog::standard();
        let mut rng = StdRng::seed_from_u64(9);
        let room = generate_room(&catalog, 9, "GREAT_HALL", 8, 0, &mut rng).unwrap();
        assert!(room
            .doors
            .values()
            .all(|d| d.state() == DoorLockState::DoubleLocked));
    }

    #[test]
    fn test_objects_are_copied_from_spec() {
        let catalog = StaticCatalog::standard();
        let mut rng = StdRng::seed_from_u64(5);
        let room = generate_room(&catalog, 9, "GARAGE", 1, 180, &mut rng).unwrap();
        assert_eq!(room.objects.len(), 2);
        assert!(room.has_unused_objects());
    }

    #[test]
    fn test_junction_gets_two_distinct_active_openings() {
        let catalog = StaticCatalog::standard();
        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let room = generate_room(&catalog, 9, "ROTUNDA", 3, 0, &mut rng).unwrap();
            let (a, b) = room.active_pair().expect("junction must have a pair");
            assert_ne!(a, b);
            assert!(room.door(a).is_some() && room.door(b).is_some());
            assert_eq!(room.doors.len(), 4, "inactive openings keep their doors");
        }
    }

    #[test]
    fn test_rotate_active_pair_walks_clockwise() {
        let mut room = junction_with_pair(Direction::North, Direction::East);
        assert_eq!(
            room.rotate_active_pair(),
            Some((Direction::East, Direction::South))
        );
        assert_eq!(
            room.rotate_active_pair(),
            Some((Direction::South, Direction::West))
        );
        assert!(room.is_passable(Direction::West));
        assert!(!room.is_passable(Direction::North));
    }

    #[test]
    fn test_rotate_skips_missing_openings() {
        let mut room = junction_with_pair(Direction::North, Direction::East);
        room.doors.remove(&Direction::South);
        assert_eq!(
            room.rotate_active_pair(),
            Some((Direction::East, Direction::West))
        );
    }

    #[test]
    fn test_rotate_without_pair_is_none() {
        let catalog = StaticCatalog::standard();
        let mut rng = StdRng::seed_from_u64(2);
        let mut room = generate_room(&catalog, 9, "GREAT_HALL", 1, 0, &mut rng).unwrap();
        assert_eq!(room.rotate_active_pair(), None);
    }

    #[test]
    fn test_single_choice_locks_exactly_one_door() {
        let catalog = StaticCatalog::standard();
        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let room = generate_room(&catalog, 9, "VESTIBULE", 6, 0, &mut rng).unwrap();
            assert_eq!(room.doors.len(), 4);
            let locked: Vec<_> = room
                .doors
                .iter()
                .filter(|(_, d)| d.state() == DoorLockState::Locked)
                .map(|(dir, _)| *dir)
                .collect();
            assert_eq!(locked.len(), 1, "seed {}: {:?}", seed, room.doors);
            assert_eq!(room.locked_direction(), Some(locked[0]));
            assert_eq!(
                room.doors.values().filter(|d| d.is_unlocked()).count(),
                3
            );
        }
    }

    #[test]
    fn test_single_choice_synthesizes_missing_doors() {
        let mut rng = StdRng::seed_from_u64(4);
        let spec = RoomSpec::new("NARROW_VESTIBULE", "Narrow", RoomShape::DeadEnd, RoomTier::Standard, 0)
            .entry(EntryBehavior::SingleChoiceEntry);
        let catalog = StaticCatalog::from_specs(vec![spec]);
        let room = generate_room(&catalog, 9, "NARROW_VESTIBULE", 2, 0, &mut rng).unwrap();
        assert_eq!(room.openings(), Direction::CLOCKWISE.to_vec());
    }

    #[test]
    fn test_entry_logic_is_idempotent() {
        let catalog = StaticCatalog::standard();
        let mut rng = StdRng::seed_from_u64(11);
        for key in ["ROTUNDA", "VESTIBULE", "GREENHOUSE", "COMMISSARY", "FOYER"] {
            let mut room = generate_room(&catalog, 9, key, 4, 0, &mut rng).unwrap();
            let before = room.clone();
            apply_entry_logic(&mut room, &mut rng);
            apply_entry_logic(&mut room, &mut rng);
            assert_eq!(room, before, "{} changed on re-entry", key);
        }
    }

    #[test]
    fn test_passive_payloads() {
        let catalog = StaticCatalog::standard();
        let mut rng = StdRng::seed_from_u64(12);

        let bedroom = generate_room(&catalog, 9, "BEDROOM", 1, 0, &mut rng).unwrap();
        assert!(bedroom.effects.contains(&RoomEffect::RestBonus {
            steps: REST_STEP_BONUS,
            claimed: false
        }));

        let shop = generate_room(&catalog, 9, "COMMISSARY", 1, 0, &mut rng).unwrap();
        assert_eq!(shop.shop_terms().map(|t| t.key_price), Some(SHOP_KEY_PRICE));

        let foyer = generate_room(&catalog, 9, "FOYER", 1, 0, &mut rng).unwrap();
        assert!(foyer.favors_hallways());

        for _ in 0..20 {
            let garden = generate_room(&catalog, 9, "GREENHOUSE", 1, 0, &mut rng).unwrap();
            let gems = garden.effects.iter().find_map(|e| match e {
                RoomEffect::GardenYield { gems, .. } => Some(*gems),
                _ => None,
            });
            assert!(matches!(gems, Some(g) if g <= GARDEN_GEM_YIELD_MAX));
        }
    }

    #[test]
    fn test_passive_does_not_touch_doors() {
        let catalog = StaticCatalog::standard();
        let mut rng = StdRng::seed_from_u64(13);
        let room = generate_room(&catalog, 9, "WEIGHT_ROOM", 8, 0, &mut rng).unwrap();
        assert!(room
            .doors
            .values()
            .all(|d| d.state() == DoorLockState::DoubleLocked));
    }

    #[test]
    fn test_force_traversable_unlocks_back_door() {
        let catalog = StaticCatalog::standard();
        let mut rng = StdRng::seed_from_u64(14);
        let mut room = generate_room(&catalog, 9, "HALLWAY", 8, 0, &mut rng).unwrap();
        room.force_traversable(Direction::South);
        assert!(room.door(Direction::South).unwrap().is_unlocked());
        assert!(!room.door(Direction::North).unwrap().is_unlocked());
    }

    #[test]
    fn test_force_traversable_turns_junction() {
        let mut room = junction_with_pair(Direction::North, Direction::East);
        room.force_traversable(Direction::West);
        assert!(room.is_passable(Direction::West));
        assert!(room.door(Direction::West).unwrap().is_unlocked());
    }
}
