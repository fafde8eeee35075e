//! Shape-to-openings mapping under rotation.

use super::types::RoomShape;
use crate::geometry::{rotate, Direction};

/// Openings of an unrotated shape.
pub fn canonical_openings(shape: RoomShape) -> &'static [Direction] {
    match shape {
        RoomShape::FourWay => &[
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ],
        RoomShape::TShape => &[Direction::North, Direction::East, Direction::West],
        RoomShape::LShape => &[Direction::North, Direction::East],
        RoomShape::Straight => &[Direction::North, Direction::South],
        RoomShape::DeadEnd => &[Direction::South],
        RoomShape::Special => &[],
    }
}

/// Openings of `shape` after a clockwise rotation of `rotation` degrees,
/// sorted clockwise from North.
pub fn openings(shape: RoomShape, rotation: u16) -> Vec<Direction> {
    let mut dirs: Vec<Direction> = canonical_openings(shape)
        .iter()
        .map(|dir| rotate(*dir, rotation))
        .collect();
    dirs.sort();
    dirs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{next_rotation, ROTATIONS};

    const SHAPES: [RoomShape; 6] = [
        RoomShape::FourWay,
        RoomShape::TShape,
        RoomShape::LShape,
        RoomShape::Straight,
        RoomShape::DeadEnd,
        RoomShape::Special,
    ];

    #[test]
    fn test_canonical_sets() {
        assert_eq!(openings(RoomShape::FourWay, 0).len(), 4);
        assert_eq!(
            openings(RoomShape::TShape, 0),
            vec![Direction::North, Direction::East, Direction::West]
        );
        assert_eq!(openings(RoomShape::DeadEnd, 0), vec![Direction::South]);
        assert!(openings(RoomShape::Special, 90).is_empty());
    }

    #[test]
    fn test_rotated_sets() {
        assert_eq!(
            openings(RoomShape::LShape, 90),
            vec![Direction::East, Direction::South]
        );
        assert_eq!(
            openings(RoomShape::Straight, 90),
            vec![Direction::East, Direction::West]
        );
        assert_eq!(openings(RoomShape::DeadEnd, 180), vec![Direction::North]);
        assert_eq!(
            openings(RoomShape::TShape, 180),
            vec![Direction::East, Direction::South, Direction::West]
        );
    }

    #[test]
    fn test_four_quarter_turns_return_home() {
        for shape in SHAPES {
            for start in ROTATIONS {
                let mut rotation = start;
                for _ in 0..4 {
                    rotation = next_rotation(rotation);
                }
                assert_eq!(openings(shape, rotation), openings(shape, start));
            }
        }
    }

    #[test]
    fn test_full_turn_is_identity() {
        for shape in SHAPES {
            assert_eq!(openings(shape, 360), openings(shape, 0));
        }
    }

    #[test]
    fn test_rotation_keeps_openings_unique() {
        for shape in SHAPES {
            for rotation in ROTATIONS {
                let dirs = openings(shape, rotation);
                let mut deduped = dirs.clone();
                deduped.dedup();
                assert_eq!(dirs, deduped, "{:?} at {} repeats a direction", shape, rotation);
                assert_eq!(dirs.len(), canonical_openings(shape).len());
            }
        }
    }
}
