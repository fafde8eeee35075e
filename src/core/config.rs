//! Manor run configuration.

use super::constants::*;
use crate::error::ManorError;
use crate::geometry::Direction;
use serde::{Deserialize, Serialize};

/// Grid dimensions, used for neighbour and edge checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    pub rows: usize,
    pub cols: usize,
}

impl GridBounds {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// The cell next to (row, col) in `direction`, or None past the edge.
    pub fn neighbor(&self, row: usize, col: usize, direction: Direction) -> Option<(usize, usize)> {
        let (dr, dc) = direction.delta();
        let new_row = row as i64 + dr as i64;
        let new_col = col as i64 + dc as i64;
        if new_row < 0 || new_col < 0 {
            return None;
        }
        let (new_row, new_col) = (new_row as usize, new_col as usize);
        self.contains(new_row, new_col).then_some((new_row, new_col))
    }

    /// Whether an opening facing `direction` at (row, col) leads somewhere.
    pub fn opening_allowed(&self, row: usize, col: usize, direction: Direction) -> bool {
        self.neighbor(row, col, direction).is_some()
    }
}

/// Resources the player starts a run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartingResources {
    pub steps: u32,
    pub gems: u32,
    pub coins: u32,
    pub keys: u32,
    pub dice: u32,
}

impl Default for StartingResources {
    fn default() -> Self {
        Self {
            steps: STARTING_STEPS,
            gems: STARTING_GEMS,
            coins: STARTING_COINS,
            keys: STARTING_KEYS,
            dice: STARTING_DICE,
        }
    }
}

/// Configuration for one manor run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManorConfig {
    /// Grid height (number of rows). Row 0 is the far (goal) edge.
    pub rows: usize,
    /// Grid width (number of columns).
    pub cols: usize,
    /// Cell holding the start room, (row, col).
    pub start: (usize, usize),
    /// Cell whose entry wins the run, (row, col).
    pub goal: (usize, usize),
    /// Catalog key placed at the start cell.
    pub start_room: String,
    /// Catalog key placed at the goal cell.
    pub goal_room: String,
    pub resources: StartingResources,
}

impl Default for ManorConfig {
    fn default() -> Self {
        Self {
            rows: MANOR_ROWS,
            cols: MANOR_COLS,
            start: START_CELL,
            goal: GOAL_CELL,
            start_room: START_ROOM_KEY.to_string(),
            goal_room: GOAL_ROOM_KEY.to_string(),
            resources: StartingResources::default(),
        }
    }
}

impl ManorConfig {
    /// A smaller manor with the start at the bottom centre and the goal
    /// at the top centre.
    pub fn small(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            start: (rows.saturating_sub(1), cols / 2),
            goal: (0, cols / 2),
            ..Default::default()
        }
    }

    pub fn bounds(&self) -> GridBounds {
        GridBounds::new(self.rows, self.cols)
    }

    /// Exploration depth of a grid row: distance from the start row.
    pub fn depth_of(&self, row: usize) -> usize {
        row.abs_diff(self.start.0)
    }

    /// Catalog keys that are never offered in a draft.
    pub fn reserved_keys(&self) -> Vec<String> {
        vec![self.start_room.clone(), self.goal_room.clone()]
    }

    pub fn validate(&self) -> Result<(), ManorError> {
        if self.rows < 2 || self.cols == 0 {
            return Err(ManorError::InvalidConfig(format!(
                "grid must be at least 2x1, got {}x{}",
                self.rows, self.cols
            )));
        }
        let bounds = self.bounds();
        if !bounds.contains(self.start.0, self.start.1) {
            return Err(ManorError::InvalidConfig(format!(
                "start cell {:?} is outside the grid",
                self.start
            )));
        }
        if !bounds.contains(self.goal.0, self.goal.1) {
            return Err(ManorError::InvalidConfig(format!(
                "goal cell {:?} is outside the grid",
                self.goal
            )));
        }
        if self.start == self.goal {
            return Err(ManorError::InvalidConfig(
                "start and goal share a cell".to_string(),
            ));
        }
        if self.resources.steps == 0 {
            return Err(ManorError::InvalidConfig(
                "a run needs at least one step".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ManorConfig::default();
        assert_eq!((config.rows, config.cols), (9, 5));
        assert_eq!(config.start, (8, 2));
        assert_eq!(config.goal, (0, 2));
        assert_eq!(config.resources.steps, 70);
        assert_eq!(config.resources.gems, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_depth_counts_from_start_row() {
        let config = ManorConfig::default();
        assert_eq!(config.depth_of(8), 0);
        assert_eq!(config.depth_of(7), 1);
        assert_eq!(config.depth_of(0), 8);
    }

    #[test]
    fn test_neighbor_at_edges() {
        let bounds = GridBounds::new(9, 5);
        assert_eq!(bounds.neighbor(0, 2, Direction::North), None);
        assert_eq!(bounds.neighbor(8, 2, Direction::South), None);
        assert_eq!(bounds.neighbor(4, 0, Direction::West), None);
        assert_eq!(bounds.neighbor(4, 4, Direction::East), None);
        assert_eq!(bounds.neighbor(4, 2, Direction::North), Some((3, 2)));
        assert_eq!(bounds.neighbor(4, 2, Direction::East), Some((4, 3)));
    }

    #[test]
    fn test_validate_rejects_bad_cells() {
        let mut config = ManorConfig::default();
        config.goal = config.start;
        assert!(matches!(config.validate(), Err(ManorError::InvalidConfig(_))));

        let mut config = ManorConfig::default();
        config.start = (9, 0);
        assert!(config.validate().is_err());

        assert!(ManorConfig::small(1, 3).validate().is_err());
        assert!(ManorConfig::small(3, 3).validate().is_ok());
    }
}
