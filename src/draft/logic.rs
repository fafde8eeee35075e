//! Candidate search, option drawing and reroll.

use super::types::{DraftOption, DraftRequest, DraftState};
use crate::core::constants::DRAFT_OPTION_COUNT;
use crate::core::GridBounds;
use crate::doors::level_by_row;
use crate::error::ManorError;
use crate::geometry::{Direction, ROTATIONS};
use crate::player::{PlayerResources, Resource, ResourceEffect};
use crate::rooms::{openings, RoomCatalog, RoomShape, RoomTag};
use rand::seq::SliceRandom;
use rand::Rng;

/// Whether `shape` at `rotation` can sit at (row, col): it must open
/// towards `required` and no opening may face off the grid.
pub fn fits_cell(
    shape: RoomShape,
    rotation: u16,
    row: usize,
    col: usize,
    required: Direction,
    bounds: GridBounds,
) -> bool {
    let dirs = openings(shape, rotation);
    dirs.contains(&required)
        && dirs
            .iter()
            .all(|dir| bounds.opening_allowed(row, col, *dir))
}

/// Every (spec, rotation) pair that can legally be placed at (row, col)
/// when entered moving `entry`. Rotations are tried in [`ROTATIONS`]
/// order and the first that fits is kept.
pub fn draft_candidates<C: RoomCatalog>(
    row: usize,
    col: usize,
    entry: Direction,
    bounds: GridBounds,
    catalog: &C,
    exclude_keys: &[String],
) -> Vec<DraftOption> {
    let required = entry.opposite();
    catalog
        .specs()
        .iter()
        .filter(|spec| !exclude_keys.iter().any(|k| *k == spec.key))
        .filter_map(|spec| {
            ROTATIONS
                .iter()
                .copied()
                .find(|rotation| fits_cell(spec.shape, *rotation, row, col, required, bounds))
                .map(|rotation| DraftOption {
                    spec: spec.clone(),
                    rotation,
                })
        })
        .collect()
}

/// Candidates for a request.
pub fn candidates_for<C: RoomCatalog>(request: &DraftRequest, catalog: &C) -> Vec<DraftOption> {
    draft_candidates(
        request.row,
        request.col,
        request.entry,
        request.bounds,
        catalog,
        &request.exclude_keys,
    )
}

/// Draws the options shown to the player.
///
/// With at least three candidates, three distinct ones are drawn. Each slot
/// rolls a rarity for the cell's depth and prefers candidates whose tier
/// fits it; the first slot prefers hallways when the request asks for it.
/// Smaller pools are drawn with replacement, and an empty pool yields no
/// options.
pub fn draw_options<R: Rng>(
    pool: &[DraftOption],
    request: &DraftRequest,
    rng: &mut R,
) -> Vec<DraftOption> {
    if pool.is_empty() {
        return Vec::new();
    }
    if pool.len() < DRAFT_OPTION_COUNT {
        return (0..DRAFT_OPTION_COUNT)
            .filter_map(|_| pool.choose(rng).cloned())
            .collect();
    }

    let mut remaining: Vec<&DraftOption> = pool.iter().collect();
    let mut picked = Vec::with_capacity(DRAFT_OPTION_COUNT);
    for slot in 0..DRAFT_OPTION_COUNT {
        let hallways: Vec<usize> = if slot == 0 && request.favor_hallways {
            indices_where(&remaining, |o| o.spec.has_tag(RoomTag::Hallway))
        } else {
            Vec::new()
        };
        let slot_pool = if hallways.is_empty() {
            let rarity = level_by_row(request.depth, request.total_rows, rng);
            let fitting = indices_where(&remaining, |o| o.spec.tier.fits(rarity));
            if fitting.is_empty() {
                (0..remaining.len()).collect()
            } else {
                fitting
            }
        } else {
            hallways
        };

        let Some(&index) = slot_pool.choose(rng) else {
            break;
        };
        picked.push(remaining.remove(index).clone());
    }
    picked
}

fn indices_where(options: &[&DraftOption], pred: impl Fn(&DraftOption) -> bool) -> Vec<usize> {
    options
        .iter()
        .enumerate()
        .filter(|(_, o)| pred(o))
        .map(|(i, _)| i)
        .collect()
}

/// Spends one die to redraw the options from the same inputs.
///
/// Without a die the current options come back unchanged with `false`.
pub fn reroll_draft<C: RoomCatalog, R: Rng>(
    request: &DraftRequest,
    catalog: &C,
    current: &[DraftOption],
    player: &mut PlayerResources,
    rng: &mut R,
) -> (Vec<DraftOption>, bool) {
    if player
        .apply(ResourceEffect::Spend(Resource::Dice, 1))
        .is_err()
    {
        return (current.to_vec(), false);
    }
    let pool = candidates_for(request, catalog);
    (draw_options(&pool, request, rng), true)
}

impl DraftState {
    /// Computes the candidate pool for `request` and draws the first options.
    pub fn open<C: RoomCatalog, R: Rng>(request: DraftRequest, catalog: &C, rng: &mut R) -> Self {
        let pool = candidates_for(&request, catalog);
        let options = draw_options(&pool, &request, rng);
        tracing::debug!(
            row = request.row,
            col = request.col,
            pool = pool.len(),
            "draft opened"
        );
        Self {
            request,
            options,
            pool_size: pool.len(),
            rerolls: 0,
        }
    }

    pub fn option(&self, index: usize) -> Result<&DraftOption, ManorError> {
        self.options
            .get(index)
            .ok_or(ManorError::InvalidChoice(index))
    }

    /// Rerolls in place. Fails with [`ManorError::NoRerolls`] when the
    /// player has no die.
    pub fn reroll<C: RoomCatalog, R: Rng>(
        &mut self,
        catalog: &C,
        player: &mut PlayerResources,
        rng: &mut R,
    ) -> Result<(), ManorError> {
        let (options, consumed) = reroll_draft(&self.request, catalog, &self.options, player, rng);
        if !consumed {
            return Err(ManorError::NoRerolls);
        }
        self.options = options;
        self.rerolls += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StartingResources;
    use crate::rooms::{RoomSpec, RoomTier, StaticCatalog};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn request(row: usize, col: usize, entry: Direction) -> DraftRequest {
        DraftRequest {
            row,
            col,
            entry,
            depth: 8 - row,
            bounds: GridBounds::new(9, 5),
            total_rows: 9,
            exclude_keys: vec!["ENTRANCE_HALL".into(), "ANTECHAMBER".into()],
            favor_hallways: false,
        }
    }

    #[test]
    fn test_fits_cell() {
        let bounds = GridBounds::new(9, 5);
        // A straight room in the top row cannot face North
        assert!(!fits_cell(RoomShape::Straight, 0, 0, 2, Direction::South, bounds));
        assert!(fits_cell(RoomShape::DeadEnd, 0, 0, 2, Direction::South, bounds));
        assert!(fits_cell(RoomShape::Straight, 0, 4, 2, Direction::South, bounds));
        assert!(!fits_cell(RoomShape::LShape, 0, 4, 2, Direction::South, bounds));
    }

    #[test]
    fn test_candidates_expose_back_opening() {
        let catalog = StaticCatalog::standard();
        let req = request(7, 2, Direction::North);
        let pool = candidates_for(&req, &catalog);
        assert!(!pool.is_empty());
        for option in &pool {
            assert!(
                option.openings().contains(&Direction::South),
                "{} at {} has no South opening",
                option.key(),
                option.rotation
            );
        }
    }

    #[test]
    fn test_candidates_exclude_reserved_and_special() {
        let catalog = StaticCatalog::standard();
        let pool = candidates_for(&request(4, 2, Direction::North), &catalog);
        assert!(pool.iter().all(|o| o.key() != "ENTRANCE_HALL"));
        assert!(pool.iter().all(|o| o.key() != "ANTECHAMBER"));
        assert!(pool.iter().all(|o| o.spec.shape != RoomShape::Special));
    }

    #[test]
    fn test_first_fitting_rotation_is_kept() {
        let catalog = StaticCatalog::standard();
        let pool = candidates_for(&request(4, 2, Direction::North), &catalog);
        let hallway = pool.iter().find(|o| o.key() == "HALLWAY").unwrap();
        assert_eq!(hallway.rotation, 0);
        let dead_end = pool.iter().find(|o| o.key() == "CLOSET").unwrap();
        assert_eq!(dead_end.rotation, 0);

        // Entering westward needs an East opening
        let pool = candidates_for(&request(4, 2, Direction::West), &catalog);
        let dead_end = pool.iter().find(|o| o.key() == "CLOSET").unwrap();
        assert_eq!(dead_end.rotation, 270);
    }

    #[test]
    fn test_draw_three_distinct_from_large_pool() {
        let catalog = StaticCatalog::standard();
        let req = request(4, 2, Direction::North);
        let pool = candidates_for(&req, &catalog);
        assert!(pool.len() >= 3);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let options = draw_options(&pool, &req, &mut rng);
            assert_eq!(options.len(), 3);
            assert_ne!(options[0].key(), options[1].key());
            assert_ne!(options[1].key(), options[2].key());
            assert_ne!(options[0].key(), options[2].key());
        }
    }

    #[test]
    fn test_small_pool_draws_with_replacement() {
        let spec = RoomSpec::new("ONLY", "Only", RoomShape::DeadEnd, RoomTier::Commonplace, 0);
        let catalog = StaticCatalog::from_specs(vec![spec]);
        let req = request(4, 2, Direction::North);
        let pool = candidates_for(&req, &catalog);
        assert_eq!(pool.len(), 1);

        let mut rng = StdRng::seed_from_u64(1);
        let options = draw_options(&pool, &req, &mut rng);
        assert_eq!(options.len(), 3);
        assert!(options.iter().all(|o| o.key() == "ONLY"));
    }

    #[test]
    fn test_empty_pool_draws_nothing() {
        let catalog = StaticCatalog::from_specs(vec![]);
        let req = request(4, 2, Direction::North);
        let mut rng = StdRng::seed_from_u64(1);
        let state = DraftState::open(req, &catalog, &mut rng);
        assert_eq!(state.pool_size, 0);
        assert!(state.options.is_empty());
    }

    #[test]
    fn test_hallway_preference_fills_first_slot() {
        let catalog = StaticCatalog::standard();
        let mut req = request(4, 2, Direction::North);
        req.favor_hallways = true;
        let pool = candidates_for(&req, &catalog);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let options = draw_options(&pool, &req, &mut rng);
            assert!(options[0].spec.has_tag(RoomTag::Hallway));
        }
    }

    #[test]
    fn test_reroll_spends_a_die() {
        let catalog = StaticCatalog::standard();
        let req = request(4, 2, Direction::North);
        let mut rng = StdRng::seed_from_u64(8);
        let mut player = PlayerResources::new((5, 2), &StartingResources::default());

        let current = draw_options(&candidates_for(&req, &catalog), &req, &mut rng);
        let (same, consumed) = reroll_draft(&req, &catalog, &current, &mut player, &mut rng);
        assert!(!consumed);
        assert_eq!(same, current);

        player.apply(ResourceEffect::Gain(Resource::Dice, 1)).unwrap();
        let (fresh, consumed) = reroll_draft(&req, &catalog, &current, &mut player, &mut rng);
        assert!(consumed);
        assert_eq!(fresh.len(), 3);
        assert_eq!(player.dice(), 0);
    }

    #[test]
    fn test_state_reroll_without_die() {
        let catalog = StaticCatalog::standard();
        let mut rng = StdRng::seed_from_u64(8);
        let mut player = PlayerResources::new((5, 2), &StartingResources::default());
        let mut state = DraftState::open(request(4, 2, Direction::North), &catalog, &mut rng);
        let before = state.clone();
        assert_eq!(
            state.reroll(&catalog, &mut player, &mut rng),
            Err(ManorError::NoRerolls)
        );
        assert_eq!(state, before);
        assert_eq!(state.option(3), Err(ManorError::InvalidChoice(3)));
    }
}
