//! Auto-play runner.
//!
//! Plays whole runs through [`ManorGame::handle`] with a simple policy, so
//! results follow the real rules. Statistics are tracked from the emitted
//! [`GameEvent`]s.

use super::config::SimConfig;
use super::report::SimReport;
use crate::doors::UnlockMethod;
use crate::error::ManorError;
use crate::game::{GameEvent, GamePhase, Intent, ManorGame};
use crate::geometry::Direction;
use crate::interact::{perform, InteractAction};
use crate::player::{Resource, ResourceEffect};
use crate::rooms::RoomCatalog;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunOutcome {
    Won,
    OutOfSteps,
    /// No move, draft or junction turn was possible.
    Stuck,
    TimedOut,
}

/// Statistics for one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub outcome: RunOutcome,
    pub actions: u32,
    pub steps_left: u32,
    pub rooms_placed: usize,
    /// Deepest row distance from the start row the player stood in.
    pub max_depth: usize,
    pub doors_unlocked: u32,
    pub keys_spent_on_doors: u32,
    pub gems_spent: u32,
    pub rerolls: u32,
    pub drafts_offered: u32,
    pub drafts_cancelled: u32,
    pub drafts_unavailable: u32,
    pub pool_sizes: Vec<usize>,
    pub interactions: u32,
    pub rejections: u32,
}

/// Run the full batch and return a report.
pub fn run_simulation(config: &SimConfig) -> Result<SimReport, ManorError> {
    config.manor.validate()?;
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed + run_idx as u64),
            None => ChaCha8Rng::from_entropy(),
        };

        let stats = simulate_single_run(config, &mut rng)?;
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - {:?}, steps left {}, rooms {}, depth {}, rerolls {}",
                run_idx + 1,
                config.num_runs,
                stats.outcome,
                stats.steps_left,
                stats.rooms_placed,
                stats.max_depth,
                stats.rerolls
            );
        }
        all_runs.push(stats);
    }

    Ok(SimReport::from_runs(all_runs))
}

/// Plays one run in the built-in catalog.
pub fn simulate_single_run<R: Rng>(config: &SimConfig, rng: &mut R) -> Result<RunStats, ManorError> {
    let mut game = ManorGame::new(config.manor.clone(), rng)?;
    Ok(play(&mut game, config, rng))
}

/// Tracks statistics during a run from the events it emits.
struct SimStats {
    actions: u32,
    max_depth: usize,
    doors_unlocked: u32,
    keys_spent_on_doors: u32,
    gems_spent: u32,
    rerolls: u32,
    drafts_offered: u32,
    drafts_cancelled: u32,
    drafts_unavailable: u32,
    pool_sizes: Vec<usize>,
    interactions: u32,
    rejections: u32,
}

impl SimStats {
    fn new() -> Self {
        Self {
            actions: 0,
            max_depth: 0,
            doors_unlocked: 0,
            keys_spent_on_doors: 0,
            gems_spent: 0,
            rerolls: 0,
            drafts_offered: 0,
            drafts_cancelled: 0,
            drafts_unavailable: 0,
            pool_sizes: Vec::new(),
            interactions: 0,
            rejections: 0,
        }
    }

    fn process_events<C: RoomCatalog>(
        &mut self,
        intent: Intent,
        events: &[GameEvent],
        game: &ManorGame<C>,
    ) {
        if matches!(intent, Intent::Act(_)) {
            self.interactions += 1;
        }
        for event in events {
            match event {
                GameEvent::DoorOpened { method, .. } => {
                    self.doors_unlocked += 1;
                    if *method == UnlockMethod::Key {
                        self.keys_spent_on_doors += 1;
                    }
                }
                GameEvent::DraftOffered { .. } => {
                    self.drafts_offered += 1;
                    if let Some(draft) = game.draft() {
                        self.pool_sizes.push(draft.pool_size);
                    }
                }
                GameEvent::DraftUnavailable { .. } => {
                    self.drafts_unavailable += 1;
                    self.pool_sizes.push(0);
                }
                GameEvent::DraftRerolled => self.rerolls += 1,
                GameEvent::DraftCancelled => self.drafts_cancelled += 1,
                GameEvent::ResourceChanged(ResourceEffect::Spend(Resource::Gems, n)) => {
                    self.gems_spent += n;
                }
                _ => {}
            }
        }
        let (row, _) = game.player().position();
        self.max_depth = self.max_depth.max(game.config().depth_of(row));
    }

    fn finish<C: RoomCatalog>(self, outcome: RunOutcome, game: &ManorGame<C>) -> RunStats {
        RunStats {
            outcome,
            actions: self.actions,
            steps_left: game.player().steps(),
            rooms_placed: game.rooms_placed(),
            max_depth: self.max_depth,
            doors_unlocked: self.doors_unlocked,
            keys_spent_on_doors: self.keys_spent_on_doors,
            gems_spent: self.gems_spent,
            rerolls: self.rerolls,
            drafts_offered: self.drafts_offered,
            drafts_cancelled: self.drafts_cancelled,
            drafts_unavailable: self.drafts_unavailable,
            pool_sizes: self.pool_sizes,
            interactions: self.interactions,
            rejections: self.rejections,
        }
    }
}

/// Auto-plays `game` until it ends, gets stuck or hits the action limit.
pub fn play<C: RoomCatalog, R: Rng>(
    game: &mut ManorGame<C>,
    config: &SimConfig,
    rng: &mut R,
) -> RunStats {
    let mut stats = SimStats::new();

    while stats.actions < config.max_actions_per_run {
        let intent = match game.phase() {
            GamePhase::Win => return stats.finish(RunOutcome::Won, game),
            GamePhase::GameOver => return stats.finish(RunOutcome::OutOfSteps, game),
            GamePhase::Menu => Some(Intent::Start),
            GamePhase::Draft => Some(choose_draft(game, config)),
            GamePhase::Interact => Some(choose_interact(game)),
            GamePhase::Playing => choose_playing(game, config, rng),
        };
        let Some(intent) = intent else {
            return stats.finish(RunOutcome::Stuck, game);
        };

        stats.actions += 1;
        match game.handle(intent, rng) {
            Ok(events) => stats.process_events(intent, &events, game),
            Err(err) => {
                tracing::debug!(%err, ?intent, "simulated intent rejected");
                stats.rejections += 1;
            }
        }
    }

    let outcome = match game.phase() {
        GamePhase::Win => RunOutcome::Won,
        GamePhase::GameOver => RunOutcome::OutOfSteps,
        _ => RunOutcome::TimedOut,
    };
    stats.finish(outcome, game)
}

/// Picks the affordable option with the most openings, else rerolls or
/// walks away.
fn choose_draft<C: RoomCatalog>(game: &ManorGame<C>, config: &SimConfig) -> Intent {
    let Some(draft) = game.draft() else {
        return Intent::Cancel;
    };
    let gems = game.player().gems();
    let best = draft
        .options
        .iter()
        .enumerate()
        .filter(|(_, option)| option.cost() <= gems)
        .max_by_key(|(i, option)| (option.openings().len(), std::cmp::Reverse(*i)))
        .map(|(i, _)| i);

    match best {
        Some(index) => Intent::Select(index),
        None if config.use_rerolls && game.player().dice() > 0 => Intent::Reroll,
        None => Intent::Cancel,
    }
}

/// Index of the first interact action that would succeed right now.
/// Junction turns are left to the movement logic.
fn choose_action<C: RoomCatalog>(game: &ManorGame<C>) -> Option<usize> {
    let room = game.current_room()?;
    game.available_actions()
        .iter()
        .position(|action| {
            *action != InteractAction::RotateJunction
                && perform(&mut room.clone(), &mut game.player().clone(), *action).is_ok()
        })
}

/// Uses the first feasible object or shop action, else turns the junction
/// if the room has one.
fn choose_interact<C: RoomCatalog>(game: &ManorGame<C>) -> Intent {
    if let Some(index) = choose_action(game) {
        return Intent::Act(index);
    }
    game.available_actions()
        .iter()
        .position(|action| *action == InteractAction::RotateJunction)
        .map_or(Intent::Cancel, Intent::Act)
}

fn choose_playing<C: RoomCatalog, R: Rng>(
    game: &ManorGame<C>,
    config: &SimConfig,
    rng: &mut R,
) -> Option<Intent> {
    if config.collect_objects && choose_action(game).is_some() {
        return Some(Intent::Interact);
    }

    let room = game.current_room()?;
    let (row, col) = game.player().position();
    let bounds = game.config().bounds();
    let best = game
        .legal_moves()
        .into_iter()
        .filter(|dir| {
            room.door(*dir)
                .is_some_and(|door| door.unlock_method(game.player()).is_some())
        })
        .filter_map(|dir| {
            let (r, c) = bounds.neighbor(row, col, dir)?;
            let mut score = rng.gen::<f64>();
            if !game.is_explored(r, c) || (r, c) == game.config().goal {
                score += 2.0;
            }
            if dir == Direction::North {
                score += 1.0;
            }
            Some((dir, score))
        })
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(dir, _)| dir);

    match best {
        Some(dir) => Some(Intent::Move(dir)),
        None if room.active_pair().is_some() => game
            .available_actions()
            .iter()
            .any(|a| *a == InteractAction::RotateJunction)
            .then_some(Intent::Interact),
        None => None,
    }
}
