//! The exploration state machine.

use super::types::{GameEvent, GamePhase, Intent};
use crate::core::ManorConfig;
use crate::doors::UnlockMethod;
use crate::draft::{DraftRequest, DraftState};
use crate::error::ManorError;
use crate::geometry::Direction;
use crate::interact::{available_actions, perform, InteractAction, InteractOutcome};
use crate::player::{PlayerResources, Resource, ResourceEffect};
use crate::rooms::{apply_entry_logic, Room, RoomCatalog, RoomFactory, StaticCatalog};
use rand::Rng;

/// One run through the manor.
///
/// Owns the grid, the player and the current phase. All input goes through
/// [`ManorGame::handle`]; a rejected intent leaves everything as it was.
#[derive(Debug, Clone)]
pub struct ManorGame<C: RoomCatalog = StaticCatalog> {
    config: ManorConfig,
    catalog: C,
    grid: Vec<Vec<Option<Room>>>,
    player: PlayerResources,
    phase: GamePhase,
    draft: Option<DraftState>,
    last_message: Option<String>,
}

impl ManorGame<StaticCatalog> {
    /// A run over the built-in room table.
    pub fn new<R: Rng>(config: ManorConfig, rng: &mut R) -> Result<Self, ManorError> {
        Self::with_catalog(config, StaticCatalog::standard(), rng)
    }
}

impl<C: RoomCatalog> ManorGame<C> {
    /// Validates the config and places the start and goal rooms.
    pub fn with_catalog<R: Rng>(
        config: ManorConfig,
        catalog: C,
        rng: &mut R,
    ) -> Result<Self, ManorError> {
        config.validate()?;

        let mut grid: Vec<Vec<Option<Room>>> = vec![vec![None; config.cols]; config.rows];
        let factory = RoomFactory::new(&catalog, config.rows);
        let (start_row, start_col) = config.start;
        let (goal_row, goal_col) = config.goal;
        let start = factory.generate(&config.start_room, config.depth_of(start_row), 0, rng)?;
        let goal = factory.generate(&config.goal_room, config.depth_of(goal_row), 0, rng)?;
        grid[start_row][start_col] = Some(start);
        grid[goal_row][goal_col] = Some(goal);

        let player = PlayerResources::new(config.start, &config.resources);
        Ok(Self {
            config,
            catalog,
            grid,
            player,
            phase: GamePhase::Menu,
            draft: None,
            last_message: None,
        })
    }

    pub fn config(&self) -> &ManorConfig {
        &self.config
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn player(&self) -> &PlayerResources {
        &self.player
    }

    pub fn draft(&self) -> Option<&DraftState> {
        self.draft.as_ref()
    }

    /// Text of the last event or rejection.
    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    pub fn room_at(&self, row: usize, col: usize) -> Option<&Room> {
        self.grid.get(row)?.get(col)?.as_ref()
    }

    pub fn current_room(&self) -> Option<&Room> {
        let (row, col) = self.player.position();
        self.room_at(row, col)
    }

    /// Placed rooms with their cells, row by row.
    pub fn rooms(&self) -> impl Iterator<Item = ((usize, usize), &Room)> + '_ {
        self.grid.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(col, cell)| cell.as_ref().map(|room| ((row, col), room)))
        })
    }

    pub fn rooms_placed(&self) -> usize {
        self.rooms().count()
    }

    pub fn is_explored(&self, row: usize, col: usize) -> bool {
        self.room_at(row, col).is_some()
    }

    /// Directions the player could try to move in: inside the grid, through
    /// a crossable opening, and not into the wall of an explored room.
    /// Lock state is not considered.
    pub fn legal_moves(&self) -> Vec<Direction> {
        let (row, col) = self.player.position();
        let Some(room) = self.room_at(row, col) else {
            return Vec::new();
        };
        let bounds = self.config.bounds();
        Direction::CLOCKWISE
            .iter()
            .copied()
            .filter(|dir| room.is_passable(*dir))
            .filter(|dir| match bounds.neighbor(row, col, *dir) {
                Some((r, c)) => self
                    .room_at(r, c)
                    .map_or(true, |dest| {
                        dest.door(dir.opposite()).is_some() && dest.is_passable(dir.opposite())
                    }),
                None => false,
            })
            .collect()
    }

    /// Interact actions the current room offers.
    pub fn available_actions(&self) -> Vec<InteractAction> {
        self.current_room().map(available_actions).unwrap_or_default()
    }

    /// Handles one intent. On error nothing changes except the last message.
    pub fn handle<R: Rng>(
        &mut self,
        intent: Intent,
        rng: &mut R,
    ) -> Result<Vec<GameEvent>, ManorError> {
        let result = self.dispatch(intent, rng);
        match &result {
            Ok(events) => {
                if let Some(event) = events.last() {
                    self.last_message = Some(event.message());
                }
            }
            Err(err) => {
                if err.is_illegal_request() {
                    tracing::debug!(?intent, %err, "intent rejected");
                } else {
                    tracing::warn!(?intent, %err, "intent failed");
                }
                self.last_message = Some(err.to_string());
            }
        }
        result
    }

    fn dispatch<R: Rng>(
        &mut self,
        intent: Intent,
        rng: &mut R,
    ) -> Result<Vec<GameEvent>, ManorError> {
        if self.phase.is_terminal() {
            return Err(ManorError::RunOver);
        }
        match (self.phase, intent) {
            (GamePhase::Menu, Intent::Start) => {
                self.phase = GamePhase::Playing;
                tracing::info!(
                    rows = self.config.rows,
                    cols = self.config.cols,
                    steps = self.player.steps(),
                    "run started"
                );
                Ok(vec![GameEvent::RunStarted])
            }
            (GamePhase::Playing, Intent::Move(direction)) => self.move_player(direction, rng),
            (GamePhase::Playing, Intent::Interact) => self.open_interact(),
            (GamePhase::Draft, Intent::Select(index)) => self.select_option(index, rng),
            (GamePhase::Draft, Intent::Reroll) => self.reroll(rng),
            (GamePhase::Draft, Intent::Cancel) => {
                self.draft = None;
                self.phase = GamePhase::Playing;
                Ok(vec![GameEvent::DraftCancelled])
            }
            (GamePhase::Interact, Intent::Act(index)) => self.act(index),
            (GamePhase::Interact, Intent::Cancel) => {
                self.phase = GamePhase::Playing;
                Ok(vec![GameEvent::InteractClosed])
            }
            (phase, _) => Err(ManorError::NotAllowed(phase)),
        }
    }

    fn move_player<R: Rng>(
        &mut self,
        direction: Direction,
        rng: &mut R,
    ) -> Result<Vec<GameEvent>, ManorError> {
        let (row, col) = self.player.position();
        let target = self
            .config
            .bounds()
            .neighbor(row, col, direction)
            .ok_or(ManorError::OutOfBounds(direction))?;

        let current = self
            .room_at(row, col)
            .ok_or(ManorError::NoDoor(direction))?;
        if current.door(direction).is_none() {
            return Err(ManorError::NoDoor(direction));
        }
        if !current.is_passable(direction) {
            return Err(ManorError::InactiveOpening(direction));
        }
        if let Some(dest) = self.room_at(target.0, target.1) {
            if dest.door(direction.opposite()).is_none() {
                return Err(ManorError::NoDoor(direction));
            }
            if !dest.is_passable(direction.opposite()) {
                return Err(ManorError::InactiveOpening(direction));
            }
        }

        let door = self.grid[row][col]
            .as_mut()
            .and_then(|room| room.door_mut(direction))
            .ok_or(ManorError::NoDoor(direction))?;
        let Some(method) = door.try_open(&mut self.player) else {
            return Err(ManorError::DoorLocked {
                direction,
                state: door.state(),
            });
        };

        let mut events = Vec::new();
        if method != UnlockMethod::AlreadyOpen {
            events.push(GameEvent::DoorOpened { direction, method });
        }

        self.player.spend_step()?;
        events.push(GameEvent::StepSpent {
            steps_left: self.player.steps(),
        });

        if !self.player.can_move() {
            self.end_run(GamePhase::GameOver, &mut events);
            return Ok(events);
        }
        if target == self.config.goal {
            self.player.row = target.0;
            self.player.col = target.1;
            self.end_run(GamePhase::Win, &mut events);
            return Ok(events);
        }

        if self.is_explored(target.0, target.1) {
            self.enter_room(target, rng, &mut events)?;
        } else {
            self.open_draft(target, direction, rng, &mut events);
        }
        Ok(events)
    }

    fn open_draft<R: Rng>(
        &mut self,
        target: (usize, usize),
        direction: Direction,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        let (row, col) = target;
        let request = DraftRequest {
            row,
            col,
            entry: direction,
            depth: self.config.depth_of(row),
            bounds: self.config.bounds(),
            total_rows: self.config.rows,
            exclude_keys: self.config.reserved_keys(),
            favor_hallways: self.rooms().any(|(_, room)| room.favors_hallways()),
        };
        let draft = DraftState::open(request, &self.catalog, rng);

        if draft.options.is_empty() {
            tracing::warn!(row, col, ?direction, "no room fits this cell");
            events.push(GameEvent::DraftUnavailable { row, col });
            return;
        }

        events.push(GameEvent::DraftOffered {
            row,
            col,
            options: draft.options.len(),
        });
        self.draft = Some(draft);
        self.phase = GamePhase::Draft;
    }

    fn select_option<R: Rng>(
        &mut self,
        index: usize,
        rng: &mut R,
    ) -> Result<Vec<GameEvent>, ManorError> {
        let draft = self
            .draft
            .as_ref()
            .ok_or(ManorError::NotAllowed(self.phase))?;
        let option = draft.option(index)?.clone();
        let (row, col) = (draft.request.row, draft.request.col);
        let back = draft.request.required_opening();

        let cost = option.cost();
        if self.player.gems() < cost {
            return Err(ManorError::InsufficientGems {
                cost,
                available: self.player.gems(),
            });
        }

        let mut room = RoomFactory::new(&self.catalog, self.config.rows).generate(
            option.key(),
            self.config.depth_of(row),
            option.rotation,
            rng,
        )?;
        self.player.spend_gems(cost)?;
        room.force_traversable(back);

        let mut events = Vec::new();
        if cost > 0 {
            events.push(GameEvent::ResourceChanged(ResourceEffect::Spend(
                Resource::Gems,
                cost,
            )));
        }
        events.push(GameEvent::RoomPlaced {
            key: option.key().to_string(),
            row,
            col,
            rotation: option.rotation,
        });
        tracing::debug!(key = option.key(), row, col, cost, "room drafted");

        self.grid[row][col] = Some(room);
        self.draft = None;
        self.phase = GamePhase::Playing;
        self.enter_room((row, col), rng, &mut events)?;
        Ok(events)
    }

    fn reroll<R: Rng>(&mut self, rng: &mut R) -> Result<Vec<GameEvent>, ManorError> {
        let draft = self
            .draft
            .as_mut()
            .ok_or(ManorError::NotAllowed(self.phase))?;
        draft.reroll(&self.catalog, &mut self.player, rng)?;
        Ok(vec![
            GameEvent::ResourceChanged(ResourceEffect::Spend(Resource::Dice, 1)),
            GameEvent::DraftRerolled,
        ])
    }

    /// Moves the player into an explored room, reruns its entry logic and
    /// pays out anything not yet claimed.
    fn enter_room<R: Rng>(
        &mut self,
        target: (usize, usize),
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), ManorError> {
        let (row, col) = target;
        let Some(room) = self.grid[row][col].as_mut() else {
            return Ok(());
        };
        apply_entry_logic(room, rng);
        let payouts = room.claim_payouts();
        events.push(GameEvent::RoomEntered {
            key: room.key().to_string(),
            row,
            col,
        });

        self.player.row = row;
        self.player.col = col;
        self.player.apply_all(&payouts)?;
        events.extend(payouts.into_iter().map(GameEvent::ResourceChanged));

        if !self.player.can_move() {
            self.end_run(GamePhase::GameOver, events);
        }
        Ok(())
    }

    fn open_interact(&mut self) -> Result<Vec<GameEvent>, ManorError> {
        let actions = self.available_actions();
        if actions.is_empty() {
            return Err(ManorError::NothingToInteract);
        }
        self.phase = GamePhase::Interact;
        Ok(vec![GameEvent::InteractOpened {
            actions: actions.len(),
        }])
    }

    fn act(&mut self, index: usize) -> Result<Vec<GameEvent>, ManorError> {
        let (row, col) = self.player.position();
        let room = self.grid[row][col]
            .as_mut()
            .ok_or(ManorError::NothingToInteract)?;
        let action = available_actions(room)
            .get(index)
            .copied()
            .ok_or(ManorError::InvalidChoice(index))?;
        let outcome = perform(room, &mut self.player, action)?;
        self.phase = GamePhase::Playing;

        Ok(match outcome {
            InteractOutcome::Effects(effects) => effects
                .into_iter()
                .map(GameEvent::ResourceChanged)
                .collect(),
            InteractOutcome::Rotated(a, b) => vec![GameEvent::JunctionRotated(a, b)],
        })
    }

    fn end_run(&mut self, phase: GamePhase, events: &mut Vec<GameEvent>) {
        self.phase = phase;
        self.draft = None;
        let (row, col) = self.player.position();
        tracing::info!(
            outcome = phase.label(),
            row,
            col,
            steps = self.player.steps(),
            rooms = self.rooms_placed(),
            "run ended"
        );
        events.push(match phase {
            GamePhase::Win => GameEvent::Won,
            _ => GameEvent::GameOver,
        });
    }
}
