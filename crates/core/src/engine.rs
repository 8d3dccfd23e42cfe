//! Engine module - owns the grid, the active piece and the timing state
//!
//! The engine is a closed state machine. During play it is always `Playing`
//! with exactly one active piece; locking, line clearing and respawning all
//! happen synchronously inside [`Engine::gravity_step`]. A spawn or lock that
//! tops out moves it to `GameOver`, after which every operation is rejected
//! until [`Engine::reset`].
//!
//! # Timing
//!
//! [`Engine::frame`] is the fixed-timestep driver. Each frame applies at most
//! one of each input, then accumulates elapsed time and runs one gravity step
//! once the accumulator strictly exceeds the current drop interval. The
//! interval is re-read every frame from the soft-drop flag, so holding or
//! releasing soft drop takes effect immediately.

use crate::config::{ConfigError, EngineConfig};
use crate::grid::Grid;
use crate::piece::ActivePiece;
use crate::rng::SimpleRng;
use crate::snapshot::EngineSnapshot;
use crate::types::{GameAction, GameStatus, PieceKind, TopOut};

/// Inputs sampled for one frame. Each flag is applied at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameInput {
    pub move_left: bool,
    pub move_right: bool,
    pub rotate: bool,
    /// Level-triggered: true for as long as soft drop is held.
    pub soft_drop: bool,
}

/// Emitted each time a piece is committed to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    /// 1-based number of the locked piece within its session.
    pub piece: u32,
    pub lines_cleared: usize,
}

/// Result of one gravity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The piece moved down one row.
    Advanced,
    /// The piece locked, rows were cleared and a new piece spawned.
    Locked(LockEvent),
    /// The step ended the session.
    GameOver(TopOut),
    /// The session was already over; nothing happened.
    Rejected,
}

/// What a single [`Engine::frame`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameOutcome {
    pub moved: bool,
    pub rotated: bool,
    pub step: Option<StepOutcome>,
}

#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    grid: Grid,
    active: ActivePiece,
    status: GameStatus,
    rng: SimpleRng,
    soft_drop: bool,
    drop_elapsed_ms: u32,
    rotate_elapsed_ms: u32,
    /// Monotonic count of spawned pieces in this session.
    pieces_spawned: u32,
    /// Session counter (increments on reset).
    session_id: u32,
    lines_cleared: u32,
    last_event: Option<LockEvent>,
}

impl Engine {
    /// Create an engine on an empty walled grid and spawn the first piece.
    pub fn new(config: EngineConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.grid_width, config.grid_height)?;
        Self::with_grid(config, grid, seed)
    }

    /// Create an engine on a prepared grid. The grid must match the
    /// configured dimensions.
    pub fn with_grid(config: EngineConfig, grid: Grid, seed: u32) -> Result<Self, ConfigError> {
        let mut rng = SimpleRng::new(seed);
        let first = rng.next_kind();
        Self::assemble(config, grid, rng, first)
    }

    /// Like [`Engine::with_grid`], but the first piece is `first` instead of
    /// a random draw. The RNG starts unconsumed, so later pieces follow
    /// `seed` from its first value. Used for scripted setups and replays.
    pub fn with_first_kind(
        config: EngineConfig,
        grid: Grid,
        seed: u32,
        first: PieceKind,
    ) -> Result<Self, ConfigError> {
        Self::assemble(config, grid, SimpleRng::new(seed), first)
    }

    fn assemble(
        config: EngineConfig,
        grid: Grid,
        rng: SimpleRng,
        first: PieceKind,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if grid.width() != config.grid_width || grid.height() != config.grid_height {
            return Err(ConfigError::GridMismatch {
                expected: (config.grid_width, config.grid_height),
                actual: (grid.width(), grid.height()),
            });
        }

        let mut engine = Self {
            active: ActivePiece::spawn(first, config.grid_width),
            config,
            grid,
            status: GameStatus::Playing,
            rng,
            soft_drop: false,
            drop_elapsed_ms: 0,
            rotate_elapsed_ms: config.rotate_cooldown_ms,
            pieces_spawned: 0,
            session_id: 0,
            lines_cleared: 0,
            last_event: None,
        };
        // A prepared grid may already block the spawn; that is a BlockOut.
        engine.spawn_kind(first);
        Ok(engine)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> &ActivePiece {
        &self.active
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    /// Rows cleared in this session. Informational only; nothing is scored.
    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn soft_drop(&self) -> bool {
        self.soft_drop
    }

    /// Gravity interval for the current soft-drop state.
    pub fn drop_interval_ms(&self) -> u32 {
        if self.soft_drop {
            self.config.fast_drop_ms
        } else {
            self.config.drop_ms
        }
    }

    /// Spawn a uniformly random piece. Returns false on a block-out.
    pub fn spawn(&mut self) -> bool {
        let kind = self.rng.next_kind();
        self.spawn_kind(kind)
    }

    /// Spawn a specific kind at the top-center (scripted setups and replays).
    /// Returns false on a block-out.
    pub fn spawn_kind(&mut self, kind: PieceKind) -> bool {
        if self.is_over() {
            return false;
        }
        self.active = ActivePiece::spawn(kind, self.config.grid_width);
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        self.drop_elapsed_ms = 0;

        if self.active.blocked_at_spawn(&self.grid) {
            self.status = GameStatus::GameOver(TopOut::BlockOut);
            return false;
        }
        true
    }

    /// Whether the active piece collides at its current position.
    pub fn collides(&self) -> bool {
        self.active.collides(&self.grid)
    }

    pub fn move_left(&mut self) -> bool {
        !self.is_over() && self.active.move_left(&self.grid)
    }

    pub fn move_right(&mut self) -> bool {
        !self.is_over() && self.active.move_right(&self.grid)
    }

    /// Rotate clockwise. Square pieces and colliding rotations are rejected.
    pub fn rotate(&mut self) -> bool {
        !self.is_over() && self.active.rotate(&self.grid)
    }

    /// Advance the piece one row, or lock it, clear rows and respawn.
    pub fn gravity_step(&mut self) -> StepOutcome {
        if self.is_over() {
            return StepOutcome::Rejected;
        }

        if self.active.can_fall(&self.grid) {
            self.active.y += 1;
            return StepOutcome::Advanced;
        }

        self.lock_piece()
    }

    fn lock_piece(&mut self) -> StepOutcome {
        let kind = self.active.kind;
        let fully_stored = self.active.lock_into(&mut self.grid);
        let lines_cleared = self.grid.clear_complete_rows();
        self.lines_cleared = self.lines_cleared.saturating_add(lines_cleared as u32);

        let event = LockEvent {
            kind,
            piece: self.pieces_spawned,
            lines_cleared,
        };
        self.last_event = Some(event);

        if !fully_stored {
            self.status = GameStatus::GameOver(TopOut::LockOut);
            return StepOutcome::GameOver(TopOut::LockOut);
        }

        if !self.spawn() {
            return StepOutcome::GameOver(TopOut::BlockOut);
        }

        StepOutcome::Locked(event)
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Run one fixed-timestep frame: inputs first, then gravity.
    pub fn frame(&mut self, elapsed_ms: u32, input: FrameInput) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();
        if self.is_over() {
            return outcome;
        }

        self.rotate_elapsed_ms = self.rotate_elapsed_ms.saturating_add(elapsed_ms);

        if input.move_left {
            outcome.moved |= self.move_left();
        }
        if input.move_right {
            outcome.moved |= self.move_right();
        }
        if input.rotate && self.rotate_elapsed_ms >= self.config.rotate_cooldown_ms {
            // The cooldown restarts on every accepted press, even if the
            // rotation itself is blocked.
            self.rotate_elapsed_ms = 0;
            outcome.rotated = self.rotate();
        }

        self.soft_drop = input.soft_drop;

        self.drop_elapsed_ms = self.drop_elapsed_ms.saturating_add(elapsed_ms);
        if self.drop_elapsed_ms > self.drop_interval_ms() {
            self.drop_elapsed_ms = 0;
            outcome.step = Some(self.gravity_step());
        }

        outcome
    }

    /// Apply a single discrete action immediately.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::RotateCw => self.rotate(),
            GameAction::SoftDrop => matches!(
                self.gravity_step(),
                StepOutcome::Advanced | StepOutcome::Locked(_)
            ),
            GameAction::Restart => {
                self.reset();
                true
            }
        }
    }

    /// Start a new session on an empty grid. The RNG stream continues.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.status = GameStatus::Playing;
        self.soft_drop = false;
        self.drop_elapsed_ms = 0;
        self.rotate_elapsed_ms = self.config.rotate_cooldown_ms;
        self.pieces_spawned = 0;
        self.lines_cleared = 0;
        self.last_event = None;
        self.session_id = self.session_id.wrapping_add(1);
        // Dimensions were validated at construction, so an empty grid
        // always has room for the spawn.
        let spawned = self.spawn();
        debug_assert!(spawned, "spawn blocked on an empty grid");
    }

    pub fn snapshot_into(&self, out: &mut EngineSnapshot) {
        out.width = self.grid.width();
        out.height = self.grid.height();
        out.cells.clear();
        out.cells.extend_from_slice(self.grid.cells());
        out.active_kind = self.active.kind;
        out.active_shape = self.active.shape;
        out.position = (self.active.x, self.active.y);
        out.status = self.status;
        out.soft_drop = self.soft_drop;
        out.pieces_spawned = self.pieces_spawned;
        out.lines_cleared = self.lines_cleared;
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        let mut s = EngineSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[cfg(test)]
    pub(crate) fn active_mut(&mut self) -> &mut ActivePiece {
        &mut self.active
    }
}
