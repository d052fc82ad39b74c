use std::time::Duration;

use engine::surface::SurfaceSize;
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::board::Board;
use crate::collision::{Direction, can_move, merge, try_move, try_rotate};
use crate::input::InputAction;
use crate::line_clear::{LineClear, ScoreState, SpeedRamp, clear_lines};
use crate::piece::{ActivePiece, pick_random};

pub const BLOCK_SIZE: u32 = 20;
/// Pixel size of the play field; the board grid is derived from it.
pub const BOARD_SURFACE: SurfaceSize = SurfaceSize::new(200, 400);
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("game is over; start a new game")]
    GameOver,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GamePhase {
    #[default]
    Running,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// The landed piece left blocks in the top row.
    TopOut,
    /// The fresh piece had nowhere to fall.
    BlockedSpawn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockReport {
    pub cleared: LineClear,
    /// New tick interval when this lock triggered a speed-up.
    pub speed_up: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Locked(LockReport),
    GameOver(LockReport, GameOverCause),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub board_width: usize,
    pub board_height: usize,
    pub base_tick_interval: Duration,
    pub speed: SpeedRamp,
}

impl Default for Rules {
    fn default() -> Self {
        let (width, height) = BOARD_SURFACE.grid_cells(BLOCK_SIZE);
        Self {
            board_width: width as usize,
            board_height: height as usize,
            base_tick_interval: DEFAULT_TICK_INTERVAL,
            speed: SpeedRamp::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub piece: ActivePiece,
    pub score: ScoreState,
    pub phase: GamePhase,
    pub tick_interval: Duration,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

/// Owns the board and the falling piece; every mutation goes through here.
#[derive(Debug, Clone)]
pub struct GameController {
    rules: Rules,
    state: GameState,
    rng: StdRng,
}

impl GameController {
    pub fn new(rules: Rules, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let board = Board::new(rules.board_width, rules.board_height);
        let piece = ActivePiece::spawn(pick_random(&mut rng), board.width());
        let state = GameState {
            board,
            piece,
            score: ScoreState::default(),
            phase: GamePhase::Running,
            tick_interval: rules.base_tick_interval,
        };
        tracing::info!(seed, first = ?state.piece.kind, "new game");
        Self { rules, state, rng }
    }

    /// Resumes from an explicit state. Later spawns draw from `seed`.
    pub fn with_state(rules: Rules, state: GameState, seed: u64) -> Self {
        Self {
            rules,
            state,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score.score
    }

    pub fn tick_interval(&self) -> Duration {
        self.state.tick_interval
    }

    fn ensure_running(&self) -> Result<(), GameError> {
        match self.state.phase {
            GamePhase::Running => Ok(()),
            GamePhase::GameOver => Err(GameError::GameOver),
        }
    }

    /// One gravity step: fall a row, or lock, clear, and spawn the next piece.
    pub fn tick(&mut self) -> Result<TickOutcome, GameError> {
        self.ensure_running()?;
        let state = &mut self.state;

        if try_move(&state.board, &mut state.piece, Direction::Down) {
            return Ok(TickOutcome::Moved);
        }

        merge(&mut state.board, &state.piece);
        let cleared = clear_lines(&mut state.board);
        state.score.record(&cleared);
        if cleared.count() > 0 {
            tracing::debug!(
                lines = cleared.count(),
                points = cleared.points,
                score = state.score.score,
                "lines cleared"
            );
        }

        let speed_up = self
            .rules
            .speed
            .apply(&mut state.score, state.tick_interval);
        if let Some(interval) = speed_up {
            tracing::info!(interval_ms = interval.as_millis() as u64, "speeding up");
            state.tick_interval = interval;
        }
        let report = LockReport { cleared, speed_up };

        if !state.board.is_row_empty(0) {
            state.phase = GamePhase::GameOver;
            tracing::info!(score = state.score.score, "game over: stack reached the top");
            return Ok(TickOutcome::GameOver(report, GameOverCause::TopOut));
        }

        state.piece = ActivePiece::spawn(pick_random(&mut self.rng), state.board.width());
        if !can_move(&state.board, &state.piece, Direction::Down) {
            state.phase = GamePhase::GameOver;
            tracing::info!(score = state.score.score, "game over: no room to spawn");
            return Ok(TickOutcome::GameOver(report, GameOverCause::BlockedSpawn));
        }

        Ok(TickOutcome::Locked(report))
    }

    /// Applies a player action. Returns whether the piece changed.
    pub fn handle_input(&mut self, action: InputAction) -> Result<bool, GameError> {
        self.ensure_running()?;
        let state = &mut self.state;
        let changed = match action {
            InputAction::MoveLeft => try_move(&state.board, &mut state.piece, Direction::Left),
            InputAction::MoveRight => try_move(&state.board, &mut state.piece, Direction::Right),
            InputAction::SoftDrop => try_move(&state.board, &mut state.piece, Direction::Down),
            InputAction::Rotate => try_rotate(&state.board, &mut state.piece),
        };
        Ok(changed)
    }
}
