use std::time::Duration;

use blockfall::board::{Board, Cell};
use blockfall::controller::{
    GameController, GameError, GameOverCause, GamePhase, GameState, Rules, TickOutcome,
};
use blockfall::input::InputAction;
use blockfall::line_clear::ScoreState;
use blockfall::piece::{ActivePiece, PieceKind, Vec2i};

const GREY: [u8; 4] = [90, 90, 90, 255];

fn state_with(board: Board, piece: ActivePiece) -> GameState {
    GameState {
        board,
        piece,
        score: ScoreState::default(),
        phase: GamePhase::Running,
        tick_interval: Rules::default().base_tick_interval,
    }
}

fn controller_with(board: Board, piece: ActivePiece) -> GameController {
    GameController::with_state(Rules::default(), state_with(board, piece), 0)
}

fn fill_row_except(board: &mut Board, row: usize, gaps: &[usize]) {
    for x in 0..board.width() {
        if !gaps.contains(&x) {
            board.set(x, row, Cell::Filled(GREY));
        }
    }
}

#[test]
fn new_game_starts_running_with_a_centered_piece() {
    let controller = GameController::new(Rules::default(), 3);
    let state = controller.state();

    assert_eq!(controller.phase(), GamePhase::Running);
    assert_eq!(state.board.filled_count(), 0);
    assert_eq!(state.piece.pos.y, 0);
    let expected_x = 10 / 2 - (state.piece.shape.width() / 2) as i32;
    assert_eq!(state.piece.pos.x, expected_x);
    assert_eq!(controller.tick_interval(), Duration::from_millis(500));
}

#[test]
fn bar_falls_one_row_per_tick_then_locks() {
    let piece = ActivePiece::spawn(PieceKind::I.template(), 10);
    let mut controller = controller_with(Board::new(10, 20), piece);

    for expected_y in 1..=19 {
        assert_eq!(controller.tick(), Ok(TickOutcome::Moved));
        assert_eq!(controller.state().piece.pos.y, expected_y);
    }
    let piece = &controller.state().piece;
    assert_eq!(piece.pos.y as usize + piece.shape.height(), 20);

    let outcome = controller.tick().expect("still running");
    assert!(matches!(outcome, TickOutcome::Locked(_)));
    let board = &controller.state().board;
    assert_eq!(board.filled_count(), 4);
    for x in 3..7 {
        assert_eq!(board.get(x, 19), Some(Cell::Filled(PieceKind::I.color())));
    }
    assert_eq!(controller.state().piece.pos.y, 0);
}

#[test]
fn filling_the_last_gap_clears_one_row() {
    let mut board = Board::new(10, 20);
    fill_row_except(&mut board, 19, &[9]);
    board.set(0, 18, Cell::Filled(GREY));

    // Vertical I dropped into column 9, resting on the floor.
    let mut piece = ActivePiece::new(PieceKind::I.template(), Vec2i::new(9, 16));
    piece.shape = piece.shape.rotate();
    let mut controller = controller_with(board, piece);

    let TickOutcome::Locked(report) = controller.tick().expect("running") else {
        panic!("expected the piece to lock");
    };
    assert_eq!(report.cleared.rows, vec![19]);
    assert_eq!(report.cleared.points, 100);
    assert_eq!(controller.score(), 100);

    let board = &controller.state().board;
    assert_eq!(board.height(), 20);
    // Rows above the cleared one shift down: the lone block and three I cells survive.
    assert_eq!(board.get(0, 19), Some(Cell::Filled(GREY)));
    assert_eq!(board.filled_count(), 1 + 3);
    assert!(board.is_row_empty(0));
}

#[test]
fn four_line_clear_scores_sixteen_hundred() {
    let mut board = Board::new(10, 20);
    for row in 16..20 {
        fill_row_except(&mut board, row, &[0]);
    }
    let mut piece = ActivePiece::new(PieceKind::I.template(), Vec2i::new(0, 16));
    piece.shape = piece.shape.rotate();
    let mut controller = controller_with(board, piece);

    let TickOutcome::Locked(report) = controller.tick().expect("running") else {
        panic!("expected the piece to lock");
    };
    assert_eq!(report.cleared.count(), 4);
    assert_eq!(controller.score(), 1600);
    assert_eq!(controller.state().board.filled_count(), 0);
}

#[test]
fn top_row_occupied_after_lock_ends_the_game_before_spawning() {
    let mut board = Board::new(10, 20);
    for row in 2..20 {
        board.set(4, row, Cell::Filled(GREY));
    }
    // O piece sitting on the column, its top row at y = 0.
    let piece = ActivePiece::new(PieceKind::O.template(), Vec2i::new(4, 0));
    let mut controller = controller_with(board, piece.clone());

    let outcome = controller.tick().expect("running");
    assert!(matches!(
        outcome,
        TickOutcome::GameOver(_, GameOverCause::TopOut)
    ));
    assert_eq!(controller.phase(), GamePhase::GameOver);
    // No new piece was spawned.
    assert_eq!(controller.state().piece, piece);
}

#[test]
fn blocked_spawn_ends_the_game() {
    let mut board = Board::new(10, 20);
    // Row 1 is full in the middle, so no catalog piece spawned at the top can fall.
    fill_row_except(&mut board, 1, &[0, 9]);
    let piece = ActivePiece::new(PieceKind::O.template(), Vec2i::new(0, 18));
    let mut controller = controller_with(board, piece);

    let outcome = controller.tick().expect("running");
    assert!(matches!(
        outcome,
        TickOutcome::GameOver(_, GameOverCause::BlockedSpawn)
    ));
    assert_eq!(controller.phase(), GamePhase::GameOver);
}

#[test]
fn calls_after_game_over_are_rejected() {
    let mut board = Board::new(10, 20);
    fill_row_except(&mut board, 1, &[0, 9]);
    let piece = ActivePiece::new(PieceKind::O.template(), Vec2i::new(0, 18));
    let mut controller = controller_with(board, piece);
    controller.tick().expect("running");

    let before = controller.state().clone();
    assert_eq!(controller.tick(), Err(GameError::GameOver));
    assert_eq!(
        controller.handle_input(InputAction::MoveLeft),
        Err(GameError::GameOver)
    );
    assert_eq!(controller.state(), &before);
}

#[test]
fn moves_apply_only_when_feasible() {
    let piece = ActivePiece::new(PieceKind::O.template(), Vec2i::new(0, 0));
    let mut controller = controller_with(Board::new(10, 20), piece);

    assert_eq!(controller.handle_input(InputAction::MoveLeft), Ok(false));
    assert_eq!(controller.handle_input(InputAction::MoveRight), Ok(true));
    assert_eq!(controller.handle_input(InputAction::SoftDrop), Ok(true));
    assert_eq!(controller.state().piece.pos, Vec2i::new(1, 1));
}

#[test]
fn soft_drop_on_the_floor_does_not_lock() {
    let piece = ActivePiece::new(PieceKind::O.template(), Vec2i::new(4, 18));
    let mut controller = controller_with(Board::new(10, 20), piece.clone());

    assert_eq!(controller.handle_input(InputAction::SoftDrop), Ok(false));
    assert_eq!(controller.state().piece, piece);
    assert_eq!(controller.state().board.filled_count(), 0);
}

#[test]
fn rotation_flush_against_the_left_wall_is_discarded() {
    // Vertical I against the left wall with a block beside its top cell.
    let mut board = Board::new(10, 20);
    board.set(1, 16, Cell::Filled(GREY));
    let mut piece = ActivePiece::new(PieceKind::I.template(), Vec2i::new(0, 16));
    piece.shape = piece.shape.rotate();
    let mut controller = controller_with(board, piece.clone());

    assert_eq!(controller.handle_input(InputAction::Rotate), Ok(false));
    assert_eq!(controller.state().piece, piece);
}

#[test]
fn rotation_past_the_right_wall_is_discarded() {
    let mut piece = ActivePiece::new(PieceKind::I.template(), Vec2i::new(9, 5));
    piece.shape = piece.shape.rotate();
    let mut controller = controller_with(Board::new(10, 20), piece.clone());

    assert_eq!(controller.handle_input(InputAction::Rotate), Ok(false));
    assert_eq!(controller.state().piece.shape, piece.shape);
}

#[test]
fn rotation_in_open_space_turns_the_piece() {
    let piece = ActivePiece::new(PieceKind::T.template(), Vec2i::new(4, 4));
    let mut controller = controller_with(Board::new(10, 20), piece);

    assert_eq!(controller.handle_input(InputAction::Rotate), Ok(true));
    let shape = &controller.state().piece.shape;
    assert_eq!((shape.width(), shape.height()), (2, 3));
}

#[test]
fn ten_cleared_rows_shorten_the_tick_interval() {
    let mut board = Board::new(10, 20);
    for row in 16..20 {
        fill_row_except(&mut board, row, &[0]);
    }
    let mut piece = ActivePiece::new(PieceKind::I.template(), Vec2i::new(0, 16));
    piece.shape = piece.shape.rotate();
    let mut state = state_with(board, piece);
    state.score.rows_since_speedup = 8;
    let mut controller = GameController::with_state(Rules::default(), state, 0);

    let TickOutcome::Locked(report) = controller.tick().expect("running") else {
        panic!("expected the piece to lock");
    };
    // 8 + 4 = 12 rows since the last speed-up: 500 - 12 * 10.
    assert_eq!(report.speed_up, Some(Duration::from_millis(380)));
    assert_eq!(controller.tick_interval(), Duration::from_millis(380));
    assert_eq!(controller.state().score.rows_since_speedup, 0);
    assert_eq!(controller.state().score.lines_total, 4);
}
