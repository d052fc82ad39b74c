use crate::board::{Board, Cell};
use crate::piece::{ActivePiece, Shape, Vec2i};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    pub fn delta(self) -> Vec2i {
        match self {
            Direction::Left => Vec2i::new(-1, 0),
            Direction::Right => Vec2i::new(1, 0),
            Direction::Down => Vec2i::new(0, 1),
        }
    }
}

/// True when every filled cell of `shape` placed at `pos` is on the board and empty.
pub fn is_valid_at(board: &Board, shape: &Shape, pos: Vec2i) -> bool {
    shape
        .cells()
        .all(|cell| board.get(pos.x + cell.x, pos.y + cell.y) == Some(Cell::Empty))
}

pub fn can_move(board: &Board, piece: &ActivePiece, dir: Direction) -> bool {
    is_valid_at(board, &piece.shape, piece.pos + dir.delta())
}

/// Moves `piece` one step if the target is free. Returns whether it moved.
pub fn try_move(board: &Board, piece: &mut ActivePiece, dir: Direction) -> bool {
    if !can_move(board, piece, dir) {
        return false;
    }
    piece.pos = piece.pos + dir.delta();
    true
}

/// Rotates in place at the current offset, or leaves the piece untouched if the turned
/// shape doesn't fit. There is no kick search.
pub fn try_rotate(board: &Board, piece: &mut ActivePiece) -> bool {
    let rotated = piece.shape.rotate();
    if !is_valid_at(board, &rotated, piece.pos) {
        return false;
    }
    piece.shape = rotated;
    true
}

/// Writes the piece's color into every board cell it covers.
pub fn merge(board: &mut Board, piece: &ActivePiece) {
    for cell in piece.board_cells() {
        if cell.x >= 0 && cell.y >= 0 {
            board.set(cell.x as usize, cell.y as usize, Cell::Filled(piece.color));
        }
    }
}
