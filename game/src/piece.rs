use std::ops::Add;

use engine::graphics::{Color, rgb_hex};
use rand::Rng;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Vec2i {
    pub x: i32,
    pub y: i32,
}

impl Vec2i {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2i {
    type Output = Vec2i;

    fn add(self, rhs: Vec2i) -> Self::Output {
        Vec2i::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// A rectangular matrix of filled flags, row-major, row 0 on top.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: Vec<Vec<bool>>,
}

impl Shape {
    pub fn from_bits<const W: usize>(rows: &[[u8; W]]) -> Self {
        Self {
            rows: rows
                .iter()
                .map(|row| row.iter().map(|&bit| bit != 0).collect())
                .collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    /// Offsets `(col, row)` of every filled cell.
    pub fn cells(&self) -> impl Iterator<Item = Vec2i> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, filled)| **filled)
                .map(move |(x, _)| Vec2i::new(x as i32, y as i32))
        })
    }

    /// Quarter turn clockwise: new row `c` is old column `c` read bottom to top.
    pub fn rotate(&self) -> Shape {
        let rows = (0..self.width())
            .map(|col| self.rows.iter().rev().map(|row| row[col]).collect())
            .collect();
        Shape { rows }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    S,
    T,
    J,
    L,
    /// Solid 2x3 block.
    Slab,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::J,
        PieceKind::L,
        PieceKind::Slab,
    ];

    pub fn color(self) -> Color {
        match self {
            PieceKind::I => rgb_hex(0xFF4D4D),
            PieceKind::O => rgb_hex(0x4DFF4D),
            PieceKind::S => rgb_hex(0x4D4DFF),
            PieceKind::T => rgb_hex(0xFFFF4D),
            PieceKind::J => rgb_hex(0xFF4DFF),
            PieceKind::L => rgb_hex(0x4DFFFF),
            PieceKind::Slab => rgb_hex(0xFFA64D),
        }
    }

    pub fn shape(self) -> Shape {
        match self {
            PieceKind::I => Shape::from_bits(&[[1, 1, 1, 1]]),
            PieceKind::O => Shape::from_bits(&[[1, 1], [1, 1]]),
            PieceKind::S => Shape::from_bits(&[[0, 1, 1], [1, 1, 0]]),
            PieceKind::T => Shape::from_bits(&[[1, 1, 1], [0, 1, 0]]),
            PieceKind::J => Shape::from_bits(&[[1, 1, 1], [0, 0, 1]]),
            PieceKind::L => Shape::from_bits(&[[1, 1, 1], [1, 0, 0]]),
            PieceKind::Slab => Shape::from_bits(&[[1, 1, 1], [1, 1, 1]]),
        }
    }

    pub fn template(self) -> PieceTemplate {
        PieceTemplate {
            kind: self,
            color: self.color(),
            shape: self.shape(),
        }
    }
}

/// An owned copy of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceTemplate {
    pub kind: PieceKind,
    pub color: Color,
    pub shape: Shape,
}

/// Uniform, independent draw over the catalog.
pub fn pick_random<R: Rng + ?Sized>(rng: &mut R) -> PieceTemplate {
    let idx = rng.gen_range(0..PieceKind::ALL.len());
    PieceKind::ALL[idx].template()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub color: Color,
    pub shape: Shape,
    pub pos: Vec2i,
}

impl ActivePiece {
    pub fn new(template: PieceTemplate, pos: Vec2i) -> Self {
        Self {
            kind: template.kind,
            color: template.color,
            shape: template.shape,
            pos,
        }
    }

    /// Top-center spawn: `x = width/2 - pieceWidth/2`, `y = 0`.
    pub fn spawn(template: PieceTemplate, board_width: usize) -> Self {
        let x = (board_width / 2) as i32 - (template.shape.width() / 2) as i32;
        Self::new(template, Vec2i::new(x, 0))
    }

    /// Board coordinates of every filled cell.
    pub fn board_cells(&self) -> impl Iterator<Item = Vec2i> + '_ {
        self.shape.cells().map(move |cell| cell + self.pos)
    }
}
