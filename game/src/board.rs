use std::collections::HashSet;

use engine::graphics::Color;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Filled(color) => Some(color),
        }
    }
}

/// Fixed-size grid of cells. Row 0 is the top of the well.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    rows: Vec<Vec<Cell>>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            rows: vec![vec![Cell::Empty; width]; height],
        }
    }

    /// Builds a board from rows of cells. All rows must share one width.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Option<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }
        Some(Self { width, rows })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.rows.get(y as usize)?.get(x as usize).copied()
    }

    /// Writes `cell` at `(x, y)`; out-of-range writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if let Some(slot) = self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
            *slot = cell;
        }
    }

    pub fn is_row_full(&self, row: usize) -> bool {
        self.rows
            .get(row)
            .is_some_and(|cells| cells.iter().all(|cell| !cell.is_empty()))
    }

    pub fn is_row_empty(&self, row: usize) -> bool {
        self.rows
            .get(row)
            .is_none_or(|cells| cells.iter().all(|cell| cell.is_empty()))
    }

    pub fn filled_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }

    /// Removes `rows` (indices into the current board) and pushes the same number of
    /// empty rows in at the top. Surviving rows keep their order.
    pub fn clear_rows(&mut self, rows: &[usize]) {
        let doomed: HashSet<usize> = rows
            .iter()
            .copied()
            .filter(|&row| row < self.rows.len())
            .collect();
        if doomed.is_empty() {
            return;
        }

        let mut kept: Vec<Vec<Cell>> = Vec::with_capacity(self.rows.len());
        kept.extend((0..doomed.len()).map(|_| vec![Cell::Empty; self.width]));
        kept.extend(
            std::mem::take(&mut self.rows)
                .into_iter()
                .enumerate()
                .filter(|(idx, _)| !doomed.contains(idx))
                .map(|(_, row)| row),
        );
        self.rows = kept;
    }
}
