use std::time::Duration;

use crate::board::Board;

pub const POINTS_PER_LINE_SQUARED: u32 = 100;

/// Full rows, scanned from the bottom up.
pub fn find_full_rows(board: &Board) -> Vec<usize> {
    (0..board.height())
        .rev()
        .filter(|&row| board.is_row_full(row))
        .collect()
}

/// `n² × 100`: clearing several lines at once pays more than clearing them one by one.
pub fn score_for_lines(lines: usize) -> u32 {
    let n = lines as u32;
    n.saturating_mul(n).saturating_mul(POINTS_PER_LINE_SQUARED)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineClear {
    /// Cleared row indices as they were before removal, bottom first.
    pub rows: Vec<usize>,
    pub points: u32,
}

impl LineClear {
    pub fn count(&self) -> usize {
        self.rows.len()
    }
}

/// Removes every full row and scores the result.
pub fn clear_lines(board: &mut Board) -> LineClear {
    let rows = find_full_rows(board);
    if rows.is_empty() {
        return LineClear::default();
    }
    board.clear_rows(&rows);
    LineClear {
        points: score_for_lines(rows.len()),
        rows,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreState {
    pub score: u32,
    /// Rows cleared since the tick interval last shrank.
    pub rows_since_speedup: u32,
    pub lines_total: u32,
}

impl ScoreState {
    pub fn record(&mut self, clear: &LineClear) {
        let lines = clear.count() as u32;
        self.score = self.score.saturating_add(clear.points);
        self.rows_since_speedup = self.rows_since_speedup.saturating_add(lines);
        self.lines_total = self.lines_total.saturating_add(lines);
    }
}

/// Discrete speed-ups: every `threshold` cleared rows the interval shrinks by `step` per
/// row counted, never below `min_interval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedRamp {
    pub threshold: u32,
    pub step: Duration,
    pub min_interval: Duration,
}

impl Default for SpeedRamp {
    fn default() -> Self {
        Self {
            threshold: 10,
            step: Duration::from_millis(10),
            min_interval: Duration::from_millis(100),
        }
    }
}

impl SpeedRamp {
    /// Returns the new interval when a speed-up is due and resets the row counter.
    ///
    /// The cut is taken from `current`, so successive speed-ups compound; the interval is
    /// never recomputed from the base as `base - step * rows`.
    pub fn apply(&self, score: &mut ScoreState, current: Duration) -> Option<Duration> {
        if score.rows_since_speedup < self.threshold.max(1) {
            return None;
        }
        let cut = self.step.saturating_mul(score.rows_since_speedup);
        score.rows_since_speedup = 0;
        let floor = self.min_interval.max(Duration::from_millis(1));
        Some(current.saturating_sub(cut).max(floor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    #[test]
    fn score_is_quadratic_in_lines() {
        assert_eq!(score_for_lines(0), 0);
        assert_eq!(score_for_lines(1), 100);
        assert_eq!(score_for_lines(2), 400);
        assert_eq!(score_for_lines(3), 900);
        assert_eq!(score_for_lines(4), 1600);
    }

    #[test]
    fn find_full_rows_scans_bottom_up() {
        let mut board = Board::new(2, 4);
        for row in [0, 1, 3] {
            for x in 0..2 {
                board.set(x, row, Cell::Filled([1, 1, 1, 255]));
            }
        }
        assert_eq!(find_full_rows(&board), vec![3, 1, 0]);
    }

    #[test]
    fn clear_lines_without_full_rows_is_a_no_op() {
        let mut board = Board::new(3, 3);
        board.set(0, 2, Cell::Filled([1, 1, 1, 255]));
        let before = board.clone();
        assert_eq!(clear_lines(&mut board), LineClear::default());
        assert_eq!(board, before);
    }

    #[test]
    fn speed_ramp_waits_for_threshold() {
        let ramp = SpeedRamp::default();
        let mut score = ScoreState {
            rows_since_speedup: 9,
            ..ScoreState::default()
        };
        assert_eq!(ramp.apply(&mut score, Duration::from_millis(500)), None);
        assert_eq!(score.rows_since_speedup, 9);

        score.rows_since_speedup = 11;
        assert_eq!(
            ramp.apply(&mut score, Duration::from_millis(500)),
            Some(Duration::from_millis(390))
        );
        assert_eq!(score.rows_since_speedup, 0);
    }

    #[test]
    fn speed_ramp_clamps_to_minimum() {
        let ramp = SpeedRamp::default();
        let mut score = ScoreState {
            rows_since_speedup: 10,
            ..ScoreState::default()
        };
        assert_eq!(
            ramp.apply(&mut score, Duration::from_millis(150)),
            Some(Duration::from_millis(100))
        );
    }

    #[test]
    fn speed_ups_compound_on_the_current_interval() {
        let ramp = SpeedRamp::default();
        let mut score = ScoreState {
            rows_since_speedup: 10,
            ..ScoreState::default()
        };
        let first = ramp.apply(&mut score, Duration::from_millis(500));
        assert_eq!(first, Some(Duration::from_millis(400)));

        score.rows_since_speedup = 10;
        let second = ramp.apply(&mut score, Duration::from_millis(400));
        assert_eq!(second, Some(Duration::from_millis(300)));
    }
}
