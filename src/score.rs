//! Score tracking: a fixed award for every cleared line

use serde::{Deserialize, Serialize};

/// Points per cleared line unless configured otherwise
pub const DEFAULT_LINE_AWARD: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Total lines cleared
    pub lines: u32,
    /// Points awarded per line
    pub line_award: u64,
}

impl Default for Score {
    fn default() -> Self {
        Self::new(DEFAULT_LINE_AWARD)
    }
}

impl Score {
    pub fn new(line_award: u64) -> Self {
        Self {
            points: 0,
            lines: 0,
            line_award,
        }
    }

    /// Credit `lines` cleared lines, returning the points added
    pub fn add_lines(&mut self, lines: usize) -> u64 {
        let gained = self.line_award.saturating_mul(lines as u64);
        self.points = self.points.saturating_add(gained);
        self.lines = self.lines.saturating_add(lines as u32);
        gained
    }

    pub fn reset(&mut self) {
        self.points = 0;
        self.lines = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_clear() {
        let mut score = Score::default();
        assert_eq!(score.add_lines(1), 100);
        assert_eq!(score.points, 100);
        assert_eq!(score.lines, 1);
    }

    #[test]
    fn test_multi_line_is_linear() {
        let mut score = Score::new(1);
        score.add_lines(4);
        assert_eq!(score.points, 4);
        assert_eq!(score.lines, 4);
    }

    #[test]
    fn test_zero_lines_adds_nothing() {
        let mut score = Score::default();
        assert_eq!(score.add_lines(0), 0);
        assert_eq!(score, Score::default());
    }

    #[test]
    fn test_reset_keeps_award() {
        let mut score = Score::new(25);
        score.add_lines(3);
        score.reset();
        assert_eq!(score.points, 0);
        assert_eq!(score.line_award, 25);
    }
}
