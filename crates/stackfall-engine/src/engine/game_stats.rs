use serde::Serialize;

/// Game statistics tracking score and piece count.
///
/// - **Score**: one point per cleared line
/// - **Completed pieces**: total number of pieces locked
/// - **Line clear distribution**: how many locks cleared 0, 1, 2, 3 or 4 lines
///
/// # Example
///
/// ```
/// use stackfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(0);
/// stats.complete_piece_drop(4);
///
/// assert_eq!(stats.score(), 4);
/// assert_eq!(stats.completed_pieces(), 2);
/// assert_eq!(stats.line_cleared_counter(), &[1, 0, 0, 0, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            line_cleared_counter: [0; 5],
        }
    }

    /// Returns the total number of cleared lines.
    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    /// Returns a histogram of line clears by count.
    ///
    /// Index `n` is the number of locks that cleared exactly `n` lines.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Updates statistics after a piece lock that cleared `cleared_lines` lines.
    pub const fn complete_piece_drop(&mut self, cleared_lines: usize) {
        self.completed_pieces += 1;
        self.score += cleared_lines;
        if cleared_lines < self.line_cleared_counter.len() {
            self.line_cleared_counter[cleared_lines] += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_is_monotonic_line_count() {
        let mut stats = GameStats::new();
        let mut previous = stats.score();
        for cleared in [0, 1, 0, 3, 2, 0, 4] {
            stats.complete_piece_drop(cleared);
            assert!(stats.score() >= previous);
            previous = stats.score();
        }
        assert_eq!(stats.score(), 10);
        assert_eq!(stats.completed_pieces(), 7);
        assert_eq!(stats.line_cleared_counter(), &[3, 1, 1, 1, 1]);
    }

    #[test]
    fn test_serialization() {
        let mut stats = GameStats::new();
        stats.complete_piece_drop(2);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "score": 2,
                "completed_pieces": 1,
                "line_cleared_counter": [0, 0, 1, 0, 0],
            })
        );
    }
}
