//! Scoring, level progression and gravity speed

use std::time::Duration;

/// Points per simultaneous clear of 1, 2, 3 and 4+ rows, before the level multiplier
const LINE_POINTS: [u64; 4] = [40, 100, 300, 1200];

/// Each level multiplies the gravity interval by this factor
const GRAVITY_DECAY: f64 = 0.75;

/// Points for clearing `rows` rows at once on level 1
pub fn line_clear_points(rows: usize) -> u64 {
    match rows {
        0 => 0,
        n => LINE_POINTS[n.min(4) - 1],
    }
}

/// Minimum score at which `level` is reached: `600 * L * (L - 1)`
pub fn level_min_score(level: u32) -> u64 {
    let level = level as u64;
    600 * level * level.saturating_sub(1)
}

/// Gravity interval on `level`: `base * 0.75^(level-1)`
pub fn gravity_interval(base: Duration, level: u32) -> Duration {
    base.mul_f64(GRAVITY_DECAY.powi(level.saturating_sub(1) as i32))
}

/// Result of scoring one lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Award {
    pub points: u64,
    pub levels_gained: u32,
}

/// Session score tracking
#[derive(Debug, Clone)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Current level, starting at 1
    pub level: u32,
    /// Total lines cleared
    pub lines: u32,
    /// Pieces locked into the field
    pub pieces: u32,
}

impl Default for Score {
    fn default() -> Self {
        Self::new()
    }
}

impl Score {
    pub fn new() -> Self {
        Self {
            points: 0,
            level: 1,
            lines: 0,
            pieces: 0,
        }
    }

    /// Score a lock that cleared `rows` rows, then level up as far as the new total allows
    pub fn add_clear(&mut self, rows: usize) -> Award {
        self.pieces += 1;
        let points = line_clear_points(rows) * self.level as u64;
        self.points += points;
        self.lines += rows as u32;

        let start_level = self.level;
        while self.points >= level_min_score(self.level + 1) {
            self.level += 1;
        }

        Award {
            points,
            levels_gained: self.level - start_level,
        }
    }

    /// Gravity interval for the current level
    pub fn fall_interval(&self, base: Duration) -> Duration {
        gravity_interval(base, self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_min_score() {
        assert_eq!(level_min_score(1), 0);
        assert_eq!(level_min_score(2), 1200);
        assert_eq!(level_min_score(3), 3600);
        assert_eq!(level_min_score(4), 7200);
    }

    #[test]
    fn test_points_per_clear_at_level_one() {
        for (rows, expected) in [(1, 40), (2, 100), (3, 300), (4, 1200)] {
            let mut score = Score::new();
            let award = score.add_clear(rows);
            assert_eq!(award.points, expected);
            assert_eq!(score.lines, rows as u32);
        }
    }

    #[test]
    fn test_more_than_four_rows_capped() {
        assert_eq!(line_clear_points(5), 1200);
        assert_eq!(line_clear_points(0), 0);
    }

    #[test]
    fn test_no_clear_counts_piece_only() {
        let mut score = Score::new();
        let award = score.add_clear(0);
        assert_eq!(award, Award { points: 0, levels_gained: 0 });
        assert_eq!(score.pieces, 1);
        assert_eq!(score.points, 0);
    }

    #[test]
    fn test_level_up() {
        let mut score = Score::new();
        // a four-row clear reaches 1200 exactly
        let award = score.add_clear(4);
        assert_eq!(award.levels_gained, 1);
        assert_eq!(score.level, 2);

        // points are now multiplied by level 2
        let award = score.add_clear(4);
        assert_eq!(award.points, 2400);
        assert_eq!(score.points, 3600);
        assert_eq!(score.level, 3);
    }

    #[test]
    fn test_multiple_levels_in_one_award() {
        let mut score = Score::new();
        score.level = 3;
        score.points = 3500;
        // 1200 * 3 pushes the total to 7100, short of the 7200 level 4 needs
        assert_eq!(score.add_clear(4).levels_gained, 0);
        score.level = 1;
        // now at 7100 on level 1: levels 2 and 3 are both reached
        assert_eq!(score.add_clear(1).levels_gained, 2);
        assert_eq!(score.level, 3);
    }

    #[test]
    fn test_gravity_interval() {
        let base = Duration::from_millis(1000);
        assert_eq!(gravity_interval(base, 1), base);
        assert_eq!(gravity_interval(base, 2), Duration::from_millis(750));
        assert_eq!(gravity_interval(base, 3), Duration::from_micros(562_500));
        assert!(gravity_interval(base, 10) < gravity_interval(base, 9));
    }
}
