//! Score keeping
//!
//! Time-based points arrive once per tick interval of accumulated play time,
//! worth the whole part of the current scroll speed. Gems pay a flat bonus.
//! The best score survives [`ScoreKeeper::reset`] for the process lifetime.

/// Current and best score
#[derive(Debug, Clone, Default)]
pub struct ScoreKeeper {
    score: u64,
    best: u64,
    /// Play time since the last time-based tick (seconds)
    since_tick: f64,
    /// Completed runs
    runs: u32,
}

impl ScoreKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Accumulate `dt` seconds of play; returns the points awarded
    pub fn update(&mut self, dt: f64, scroll_speed: f32, interval: f64) -> u64 {
        if dt.is_finite() && dt > 0.0 {
            self.since_tick += dt;
        }

        let mut awarded = 0;
        while self.since_tick >= interval {
            self.since_tick -= interval;
            awarded += scroll_speed.max(0.0).floor() as u64;
        }
        self.score += awarded;
        awarded
    }

    /// Award a gem bonus immediately
    pub fn on_gem_collected(&mut self, bonus: u64) -> u64 {
        self.score += bonus;
        bonus
    }

    /// Close out a run. Returns true if it set a new best.
    pub fn on_game_over(&mut self) -> bool {
        self.runs += 1;
        if self.score > self.best {
            log::debug!("New best score {} (was {})", self.score, self.best);
            self.best = self.score;
            true
        } else {
            false
        }
    }

    /// Start a new run; the best score is kept
    pub fn reset(&mut self) {
        self.score = 0;
        self.since_tick = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_time_tick_awards_floor_of_speed() {
        let mut keeper = ScoreKeeper::new();
        assert_eq!(keeper.update(0.5, 5.9, 1.0), 0);
        assert_eq!(keeper.update(0.5, 5.9, 1.0), 5);
        assert_eq!(keeper.score(), 5);
    }

    #[test]
    fn test_time_tick_is_not_per_frame() {
        let mut keeper = ScoreKeeper::new();
        let mut total = 0;
        // 59 frames of 1/64 s stay under one second
        for _ in 0..59 {
            total += keeper.update(1.0 / 64.0, 7.0, 1.0);
        }
        assert_eq!(total, 0);
        for _ in 0..5 {
            total += keeper.update(1.0 / 64.0, 7.0, 1.0);
        }
        assert_eq!(total, 7);
    }

    #[test]
    fn test_long_frame_awards_every_elapsed_tick() {
        let mut keeper = ScoreKeeper::new();
        assert_eq!(keeper.update(2.5, 6.0, 1.0), 12);
        assert_eq!(keeper.update(0.5, 6.0, 1.0), 6);
    }

    #[test]
    fn test_gem_bonus_is_immediate() {
        let mut keeper = ScoreKeeper::new();
        assert_eq!(keeper.on_gem_collected(50), 50);
        assert_eq!(keeper.score(), 50);
    }

    #[test]
    fn test_reset_keeps_best() {
        let mut keeper = ScoreKeeper::new();
        keeper.on_gem_collected(50);
        assert!(keeper.on_game_over());
        keeper.reset();
        assert_eq!(keeper.score(), 0);
        assert_eq!(keeper.best(), 50);

        keeper.on_gem_collected(20);
        assert!(!keeper.on_game_over());
        assert_eq!(keeper.best(), 50);
        assert_eq!(keeper.runs(), 2);
    }

    #[test]
    fn test_reset_clears_partial_tick() {
        let mut keeper = ScoreKeeper::new();
        keeper.update(0.9, 5.0, 1.0);
        keeper.reset();
        assert_eq!(keeper.update(0.2, 5.0, 1.0), 0);
    }

    proptest! {
        #[test]
        fn prop_best_is_max_of_runs(runs in prop::collection::vec(0u64..10_000, 1..20)) {
            let mut keeper = ScoreKeeper::new();
            let mut previous_best = 0;
            for &points in &runs {
                keeper.reset();
                keeper.on_gem_collected(points);
                keeper.on_game_over();
                prop_assert!(keeper.best() >= previous_best);
                previous_best = keeper.best();
            }
            prop_assert_eq!(keeper.best(), runs.iter().copied().max().unwrap_or(0));
        }
    }
}
