//! Score and session best

use serde::{Deserialize, Serialize};

/// Current run score and best score for the process lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub score: u32,
    pub best: u32,
}

impl Scoreboard {
    /// Add one point per newly passed obstacle, returns the new score
    pub fn record_passes(&mut self, count: usize) -> u32 {
        let count = u32::try_from(count).unwrap_or(u32::MAX);
        self.score = self.score.saturating_add(count);
        self.score
    }

    /// Fold the run into the best score; true if it set a new best
    pub fn finish_run(&mut self) -> bool {
        let improved = self.score > self.best;
        self.best = self.best.max(self.score);
        improved
    }

    pub fn reset_run(&mut self) {
        self.score = 0;
    }
}
