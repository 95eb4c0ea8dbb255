//! Game state tracking: survival timer and the run's outcome

use std::fmt;

/// Why a run was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossReason {
    /// Two vehicles overlapped inside the intersection
    Collision,
    /// Too many vehicles were waiting at once
    Jam,
}

/// Current result of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    Running,
    Won,
    Lost(LossReason),
}

impl Outcome {
    pub fn is_over(&self) -> bool {
        !matches!(self, Outcome::Running)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Running => f.write_str("RUNNING"),
            Outcome::Won => f.write_str("WON"),
            Outcome::Lost(LossReason::Collision) => f.write_str("LOST (collision)"),
            Outcome::Lost(LossReason::Jam) => f.write_str("LOST (jam)"),
        }
    }
}

/// Game state that tracks player progress
#[derive(Debug, Clone, Default)]
pub struct GameState {
    /// Seconds survived without a loss
    pub time_survived: f32,

    pub outcome: Outcome,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_over()
    }

    pub fn lose(&mut self, reason: LossReason) {
        self.outcome = Outcome::Lost(reason);
    }

    /// Add survived time; returns true when this crosses the win threshold
    pub fn survive(&mut self, delta_secs: f32, win_time: f32) -> bool {
        self.time_survived += delta_secs;
        if self.time_survived >= win_time {
            self.outcome = Outcome::Won;
            true
        } else {
            false
        }
    }

    /// Progress towards the win time as a percentage
    pub fn progress(&self, win_time: f32) -> f32 {
        (self.time_survived / win_time * 100.0).min(100.0)
    }

    /// Get a summary string for display
    pub fn summary(&self, win_time: f32) -> String {
        format!(
            "Time: {:.1}/{:.0}s | Outcome: {}",
            self.time_survived, win_time, self.outcome
        )
    }
}
