//! Tunable simulation constants

/// Seconds between spawn attempts
pub const SPAWN_INTERVAL: f32 = 1.0;

/// Chance that a spawn attempt produces a vehicle
pub const SPAWN_PROBABILITY: f32 = 0.7;

/// Minimum gap to the vehicle ahead before a follower is blocked
pub const FOLLOW_GAP: f32 = 45.0;

/// How close to the stop line a vehicle halts on red
pub const STOP_MARGIN: f32 = 6.0;

/// Distance behind a priority vehicle within which others yield
pub const YIELD_DISTANCE: f32 = 90.0;

/// Number of simultaneously waiting vehicles that ends the run
pub const JAM_THRESHOLD: usize = 6;

/// Survival time that wins the run
pub const WIN_TIME: f32 = 10.0;

/// Run-level settings that can be overridden from the command line
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub spawn_interval: f32,
    pub spawn_probability: f32,
    pub follow_gap: f32,
    pub jam_threshold: usize,
    pub win_time: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            spawn_interval: SPAWN_INTERVAL,
            spawn_probability: SPAWN_PROBABILITY,
            follow_gap: FOLLOW_GAP,
            jam_threshold: JAM_THRESHOLD,
            win_time: WIN_TIME,
        }
    }
}

impl SimConfig {
    /// Configuration with spawning switched off, for scripted scenarios
    pub fn without_spawning() -> Self {
        Self {
            spawn_probability: 0.0,
            ..Self::default()
        }
    }
}
