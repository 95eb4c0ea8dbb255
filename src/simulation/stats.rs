//! Counters collected over a run

use std::collections::HashMap;

use super::vehicle::VehicleKind;

/// Simulation statistics, cleared on reset
#[derive(Debug, Clone, Default)]
pub struct SimStats {
    pub vehicles_spawned: u32,
    pub spawned_by_kind: HashMap<VehicleKind, u32>,
    /// Vehicles that drove off the visible area
    pub vehicles_exited: u32,
    pub turns: u32,
    pub phase_changes: u32,
    pub manual_advances: u32,
    /// Highest number of simultaneously waiting vehicles seen
    pub peak_waiting: usize,
}

impl SimStats {
    pub fn record_spawn(&mut self, kind: VehicleKind) {
        self.vehicles_spawned += 1;
        *self.spawned_by_kind.entry(kind).or_insert(0) += 1;
    }

    pub fn spawned(&self, kind: VehicleKind) -> u32 {
        self.spawned_by_kind.get(&kind).copied().unwrap_or(0)
    }

    /// Share of spawned vehicles that made it off screen
    pub fn throughput_rate(&self) -> f32 {
        if self.vehicles_spawned == 0 {
            return 0.0;
        }
        self.vehicles_exited as f32 / self.vehicles_spawned as f32 * 100.0
    }
}
