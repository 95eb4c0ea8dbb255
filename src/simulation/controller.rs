//! Intersection controller driving both approach groups through a fixed
//! six-step phase cycle.

use log::debug;

use super::road::RoadLayout;
use super::traffic_light::{LightState, TrafficLight};
use super::types::{ApproachGroup, Direction};

/// One step of the signal plan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phase {
    pub vertical: LightState,
    pub horizontal: LightState,
    pub duration: f32,
}

impl Phase {
    const fn new(vertical: LightState, horizontal: LightState, duration: f32) -> Self {
        Self {
            vertical,
            horizontal,
            duration,
        }
    }

    pub fn state_for(&self, group: ApproachGroup) -> LightState {
        match group {
            ApproachGroup::Vertical => self.vertical,
            ApproachGroup::Horizontal => self.horizontal,
        }
    }
}

/// The signal plan, cycled in order
pub const PHASES: [Phase; 6] = [
    Phase::new(LightState::Green, LightState::Red, 4.0),
    Phase::new(LightState::Yellow, LightState::Red, 1.5),
    Phase::new(LightState::Red, LightState::RedYellow, 1.0),
    Phase::new(LightState::Red, LightState::Green, 4.0),
    Phase::new(LightState::Red, LightState::Yellow, 1.5),
    Phase::new(LightState::RedYellow, LightState::Red, 1.0),
];

/// Owns every light of the intersection and keeps each group in lockstep
#[derive(Debug, Clone)]
pub struct IntersectionController {
    vertical: Vec<TrafficLight>,
    horizontal: Vec<TrafficLight>,
    phase_index: usize,
    timer: f32,
}

impl IntersectionController {
    pub fn new(vertical: Vec<TrafficLight>, horizontal: Vec<TrafficLight>) -> Self {
        let mut controller = Self {
            vertical,
            horizontal,
            phase_index: 0,
            timer: 0.0,
        };
        controller.apply_phase();
        controller
    }

    /// Build one light per existing arm of the layout
    pub fn for_layout(layout: &RoadLayout) -> Self {
        let mut vertical = Vec::new();
        let mut horizontal = Vec::new();

        for direction in layout.allowed_directions() {
            let light = TrafficLight::new(layout.light_position(direction), direction.group());
            match direction.group() {
                ApproachGroup::Vertical => vertical.push(light),
                ApproachGroup::Horizontal => horizontal.push(light),
            }
        }

        Self::new(vertical, horizontal)
    }

    /// Accumulate elapsed time and move to the next phase once the current
    /// one has run its duration. At most one transition happens per call.
    /// Returns true when the phase changed.
    pub fn advance(&mut self, delta_secs: f32) -> bool {
        self.timer += delta_secs;
        if self.timer >= self.current_phase().duration {
            self.next_phase();
            true
        } else {
            false
        }
    }

    /// Move to the next phase immediately, ignoring the timer
    pub fn force_advance(&mut self) {
        self.next_phase();
    }

    /// Return to phase 0 with a fresh timer
    pub fn reset(&mut self) {
        self.phase_index = 0;
        self.timer = 0.0;
        self.apply_phase();
    }

    fn next_phase(&mut self) {
        self.timer = 0.0;
        self.phase_index = (self.phase_index + 1) % PHASES.len();
        self.apply_phase();
        debug!(
            "Phase {} -> vertical={}, horizontal={}",
            self.phase_index,
            self.current_phase().vertical,
            self.current_phase().horizontal
        );
    }

    fn apply_phase(&mut self) {
        let phase = self.current_phase();
        for light in &mut self.vertical {
            light.set_state(phase.vertical);
        }
        for light in &mut self.horizontal {
            light.set_state(phase.horizontal);
        }
    }

    pub fn current_phase(&self) -> Phase {
        PHASES[self.phase_index]
    }

    pub fn phase_index(&self) -> usize {
        self.phase_index
    }

    /// Time spent in the current phase
    pub fn elapsed(&self) -> f32 {
        self.timer
    }

    pub fn lights(&self, group: ApproachGroup) -> &[TrafficLight] {
        match group {
            ApproachGroup::Vertical => &self.vertical,
            ApproachGroup::Horizontal => &self.horizontal,
        }
    }

    /// All lights, vertical group first
    pub fn all_lights(&self) -> impl Iterator<Item = &TrafficLight> {
        self.vertical.iter().chain(self.horizontal.iter())
    }

    /// State shown to the given approach group.
    ///
    /// # Panics
    ///
    /// Panics if no light was registered for the group. A layout with at
    /// least three arms always has lights in both groups.
    pub fn group_state(&self, group: ApproachGroup) -> LightState {
        self.lights(group)
            .first()
            .map(TrafficLight::state)
            .unwrap_or_else(|| panic!("No traffic lights registered for the {} group", group))
    }

    pub fn state_for(&self, direction: Direction) -> LightState {
        self.group_state(direction.group())
    }
}
