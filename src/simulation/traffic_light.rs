//! Traffic light states and a single light head

use std::fmt;

use super::types::{ApproachGroup, Position};

/// Default period of a light that cycles on its own timer
pub const DEFAULT_CYCLE_TIME: f32 = 3.0;

/// State shown by a traffic light
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightState {
    Red,
    RedYellow,
    Yellow,
    Green,
}

/// Which lamps of a three-lamp head are lit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lamps {
    pub red: bool,
    pub yellow: bool,
    pub green: bool,
}

impl LightState {
    /// Fixed cycle: RED -> RED_YELLOW -> GREEN -> YELLOW -> RED
    pub fn next(self) -> LightState {
        match self {
            LightState::Red => LightState::RedYellow,
            LightState::RedYellow => LightState::Green,
            LightState::Green => LightState::Yellow,
            LightState::Yellow => LightState::Red,
        }
    }

    /// Canonical name used when comparing states across components
    pub fn name(self) -> &'static str {
        match self {
            LightState::Red => "RED",
            LightState::RedYellow => "RED_YELLOW",
            LightState::Yellow => "YELLOW",
            LightState::Green => "GREEN",
        }
    }

    /// Display color; RED_YELLOW has none because two lamps are lit
    pub fn color(self) -> Option<(u8, u8, u8)> {
        match self {
            LightState::Red => Some((200, 0, 0)),
            LightState::RedYellow => None,
            LightState::Yellow => Some((230, 230, 0)),
            LightState::Green => Some((0, 200, 0)),
        }
    }

    pub fn lamps(self) -> Lamps {
        match self {
            LightState::Red => Lamps {
                red: true,
                ..Lamps::default()
            },
            LightState::RedYellow => Lamps {
                red: true,
                yellow: true,
                ..Lamps::default()
            },
            LightState::Yellow => Lamps {
                yellow: true,
                ..Lamps::default()
            },
            LightState::Green => Lamps {
                green: true,
                ..Lamps::default()
            },
        }
    }

    /// Vehicles facing a red-like light must stop before the line
    pub fn is_red_like(self) -> bool {
        matches!(self, LightState::Red | LightState::RedYellow)
    }
}

impl fmt::Display for LightState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single light head guarding one arm
#[derive(Debug, Clone)]
pub struct TrafficLight {
    pub position: Position,
    pub group: ApproachGroup,
    state: LightState,
    timer: f32,
    pub cycle_time: f32,
}

impl TrafficLight {
    pub fn new(position: Position, group: ApproachGroup) -> Self {
        Self {
            position,
            group,
            state: LightState::Red,
            timer: 0.0,
            cycle_time: DEFAULT_CYCLE_TIME,
        }
    }

    /// Advance the light's own cycle timer.
    ///
    /// Only used for lights that are not driven by an intersection
    /// controller.
    pub fn update(&mut self, delta_secs: f32) {
        self.timer += delta_secs;
        if self.timer >= self.cycle_time {
            self.timer = 0.0;
            self.state = self.state.next();
        }
    }

    pub fn switch_manual(&mut self) {
        self.timer = 0.0;
        self.state = self.state.next();
    }

    pub fn set_state(&mut self, state: LightState) {
        self.state = state;
        self.timer = 0.0;
    }

    pub fn state(&self) -> LightState {
        self.state
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }
}
