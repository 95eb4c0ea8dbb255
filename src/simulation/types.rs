//! Core types for the intersection simulation
//!
//! These are standalone types that don't depend on Bevy.

use std::fmt;

/// Width of the simulated area in world units
pub const WORLD_WIDTH: f32 = 900.0;

/// Height of the simulated area in world units
pub const WORLD_HEIGHT: f32 = 700.0;

/// Vehicle footprint (across, along) the travel axis
pub const VEHICLE_SIZE: (f32, f32) = (22.0, 38.0);

/// Distance beyond the visible area at which vehicles are culled
pub const CULL_MARGIN: f32 = 80.0;

/// Distance outside the visible area where vehicles appear
pub const SPAWN_OFFSET: f32 = 50.0;

/// Compass arm of the intersection.
///
/// A vehicle's direction names the arm it entered from, so an `N` vehicle
/// drives towards increasing `y` and leaves through the south arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    N,
    S,
    W,
    E,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::N, Direction::S, Direction::W, Direction::E];

    /// The arm a vehicle of this direction exits through when driving straight
    pub fn opposite(self) -> Direction {
        match self {
            Direction::N => Direction::S,
            Direction::S => Direction::N,
            Direction::W => Direction::E,
            Direction::E => Direction::W,
        }
    }

    pub fn group(self) -> ApproachGroup {
        match self {
            Direction::N | Direction::S => ApproachGroup::Vertical,
            Direction::W | Direction::E => ApproachGroup::Horizontal,
        }
    }

    pub fn is_vertical(self) -> bool {
        self.group() == ApproachGroup::Vertical
    }

    /// Unit step along the travel axis: +1 towards larger coordinates
    pub fn sign(self) -> f32 {
        match self {
            Direction::N | Direction::W => 1.0,
            Direction::S | Direction::E => -1.0,
        }
    }

    /// Coordinate of `position` along this direction's travel axis
    pub fn along(self, position: &Position) -> f32 {
        if self.is_vertical() {
            position.y
        } else {
            position.x
        }
    }

    /// How far `position` has progressed in the direction of travel
    pub fn progress(self, position: &Position) -> f32 {
        self.along(position) * self.sign()
    }

    /// Velocity vector for the given speed
    pub fn velocity(self, speed: f32) -> Position {
        if self.is_vertical() {
            Position::new(0.0, speed * self.sign())
        } else {
            Position::new(speed * self.sign(), 0.0)
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::N => "N",
            Direction::S => "S",
            Direction::W => "W",
            Direction::E => "E",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of approaches that always share a light state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApproachGroup {
    /// North and south arms
    Vertical,
    /// West and east arms
    Horizontal,
}

impl ApproachGroup {
    pub fn name(self) -> &'static str {
        match self {
            ApproachGroup::Vertical => "vertical",
            ApproachGroup::Horizontal => "horizontal",
        }
    }
}

impl fmt::Display for ApproachGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A unique identifier for vehicles, assigned in spawn order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(pub usize);

/// A 2D position in screen units (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn centered(center: Position, width: f32, height: f32) -> Self {
        Self::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            width,
            height,
        )
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Strict overlap test; rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }
}
