//! Intersection topology and geometry
//!
//! Describes which arms exist for the active template and the reference
//! points (center, stop lines, lane centerlines) every other module measures
//! against.

use anyhow::{bail, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::types::{Direction, Position, Rect, SPAWN_OFFSET, WORLD_HEIGHT, WORLD_WIDTH};

/// Total width of both lanes
pub const ROAD_WIDTH: f32 = 220.0;

/// Width of a single lane
pub const LANE_WIDTH: f32 = ROAD_WIDTH / 2.0;

/// Distance from the intersection center to each stop line
pub const STOP_OFFSET: f32 = ROAD_WIDTH / 2.0 + 15.0;

/// Distance from the road edge to the traffic light housing
const LIGHT_SIDE_GAP: f32 = 35.0;

/// Distance from the stop line back to the traffic light housing
const LIGHT_STOP_GAP: f32 = 30.0;

/// Intersection template selectable by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Template {
    /// Full four-way cross
    #[default]
    Cross,
    /// Three-way junction without the north arm
    T,
}

impl Template {
    pub fn name(self) -> &'static str {
        match self {
            Template::Cross => "cross",
            Template::T => "t",
        }
    }

    fn arms(self) -> BTreeMap<Direction, bool> {
        Direction::ALL
            .iter()
            .map(|&d| (d, !(self == Template::T && d == Direction::N)))
            .collect()
    }

    /// The template whose arms match `arms` exactly
    fn from_arms(arms: &BTreeMap<Direction, bool>) -> Option<Self> {
        [Template::Cross, Template::T]
            .into_iter()
            .find(|template| template.arms() == *arms)
    }
}

impl FromStr for Template {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cross" | "+" => Ok(Template::Cross),
            "t" => Ok(Template::T),
            other => bail!("Unknown intersection template '{}' (expected 'cross' or 't')", other),
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Road layout of a single intersection
#[derive(Debug, Clone)]
pub struct RoadLayout {
    pub template: Template,
    has_arm: BTreeMap<Direction, bool>,
    pub width: f32,
    pub height: f32,
}

impl RoadLayout {
    pub fn new(template: Template) -> Result<Self> {
        Self::with_arms(template.arms())
    }

    /// Build a layout from an explicit arm map.
    ///
    /// Directions missing from the map count as absent. The template label
    /// is derived from the arms. Fails when fewer than three arms remain or
    /// when no template has exactly these arms.
    pub fn with_arms(arms: BTreeMap<Direction, bool>) -> Result<Self> {
        let has_arm: BTreeMap<Direction, bool> = Direction::ALL
            .iter()
            .map(|d| (*d, arms.get(d).copied().unwrap_or(false)))
            .collect();

        let present = has_arm.values().filter(|ok| **ok).count();
        if present < 3 {
            bail!("Intersection needs at least 3 arms, got {}", present);
        }

        let Some(template) = Template::from_arms(&has_arm) else {
            let missing: Vec<&str> = has_arm
                .iter()
                .filter(|(_, ok)| !**ok)
                .map(|(d, _)| d.name())
                .collect();
            bail!("No intersection template lacks exactly the {:?} arm(s)", missing);
        };

        Ok(Self {
            template,
            has_arm,
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
        })
    }

    pub fn has_arm(&self, direction: Direction) -> bool {
        self.has_arm.get(&direction).copied().unwrap_or(false)
    }

    /// Directions vehicles may spawn from, in N, S, W, E order
    pub fn allowed_directions(&self) -> Vec<Direction> {
        Direction::ALL
            .iter()
            .copied()
            .filter(|d| self.has_arm(*d))
            .collect()
    }

    pub fn center(&self) -> Position {
        Position::new((self.width / 2.0).floor(), (self.height / 2.0).floor())
    }

    pub fn lane_half_width(&self) -> f32 {
        LANE_WIDTH / 2.0
    }

    pub fn stop_offset(&self) -> f32 {
        STOP_OFFSET
    }

    /// The square every crossing movement passes through
    pub fn intersection_rect(&self) -> Rect {
        Rect::centered(self.center(), ROAD_WIDTH, ROAD_WIDTH)
    }

    /// Coordinate of the stop line along the travel axis of `direction`
    pub fn stop_line(&self, direction: Direction) -> f32 {
        let center = direction.along(&self.center());
        center - direction.sign() * STOP_OFFSET
    }

    /// Coordinate of the travel-axis center line (where turns happen)
    pub fn center_line(&self, direction: Direction) -> f32 {
        direction.along(&self.center())
    }

    /// Cross-axis coordinate of the lane used by vehicles of `direction`
    pub fn lane_center(&self, direction: Direction) -> f32 {
        let c = self.center();
        let lane = self.lane_half_width();
        match direction {
            Direction::N => c.x - lane,
            Direction::S => c.x + lane,
            Direction::W => c.y + lane,
            Direction::E => c.y - lane,
        }
    }

    /// Where a vehicle entering from `direction` appears
    pub fn spawn_point(&self, direction: Direction) -> Position {
        let lane = self.lane_center(direction);
        match direction {
            Direction::N => Position::new(lane, -SPAWN_OFFSET),
            Direction::S => Position::new(lane, self.height + SPAWN_OFFSET),
            Direction::W => Position::new(-SPAWN_OFFSET, lane),
            Direction::E => Position::new(self.width + SPAWN_OFFSET, lane),
        }
    }

    /// Housing position of the traffic light guarding `direction`
    pub fn light_position(&self, direction: Direction) -> Position {
        let c = self.center();
        let side = ROAD_WIDTH / 2.0 + LIGHT_SIDE_GAP;
        let back = STOP_OFFSET + LIGHT_STOP_GAP;
        match direction {
            Direction::N => Position::new(c.x - side, c.y - back),
            Direction::S => Position::new(c.x + side, c.y + back),
            Direction::W => Position::new(c.x - back, c.y + side),
            Direction::E => Position::new(c.x + back, c.y - side),
        }
    }

    /// True when `position` lies outside the visible area by more than `margin`
    pub fn is_outside(&self, position: &Position, margin: f32) -> bool {
        position.x < -margin
            || position.x > self.width + margin
            || position.y < -margin
            || position.y > self.height + margin
    }
}
