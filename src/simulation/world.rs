//! Main simulation world that ties everything together
//!
//! This is the entry point for running the intersection simulation
//! without any Bevy dependencies. One call to [`SimWorld::tick`] runs the
//! whole step: lights, spawning, vehicle decisions, lane blocking and the
//! collision / jam / win checks, in that order.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use ordered_float::OrderedFloat;
use sorted_vec::SortedVec;
use std::collections::BTreeMap;

use super::command::Command;
use super::config::SimConfig;
use super::controller::IntersectionController;
use super::factory::{create_vehicle, spawn_random_vehicle};
use super::game_state::{GameState, LossReason, Outcome};
use super::rng::SimRng;
use super::road::{RoadLayout, Template};
use super::stats::SimStats;
use super::traffic_light::LightState;
use super::types::{ApproachGroup, Direction, Position, VehicleId};
use super::vehicle::{PriorityMarker, SimVehicle, VehicleKind, VehicleUpdateResult, WorldView};

/// Read-only view of a vehicle handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleSnapshot {
    pub id: VehicleId,
    pub position: Position,
    pub direction: Direction,
    pub kind: VehicleKind,
    pub is_waiting: bool,
}

/// Snapshot of lights and priority vehicles taken before a vehicle pass
fn build_view<'a>(
    layout: &'a RoadLayout,
    controller: &IntersectionController,
    vehicles: &[SimVehicle],
) -> WorldView<'a> {
    WorldView {
        layout,
        vertical: controller.group_state(ApproachGroup::Vertical),
        horizontal: controller.group_state(ApproachGroup::Horizontal),
        priority_vehicles: vehicles
            .iter()
            .filter(|v| v.is_priority())
            .map(|v| PriorityMarker {
                direction: v.direction,
                position: v.position,
            })
            .collect(),
    }
}

/// The main simulation world
pub struct SimWorld {
    /// Topology and geometry of the active template
    pub layout: RoadLayout,

    /// Signal plan driving both approach groups
    pub controller: IntersectionController,

    /// Active vehicles in spawn order
    pub vehicles: Vec<SimVehicle>,

    pub config: SimConfig,

    /// Survival timer and outcome
    pub game_state: GameState,

    pub stats: SimStats,

    /// Time since the last spawn attempt
    spawn_timer: f32,

    /// Next ID to assign
    next_id: usize,

    /// Simulation time, including time after the run ended
    pub time: f32,

    rng: SimRng,
}

impl SimWorld {
    fn new_internal(layout: RoadLayout, config: SimConfig, rng: SimRng) -> Self {
        let controller = IntersectionController::for_layout(&layout);
        Self {
            layout,
            controller,
            vehicles: Vec::new(),
            config,
            game_state: GameState::new(),
            stats: SimStats::default(),
            spawn_timer: 0.0,
            next_id: 0,
            time: 0.0,
            rng,
        }
    }

    pub fn new(template: Template) -> Result<Self> {
        Self::with_config(template, SimConfig::default(), None)
    }

    /// Create a new SimWorld with a seeded RNG for reproducible simulations
    pub fn new_with_seed(template: Template, seed: u64) -> Result<Self> {
        Self::with_config(template, SimConfig::default(), Some(seed))
    }

    pub fn with_config(template: Template, config: SimConfig, seed: Option<u64>) -> Result<Self> {
        let layout = RoadLayout::new(template)?;
        Ok(Self::with_layout(layout, config, seed))
    }

    /// Create a world for a custom (already validated) layout
    pub fn with_layout(layout: RoadLayout, config: SimConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SimRng::from_seed(seed),
            None => SimRng::unseeded(),
        };
        Self::new_internal(layout, config, rng)
    }

    fn next_vehicle_id(&mut self) -> VehicleId {
        let id = VehicleId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawn a vehicle of the given kind at the entry point of `direction`
    pub fn spawn_vehicle(&mut self, direction: Direction, kind: VehicleKind) -> VehicleId {
        let id = self.next_vehicle_id();
        let vehicle = create_vehicle(id, kind, direction, &self.layout);
        self.add_vehicle(vehicle)
    }

    /// Place a vehicle at an arbitrary position, for scripted scenarios
    pub fn insert_vehicle(
        &mut self,
        kind: VehicleKind,
        direction: Direction,
        position: Position,
    ) -> VehicleId {
        let id = self.next_vehicle_id();
        self.add_vehicle(SimVehicle::new(id, kind, position, direction))
    }

    fn add_vehicle(&mut self, vehicle: SimVehicle) -> VehicleId {
        let id = vehicle.id;
        debug!(
            "Spawned {} {:?} from {} at ({:.1}, {:.1})",
            vehicle.kind, id, vehicle.direction, vehicle.position.x, vehicle.position.y
        );
        self.stats.record_spawn(vehicle.kind);
        self.vehicles.push(vehicle);
        id
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&SimVehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    pub fn vehicle_mut(&mut self, id: VehicleId) -> Option<&mut SimVehicle> {
        self.vehicles.iter_mut().find(|v| v.id == id)
    }

    /// Main simulation tick
    pub fn tick(&mut self, delta_secs: f32) {
        if self.game_state.is_over() {
            return;
        }

        self.time += delta_secs;

        if self.controller.advance(delta_secs) {
            self.stats.phase_changes += 1;
        }

        self.spawn_vehicles(delta_secs);

        self.update_vehicles(delta_secs);
        self.vehicles.retain(|v| v.alive);

        self.update_blocking();

        if let Some((a, b)) = self.find_collision() {
            info!("CRASH! {:?} and {:?} collided in the intersection", a, b);
            self.game_state.lose(LossReason::Collision);
            return;
        }

        let waiting = self.waiting_count();
        self.stats.peak_waiting = self.stats.peak_waiting.max(waiting);
        if waiting >= self.config.jam_threshold {
            info!("JAM! {} vehicles waiting", waiting);
            self.game_state.lose(LossReason::Jam);
            return;
        }

        if self.game_state.survive(delta_secs, self.config.win_time) {
            info!("YOU WIN! Survived {:.1}s", self.game_state.time_survived);
        }
    }

    /// Attempt a spawn every `spawn_interval` seconds
    fn spawn_vehicles(&mut self, delta_secs: f32) {
        self.spawn_timer += delta_secs;
        if self.spawn_timer < self.config.spawn_interval {
            return;
        }
        self.spawn_timer = 0.0;

        if self.rng.unit() >= self.config.spawn_probability {
            return;
        }

        let allowed = self.layout.allowed_directions();
        let Some(&direction) = self.rng.choose(&allowed) else {
            return;
        };

        let id = self.next_vehicle_id();
        let vehicle = spawn_random_vehicle(id, direction, &self.layout, &mut self.rng);
        self.add_vehicle(vehicle);
    }

    /// Update all vehicles in spawn order against one snapshot
    fn update_vehicles(&mut self, delta_secs: f32) {
        let view = build_view(&self.layout, &self.controller, &self.vehicles);

        for vehicle in &mut self.vehicles {
            match vehicle.update(delta_secs, &view, &mut self.rng) {
                VehicleUpdateResult::Turned(direction) => {
                    debug!("{:?} turned towards {}", vehicle.id, direction);
                    self.stats.turns += 1;
                }
                VehicleUpdateResult::Despawn => {
                    self.stats.vehicles_exited += 1;
                }
                VehicleUpdateResult::Held | VehicleUpdateResult::Continue => {}
            }
        }
    }

    /// Recompute following-distance blocking for every lane.
    ///
    /// Vehicles are grouped by direction and ordered lead-first; a follower
    /// is blocked while its gap to the vehicle ahead is below the follow gap.
    fn update_blocking(&mut self) {
        let mut lanes: BTreeMap<Direction, Vec<(OrderedFloat<f32>, usize)>> = BTreeMap::new();
        for (index, vehicle) in self.vehicles.iter().enumerate() {
            let progress = vehicle.direction.progress(&vehicle.position);
            lanes
                .entry(vehicle.direction)
                .or_default()
                .push((OrderedFloat(-progress), index));
        }

        for (direction, entries) in lanes {
            let ordered = SortedVec::from_unsorted(entries);
            let mut ahead: Option<usize> = None;

            for &(_, index) in ordered.iter() {
                let blocked = match ahead {
                    None => false,
                    Some(front) => {
                        let gap = (direction.along(&self.vehicles[front].position)
                            - direction.along(&self.vehicles[index].position))
                        .abs();
                        gap < self.config.follow_gap
                    }
                };
                self.vehicles[index].blocked = blocked;
                ahead = Some(index);
            }
        }
    }

    /// First pair of vehicles overlapping each other inside the intersection
    fn find_collision(&self) -> Option<(VehicleId, VehicleId)> {
        let square = self.layout.intersection_rect();
        let inside: Vec<&SimVehicle> = self
            .vehicles
            .iter()
            .filter(|v| v.rect().intersects(&square))
            .collect();

        for (i, a) in inside.iter().enumerate() {
            for b in &inside[i + 1..] {
                if a.rect().intersects(&b.rect()) {
                    return Some((a.id, b.id));
                }
            }
        }
        None
    }

    pub fn waiting_count(&self) -> usize {
        self.vehicles.iter().filter(|v| v.is_waiting()).count()
    }

    /// Manual "advance phase" command; ignored once the run has ended
    pub fn force_advance_phase(&mut self) {
        if self.game_state.is_over() {
            warn!("Ignoring phase advance: run already ended ({})", self.outcome());
            return;
        }
        self.controller.force_advance();
        self.stats.manual_advances += 1;
        self.stats.phase_changes += 1;
    }

    /// Rebuild the intersection for `template` and clear all runtime state
    pub fn reset(&mut self, template: Template) -> Result<()> {
        self.layout = RoadLayout::new(template)
            .with_context(|| format!("Cannot reset to '{}' intersection", template))?;
        self.controller = IntersectionController::for_layout(&self.layout);
        self.vehicles.clear();
        self.game_state = GameState::new();
        self.stats = SimStats::default();
        self.spawn_timer = 0.0;
        self.time = 0.0;
        info!("Reset to '{}' intersection", template);
        Ok(())
    }

    /// Apply a queued command; must be called between ticks
    pub fn apply_command(&mut self, command: Command) -> Result<()> {
        match command {
            Command::AdvancePhase => self.force_advance_phase(),
            Command::Reset(template) => self.reset(template)?,
        }
        Ok(())
    }

    pub fn group_light_state(&self, group: ApproachGroup) -> LightState {
        self.controller.group_state(group)
    }

    pub fn vehicle_snapshots(&self) -> Vec<VehicleSnapshot> {
        self.vehicles
            .iter()
            .map(|v| VehicleSnapshot {
                id: v.id,
                position: v.position,
                direction: v.direction,
                kind: v.kind,
                is_waiting: v.is_waiting(),
            })
            .collect()
    }

    pub fn outcome(&self) -> Outcome {
        self.game_state.outcome
    }

    /// Print a summary of the world state
    pub fn print_summary(&self) {
        println!("=== Intersection Summary ===");
        println!("Template: {}", self.layout.template);
        println!("{}", self.game_state.summary(self.config.win_time));
        println!(
            "Phase: {} (vertical={}, horizontal={}, {:.1}s elapsed)",
            self.controller.phase_index(),
            self.group_light_state(ApproachGroup::Vertical),
            self.group_light_state(ApproachGroup::Horizontal),
            self.controller.elapsed()
        );
        println!(
            "Vehicles: {} | Waiting: {}/{}",
            self.vehicles.len(),
            self.waiting_count(),
            self.config.jam_threshold
        );

        if !self.vehicles.is_empty() {
            println!("--- Active Vehicles ---");
            for vehicle in &self.vehicles {
                println!(
                    "  {} {:?}: dir={}, position=({:.1}, {:.1}){}{}",
                    vehicle.kind,
                    vehicle.id.0,
                    vehicle.direction,
                    vehicle.position.x,
                    vehicle.position.y,
                    if vehicle.blocked { ", blocked" } else { "" },
                    if vehicle.should_stop_cached { ", stopped" } else { "" },
                );
            }
        }

        println!("--- Stats ---");
        println!(
            "  Spawned: {} (cars={}, ambulances={}, police={})",
            self.stats.vehicles_spawned,
            self.stats.spawned(VehicleKind::Car),
            self.stats.spawned(VehicleKind::Ambulance),
            self.stats.spawned(VehicleKind::PoliceCar)
        );
        println!(
            "  Exited: {} ({:.1}%) | Turns: {} | Phase changes: {} (manual: {})",
            self.stats.vehicles_exited,
            self.stats.throughput_rate(),
            self.stats.turns,
            self.stats.phase_changes,
            self.stats.manual_advances
        );
    }

    /// Draw a visual map of the intersection in the terminal
    pub fn draw_map(&self) {
        // World units per character
        let scale_x = 10.0;
        let scale_y = 20.0;
        let width = (self.layout.width / scale_x) as usize;
        let height = (self.layout.height / scale_y) as usize;

        let mut grid = vec![vec![' '; width]; height];

        let to_grid = |position: &Position| -> Option<(usize, usize)> {
            if position.x < 0.0
                || position.y < 0.0
                || position.x >= self.layout.width
                || position.y >= self.layout.height
            {
                return None;
            }
            let col = ((position.x / scale_x) as usize).min(width - 1);
            let row = ((position.y / scale_y) as usize).min(height - 1);
            Some((row, col))
        };

        // Road surface
        let center = self.layout.center();
        let square = self.layout.intersection_rect();
        for (row, line) in grid.iter_mut().enumerate() {
            for (col, cell) in line.iter_mut().enumerate() {
                let x = (col as f32 + 0.5) * scale_x;
                let y = (row as f32 + 0.5) * scale_y;
                let in_vertical = x >= square.left && x < square.right();
                let in_horizontal = y >= square.top && y < square.bottom();

                let on_road = (in_vertical && in_horizontal)
                    || (in_vertical && y < center.y && self.layout.has_arm(Direction::N))
                    || (in_vertical && y >= center.y && self.layout.has_arm(Direction::S))
                    || (in_horizontal && x < center.x && self.layout.has_arm(Direction::W))
                    || (in_horizontal && x >= center.x && self.layout.has_arm(Direction::E));

                if in_vertical && in_horizontal {
                    *cell = '+';
                } else if on_road {
                    *cell = '.';
                }
            }
        }

        // Lights
        for light in self.controller.all_lights() {
            if let Some((row, col)) = to_grid(&light.position) {
                grid[row][col] = match light.state() {
                    LightState::Red => 'R',
                    LightState::RedYellow => 'r',
                    LightState::Yellow => 'Y',
                    LightState::Green => 'G',
                };
            }
        }

        // Vehicles
        for vehicle in &self.vehicles {
            if let Some((row, col)) = to_grid(&vehicle.position) {
                let symbol = match vehicle.kind {
                    VehicleKind::Car => 'C',
                    VehicleKind::Ambulance => 'A',
                    VehicleKind::PoliceCar => 'P',
                };
                grid[row][col] = if vehicle.is_waiting() {
                    symbol.to_ascii_lowercase()
                } else {
                    symbol
                };
            }
        }

        println!("\n=== Intersection Map ===");
        println!("Legend: C=Car, A=Ambulance, P=Police (lowercase=waiting), R/r/Y/G=Light, .=Road, +=Intersection");
        println!();
        for row in &grid {
            let line: String = row.iter().collect();
            println!("{}", line);
        }
        println!();
    }
}
