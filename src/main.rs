use anyhow::Result;
use clap::Parser;

use junction_sim::simulation::{self, Command, SimConfig, SimWorld, Template};

#[derive(Parser)]
#[command(name = "junction_sim")]
#[command(about = "Traffic light intersection game with optional UI")]
struct Cli {
    /// Run with the Bevy game engine UI
    #[arg(long)]
    ui: bool,

    /// Intersection template: "cross" or "t" (no north arm)
    #[arg(long, default_value = "cross")]
    template: Template,

    /// Number of simulation ticks to run in headless mode
    #[arg(long, default_value = "600")]
    ticks: u32,

    /// Time delta per tick in seconds
    #[arg(long, default_value = "0.05")]
    delta: f32,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// In headless mode, press "advance phase" every N seconds
    #[arg(long)]
    auto_advance: Option<f32>,

    /// Seconds to survive for a win
    #[arg(long, default_value_t = simulation::WIN_TIME)]
    win_time: f32,

    /// Number of waiting vehicles that causes a jam
    #[arg(long, default_value_t = simulation::JAM_THRESHOLD)]
    jam_threshold: usize,

    /// Chance of a vehicle appearing on each spawn attempt
    #[arg(long, default_value_t = simulation::SPAWN_PROBABILITY)]
    spawn_probability: f32,

    /// Pause between progress reports in headless mode, in milliseconds
    #[arg(long, default_value = "0")]
    sleep_ms: u64,
}

impl Cli {
    fn config(&self) -> SimConfig {
        SimConfig {
            win_time: self.win_time,
            jam_threshold: self.jam_threshold,
            spawn_probability: self.spawn_probability,
            ..SimConfig::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.ui {
        return launch_ui(&cli);
    }

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,junction_sim=info"),
    )
    .init();
    run_headless(&cli)
}

#[cfg(feature = "ui")]
fn launch_ui(cli: &Cli) -> Result<()> {
    let world = SimWorld::with_config(cli.template, cli.config(), cli.seed)?;
    run_with_ui(world);
    Ok(())
}

#[cfg(not(feature = "ui"))]
fn launch_ui(_cli: &Cli) -> Result<()> {
    anyhow::bail!("UI feature is not enabled. Rebuild with --features ui")
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(cli: &Cli) -> Result<()> {
    println!("Running intersection simulation in headless mode...");
    println!(
        "Template: {}, Ticks: {}, Delta: {}s",
        cli.template, cli.ticks, cli.delta
    );

    // Calculate how many ticks equal 1 second of simulation time
    let ticks_per_second = (1.0 / cli.delta).ceil().max(1.0) as u32;
    println!();

    let mut world = SimWorld::with_config(cli.template, cli.config(), cli.seed)?;

    println!("Initial state:");
    world.print_summary();
    world.draw_map();
    println!();

    let mut advance_timer = 0.0;
    let mut tick = 0;
    while tick < cli.ticks && !world.outcome().is_over() {
        let ticks_to_run = ticks_per_second.min(cli.ticks - tick);

        for _ in 0..ticks_to_run {
            tick += 1;

            // Commands are applied between ticks
            if let Some(period) = cli.auto_advance {
                advance_timer += cli.delta;
                if advance_timer >= period {
                    advance_timer = 0.0;
                    world.apply_command(Command::AdvancePhase)?;
                }
            }

            world.tick(cli.delta);
            if world.outcome().is_over() {
                break;
            }
        }

        // Print summary after running 1 second worth of ticks
        println!(
            "--- After tick {} ({:.1}s simulated time) ---",
            tick,
            tick as f32 * cli.delta
        );
        world.print_summary();
        world.draw_map();
        println!();

        if cli.sleep_ms > 0 && tick < cli.ticks {
            std::thread::sleep(std::time::Duration::from_millis(cli.sleep_ms));
        }
    }

    println!("=== Final State ===");
    world.print_summary();
    println!("RESULT: {}", world.outcome());
    Ok(())
}

#[cfg(feature = "ui")]
fn run_with_ui(world: SimWorld) {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;
    use junction_sim::ui;

    println!("Starting Intersection UI...");
    println!();
    println!("Controls:");
    println!("  SPACE       - Advance light phase");
    println!("  R           - Restart with the same template");
    println!("  1 / 2       - Restart as cross / T intersection");
    println!("  ESC         - Exit");
    println!();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: "warn,junction_sim=debug".to_string(),
                    level: bevy::log::Level::DEBUG,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Junction Sim - Traffic Light Master".into(),
                        resolution: (1280, 720).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .insert_resource(ui::SimWorldResource(world))
        .add_plugins(ui::IntersectionUIPlugin)
        .run();
}
