use std::process::Command;

fn run_headless(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_junction_sim"))
        .args(args)
        .env("RUST_LOG", "warn,junction_sim=info")
        .output()
        .expect("Failed to execute simulation")
}

/// Test that the simulation runs in headless mode without crashing
#[test]
fn test_headless_simulation_runs() {
    let output = run_headless(&["--seed", "1", "--ticks", "100"]);

    assert!(
        output.status.success(),
        "Simulation failed to run in headless mode. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("=== Final State ==="),
        "Simulation did not complete properly. stdout: {}",
        stdout
    );
    assert!(stdout.contains("RESULT: "), "Missing result line");
}

/// Test that the summary and map are printed
#[test]
fn test_simulation_summary_printed() {
    let output = run_headless(&["--seed", "5", "--ticks", "40", "--template", "t"]);
    assert!(output.status.success(), "Simulation failed to run");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Template: t"), "Missing template line");
    assert!(stdout.contains("=== Intersection Map ==="), "Missing map");
    assert!(stdout.contains("Spawned:"), "Missing spawn statistic");
    assert!(stdout.contains("Phase:"), "Missing phase line");
}

/// With no traffic the player always survives
#[test]
fn test_empty_intersection_is_won() {
    let output = run_headless(&["--spawn-probability", "0", "--ticks", "220"]);
    assert!(output.status.success(), "Simulation failed to run");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("RESULT: WON"), "stdout: {}", stdout);
}

/// The win log line goes through the logger on stderr
#[test]
fn test_win_is_logged() {
    let output = run_headless(&["--spawn-probability", "0", "--ticks", "220"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("YOU WIN!"), "stderr: {}", stderr);
}

#[test]
fn test_unknown_template_is_rejected() {
    let output = run_headless(&["--template", "roundabout"]);
    assert!(!output.status.success());
}
