use orbsim::{ScenarioConfig, Scenario};
use orbsim::bench_substeps;

use clap::Parser;
use anyhow::{Context, Result};

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file, looked up under `scenarios/` unless it is an existing path
    #[arg(short, long, default_value = "solar_system.yaml")]
    file_name: String,

    /// Run the central-mass stability search instead of a plain run
    #[arg(long)]
    search: bool,

    /// Frames to run in plain mode
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Use a synthetic frame time (real seconds) instead of the wall clock
    #[arg(long)]
    fixed_frame: Option<f64>,

    /// Time the integrator and exit
    #[arg(long)]
    bench: bool,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let direct = PathBuf::from(file_name);
    let config_path = if direct.is_file() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };

    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg = ScenarioConfig::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

/// Advance one frame, pacing to roughly 60 fps when following the wall clock
fn frame(scenario: &mut Scenario, fixed_frame: Option<f64>) -> Option<orbsim::TrialResolved> {
    match fixed_frame {
        Some(secs) => scenario.tick_with(secs),
        None => {
            thread::sleep(Duration::from_millis(16));
            scenario.tick()
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    if args.bench {
        bench_substeps();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg).context("invalid scenario")?;
    tracing::info!(file = %args.file_name, bodies = scenario.bodies().len(), "scenario loaded");

    if args.search {
        // Nothing can unpause a headless run
        if scenario.clock().is_paused() {
            tracing::warn!("scenario starts paused, unpausing for the search");
            scenario.toggle_pause();
        }
        scenario.start_search();
        loop {
            if let Some(resolved) = frame(&mut scenario, args.fixed_frame) {
                println!("trial {}: mass {:e} kg -> {:?}", resolved.trial, resolved.mass, resolved.outcome);
                if let Some(report) = resolved.report {
                    println!("{report}");
                    break;
                }
            }
        }
    } else {
        for _ in 0..args.frames {
            frame(&mut scenario, args.fixed_frame);
        }
        let clock = scenario.clock();
        tracing::info!(
            simulated_days = clock.total_time() / 86_400.0,
            fps = clock.fps(),
            ups = clock.ups(),
            "run finished"
        );
        for b in scenario.bodies() {
            println!(
                "{:<10} {:<6} r = {:.4} AU  x = ({:.4}, {:.4})  |v| = {:.1} m/s  rot = {:.1} deg",
                b.name, b.kind.name(), b.distance_from_origin(), b.x.x, b.x.y, b.v.norm(), b.rotation
            );
        }
    }

    Ok(())
}
