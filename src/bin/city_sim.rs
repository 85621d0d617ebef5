//! 城市仿真运行器
//!
//! 读取场景文件（或使用默认场景），生成城市并逐 tick 推进仿真，
//! 结束时打印摘要，可选地写出最终快照。

use citysim_rs::config::{ScenarioSpec, run_scenario};
use citysim_rs::generator::CityGenerator;
use citysim_rs::rng::Seed;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "city-sim", about = "Run a city simulation scenario")]
struct Args {
    /// Path to scenario.json
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Override the scenario seed
    #[arg(long)]
    seed: Option<String>,

    /// Override the number of ticks
    #[arg(long)]
    ticks: Option<u64>,

    /// Override wall-clock seconds per tick
    #[arg(long)]
    delta_seconds: Option<f64>,

    /// Override simulated seconds per wall-clock second
    #[arg(long)]
    time_scale: Option<f64>,

    /// Output final snapshot JSON file
    #[arg(long)]
    snapshot_json: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    let mut spec = match &args.scenario {
        Some(path) => match ScenarioSpec::from_path(path) {
            Ok(spec) => spec,
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => ScenarioSpec::default(),
    };

    if let Some(seed) = args.seed {
        spec.seed = Some(Seed::from(seed));
    }
    if let Some(ticks) = args.ticks {
        spec.run.ticks = ticks;
    }
    if let Some(delta) = args.delta_seconds {
        spec.run.delta_seconds = delta;
    }
    if let Some(scale) = args.time_scale {
        spec.simulation.time_scale = scale;
    }

    let run = run_scenario(&CityGenerator::default(), &spec);
    let mut sim = run.simulation;

    println!(
        "done day={} hour={:.2} population={:.0} capacity={} stage={} vehicles={} actions_applied={} actions_ignored={} actions_skipped={}",
        sim.time().day,
        sim.time().hour,
        sim.population().total,
        sim.population().capacity,
        sim.stage().name(),
        sim.vehicles().len(),
        run.applied_actions,
        run.ignored_actions,
        run.skipped_actions
    );

    if let Some(path) = args.snapshot_json {
        let snapshot = sim.snapshot();
        let json = serde_json::to_string_pretty(&snapshot).expect("serialize snapshot");
        fs::write(&path, json).expect("write snapshot json");
        eprintln!("wrote snapshot to {}", path.display());
    }
    ExitCode::SUCCESS
}
