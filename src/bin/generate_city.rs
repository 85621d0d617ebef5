//! 城市生成
//!
//! 按种子生成一座城市，打印一行摘要，可选地把完整的城市 JSON 写到文件。

use citysim_rs::generator::{CityGenerator, GeneratorOverrides};
use citysim_rs::rng::Seed;
use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "generate-city", about = "Generate a deterministic city from a seed")]
struct Args {
    /// 城市种子；缺省时随机生成
    #[arg(long)]
    seed: Option<String>,

    /// 城市宽度（世界单位）
    #[arg(long)]
    width: Option<f64>,

    /// 城市高度（世界单位）
    #[arg(long)]
    height: Option<f64>,

    /// 网格单元边长
    #[arg(long)]
    block_size: Option<f64>,

    /// 输出城市 JSON 文件
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() {
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
    let overrides = GeneratorOverrides {
        width: args.width,
        height: args.height,
        block_size: args.block_size,
        ..Default::default()
    };

    let generator = CityGenerator::default();
    let city = generator.generate(args.seed.map(Seed::from), &overrides);

    println!(
        "city seed={} districts={} roads={} buildings={} parks={} population_capacity={} job_capacity={}",
        city.seed,
        city.districts.len(),
        city.roads.len(),
        city.buildings.len(),
        city.parks.len(),
        city.metadata.population_capacity,
        city.metadata.job_capacity
    );

    if let Some(path) = args.out {
        let json = serde_json::to_string_pretty(&city).expect("serialize city");
        fs::write(&path, json).expect("write city json");
        eprintln!("wrote city to {}", path.display());
    }
}
