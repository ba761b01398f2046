use std::path::PathBuf;

use anyhow::{Context, Result};
use battlegen::{BattlefieldGenerator, GenerationOptions, MapPreset};
use clap::{Parser, ValueEnum};
use env_logger::{Builder, Env};
use log::info;

mod render;
mod seed;

use render::{render_ascii, render_summary};
use seed::{requested_seed, runtime_seed};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Summary,
    Ascii,
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Generation seed; 0 or absent picks a random one
    #[arg(short, long)]
    seed: Option<u64>,
    /// Arena preset: small, medium, large or boss-room
    #[arg(short, long, default_value_t = MapPreset::Medium)]
    preset: MapPreset,
    /// TOML file overriding the default generation options
    #[arg(short, long)]
    options: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
    format: OutputFormat,
}

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let options = match &args.options {
        Some(path) => GenerationOptions::load(path)
            .with_context(|| format!("Failed to load options file: {}", path.display()))?,
        None => GenerationOptions::default(),
    };

    let seed = requested_seed(args.seed).unwrap_or_else(|| {
        let seed = runtime_seed();
        info!("no seed given, using runtime seed {seed}");
        seed
    });

    let data = BattlefieldGenerator::new(seed, args.preset).with_options(options).generate();

    match args.format {
        OutputFormat::Summary => print!("{}", render_summary(&data)),
        OutputFormat::Ascii => {
            print!("{}", render_summary(&data));
            println!();
            print!("{}", render_ascii(&data));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&data)
                .context("Failed to serialize battlefield to JSON")?;
            println!("{json}");
        }
    }

    Ok(())
}
