use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use evo_config::SimConfig;
use evo_core::Simulation;
use evo_types::{CreatureInfo, GenerationSummary};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "evo-cli")]
#[command(about = "Evolutionary grid simulation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the simulation for a number of ticks and print a summary.
    Run {
        #[arg(long)]
        config: Option<PathBuf>,
        /// Dotted-path config overrides, e.g. --set world.width=64
        #[arg(long = "set", value_name = "PATH=VALUE")]
        overrides: Vec<String>,
        #[arg(long, default_value_t = 300)]
        ticks: u32,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Single-step a paused simulation, optionally dumping creatures.
    Step {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long = "set", value_name = "PATH=VALUE")]
        overrides: Vec<String>,
        #[arg(long, default_value_t = 1)]
        ticks: u32,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value_t = false)]
        print_creatures: bool,
    },
    /// Measure raw tick throughput.
    Benchmark {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long = "set", value_name = "PATH=VALUE")]
        overrides: Vec<String>,
        #[arg(long, default_value_t = 1000)]
        ticks: u32,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long)]
        creatures: Option<u32>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Pretty,
    Json,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    ticks: u32,
    seed: u64,
    generation: u32,
    step: u32,
    population: u32,
    survivors: u32,
    avg_genome_length: u32,
    last_generation: Option<GenerationSummary>,
}

#[derive(Debug, Serialize)]
struct CreatureDump {
    #[serde(flatten)]
    info: CreatureInfo,
    genome: String,
}

#[derive(Debug, Serialize)]
struct StepSummary {
    ticks: u32,
    generation: u32,
    step: u32,
    population: u32,
}

#[derive(Debug, Serialize)]
struct BenchmarkSummary {
    ticks: u32,
    elapsed_ms: u128,
    avg_us_per_tick: f64,
    ticks_per_second: f64,
    final_population: u32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            overrides,
            ticks,
            seed,
            format,
            out,
        } => run_command(config, &overrides, ticks, seed, format, out),
        Commands::Step {
            config,
            overrides,
            ticks,
            seed,
            print_creatures,
        } => step_command(config, &overrides, ticks, seed, print_creatures),
        Commands::Benchmark {
            config,
            overrides,
            ticks,
            seed,
            creatures,
        } => benchmark_command(config, &overrides, ticks, seed, creatures),
    }
}

fn run_command(
    config_path: Option<PathBuf>,
    overrides: &[String],
    ticks: u32,
    seed: u64,
    format: OutputFormat,
    out: Option<PathBuf>,
) -> Result<()> {
    let cfg = load_config(config_path, overrides)?;
    let mut sim = Simulation::new(cfg, seed)?;

    sim.start();
    for _ in 0..ticks {
        sim.update();
    }
    sim.pause();

    let stats = sim.stats();
    let summary = RunSummary {
        ticks,
        seed,
        generation: stats.generation,
        step: stats.step,
        population: stats.population,
        survivors: stats.survivors,
        avg_genome_length: stats.avg_genome_length,
        last_generation: sim.last_generation_summary(),
    };

    match format {
        OutputFormat::Pretty => {
            let text = format!(
                "ticks={} seed={} generation={} step={} population={} survivors={} avg_genome_length={}",
                summary.ticks,
                summary.seed,
                summary.generation,
                summary.step,
                summary.population,
                summary.survivors,
                summary.avg_genome_length
            );
            write_output(text, out)?;
        }
        OutputFormat::Json => {
            let text = serde_json::to_string_pretty(&summary)?;
            write_output(text, out)?;
        }
    }

    Ok(())
}

fn step_command(
    config_path: Option<PathBuf>,
    overrides: &[String],
    ticks: u32,
    seed: u64,
    print_creatures: bool,
) -> Result<()> {
    let cfg = load_config(config_path, overrides)?;
    let mut sim = Simulation::new(cfg, seed)?;

    for _ in 0..ticks.max(1) {
        sim.step();
    }

    let stats = sim.stats();
    let summary = StepSummary {
        ticks: ticks.max(1),
        generation: stats.generation,
        step: stats.step,
        population: stats.population,
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    if print_creatures {
        let creatures: Vec<CreatureDump> = sim
            .creatures()
            .iter()
            .map(|c| CreatureDump {
                info: c.info(),
                genome: c.genome.to_hex_string(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&creatures)?);
    }

    Ok(())
}

fn benchmark_command(
    config_path: Option<PathBuf>,
    overrides: &[String],
    ticks: u32,
    seed: u64,
    creatures: Option<u32>,
) -> Result<()> {
    let mut cfg = load_config(config_path, overrides)?;
    if let Some(count) = creatures {
        cfg.population.initial_size = count;
    }

    let mut sim = Simulation::new(cfg, seed)?;
    sim.start();

    let ticks = ticks.max(1);
    let start = Instant::now();
    for _ in 0..ticks {
        sim.update();
    }
    let elapsed = start.elapsed();

    let summary = BenchmarkSummary {
        ticks,
        elapsed_ms: elapsed.as_millis(),
        avg_us_per_tick: elapsed.as_secs_f64() * 1_000_000.0 / f64::from(ticks),
        ticks_per_second: f64::from(ticks) / elapsed.as_secs_f64().max(f64::EPSILON),
        final_population: sim.stats().population,
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn load_config(path: Option<PathBuf>, overrides: &[String]) -> Result<SimConfig> {
    let mut cfg = match path {
        Some(path) => evo_config::load_config_from_path(&path)?,
        None => evo_config::default_config(),
    };

    for assignment in overrides {
        let (key, value) = evo_config::parse_path_assignment(assignment)?;
        cfg = evo_config::set_path(&cfg, &key, value)
            .with_context(|| format!("failed to apply override {assignment:?}"))?;
    }

    Ok(cfg)
}

fn write_output(text: String, out: Option<PathBuf>) -> Result<()> {
    if let Some(path) = out {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed creating output directory {}", parent.display()))?;
        }
        fs::write(&path, text).with_context(|| format!("failed writing {}", path.display()))?;
        println!("wrote output to {}", path.display());
    } else {
        println!("{text}");
    }
    Ok(())
}
