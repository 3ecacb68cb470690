//! Move Resampler - offline replay and tuning tool
//!
//! Replays recorded drag traces through the move resampler on a simulated
//! vsync clock.

use move_resampler::app::cli::{Cli, Commands, ConfigAction};
use move_resampler::app::config::Config;
use move_resampler::replay::{replay, MoveTrace};
use move_resampler::time::vsync::{micros_to_secs, VsyncClock};
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = if let Some(path) = &cli.config {
        Config::load(path)?
    } else {
        Config::load_default()?
    };

    match cli.command {
        Commands::Replay {
            input,
            output,
            refresh_hz,
        } => {
            run_replay(&input, output.as_deref(), refresh_hz, &config)?;
        }
        Commands::Inspect { input } => {
            run_inspect(&input)?;
        }
        Commands::Config { action } => {
            run_config(action, &config)?;
        }
    }

    Ok(())
}

fn load_trace(input: &Path) -> anyhow::Result<MoveTrace> {
    if !input.exists() {
        anyhow::bail!("Trace file not found: {:?}", input);
    }
    let trace = MoveTrace::load(input)?;
    info!(
        "Loaded trace '{}' with {} samples",
        trace.metadata.name,
        trace.len()
    );
    Ok(trace)
}

fn run_replay(
    input: &Path,
    output: Option<&Path>,
    refresh_hz: Option<f64>,
    config: &Config,
) -> anyhow::Result<()> {
    let trace = load_trace(input)?;

    let refresh_hz = refresh_hz.unwrap_or(config.replay.refresh_hz);
    let mut clock = VsyncClock::from_refresh_rate(refresh_hz)?;
    if let Some(first) = trace.samples.first() {
        clock = clock.aligned_to(first.time_us);
    }

    let mut resampler = config.resampler.build();
    let report = replay(&trace, &mut resampler, &clock, config.replay.tail_us)?;

    if report.frames.is_empty() {
        warn!("Trace produced no frames");
    }

    println!("\nReplay Summary");
    println!("  Trace: {}", trace.metadata.name);
    println!("  Samples: {}", report.stats.sample_count);
    println!("  Frames: {} @ {:.1} Hz", report.stats.frame_count, clock.refresh_hz());
    println!("  Max step: {:.2} px", report.stats.max_step_px);
    println!("  Mean lag: {:.2} px", report.stats.mean_lag_px);

    if let Some(path) = output {
        report.save(path)?;
        info!("Saved replay report to {:?}", path);
    }

    Ok(())
}

fn run_inspect(input: &Path) -> anyhow::Result<()> {
    let trace = load_trace(input)?;

    println!("Trace: {}", trace.metadata.name);
    println!("  Source: {:?}", trace.metadata.source);
    if let Some(recorded_at) = trace.metadata.recorded_at {
        println!("  Recorded: {}", recorded_at);
    }
    println!("  Format: {}", trace.metadata.format_version);
    println!("  Samples: {}", trace.len());
    println!("  Duration: {:.3}s", micros_to_secs(trace.duration_us()));
    println!("  Time-ordered: {}", trace.is_sorted());
    if let (Some(first), Some(last)) = (trace.samples.first(), trace.samples.last()) {
        println!("  First: {}", first);
        println!("  Last: {}", last);
    }

    Ok(())
}

fn run_config(action: ConfigAction, config: &Config) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = config.to_toml()?;
            println!("Configuration ({:?}):\n", Config::default_path());
            println!("{}", toml_str);
        }
        ConfigAction::Init { force } => {
            let config_path = Config::default_path();

            if config_path.exists() && !force {
                anyhow::bail!(
                    "Config already exists at {:?}. Use --force to overwrite.",
                    config_path
                );
            }

            config.save_default()?;
            println!("Created config at {:?}", config_path);
            println!("\nConfig content:\n{}", config.to_toml()?);
        }
        ConfigAction::Path => {
            println!("{}", Config::default_path().display());
        }
    }

    Ok(())
}
