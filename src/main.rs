// Door Episodes - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/door-episodes simulate --episodes 5000
// $ ./target/release/door-episodes extract --data data/simulated_data.csv
// ```

use anyhow::{Context, Result};
use clap::Parser;
use door_episodes::episodes::{EpisodeReconstructor, ExtractionStatistics};
use door_episodes::simulation::{DatasetAssembler, LoggingConfig, LoggingGuard};
use door_episodes::storage::{read_events, write_episodes, write_events};
use door_episodes::types::config::{CliArgs, Command, ExtractArgs, SimulateArgs};
use door_episodes::types::SimulationConfig;
use std::process;
use tracing::{error, info, Level};

fn main() {
    let args = CliArgs::parse();

    // Keep the guard alive so file logs flush on exit
    let _guard = match init_logging(&args) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    let result = match &args.command {
        Command::Simulate(simulate) => run_simulate(simulate),
        Command::Extract(extract) => run_extract(extract),
    };

    if let Err(e) = result {
        error!("{:#}", e);
        process::exit(1);
    }
}

/// Initialize logging based on CLI flags
fn init_logging(args: &CliArgs) -> Result<LoggingGuard, Box<dyn std::error::Error + Send + Sync>> {
    let mut logging = if args.debug {
        LoggingConfig::new().with_level(Level::DEBUG).with_span_events()
    } else if args.verbose {
        LoggingConfig::new().with_level(Level::INFO)
    } else {
        // Default: minimal logging for normal users
        LoggingConfig::new().with_level(Level::WARN)
    };

    if args.log_json {
        logging = logging.with_json_format();
    }
    if let Some(dir) = &args.log_dir {
        logging = logging.with_file_logging(dir.clone());
    }

    logging.init()
}

/// Run the generation pipeline
fn run_simulate(args: &SimulateArgs) -> Result<()> {
    if args.print_config {
        let yaml = SimulationConfig::default()
            .print_yaml()
            .context("Failed to serialize default configuration")?;
        print!("{}", yaml);
        return Ok(());
    }

    info!("Starting door-access dataset generation");

    let config = SimulationConfig::from_cli_args(args)
        .with_context(|| format!("Failed to load configuration from '{}'", args.config))?;
    config.validate().context("Configuration validation failed")?;
    info!("Configuration loaded and validated successfully");

    if args.dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - no events will be generated.");
        print_configuration_summary(&config);
        return Ok(());
    }

    print_configuration_summary(&config);

    let mut assembler = DatasetAssembler::new(config).context("Failed to initialize generator")?;
    let events = assembler.generate().context("Dataset generation failed")?;

    write_events(&args.output, &events)
        .with_context(|| format!("Failed to write dataset to '{}'", args.output))?;

    let statistics = assembler.statistics();
    eprintln!("{}", statistics);
    println!("Dataset saved at '{}'", args.output);
    println!("Scenario counts: {}", statistics.scenario_counts_line());

    info!("Dataset generation completed successfully");
    Ok(())
}

/// Run the extraction pipeline
fn run_extract(args: &ExtractArgs) -> Result<()> {
    info!("Starting episode extraction from '{}'", args.data);

    let events = read_events(&args.data)
        .with_context(|| format!("Failed to read event data from '{}'", args.data))?;

    let episodes = EpisodeReconstructor::new().reconstruct(&events);
    write_episodes(&args.output, &episodes)
        .with_context(|| format!("Failed to write episode data to '{}'", args.output))?;

    let statistics = ExtractionStatistics::from_episodes(events.len(), &episodes);
    eprintln!("{}", statistics);
    println!("Episode data saved to {}", args.output);

    info!("Episode extraction completed successfully");
    Ok(())
}

/// Print configuration summary
fn print_configuration_summary(config: &SimulationConfig) {
    eprintln!("Configuration:");
    eprintln!("  Start Date: {}", config.simulation.start_date);
    eprintln!("  Episodes: {}", config.simulation.num_episodes);
    eprintln!("  Random Seed: {}", config.effective_seed());
    eprintln!("  Scenarios:");
    let total_weight: f64 = config.scenario_weights.values().sum();
    for (name, weight) in &config.scenario_weights {
        let share = if total_weight > 0.0 { weight / total_weight * 100.0 } else { 0.0 };
        match config.scenario(name) {
            Some(params) => eprintln!(
                "    {}: weight {} ({:.1}%), duration {}-{}s",
                name, weight, share, params.duration_range.min, params.duration_range.max
            ),
            None => eprintln!("    {}: weight {} ({:.1}%)", name, weight, share),
        }
    }
    eprintln!();
}
