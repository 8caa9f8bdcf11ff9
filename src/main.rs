//! Gazekit - Gaze Event Detection Engine
//!
//! Classifies gaze recordings into saccades and fixations and reports
//! per-trial descriptive statistics.

use gazekit::app::cli::{Cli, Commands, ConfigAction};
use gazekit::app::config::Config;
use gazekit::data::dataset::{Dataset, FixationSet};
use gazekit::data::sample::Sample;
use gazekit::pipeline::detector::{validate_samples, FixationDetector, ThresholdScope};
use gazekit::report;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    // Initialize tracing (--verbose enables debug-level output)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Load config
    let config = if let Some(path) = &cli.config {
        Config::load(path)?
    } else {
        Config::load_default()?
    };

    // Execute command
    match cli.command {
        Commands::Detect {
            input,
            output,
            lambda,
            no_smooth_coordinates,
            no_smooth_saccades,
            per_trial_threshold,
        } => {
            let mut detection = config.detection;
            if let Some(lambda) = lambda {
                detection.lambda = lambda;
            }
            if no_smooth_coordinates {
                detection.smooth_coordinates = false;
            }
            if no_smooth_saccades {
                detection.smooth_saccades = false;
            }
            if per_trial_threshold {
                detection.threshold_scope = ThresholdScope::PerTrial;
            }
            run_detect(&input, output, detection, &config)?;
        }
        Commands::Report { input, per_trial } => {
            run_report(&input, per_trial || config.report.per_trial, &config)?;
        }
        Commands::Validate { input } => {
            run_validate(&input)?;
        }
        Commands::Init { force } => {
            run_init(force, &config)?;
        }
        Commands::Config { action } => {
            run_config(action, &config)?;
        }
    }

    Ok(())
}

/// Load a samples file: either a full dataset envelope or a bare JSON
/// array of samples.
fn load_samples(input: &Path) -> anyhow::Result<Dataset> {
    if !input.exists() {
        anyhow::bail!("Samples file not found: {:?}", input);
    }

    match Dataset::load(input) {
        Ok(dataset) => Ok(dataset),
        Err(envelope_err) => {
            let content = std::fs::read_to_string(input)?;
            match serde_json::from_str::<Vec<Sample>>(&content) {
                Ok(samples) => {
                    let name = input
                        .file_stem()
                        .map(|s| s.to_string_lossy().to_string())
                        .unwrap_or_else(|| "samples".to_string());
                    Ok(Dataset::from_samples(name, None, samples))
                }
                Err(_) => anyhow::bail!("Failed to parse samples file: {}", envelope_err),
            }
        }
    }
}

fn run_detect(
    input: &Path,
    output: Option<std::path::PathBuf>,
    detection: gazekit::DetectorConfig,
    config: &Config,
) -> anyhow::Result<()> {
    info!("Detecting fixations in {:?}", input);

    let dataset = load_samples(input)?;
    info!(
        "Loaded dataset '{}' with {} samples across {} trial(s)",
        dataset.metadata.name, dataset.metadata.sample_count, dataset.metadata.trial_count
    );

    let detector = FixationDetector::new(detection);
    let fixations = detector.detect(&dataset.samples)?;
    info!("Detected {} fixation(s)", fixations.len());

    let result = FixationSet::from_fixations(Some(dataset.metadata.id), fixations);
    let output_path = output.unwrap_or_else(|| Cli::default_output_path(input));
    result.save(&output_path)?;
    info!("Saved fixations to {:?}", output_path);

    // Print summary
    println!("\nDetection complete");
    println!("  Samples:   {}", dataset.metadata.sample_count);
    println!("  Trials:    {}", dataset.metadata.trial_count);
    println!("  Fixations: {}", result.metadata.fixation_count);
    println!("  Output:    {:?}", output_path);

    let summary = report::summarize(&result.fixations)?;
    println!();
    print!(
        "{}",
        report::render(&summary, config.report.per_trial, config.report.precision)
    );

    Ok(())
}

fn run_report(input: &Path, per_trial: bool, config: &Config) -> anyhow::Result<()> {
    info!("Reporting on {:?}", input);

    if !input.exists() {
        anyhow::bail!("Fixations file not found: {:?}", input);
    }

    let set = FixationSet::load(input)?;
    if set.is_empty() {
        anyhow::bail!("Fixations file {:?} contains no fixations", input);
    }

    let summary = report::summarize(&set.fixations)?;
    print!(
        "{}",
        report::render(&summary, per_trial, config.report.precision)
    );

    Ok(())
}

fn run_validate(input: &Path) -> anyhow::Result<()> {
    info!("Validating {:?}", input);

    let dataset = load_samples(input)?;

    match validate_samples(&dataset.samples) {
        Ok(()) => {
            println!("Validation PASSED");
            println!(
                "  {} samples across {} trial(s)",
                dataset.metadata.sample_count, dataset.metadata.trial_count
            );
            Ok(())
        }
        Err(e) => {
            println!("Validation FAILED:");
            println!("  {}", e);
            anyhow::bail!("Validation failed")
        }
    }
}

fn run_init(force: bool, config: &Config) -> anyhow::Result<()> {
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

    Ok(())
}

fn run_config(action: ConfigAction, config: &Config) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            println!("{}", config.to_toml()?);
        }
        ConfigAction::Reset { force } => {
            if !force {
                println!("Will reset config at {:?} to defaults", Config::default_path());
                println!("Use --force to skip this prompt, or re-run with -f");
                return Ok(());
            }
            let defaults = Config::default();
            defaults.save_default()?;
            warn!("Config reset to defaults");
            println!("Config reset to defaults at {:?}", Config::default_path());
        }
    }
    Ok(())
}
