//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Gazekit - Detect fixations and saccades in gaze recordings
#[derive(Parser, Debug)]
#[command(name = "gazekit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect fixations in a samples file
    Detect {
        /// Input samples file (JSON dataset or bare sample array)
        #[arg(short, long)]
        input: PathBuf,

        /// Output fixations file (defaults to <input>_fixations.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the threshold multiplier from the config
        #[arg(short, long)]
        lambda: Option<f64>,

        /// Disable coordinate smoothing for this run
        #[arg(long)]
        no_smooth_coordinates: bool,

        /// Disable saccade gap closing for this run
        #[arg(long)]
        no_smooth_saccades: bool,

        /// Compute the velocity threshold independently per trial
        #[arg(long)]
        per_trial_threshold: bool,
    },

    /// Print descriptive statistics for a fixations file
    Report {
        /// Input fixations file produced by `detect`
        #[arg(short, long)]
        input: PathBuf,

        /// Include a per-trial breakdown
        #[arg(long)]
        per_trial: bool,
    },

    /// Check a samples file for schema and ordering problems
    Validate {
        /// Input samples file
        input: PathBuf,
    },

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Default output path for a detection run: `<input stem>_fixations.json`
    pub fn default_output_path(input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "output".to_string());
        input.with_file_name(format!("{stem}_fixations.json"))
    }
}
