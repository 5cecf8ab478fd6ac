//! mlib-match - File-to-catalog reconciliation CLI
//!
//! Scores candidate catalog tracks against an unmatched audio file and
//! prints the results as JSON on stdout. Logs go to stderr (or the file
//! named in `[logging] file`) so output stays machine-readable.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mlib_common::config::{load_toml_config, resolve_config_path, write_toml_config, LoggingConfig, TomlConfig};
use mlib_match::input::{load_candidates, load_unmatched, parse_calculator_types};
use mlib_match::services::track_matcher::DEFAULT_MATCH_LIMIT;
use mlib_match::{MatchConfig, PathMetadataExtractor, ScoreCalculator, ScoreCalculatorChain, TrackMatcher};

/// Command-line arguments for mlib-match
#[derive(Parser, Debug)]
#[command(name = "mlib-match")]
#[command(about = "Match unmatched audio files to catalog tracks")]
#[command(version)]
struct Args {
    /// Config file (overrides MLIB_CONFIG and the default location)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the metadata guessed from a file path
    ParsePath {
        /// Raw path (either separator style)
        path: String,
    },

    /// Rank candidate catalog tracks for an unmatched file
    Score {
        /// JSON array of catalog tracks
        #[arg(long)]
        candidates: PathBuf,

        /// JSON unmatched file record
        #[arg(long)]
        unmatched: PathBuf,

        /// Maximum number of ranked matches
        #[arg(short, long, default_value_t = DEFAULT_MATCH_LIMIT)]
        limit: usize,

        /// Comma-separated calculator types to run (default: all)
        #[arg(short, long)]
        types: Option<String>,

        /// Print only the best match clearing the acceptance threshold
        #[arg(long)]
        best: bool,
    },

    /// Print a per-candidate score breakdown
    Analyze {
        /// JSON array of catalog tracks
        #[arg(long)]
        candidates: PathBuf,

        /// JSON unmatched file record
        #[arg(long)]
        unmatched: PathBuf,
    },

    /// Print the resolved configuration
    Config {
        /// Also persist the resolved configuration to this file
        #[arg(long)]
        write: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct ConfigReport<'a> {
    build: String,
    config_file: Option<&'a Path>,
    logging: &'a LoggingConfig,
    association: &'a MatchConfig,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Read the config file before logging starts so [logging] applies;
    // problems are reported once the subscriber is up.
    let config_path = resolve_config_path(args.config.as_deref());
    let (toml_config, load_error) = match &config_path {
        Some(path) => match load_toml_config(path) {
            Ok(config) => (config, None),
            Err(e) => (TomlConfig::default(), Some(e)),
        },
        None => (TomlConfig::default(), None),
    };

    init_tracing(&toml_config.logging)?;

    if let Some(e) = load_error {
        warn!("{}. Using built-in defaults.", e);
    } else if let Some(path) = &config_path {
        info!(path = %path.display(), "Loaded configuration");
    }

    let match_config = MatchConfig::resolve(&toml_config);

    match args.command {
        Command::ParsePath { path } => {
            let extractor = PathMetadataExtractor::new(match_config.library_markers.clone());
            print_json(&extractor.extract(&path))
        }

        Command::Score {
            candidates,
            unmatched,
            limit,
            types,
            best,
        } => {
            let candidates = load_candidates(&candidates).context("Failed to load candidates")?;
            let unmatched = load_unmatched(&unmatched).context("Failed to load unmatched file")?;

            let matcher = match types {
                Some(list) => {
                    let allowed = parse_calculator_types(&list)?;
                    let calculators = ScoreCalculator::defaults(&match_config)
                        .into_iter()
                        .filter(|c| allowed.contains(&c.calculator_type()))
                        .collect();
                    TrackMatcher::with_chain(ScoreCalculatorChain::new(calculators), match_config)
                }
                None => TrackMatcher::new(match_config),
            };

            info!(
                unmatched_id = %unmatched.id,
                candidates = candidates.len(),
                "Scoring candidates"
            );

            if best {
                print_json(&matcher.best_acceptable_match(&unmatched, &candidates))
            } else {
                print_json(&matcher.find_best_matches(&unmatched, &candidates, limit))
            }
        }

        Command::Analyze { candidates, unmatched } => {
            let candidates = load_candidates(&candidates).context("Failed to load candidates")?;
            let unmatched = load_unmatched(&unmatched).context("Failed to load unmatched file")?;

            let matcher = TrackMatcher::new(match_config);
            let path_info = matcher.path_info(&unmatched);
            let analyses: Vec<_> = candidates
                .iter()
                .map(|track| matcher.detailed_match_analysis(track, &unmatched, &path_info))
                .collect();

            print_json(&analyses)
        }

        Command::Config { write } => {
            if let Some(target) = write {
                let persisted = TomlConfig {
                    logging: toml_config.logging.clone(),
                    association: match_config.to_section(),
                };
                write_toml_config(&persisted, &target)
                    .with_context(|| format!("Failed to write {}", target.display()))?;
                info!(path = %target.display(), "Configuration written");
            }

            print_json(&ConfigReport {
                build: mlib_match::build_info(),
                config_file: config_path.as_deref(),
                logging: &toml_config.logging,
                association: &match_config,
            })
        }
    }
}

/// Install the tracing subscriber
///
/// `RUST_LOG` wins over `[logging] level`. Output goes to `[logging] file`
/// when set, otherwise stderr.
fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let file_layer = match &logging.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    let stderr_layer = file_layer
        .is_none()
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
