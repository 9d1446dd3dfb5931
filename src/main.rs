//! # clip-tidy CLI (`cliptidy`)
//!
//! Normalizes clip metadata in place across a clippings folder.
//!
//! ## Usage
//!
//! ```bash
//! cliptidy --config ./config/cliptidy.toml [command]
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `cliptidy` / `cliptidy run` | Classify and tidy every eligible clip |
//! | `cliptidy inspect <file>` | Show how one clip would be classified |
//!
//! ## Examples
//!
//! ```bash
//! # Tidy everything using the config file
//! cliptidy
//!
//! # Preview changes for a folder without a config file
//! cliptidy run --root ~/Vault/Clippings --since 2025-12-15 --dry-run
//!
//! # Explain a single clip as JSON
//! cliptidy inspect ~/Vault/Clippings/2025-12-20/page.md --json
//! ```

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use clip_tidy::config::{self, CliOverrides};
use clip_tidy::inspect;
use clip_tidy::progress::ProgressMode;
use clip_tidy::tidy::{self, TidyOptions};
use std::path::PathBuf;

/// clip-tidy: classify and normalize clipped web document metadata.
#[derive(Parser)]
#[command(
    name = "cliptidy",
    about = "Classify and normalize frontmatter metadata for clipped web documents",
    version,
    long_about = "Infers a clip kind for every clip in date-named folders under the clippings \
    root, merges canonical tags, flags thin or untitled clips for reclipping, and rewrites the \
    frontmatter only when something changed."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Optional when `--root` is given to `run`.
    #[arg(long, global = true, default_value = "./config/cliptidy.toml")]
    config: PathBuf,

    /// Progress output on stderr. Defaults to `human` on a terminal, `off` otherwise.
    #[arg(long, global = true, value_enum)]
    progress: Option<ProgressMode>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Tidy every eligible clip under the clippings root.
    ///
    /// This is the default when no command is given.
    Run(RunArgs),

    /// Show how a single clip would be classified. Never writes.
    Inspect {
        /// Path to the clip file.
        file: PathBuf,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args, Default)]
struct RunArgs {
    /// Clippings root directory (overrides `clippings.root`).
    #[arg(long)]
    root: Option<PathBuf>,

    /// Only process folders dated on or after this day (YYYY-MM-DD).
    #[arg(long, value_parser = config::parse_date)]
    since: Option<NaiveDate>,

    /// Only process folders dated on or before this day (YYYY-MM-DD).
    #[arg(long, value_parser = config::parse_date)]
    until: Option<NaiveDate>,

    /// Maximum number of eligible files to process.
    #[arg(long)]
    limit: Option<usize>,

    /// Report what would change without writing any file.
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let progress = cli.progress.unwrap_or_else(ProgressMode::default_for_tty);

    match cli.command.unwrap_or(Commands::Run(RunArgs::default())) {
        Commands::Run(args) => {
            let overrides = CliOverrides {
                root: args.root,
                since: args.since,
                until: args.until,
            };
            let cfg = config::resolve_config(&cli.config, &overrides)?;
            let options = TidyOptions {
                dry_run: args.dry_run,
                limit: args.limit,
            };
            let stats = tidy::run_tidy(&cfg, options, progress.reporter().as_ref())?;
            tidy::print_summary(&stats, args.dry_run);
        }
        Commands::Inspect { file, json } => {
            let cfg = if cli.config.exists() {
                config::load_config(&cli.config)?
            } else {
                config::Config::default()
            };
            inspect::run_inspect(&cfg, &file, json)?;
        }
    }

    Ok(())
}
