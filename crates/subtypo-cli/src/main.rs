//! SubTypo CLI - check, format and query SubRip subtitle files.

mod commands;
mod config;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::{default_config_dir, SettingsManager};

/// Command-line arguments for the SubTypo tool.
#[derive(Parser, Debug)]
#[command(name = "subtypo-cli")]
#[command(version)]
#[command(about = "Check, format and query SubRip subtitle files")]
#[command(long_about = "SubTypo CLI drives the SubTypo subtitle engine from the shell.\n\n\
    EXAMPLES:\n    \
    subtypo-cli check movie.srt\n    \
    subtypo-cli format movie.srt --output clean.srt\n    \
    subtypo-cli at movie.srt 00:01:23,500 --json\n    \
    subtypo-cli config --reset")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write logs to a daily-rolling file in this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Directory holding settings.json
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report syntax errors in a subtitle file
    Check {
        file: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rewrite a subtitle file in canonical form
    Format {
        file: PathBuf,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List cues visible at a time code (HH:MM:SS,mmm)
    At {
        file: PathBuf,

        time: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the current settings
    Config {
        /// Delete the settings file and show the defaults
        #[arg(long)]
        reset: bool,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> Result<ExitCode> {
    let manager = SettingsManager::new(cli.config_dir.unwrap_or_else(default_config_dir));
    let settings = manager.load();

    match cli.command {
        Command::Check { file, json } => {
            let report = commands::check(&file, &settings)?;
            if json {
                print_json(&report)?;
            } else {
                println!("{}", commands::render_check(&report));
            }
            Ok(if report.is_clean() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Format { file, output } => {
            let text = commands::format(&file, output.as_deref(), &settings)?;
            if output.is_none() {
                println!("{}", text);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::At { file, time, json } => {
            let report = commands::at(&file, &time, &settings)?;
            if json {
                print_json(&report)?;
            } else {
                println!("{}", commands::render_at(&report));
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Config { reset } => {
            let settings = commands::config(&manager, reset)?;
            print_json(&settings)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _log_guard = logging::init_logging(cli.verbose, cli.log_dir.as_deref());

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
