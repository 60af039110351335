// src/main.rs
//! NMEA Annotations - convert GPS logs into annotation container files

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use nmea_annotations::{convert_with_config, AltitudePolicy, ConverterConfig, RecordLayout};
use std::{
    io,
    path::{Path, PathBuf},
};

#[derive(Parser, Debug)]
#[command(name = "nmea-annotations", version, about = "GPS log to .annotations converter")]
struct Args {
    /// GPS log file (NMEA GGA/RMC sentences)
    input: PathBuf,

    /// Output .annotations file [default: input with .annotations extension]
    output: Option<PathBuf>,

    /// Load conversion options from a JSON file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the effective options to a JSON file
    #[arg(long, value_name = "FILE")]
    save_config: Option<PathBuf>,

    /// How a GGA treats a second that already has an entry
    #[arg(long, value_enum)]
    altitude_policy: Option<AltitudePolicy>,

    /// Output line layout
    #[arg(long, value_enum)]
    layout: Option<RecordLayout>,

    /// Log every decoded sentence
    #[arg(short, long)]
    verbose: bool,
}

/// `<input>` with its extension replaced by `.annotations`
fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("annotations")
}

fn print_status(color: Color, message: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(
        stdout,
        SetForegroundColor(color),
        Print(message),
        Print("\n"),
        ResetColor
    )
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut config = match &args.config {
        Some(path) => ConverterConfig::load_from_file(path)?,
        None => ConverterConfig::default(),
    };
    if let Some(policy) = args.altitude_policy {
        config = config.with_altitude_policy(policy);
    }
    if let Some(layout) = args.layout {
        config = config.with_layout(layout);
    }

    if let Some(path) = &args.save_config {
        config
            .save_to_file(path)
            .with_context(|| format!("saving configuration to {}", path.display()))?;
        log::info!("Configuration saved to {}", path.display());
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));

    match convert_with_config(&args.input, &output, &config) {
        Ok(message) => {
            print_status(Color::Green, &message)?;
            Ok(())
        }
        Err(message) => {
            print_status(Color::Red, &message)?;
            std::process::exit(1);
        }
    }
}
