//! simreport - render the simulation comparison charts.
//!
//! With no arguments, writes the four PNG charts to the current directory.

use anyhow::Result;
use clap::Parser;
use simreport::{OutputFormat, ReportGenerator};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Comparative charts for page replacement, disk and CPU scheduling
#[derive(Parser, Debug)]
#[command(name = "simreport")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory the charts are written to (created if missing)
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Image format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Png)]
    format: OutputFormat,

    /// Log more (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let generator = ReportGenerator::new(&args.output_dir, args.format);
    let mut stdout = io::stdout().lock();
    generator.run(&mut stdout)?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
