//! fb2epub CLI - Command-line interface for FB2 to EPUB conversion

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fb2epub_core::encoder::EpubVersion;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Parse and validate jobs argument (must be at least 1)
fn parse_jobs(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if n < 1 {
        Err("jobs must be at least 1".to_string())
    } else {
        Ok(n)
    }
}

/// Parse the EPUB version ("2" or "3")
fn parse_epub_version(s: &str) -> Result<EpubVersion, String> {
    match s {
        "2" | "2.0" => Ok(EpubVersion::V2),
        "3" | "3.0" => Ok(EpubVersion::V3),
        _ => Err(format!("unsupported EPUB version '{}' (expected 2 or 3)", s)),
    }
}

#[derive(Parser)]
#[command(name = "fb2epub")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert all FB2 books in a directory to EPUB
    Convert {
        /// Directory containing .fb2 files
        #[arg(short, long, default_value = "input")]
        input: PathBuf,

        /// Directory to save .epub files
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// Number of parallel jobs (must be at least 1)
        #[arg(short, long, default_value = "4", value_parser = parse_jobs)]
        jobs: usize,

        /// EPUB version to generate (2 or 3)
        #[arg(long, default_value = "3", value_parser = parse_epub_version)]
        epub_version: EpubVersion,
    },

    /// Display information about an FB2 book
    Info {
        /// Input file path
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "fb2epub_cli=debug,fb2epub_core=debug"
    } else {
        "fb2epub_cli=info,fb2epub_core=warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Convert {
            input,
            output,
            jobs,
            epub_version,
        } => commands::convert(&input, &output, jobs, epub_version),

        Commands::Info { input, json } => commands::info(&input, json),
    }
}
