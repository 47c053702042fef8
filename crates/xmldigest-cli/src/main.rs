//! xmldigest CLI - canonicalize XML documents and compute digest tables.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod output;

use commands::{algorithms, canonicalize, digest, info, lookup, methods};
use config::CliConfig;

#[derive(Parser)]
#[command(name = "xmldigest")]
#[command(about = "XML canonicalization and message digest tables")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute every digest over the (optionally canonicalized) file
    Digest {
        /// Input file
        file: PathBuf,
        /// Canonicalization method (name, URI or text)
        #[arg(long)]
        method: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Show digests as hex instead of Base64
        #[arg(long)]
        hex: bool,
        /// Save the transformed bytes to PATH
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Write canonical bytes to stdout or a file
    Canonicalize {
        /// Input XML file
        file: PathBuf,
        /// Canonicalization method (name, URI or text)
        #[arg(long)]
        method: Option<String>,
        /// Write to PATH instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// Print the transform report to stderr
        #[arg(long)]
        report: bool,
    },
    /// Show size and XML status of a file
    Info {
        /// Input file
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List digest algorithms
    Algorithms {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List canonicalization methods, optionally only those usable for a file
    Methods {
        /// Input file
        file: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Find an algorithm or method by name, OID or URI
    Lookup {
        /// Name, OID or URI
        key: String,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Digest {
            file,
            method,
            json,
            hex,
            save,
        } => digest::run(file, method, json, hex, save, &config),
        Commands::Canonicalize {
            file,
            method,
            output,
            report,
        } => canonicalize::run(file, method, output, report, &config),
        Commands::Info { file, json } => info::run(file, json, &config),
        Commands::Algorithms { json } => algorithms::run(json),
        Commands::Methods { file, json } => methods::run(file, json),
        Commands::Lookup { key } => lookup::run(key),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
