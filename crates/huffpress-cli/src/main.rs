//! Huffpress text compressor
//!
//! ## Usage
//!
//! ```bash
//! # Compress a text file into a packed stream and a code table
//! huffpress compress notes.txt notes.bin notes.huffcodes
//!
//! # Restore it
//! huffpress decompress notes.bin notes.huffcodes restored.txt
//!
//! # Interactive menu
//! huffpress
//! ```

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use huffpress_cli::config::parse_level;
use huffpress_cli::{CliConfig, Menu, Pipeline};

#[derive(Parser, Debug)]
#[command(name = "huffpress")]
#[command(author = "Daemoniorum LLC")]
#[command(version)]
#[command(about = "Static Huffman text compressor", long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Configuration file path (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a text file
    Compress {
        /// Text file to compress
        input: PathBuf,
        /// Where to write the compressed stream
        compressed: PathBuf,
        /// Where to write the code table
        table: PathBuf,
    },
    /// Decompress a file produced by `compress`
    Decompress {
        /// Compressed stream
        compressed: PathBuf,
        /// Code table written alongside it
        table: PathBuf,
        /// Where to write the restored text
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => CliConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => CliConfig::default(),
    };

    let level = match &args.log_level {
        Some(name) => parse_level(name),
        None => config.tracing_level(),
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    let pipeline = Pipeline::from_config(&config);

    let result = match args.command {
        Some(Command::Compress {
            input,
            compressed,
            table,
        }) => pipeline
            .compress_file(&input, &compressed, &table)
            .map(|report| {
                println!("File compressed and saved to {}", compressed.display());
                println!("Encoding information saved to {}", table.display());
                info!(
                    ratio = report.stats.ratio().ratio(),
                    dropped = report.dropped_chars,
                    "done"
                );
            })
            .with_context(|| format!("failed to compress {}", input.display())),
        Some(Command::Decompress {
            compressed,
            table,
            output,
        }) => pipeline
            .decompress_file(&compressed, &table, &output)
            .map(|_| println!("File decompressed and saved to {}", output.display()))
            .with_context(|| format!("failed to decompress {}", compressed.display())),
        None => {
            let stdin = io::stdin();
            let mut menu = Menu::new(stdin.lock(), io::stdout(), &config);
            menu.run(&pipeline)
                .map(|_| ())
                .context("interactive session failed")
        }
    };

    if let Err(e) = &result {
        if let Some(cause) = e.downcast_ref::<huffpress_core::Error>() {
            error!(category = cause.category(), "{e:#}");
        }
    }
    result
}
