//! Interactive menu used when `huffpress` runs without a subcommand.
//!
//! The menu is generic over its input and output streams so it can be driven
//! by stdin/stdout or by an in-memory buffer.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use huffpress_core::{Metrics, Result};
use tracing::warn;

use crate::config::CliConfig;
use crate::pipeline::Pipeline;

/// Top-level menu option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Compress,
    Decompress,
}

impl MenuChoice {
    /// Parse a trimmed menu answer.
    pub fn parse(answer: &str) -> Option<Self> {
        match answer {
            "1" => Some(MenuChoice::Compress),
            "2" => Some(MenuChoice::Decompress),
            _ => None,
        }
    }
}

/// A fully specified operation collected from the prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Compress {
        input: PathBuf,
        compressed: PathBuf,
        table: PathBuf,
    },
    Decompress {
        compressed: PathBuf,
        table: PathBuf,
        output: PathBuf,
    },
}

/// Default code table path for `compressed`: the extension is appended, so
/// `notes.bin` suggests `notes.bin.huffcodes`.
pub fn suggest_table_path(compressed: &Path, extension: &str) -> PathBuf {
    let mut name = compressed.as_os_str().to_owned();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// Prompt-driven front end.
pub struct Menu<R, W> {
    input: R,
    output: W,
    table_extension: String,
    metrics: Metrics,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W, config: &CliConfig) -> Self {
        Self {
            input,
            output,
            table_extension: config.table_extension.clone(),
            metrics: Metrics::new(),
        }
    }

    /// Print `prompt` and read one trimmed line.
    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into());
        }
        Ok(line.trim().to_string())
    }

    /// Show the options until a valid one is entered.
    pub fn choose(&mut self) -> Result<MenuChoice> {
        loop {
            writeln!(self.output, "Choose an option:")?;
            writeln!(self.output, "1. Compress a file")?;
            writeln!(self.output, "2. Decompress a file")?;

            let answer = self.ask("Enter 1 or 2: ")?;
            if let Some(choice) = MenuChoice::parse(&answer) {
                return Ok(choice);
            }
            warn!(answer = %answer, "invalid menu choice");
            writeln!(self.output, "Invalid choice. Please enter 1 or 2.")?;
        }
    }

    /// Ask for a code table path; an empty answer takes `suggested`.
    fn ask_table(&mut self, prompt: &str, suggested: PathBuf) -> Result<PathBuf> {
        let answer = self.ask(&format!("{prompt} [{}]: ", suggested.display()))?;
        Ok(if answer.is_empty() {
            suggested
        } else {
            PathBuf::from(answer)
        })
    }

    /// Collect the choice and the three paths it needs.
    pub fn read_request(&mut self) -> Result<Request> {
        match self.choose()? {
            MenuChoice::Compress => {
                let input = PathBuf::from(self.ask("Enter the path to the file to compress: ")?);
                let compressed =
                    PathBuf::from(self.ask("Enter the path to save the compressed file: ")?);
                let suggested = suggest_table_path(&compressed, &self.table_extension);
                let table =
                    self.ask_table("Enter the path to save the encoding information", suggested)?;
                Ok(Request::Compress {
                    input,
                    compressed,
                    table,
                })
            }
            MenuChoice::Decompress => {
                let compressed =
                    PathBuf::from(self.ask("Enter the path to the compressed file: ")?);
                let suggested = suggest_table_path(&compressed, &self.table_extension);
                let table =
                    self.ask_table("Enter the path to the encoding information file", suggested)?;
                let output =
                    PathBuf::from(self.ask("Enter the path to save the decompressed file: ")?);
                Ok(Request::Decompress {
                    compressed,
                    table,
                    output,
                })
            }
        }
    }

    /// Prompt for one operation and run it through `pipeline`.
    ///
    /// Completed compressions and failed operations are recorded in
    /// [`Menu::metrics`].
    pub fn run(&mut self, pipeline: &Pipeline) -> Result<Request> {
        let request = self.read_request()?;
        if let Err(e) = self.execute(pipeline, &request) {
            self.metrics.record_error();
            return Err(e);
        }
        writeln!(self.output, "{}", self.metrics.summary())?;
        Ok(request)
    }

    fn execute(&mut self, pipeline: &Pipeline, request: &Request) -> Result<()> {
        match request {
            Request::Compress {
                input,
                compressed,
                table,
            } => {
                let report = pipeline.compress_file(input, compressed, table)?;
                self.metrics.record(&report.stats);
                writeln!(
                    self.output,
                    "File compressed and saved to {}",
                    compressed.display()
                )?;
                writeln!(
                    self.output,
                    "Encoding information saved to {}",
                    table.display()
                )?;
                writeln!(
                    self.output,
                    "{} -> {} bytes ({:.1}% saved)",
                    report.stats.original_size,
                    report.stats.compressed_size,
                    report.stats.savings_percent()
                )?;
            }
            Request::Decompress {
                compressed,
                table,
                output,
            } => {
                pipeline.decompress_file(compressed, table, output)?;
                writeln!(
                    self.output,
                    "File decompressed and saved to {}",
                    output.display()
                )?;
            }
        }
        Ok(())
    }

    /// Statistics of the operations run so far.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}
