//! File-to-file compression and decompression.

use std::fs;
use std::io;
use std::path::Path;

use huffpress_core::{CompressionStats, Result};
use huffpress_huffman::HuffmanCodec;
use tracing::{debug, info};

use crate::alphabet::filter_text_with;
use crate::config::CliConfig;
use crate::storage;

/// Outcome of compressing one file.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressReport {
    /// Codec statistics for the filtered text.
    pub stats: CompressionStats,
    /// Characters read from the input file.
    pub input_chars: usize,
    /// Characters removed by the alphabet filter.
    pub dropped_chars: usize,
}

/// Compression pipeline: read, filter, encode, persist.
#[derive(Debug, Clone)]
pub struct Pipeline {
    codec: HuffmanCodec,
    fold_case: bool,
}

impl Pipeline {
    /// Create a pipeline with default settings.
    pub fn new() -> Self {
        Self::from_config(&CliConfig::default())
    }

    /// Create a pipeline honouring `config`.
    pub fn from_config(config: &CliConfig) -> Self {
        Self {
            codec: HuffmanCodec::new(),
            fold_case: config.fold_case,
        }
    }

    /// Compress `input` into `compressed` and write its code table to `table_path`.
    pub fn compress_file(
        &self,
        input: &Path,
        compressed: &Path,
        table_path: &Path,
    ) -> Result<CompressReport> {
        check_distinct(input, compressed, table_path)?;
        let raw = fs::read_to_string(input)?;
        let text = filter_text_with(&raw, self.fold_case);

        let input_chars = raw.chars().count();
        let dropped_chars = input_chars - text.chars().count();
        debug!(input = %input.display(), input_chars, dropped_chars, "filtered input");

        let (stream, table, stats) = self.codec.encode_with_stats(&text)?;
        storage::save_compressed(compressed, &stream)?;
        storage::save_code_table(table_path, &table)?;

        info!(
            input = %input.display(),
            original = stats.original_size,
            compressed = stats.compressed_size,
            symbols = stats.table_entries,
            "compressed file"
        );
        Ok(CompressReport {
            stats,
            input_chars,
            dropped_chars,
        })
    }

    /// Decompress `compressed` with the table at `table_path` into `output`.
    ///
    /// Returns the number of text bytes written.
    pub fn decompress_file(
        &self,
        compressed: &Path,
        table_path: &Path,
        output: &Path,
    ) -> Result<usize> {
        let table = storage::load_code_table(table_path)?;
        let stream = storage::load_compressed(compressed)?;
        let text = self.codec.decode(&stream, &table)?;

        fs::write(output, &text)?;
        info!(output = %output.display(), bytes = text.len(), "decompressed file");
        Ok(text.len())
    }
}

/// Every artifact of one compression must live at its own path, including the
/// staging file of the code table.
fn check_distinct(input: &Path, compressed: &Path, table_path: &Path) -> Result<()> {
    let staging = storage::tmp_path(table_path);
    let clash = [
        (input, compressed),
        (input, table_path),
        (compressed, table_path),
        (compressed, staging.as_path()),
        (input, staging.as_path()),
    ]
    .into_iter()
    .find(|(a, b)| a == b);

    match clash {
        Some((a, _)) => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is used for two artifacts", a.display()),
        )
        .into()),
        None => Ok(()),
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Compress a file with default settings.
pub fn compress_file(input: &Path, compressed: &Path, table_path: &Path) -> Result<CompressReport> {
    Pipeline::new().compress_file(input, compressed, table_path)
}

/// Decompress a file with default settings.
pub fn decompress_file(compressed: &Path, table_path: &Path, output: &Path) -> Result<usize> {
    Pipeline::new().decompress_file(compressed, table_path, output)
}
