//! Artifact persistence.
//!
//! The compressed file holds the packed stream bytes verbatim. The code table
//! is bincode-encoded and written to `<table>.tmp` first, then renamed into
//! place, so a crash never leaves a half-written table behind.

use std::fs;
use std::path::{Path, PathBuf};

use huffpress_core::Result;
use huffpress_huffman::{CodeTable, PackedStream};
use tracing::debug;

/// Write the packed stream to `path`.
pub fn save_compressed(path: &Path, stream: &PackedStream) -> Result<()> {
    fs::write(path, stream.as_bytes())?;
    debug!(path = %path.display(), bytes = stream.len(), "saved compressed file");
    Ok(())
}

/// Read a packed stream from `path`.
pub fn load_compressed(path: &Path) -> Result<PackedStream> {
    let bytes = fs::read(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "loaded compressed file");
    Ok(PackedStream::from_bytes(bytes))
}

/// Persist a code table to `path` atomically.
pub fn save_code_table(path: &Path, table: &CodeTable) -> Result<()> {
    let data = bincode::serialize(table)?;

    let tmp = tmp_path(path);
    fs::write(&tmp, &data)?;
    fs::rename(&tmp, path)?;

    debug!(path = %path.display(), entries = table.len(), "saved code table");
    Ok(())
}

/// Staging path for an atomic write of `path`: the full file name plus `.tmp`.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Load a code table from `path`.
///
/// The table is validated while decoding; a file that is not a prefix code
/// fails with a serialization error.
pub fn load_code_table(path: &Path) -> Result<CodeTable> {
    let data = fs::read(path)?;
    let table: CodeTable = bincode::deserialize(&data)?;
    debug!(path = %path.display(), entries = table.len(), "loaded code table");
    Ok(table)
}
