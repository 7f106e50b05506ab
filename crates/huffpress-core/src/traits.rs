//! Core traits for text compression and decompression.
//!
//! ## Trait Hierarchy
//!
//! ```text
//! TextEncoder / TextDecoder  (one-shot operations)
//!       ↓
//! TextCodec  (combined encode + decode)
//! ```
//!
//! A static code is required on both sides, so every operation names the
//! code table type it produces or consumes.

use crate::error::Result;
use crate::types::CompressionRatio;

/// One-shot text compression.
pub trait TextEncoder {
    /// Code table produced alongside the packed bytes.
    type Table;

    /// Get the codec name.
    fn name(&self) -> &'static str;

    /// Compress text in one shot.
    ///
    /// # Returns
    /// The packed bytes and the code table required to read them back.
    fn compress(&self, text: &str) -> Result<(Vec<u8>, Self::Table)>;
}

/// One-shot text decompression.
pub trait TextDecoder {
    /// Code table consumed together with the packed bytes.
    type Table;

    /// Get the codec name.
    fn name(&self) -> &'static str;

    /// Decompress packed bytes with the code table they were produced with.
    fn decompress(&self, packed: &[u8], table: &Self::Table) -> Result<String>;
}

/// Combined codec for both compression and decompression.
pub trait TextCodec: TextEncoder + TextDecoder<Table = <Self as TextEncoder>::Table> {
    /// Create a new codec with default settings.
    fn new() -> Self
    where
        Self: Sized;

    /// Round-trip test: compress then decompress.
    /// Returns true if the text matches.
    fn verify_roundtrip(&self, text: &str) -> Result<bool> {
        let (packed, table) = self.compress(text)?;
        let restored = self.decompress(&packed, &table)?;
        Ok(restored == text)
    }

    /// Get compression ratio of the packed stream for given text.
    ///
    /// The code table is not counted; it is persisted separately.
    fn measure_ratio(&self, text: &str) -> Result<CompressionRatio> {
        let (packed, _) = self.compress(text)?;
        Ok(CompressionRatio::new(text.len(), packed.len()))
    }
}
