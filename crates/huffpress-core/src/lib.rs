//! # Huffpress Core
//!
//! Core traits, error types, and statistics shared by the Huffpress crates.
//!
//! Huffpress is a lossless text compressor built on static, per-file Huffman
//! codes. A compressed text travels as two artifacts: a packed bitstream and
//! the code table needed to read it back.
//!
//! ## Core Traits
//!
//! - [`TextEncoder`] - Text to (packed stream, code table)
//! - [`TextDecoder`] - (packed stream, code table) back to text
//! - [`TextCodec`] - Combined encode/decode capability
//!
//! ## Example
//!
//! ```
//! use huffpress_core::{CompressionStats, Metrics};
//!
//! let stats = CompressionStats {
//!     original_size: 1000,
//!     compressed_size: 600,
//!     ..Default::default()
//! };
//! assert!(stats.ratio().is_effective());
//!
//! let mut metrics = Metrics::new();
//! metrics.record(&stats);
//! assert_eq!(metrics.total_operations, 1);
//! ```

pub mod error;
pub mod stats;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use stats::{CompressionStats, Metrics};
pub use traits::{TextCodec, TextDecoder, TextEncoder};
pub use types::CompressionRatio;
