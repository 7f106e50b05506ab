//! Error types for encoding and decoding operations.

use thiserror::Error;

/// Result type alias for Huffpress operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Huffpress error types.
#[derive(Debug, Error)]
pub enum Error {
    /// No symbols to build a tree from.
    #[error("empty alphabet: cannot build a Huffman tree without symbols")]
    EmptyAlphabet,

    /// A symbol of the text has no entry in the code table.
    #[error("missing code for symbol {symbol:?}")]
    MissingCode { symbol: char },

    /// Compressed artifact is shorter than the 1-byte header.
    #[error("truncated stream: got {len} bytes, need at least 1")]
    TruncatedStream { len: usize },

    /// Header padding count does not fit the payload.
    #[error("invalid padding {padding} for a payload of {payload_bits} bits")]
    InvalidPadding { padding: u8, payload_bits: usize },

    /// Payload bits do not decompose into codes of the table.
    #[error("invalid code at bit offset {bit_offset}: no code matches")]
    InvalidCode { bit_offset: usize },

    /// A supplied code table is not a valid prefix code.
    #[error("invalid code table: {0}")]
    InvalidCodeTable(String),

    /// I/O error from the storage layer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Code table (de)serialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Create a missing code error.
    pub fn missing_code(symbol: char) -> Self {
        Error::MissingCode { symbol }
    }

    /// Create a truncated stream error.
    pub fn truncated(len: usize) -> Self {
        Error::TruncatedStream { len }
    }

    /// Create an invalid code error at the given payload bit offset.
    pub fn invalid_code(bit_offset: usize) -> Self {
        Error::InvalidCode { bit_offset }
    }

    /// Create an invalid code table error.
    pub fn invalid_table(message: impl Into<String>) -> Self {
        Error::InvalidCodeTable(message.into())
    }

    /// Check if the error points at corrupt or mismatched input artifacts.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Error::TruncatedStream { .. }
                | Error::InvalidPadding { .. }
                | Error::InvalidCode { .. }
                | Error::InvalidCodeTable(_)
                | Error::Serialization(_)
        )
    }

    /// Get error category for logs.
    pub fn category(&self) -> &'static str {
        match self {
            Error::EmptyAlphabet => "empty_alphabet",
            Error::MissingCode { .. } => "missing_code",
            Error::TruncatedStream { .. } => "truncated_stream",
            Error::InvalidPadding { .. } => "invalid_padding",
            Error::InvalidCode { .. } => "invalid_code",
            Error::InvalidCodeTable(_) => "invalid_code_table",
            Error::Io(_) => "io_error",
            Error::Serialization(_) => "serialization",
        }
    }
}

impl From<bincode::Error> for Error {
    fn from(e: bincode::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::missing_code('x').to_string(),
            "missing code for symbol 'x'"
        );
        assert_eq!(
            Error::truncated(0).to_string(),
            "truncated stream: got 0 bytes, need at least 1"
        );
        assert!(Error::invalid_code(13).to_string().contains("13"));
    }

    #[test]
    fn test_categories() {
        assert_eq!(Error::EmptyAlphabet.category(), "empty_alphabet");
        assert_eq!(Error::invalid_table("dup").category(), "invalid_code_table");
        assert_eq!(
            Error::Io(std::io::Error::other("disk")).category(),
            "io_error"
        );
    }

    #[test]
    fn test_corruption_classification() {
        assert!(Error::invalid_code(0).is_corruption());
        assert!(Error::truncated(0).is_corruption());
        assert!(!Error::EmptyAlphabet.is_corruption());
        assert!(!Error::missing_code('a').is_corruption());
    }
}
