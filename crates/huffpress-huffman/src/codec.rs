//! Huffman text codec (count + build + generate + pack, and unpack).

use std::time::Instant;

use huffpress_core::{CompressionStats, Result, TextCodec, TextDecoder, TextEncoder};
use tracing::debug;

use crate::bitstream::{pack, unpack, PackedStream};
use crate::code_table::CodeTable;
use crate::frequency::FrequencyTable;
use crate::tree::build_tree;

/// Text length from which frequency counting moves to the rayon pool
/// when the `parallel` feature is enabled.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1 << 20;

/// Static Huffman codec.
///
/// Every call is an independent one-shot transformation; the codec only
/// carries settings.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    parallel_threshold: usize,
}

impl HuffmanCodec {
    /// Create a new codec with default settings.
    pub fn new() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Set the text length from which frequencies are counted in parallel.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Count symbol frequencies of `text`.
    pub fn count(&self, text: &str) -> FrequencyTable {
        #[cfg(feature = "parallel")]
        {
            if text.len() >= self.parallel_threshold {
                return FrequencyTable::count_parallel(text);
            }
        }
        FrequencyTable::count(text)
    }

    /// Derive the code table for `text` without packing it.
    pub fn code_table(&self, text: &str) -> Result<CodeTable> {
        let root = build_tree(&self.count(text))?;
        Ok(CodeTable::generate(&root))
    }

    /// Encode `text` into a packed stream and the code table it was packed with.
    ///
    /// # Errors
    /// [`huffpress_core::Error::EmptyAlphabet`] for empty text.
    pub fn encode(&self, text: &str) -> Result<(PackedStream, CodeTable)> {
        let table = self.code_table(text)?;
        let stream = pack(text, &table)?;

        debug!(
            text_bytes = text.len(),
            packed_bytes = stream.len(),
            table_entries = table.len(),
            "encoded text"
        );
        Ok((stream, table))
    }

    /// Encode and report statistics for the operation.
    pub fn encode_with_stats(
        &self,
        text: &str,
    ) -> Result<(PackedStream, CodeTable, CompressionStats)> {
        let start = Instant::now();
        let (stream, table) = self.encode(text)?;
        let elapsed = start.elapsed();

        let stats = CompressionStats {
            original_size: text.len(),
            compressed_size: stream.len(),
            table_entries: table.len(),
            payload_bits: stream.payload_bits().unwrap_or(0),
            time_us: elapsed.as_micros() as u64,
        };
        Ok((stream, table, stats))
    }

    /// Decode a packed stream with the code table it was produced with.
    pub fn decode(&self, stream: impl AsRef<[u8]>, table: &CodeTable) -> Result<String> {
        let bytes = stream.as_ref();
        let text = unpack(bytes, table)?;

        debug!(
            packed_bytes = bytes.len(),
            text_bytes = text.len(),
            "decoded text"
        );
        Ok(text)
    }
}

impl Default for HuffmanCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEncoder for HuffmanCodec {
    type Table = CodeTable;

    fn name(&self) -> &'static str {
        "huffman"
    }

    fn compress(&self, text: &str) -> Result<(Vec<u8>, CodeTable)> {
        let (stream, table) = self.encode(text)?;
        Ok((stream.into_bytes(), table))
    }
}

impl TextDecoder for HuffmanCodec {
    type Table = CodeTable;

    fn name(&self) -> &'static str {
        "huffman"
    }

    fn decompress(&self, packed: &[u8], table: &CodeTable) -> Result<String> {
        self.decode(packed, table)
    }
}

impl TextCodec for HuffmanCodec {
    fn new() -> Self {
        HuffmanCodec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huffpress_core::Error;

    #[test]
    fn test_roundtrip_aaabbc() {
        let codec = HuffmanCodec::new();
        let (stream, table) = codec.encode("aaabbc").unwrap();

        let len = |c: char| table.get(c).unwrap().len();
        assert!(len('a') <= len('b') && len('b') <= len('c'));
        assert_eq!(len('a'), 1);
        assert_eq!(len('c'), 2);

        assert_eq!(codec.decode(&stream, &table).unwrap(), "aaabbc");
    }

    #[test]
    fn test_roundtrip_text() {
        let codec = HuffmanCodec::new();
        let text = "the quick brown fox jumps over the lazy dog.\nsphinx of black quartz 123456789.\n";
        let (stream, table) = codec.encode(text).unwrap();
        assert_eq!(codec.decode(&stream, &table).unwrap(), text);
    }

    #[test]
    fn test_empty_text_has_no_alphabet() {
        let codec = HuffmanCodec::new();
        assert!(matches!(codec.encode(""), Err(Error::EmptyAlphabet)));
    }

    #[test]
    fn test_single_symbol() {
        let codec = HuffmanCodec::new();
        let text = "aaaaaaaaaaa";
        let (stream, table) = codec.encode(text).unwrap();

        assert_eq!(table.get('a').map(|c| c.as_str()), Some("0"));
        assert_eq!(stream.payload_bits(), Some(11));
        assert_eq!(codec.decode(&stream, &table).unwrap(), text);
    }

    #[test]
    fn test_deterministic() {
        let codec = HuffmanCodec::new();
        let text = "abracadabra, abracadabra. tied counts everywhere";
        let first = codec.encode(text).unwrap();
        let second = codec.encode(text).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_skewed_input_beats_fixed_width() {
        let codec = HuffmanCodec::new();
        let text = format!("{}{}", "e".repeat(900), "xyz".repeat(30));
        let (stream, _) = codec.encode(&text).unwrap();
        assert!(stream.payload_bits().unwrap() < 8 * text.len());
    }

    #[test]
    fn test_wrong_table_is_detected() {
        let codec = HuffmanCodec::new();
        let (stream, _) = codec.encode("aaabbc").unwrap();
        let (_, other) = codec.encode("zz").unwrap();
        // "zz" table only knows code "0"; the first '1' bit cannot match.
        assert!(matches!(
            codec.decode(&stream, &other),
            Err(Error::InvalidCode { .. })
        ));
    }

    #[test]
    fn test_truncated_stream() {
        let codec = HuffmanCodec::new();
        let (_, table) = codec.encode("abc").unwrap();
        assert!(matches!(
            codec.decode([0u8; 0], &table),
            Err(Error::TruncatedStream { len: 0 })
        ));
    }

    #[test]
    fn test_encode_with_stats() {
        let codec = HuffmanCodec::new();
        let (stream, table, stats) = codec.encode_with_stats("aaabbc").unwrap();
        assert_eq!(stats.original_size, 6);
        assert_eq!(stats.compressed_size, stream.len());
        assert_eq!(stats.table_entries, table.len());
        assert_eq!(stats.payload_bits, 9);
    }

    #[test]
    fn test_text_codec_traits() {
        let codec = <HuffmanCodec as TextCodec>::new();
        assert!(codec.verify_roundtrip("hello world.\n").unwrap());

        let ratio = codec.measure_ratio(&"ab".repeat(64)).unwrap();
        assert!(ratio.is_effective());
        assert_eq!(TextEncoder::name(&codec), "huffman");
    }

    #[test]
    fn test_parallel_threshold_setting() {
        let codec = HuffmanCodec::new().with_parallel_threshold(16);
        assert_eq!(codec.parallel_threshold(), 16);
        let text = "parallel counting must not change the result.".repeat(4);
        assert_eq!(codec.count(&text), FrequencyTable::count(&text));
    }
}
