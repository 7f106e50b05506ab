//! Bit packing and unpacking of code sequences.
//!
//! ## Layout
//!
//! ```text
//! byte 0      : padding count p (0-7 when written)
//! byte 1..n   : code bits, MSB-first, followed by p zero bits
//! ```
//!
//! The padding count is zero when the payload is already byte-aligned.
//! Streams written with a padding count of 8 for aligned payloads (one wasted
//! byte) are still accepted by [`unpack`].

use huffpress_core::{Error, Result};
use tracing::trace;

use crate::code_table::{Code, CodeTable, DecodeTrie};

/// Size of the padding header in bytes.
pub const HEADER_LEN: usize = 1;

/// Largest padding count [`unpack`] accepts.
pub const MAX_PADDING: u8 = 8;

/// Packed bytes: padding header followed by the code bits.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackedStream {
    bytes: Vec<u8>,
}

impl PackedStream {
    /// Wrap raw bytes read back from storage. Validation happens on unpack.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        PackedStream { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Total length in bytes, header included.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Padding count from the header, if present.
    pub fn padding(&self) -> Option<u8> {
        self.bytes.first().copied()
    }

    /// Number of code bits (padding excluded), if the header is consistent.
    pub fn payload_bits(&self) -> Option<usize> {
        let (&padding, payload) = self.bytes.split_first()?;
        if padding > MAX_PADDING {
            return None;
        }
        (payload.len() * 8).checked_sub(padding as usize)
    }
}

impl AsRef<[u8]> for PackedStream {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Vec<u8>> for PackedStream {
    fn from(bytes: Vec<u8>) -> Self {
        PackedStream::from_bytes(bytes)
    }
}

impl From<PackedStream> for Vec<u8> {
    fn from(stream: PackedStream) -> Self {
        stream.bytes
    }
}

/// MSB-first bit writer with a reserved padding header byte.
#[derive(Debug)]
pub struct BitWriter {
    /// Output buffer; byte 0 is the header.
    buffer: Vec<u8>,
    /// Partial byte being filled from the MSB down.
    accum: u8,
    /// Bits currently in accumulator (0-7).
    bits_in_accum: u8,
    /// Bits written so far.
    bit_len: usize,
}

impl BitWriter {
    /// Create a new writer.
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    /// Create a new writer with room for `capacity` payload bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut buffer = Vec::with_capacity(HEADER_LEN + capacity);
        buffer.push(0);
        Self {
            buffer,
            accum: 0,
            bits_in_accum: 0,
            bit_len: 0,
        }
    }

    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        self.accum |= (bit as u8) << (7 - self.bits_in_accum);
        self.bits_in_accum += 1;
        self.bit_len += 1;

        if self.bits_in_accum == 8 {
            self.buffer.push(self.accum);
            self.accum = 0;
            self.bits_in_accum = 0;
        }
    }

    /// Append every bit of `code`.
    #[inline]
    pub fn write_code(&mut self, code: &Code) {
        for bit in code.bits() {
            self.write_bit(bit);
        }
    }

    /// Bits written so far.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Zero-pad the last byte, record the padding, and return the stream.
    pub fn finish(mut self) -> PackedStream {
        let padding = if self.bits_in_accum == 0 {
            0
        } else {
            8 - self.bits_in_accum
        };
        if self.bits_in_accum > 0 {
            self.buffer.push(self.accum);
        }
        self.buffer[0] = padding;
        PackedStream::from_bytes(self.buffer)
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// MSB-first reader over the first `bit_len` bits of a byte slice.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    position: usize,
    bit_len: usize,
}

impl<'a> BitReader<'a> {
    /// Read the first `bit_len` bits of `data`; `bit_len` is clamped to the data.
    pub fn new(data: &'a [u8], bit_len: usize) -> Self {
        Self {
            data,
            position: 0,
            bit_len: bit_len.min(data.len() * 8),
        }
    }

    /// Current bit offset.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bits left to read.
    pub fn bits_remaining(&self) -> usize {
        self.bit_len - self.position
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    #[inline]
    fn next(&mut self) -> Option<bool> {
        if self.position >= self.bit_len {
            return None;
        }
        let byte = self.data[self.position / 8];
        let bit = (byte >> (7 - self.position % 8)) & 1 == 1;
        self.position += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bits_remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitReader<'_> {}

/// Pack the codes of `text` into a byte-aligned stream.
///
/// # Errors
/// [`Error::MissingCode`] if a symbol of `text` has no code.
pub fn pack(text: &str, codes: &CodeTable) -> Result<PackedStream> {
    // Rough guess: average code length is well under a byte for real text.
    let mut writer = BitWriter::with_capacity(text.len() / 2);
    for symbol in text.chars() {
        let code = codes
            .get(symbol)
            .ok_or_else(|| Error::missing_code(symbol))?;
        writer.write_code(code);
    }

    let bits = writer.bit_len();
    let stream = writer.finish();
    trace!(
        symbols = codes.len(),
        bits,
        bytes = stream.len(),
        "packed stream"
    );
    Ok(stream)
}

/// Unpack a stream produced by [`pack`] with the same code table.
///
/// # Errors
/// - [`Error::TruncatedStream`] without a header byte
/// - [`Error::InvalidPadding`] if the padding exceeds 8 or the payload
/// - [`Error::InvalidCode`] if the bits do not decompose into codes
pub fn unpack(stream: &[u8], codes: &CodeTable) -> Result<String> {
    let (&padding, payload) = stream
        .split_first()
        .ok_or_else(|| Error::truncated(stream.len()))?;

    let total_bits = payload.len() * 8;
    if padding > MAX_PADDING || padding as usize > total_bits {
        return Err(Error::InvalidPadding {
            padding,
            payload_bits: total_bits,
        });
    }
    let bit_len = total_bits - padding as usize;

    let trie = codes.decoder();
    let mut text = String::with_capacity(bit_len / codes.max_code_len().max(1));
    let mut cursor = DecodeTrie::ROOT;
    let mut code_start = 0;

    for (offset, bit) in BitReader::new(payload, bit_len).enumerate() {
        cursor = trie
            .step(cursor, bit)
            .ok_or_else(|| Error::invalid_code(code_start))?;
        if let Some(symbol) = trie.symbol(cursor) {
            text.push(symbol);
            cursor = DecodeTrie::ROOT;
            code_start = offset + 1;
        }
    }

    if cursor != DecodeTrie::ROOT {
        return Err(Error::invalid_code(code_start));
    }

    trace!(bits = bit_len, chars = text.chars().count(), "unpacked stream");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> Code {
        s.parse().unwrap()
    }

    /// a=0, c=10, b=11 (what the tree builder yields for "aaabbc").
    fn abc_table() -> CodeTable {
        CodeTable::from_codes([('a', code("0")), ('b', code("11")), ('c', code("10"))]).unwrap()
    }

    #[test]
    fn test_writer_msb_first() {
        let mut w = BitWriter::new();
        for bit in [true, false, true] {
            w.write_bit(bit);
        }
        let stream = w.finish();
        assert_eq!(stream.as_bytes(), &[5, 0b1010_0000]);
        assert_eq!(stream.payload_bits(), Some(3));
    }

    #[test]
    fn test_writer_aligned_has_zero_padding() {
        let mut w = BitWriter::new();
        w.write_code(&code("11110000"));
        let stream = w.finish();
        assert_eq!(stream.as_bytes(), &[0, 0b1111_0000]);
    }

    #[test]
    fn test_writer_empty() {
        let stream = BitWriter::new().finish();
        assert_eq!(stream.as_bytes(), &[0]);
        assert_eq!(stream.payload_bits(), Some(0));
    }

    #[test]
    fn test_reader() {
        let bits: Vec<bool> = BitReader::new(&[0b1100_0001, 0b1000_0000], 9).collect();
        assert_eq!(
            bits,
            vec![true, true, false, false, false, false, false, true, true]
        );
        assert_eq!(BitReader::new(&[0xff], 100).len(), 8);
    }

    #[test]
    fn test_pack_aaabbc() {
        // 0 0 0 11 11 10 -> 0001 1111 0 + 7 bits of padding
        let stream = pack("aaabbc", &abc_table()).unwrap();
        assert_eq!(stream.as_bytes(), &[7, 0b0001_1111, 0b0000_0000]);
        assert_eq!(stream.len(), 1 + (9usize).div_ceil(8));
    }

    #[test]
    fn test_pack_missing_code() {
        let result = pack("abd", &abc_table());
        assert!(matches!(result, Err(Error::MissingCode { symbol: 'd' })));
    }

    #[test]
    fn test_unpack_aaabbc() {
        let stream = pack("aaabbc", &abc_table()).unwrap();
        assert_eq!(unpack(stream.as_bytes(), &abc_table()).unwrap(), "aaabbc");
    }

    #[test]
    fn test_unpack_empty_stream_is_truncated() {
        assert!(matches!(
            unpack(&[], &abc_table()),
            Err(Error::TruncatedStream { len: 0 })
        ));
    }

    #[test]
    fn test_unpack_header_only() {
        assert_eq!(unpack(&[0], &abc_table()).unwrap(), "");
    }

    #[test]
    fn test_unpack_accepts_full_byte_padding() {
        // "bbbb" = 11111111, written with a trailing all-padding byte.
        let legacy = [8, 0b1111_1111, 0b0000_0000];
        assert_eq!(unpack(&legacy, &abc_table()).unwrap(), "bbbb");
    }

    #[test]
    fn test_unpack_rejects_bad_padding() {
        assert!(matches!(
            unpack(&[9, 0, 0], &abc_table()),
            Err(Error::InvalidPadding { padding: 9, .. })
        ));
        assert!(matches!(
            unpack(&[3], &abc_table()),
            Err(Error::InvalidPadding { padding: 3, payload_bits: 0 })
        ));
    }

    #[test]
    fn test_unpack_truncated_mid_code() {
        // 0 0 1 : "aa" then half of b/c.
        let stream = [5, 0b0010_0000];
        assert!(matches!(
            unpack(&stream, &abc_table()),
            Err(Error::InvalidCode { bit_offset: 2 })
        ));
    }

    #[test]
    fn test_unpack_unknown_path() {
        // Table without any code starting with '1'.
        let table = CodeTable::from_codes([('x', code("00")), ('y', code("01"))]).unwrap();
        let stream = [5, 0b0010_0000];
        assert!(matches!(
            unpack(&stream, &table),
            Err(Error::InvalidCode { bit_offset: 2 })
        ));
    }

    #[test]
    fn test_unpack_with_empty_table() {
        assert!(matches!(
            unpack(&[0, 0xAA], &CodeTable::default()),
            Err(Error::InvalidCode { bit_offset: 0 })
        ));
    }

    #[test]
    fn test_packed_stream_accessors() {
        let stream = PackedStream::from(vec![2, 0xff]);
        assert_eq!(stream.padding(), Some(2));
        assert_eq!(stream.payload_bits(), Some(6));
        assert_eq!(PackedStream::default().padding(), None);
        assert_eq!(PackedStream::from(vec![9]).payload_bits(), None);
    }
}
