//! # Huffpress Huffman
//!
//! Static Huffman coding for text.
//!
//! A per-text prefix code is derived from character frequencies, the text is
//! packed into a byte-aligned bitstream, and the code table travels next to
//! the stream so the text can be restored exactly.
//!
//! ## Pipeline
//!
//! ```text
//! text ─► FrequencyTable ─► HuffmanNode ─► CodeTable ─┬─► PackedStream
//!                                                     └─► (persisted by caller)
//! PackedStream + CodeTable ─► DecodeTrie ─► text
//! ```
//!
//! ## Stream Layout
//!
//! ```text
//! [1 byte: padding count 0-7][MSB-first code bits][zero padding]
//! ```
//!
//! ## Features
//!
//! - `parallel`: count frequencies of large texts on the rayon pool
//!
//! ## Example
//!
//! ```
//! use huffpress_huffman::HuffmanCodec;
//!
//! let codec = HuffmanCodec::new();
//! let (stream, table) = codec.encode("aaabbc").unwrap();
//! assert_eq!(codec.decode(&stream, &table).unwrap(), "aaabbc");
//! ```

pub mod bitstream;
pub mod code_table;
pub mod codec;
pub mod frequency;
pub mod tree;

pub use bitstream::{pack, unpack, BitReader, BitWriter, PackedStream, HEADER_LEN, MAX_PADDING};
pub use code_table::{Code, CodeTable, DecodeTrie, TrieIndex};
pub use codec::HuffmanCodec;
pub use frequency::FrequencyTable;
pub use tree::{build_tree, HuffmanNode};
