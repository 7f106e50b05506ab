//! # Huffpress CLI
//!
//! File-level front end for the Huffpress codec: input filtering, artifact
//! persistence, configuration, and the interactive menu used by the
//! `huffpress` binary.
//!
//! ## Artifacts
//!
//! Compressing `notes.txt` produces two files:
//!
//! | Artifact        | Layout                                     |
//! |-----------------|--------------------------------------------|
//! | compressed file | `[padding byte][MSB-first packed code bits]` |
//! | code table file | bincode-encoded `CodeTable`                |
//!
//! Both are needed to decompress.

pub mod alphabet;
pub mod config;
pub mod menu;
pub mod pipeline;
pub mod storage;

pub use alphabet::{filter_text, filter_text_with, is_admitted};
pub use config::CliConfig;
pub use menu::{suggest_table_path, Menu, MenuChoice, Request};
pub use pipeline::{compress_file, decompress_file, CompressReport, Pipeline};
