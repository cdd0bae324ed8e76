//! abpe-core - Core data model for ASCII byte-pair encoding
//!
//! This crate provides the fundamental data structures shared by training,
//! encoding and decoding: the ASCII alphabet, the vocabulary and the
//! ordered merge rule set.
//!
//! # Example
//!
//! ```rust
//! use abpe_core::{MergeRules, Vocabulary};
//!
//! let mut vocab = Vocabulary::new();
//! let mut merges = MergeRules::new();
//!
//! let id = merges.add_merge((49, 50))?;
//! vocab.add_merge((49, 50), id)?;
//! assert_eq!(vocab.get_token(id), Some("12"));
//! # Ok::<(), abpe_core::TokenizerError>(())
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

pub mod ascii;
pub use ascii::{ascii_to_string, string_to_ascii, validate_ascii, ASCII_SIZE, FIRST_MERGE_ID};

// Core BPE data model
pub mod core;
pub use core::{MergeMap, MergeRules, Pair, SymbolId, VocabR, Vocabulary};
