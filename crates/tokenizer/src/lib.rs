//! abpe-tokenizer - High-level ASCII BPE tokenizer API
//!
//! This crate integrates the vocabulary, the merge rules and the trainer into
//! a single tokenizer type.
//!
//! # Features
//!
//! - Train from a corpus with a merge budget, or start untrained
//! - Encode ASCII text to token ids and decode ids back to text
//! - Parallel batch encoding and decoding
//! - Read-only access to the vocabulary and merge rules
//!
//! # Example
//!
//! ```rust
//! use abpe_tokenizer::Tokenizer;
//!
//! let tokenizer = Tokenizer::from_data("123123", 2)?;
//!
//! let ids = tokenizer.encode("12312312")?;
//! assert_eq!(ids, vec![129, 129, 128]);
//!
//! assert_eq!(tokenizer.decode(&ids)?, "12312312");
//! # Ok::<(), abpe_tokenizer::TokenizerError>(())
//! ```

// Re-export core types
pub use abpe_core::{
    ascii_to_string, string_to_ascii, MergeRules, Pair, Result, SymbolId, TokenizerError,
    Vocabulary,
};
pub use abpe_training::{StopReason, TrainingConfig};

// Tokenizer API
pub mod tokenizer;
pub use tokenizer::{Tokenizer, TokenizerBuilder};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
