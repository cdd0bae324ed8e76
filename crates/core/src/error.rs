//! Error types for the ASCII BPE tokenizer.

use thiserror::Error;

/// Main error type for the tokenizer library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizerError {
    /// Input text contains a character outside the 7-bit ASCII range
    #[error("Non-ASCII character {ch:?} at position {position}")]
    NonAscii { ch: char, position: usize },

    /// Token ID with no vocabulary entry
    #[error("Vocabulary error: unknown token ID {0}")]
    Vocabulary(u32),

    /// Invalid merge rule
    #[error("Invalid merge rule: {0}")]
    InvalidMerge(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for tokenizer operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;
