//! abpe-training - BPE training infrastructure
//!
//! This crate provides the training algorithm for learning BPE merge rules
//! over the ASCII alphabet.
//!
//! # Features
//!
//! - Adjacent pair frequency counting with optional rayon parallelism
//! - Deterministic merge selection (highest count, ties to the pair seen first)
//! - Configurable merge budget and minimum frequency
//!
//! # Example
//!
//! ```rust
//! use abpe_training::{BpeTrainer, TrainingConfig};
//!
//! let config = TrainingConfig::builder().num_merges(2).build()?;
//! let (vocab, merges) = BpeTrainer::new(config).train("123123")?.into_parts();
//!
//! assert_eq!(vocab.get_token(129), Some("123"));
//! assert_eq!(merges.get((128, 51)), Some(129));
//! # Ok::<(), abpe_training::TokenizerError>(())
//! ```

pub use abpe_core::{Result, TokenizerError};

// Training infrastructure
pub mod training;
pub use training::{
    best_pair, merge_pair, BpeTrainer, PairCounter, PairCounts, PairStats, StopReason,
    TrainingConfig, TrainingConfigBuilder, TrainingOutcome,
};
