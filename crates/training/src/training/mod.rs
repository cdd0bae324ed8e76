//! Training infrastructure for BPE tokenizers.
//!
//! This module provides the training algorithm and utilities for
//! learning BPE merge rules from text data.

pub mod config;
pub mod counter;
pub mod merge;
pub mod trainer;

pub use config::{TrainingConfig, TrainingConfigBuilder};
pub use counter::{best_pair, PairCounter, PairCounts, PairStats};
pub use merge::merge_pair;
pub use trainer::{BpeTrainer, StopReason, TrainingOutcome};
