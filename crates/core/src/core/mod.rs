//! Core BPE data model.
//!
//! This module contains the symbol table and merge rule set shared by the
//! trainer, the encoder and the decoder.

pub mod merges;
pub mod vocab;

pub use merges::{MergeMap, MergeRules, Pair, SymbolId};
pub use vocab::{VocabR, Vocabulary};
