//! Main tokenizer implementation.
//!
//! This module provides the high-level `Tokenizer` struct that owns a
//! vocabulary and its merge rules and converts between ASCII text and
//! token ids.

use abpe_core::{
    string_to_ascii, MergeRules, Pair, Result, SymbolId, TokenizerError, Vocabulary, ASCII_SIZE,
};
use abpe_training::{merge_pair, BpeTrainer, TrainingConfig, TrainingConfigBuilder};
use rayon::prelude::*;
use tracing::trace;

/// Builder for training a tokenizer.
#[derive(Debug, Clone, Default)]
pub struct TokenizerBuilder {
    config: TrainingConfigBuilder,
}

impl TokenizerBuilder {
    /// Create a new tokenizer builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the merge budget.
    pub fn num_merges(mut self, num_merges: usize) -> Self {
        self.config = self.config.num_merges(num_merges);
        self
    }

    /// Set the minimum frequency for merges.
    pub fn min_frequency(mut self, freq: u64) -> Self {
        self.config = self.config.min_frequency(freq);
        self
    }

    /// Enable or disable parallel pair counting.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config = self.config.parallel(parallel);
        self
    }

    /// Train a tokenizer on `data` with this configuration.
    pub fn train(self, data: &str) -> Result<Tokenizer> {
        Tokenizer::from_config(data, self.config.build()?)
    }
}

/// ASCII BPE tokenizer.
///
/// Immutable once built; an untrained tokenizer simply has no merge rules.
/// Shared references may be used from many threads at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokenizer {
    /// Vocabulary
    vocab: Vocabulary,
    /// Merge rules
    merges: MergeRules,
}

impl Tokenizer {
    /// Create an untrained tokenizer: 128 ASCII symbols and no merges.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tokenizer builder.
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::new()
    }

    /// Train a tokenizer with up to `num_merges` merges.
    pub fn from_data(data: &str, num_merges: usize) -> Result<Self> {
        Self::from_config(data, TrainingConfig::with_num_merges(num_merges))
    }

    /// Train a tokenizer with an explicit training configuration.
    pub fn from_config(data: &str, config: TrainingConfig) -> Result<Self> {
        let (vocab, merges) = BpeTrainer::new(config).train(data)?.into_parts();
        Ok(Self { vocab, merges })
    }

    /// Rebuild a tokenizer from merge pairs listed in creation order.
    pub fn from_merges(pairs: impl IntoIterator<Item = Pair>) -> Result<Self> {
        let merges = MergeRules::from_pairs(pairs)?;
        let mut vocab = Vocabulary::with_capacity(ASCII_SIZE + merges.len());

        for (pair, id) in merges.iter() {
            vocab.add_merge(pair, id)?;
        }

        Ok(Self { vocab, merges })
    }

    /// Assemble a tokenizer from a vocabulary and merge rules.
    ///
    /// Every learned entry must be the concatenation of its pair's entries.
    pub fn from_parts(vocab: Vocabulary, merges: MergeRules) -> Result<Self> {
        if vocab.len() != ASCII_SIZE + merges.len() {
            return Err(TokenizerError::InvalidMerge(format!(
                "vocabulary has {} entries but {} merges were given",
                vocab.len(),
                merges.len()
            )));
        }

        for (pair, id) in merges.iter() {
            let left = vocab.expand(pair.0)?;
            let right = vocab.expand(pair.1)?;
            let merged = vocab.expand(id)?;
            if merged.len() != left.len() + right.len()
                || !merged.starts_with(left)
                || !merged.ends_with(right)
            {
                return Err(TokenizerError::InvalidMerge(format!(
                    "entry {id} is {merged:?}, expected {left:?} + {right:?}"
                )));
            }
        }

        Ok(Self { vocab, merges })
    }

    /// Encode text to token ids.
    ///
    /// Starts from the ASCII codes and keeps applying the earliest-learned
    /// rule present in the sequence, rewriting all of its non-overlapping
    /// occurrences left to right, until no adjacent pair has a rule.
    pub fn encode(&self, text: &str) -> Result<Vec<SymbolId>> {
        let mut ids = string_to_ascii(text)?;

        if !self.merges.is_empty() {
            while ids.len() >= 2 {
                let Some((pair, new_id)) = self.lowest_rank_pair(&ids) else {
                    break;
                };
                merge_pair(&mut ids, pair, new_id);
            }
        }

        trace!(text_len = text.len(), tokens = ids.len(), "encoded text");
        Ok(ids)
    }

    /// The applicable pair learned earliest, with the id it merges into.
    fn lowest_rank_pair(&self, ids: &[SymbolId]) -> Option<(Pair, SymbolId)> {
        let merges = self.merges.as_map();

        ids.windows(2)
            .filter_map(|window| {
                let pair = (window[0], window[1]);
                merges.get(&pair).map(|&(rank, new_id)| (rank, pair, new_id))
            })
            .min_by_key(|&(rank, _, _)| rank)
            .map(|(_, pair, new_id)| (pair, new_id))
    }

    /// Encode a batch of texts (parallelized).
    pub fn encode_batch<S>(&self, texts: &[S]) -> Result<Vec<Vec<SymbolId>>>
    where
        S: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.encode(text.as_ref()))
            .collect()
    }

    /// Decode token ids back to text.
    ///
    /// Fails with a vocabulary error on the first id without an entry.
    pub fn decode(&self, ids: &[SymbolId]) -> Result<String> {
        ids.iter().map(|&id| self.vocab.expand(id)).collect()
    }

    /// Decode a batch of id sequences (parallelized).
    pub fn decode_batch<I>(&self, batch: &[I]) -> Result<Vec<String>>
    where
        I: AsRef<[SymbolId]> + Sync,
    {
        batch
            .par_iter()
            .map(|ids| self.decode(ids.as_ref()))
            .collect()
    }

    /// Look up the string each id expands to.
    pub fn token_strings(&self, ids: &[SymbolId]) -> Result<Vec<&str>> {
        ids.iter().map(|&id| self.vocab.expand(id)).collect()
    }

    /// Get the vocabulary size.
    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// Get the number of merge rules.
    pub fn num_merges(&self) -> usize {
        self.merges.len()
    }

    /// Get a reference to the vocabulary.
    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Get a reference to the merge rules.
    pub fn merge_rules(&self) -> &MergeRules {
        &self.merges
    }
}
