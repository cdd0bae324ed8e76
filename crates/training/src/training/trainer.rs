//! BPE trainer implementation.
//!
//! Learns merge rules from an ASCII corpus by repeatedly merging the most
//! frequent adjacent pair of the working token sequence.

use super::config::TrainingConfig;
use super::counter::{best_pair, PairCounter};
use abpe_core::{string_to_ascii, MergeRules, Pair, Result, SymbolId, Vocabulary, ASCII_SIZE};
use tracing::{debug, info};

/// Why training finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// All `num_merges` merges were learned
    BudgetReached,
    /// Fewer than two tokens remain, so no pair exists
    SequenceExhausted,
    /// The best pair occurs fewer than `min_frequency` times
    BelowMinFrequency,
}

/// Result of a training run.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    /// Learned vocabulary (ASCII entries plus one entry per merge)
    pub vocab: Vocabulary,
    /// Learned merge rules in creation order
    pub merges: MergeRules,
    /// Length of the working sequence after the last merge
    pub final_len: usize,
    /// Why the loop ended
    pub stop_reason: StopReason,
}

impl TrainingOutcome {
    /// Split into the vocabulary and merge rules.
    pub fn into_parts(self) -> (Vocabulary, MergeRules) {
        (self.vocab, self.merges)
    }
}

/// BPE trainer.
///
/// Each iteration recounts every adjacent pair and makes one global,
/// sequential choice, so runs are reproducible whether or not counting is
/// parallel.
#[derive(Debug, Clone, Default)]
pub struct BpeTrainer {
    /// Configuration
    config: TrainingConfig,
}

impl BpeTrainer {
    /// Create a new BPE trainer with the given configuration.
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    /// Create a new BPE trainer with default configuration.
    pub fn with_num_merges(num_merges: usize) -> Self {
        Self::new(TrainingConfig::with_num_merges(num_merges))
    }

    /// Train on the given text.
    ///
    /// Fails with `NonAscii` before doing any work if the corpus holds a
    /// character outside the ASCII range.
    pub fn train(&self, text: &str) -> Result<TrainingOutcome> {
        self.config.validate()?;
        let ids = string_to_ascii(text)?;

        info!(
            corpus_len = ids.len(),
            num_merges = self.config.num_merges,
            min_frequency = self.config.min_frequency,
            "starting BPE training"
        );

        // Each merge shortens the sequence, so it bounds the merge count.
        let max_merges = self.config.num_merges.min(ids.len().saturating_sub(1));
        let mut vocab = Vocabulary::with_capacity(ASCII_SIZE.saturating_add(max_merges));
        let mut merges = MergeRules::with_capacity(max_merges);
        let mut counter = PairCounter::new(ids);
        let mut stop_reason = StopReason::BudgetReached;

        while merges.len() < self.config.num_merges {
            let pair_counts = counter.count_pairs(self.config.parallel);

            let Some((pair, stats)) = best_pair(&pair_counts) else {
                debug!(len = counter.len(), "sequence exhausted, stopping early");
                stop_reason = StopReason::SequenceExhausted;
                break;
            };

            if stats.count < self.config.min_frequency {
                debug!(
                    count = stats.count,
                    min_frequency = self.config.min_frequency,
                    "best pair below minimum frequency, stopping early"
                );
                stop_reason = StopReason::BelowMinFrequency;
                break;
            }

            let new_id = self.learn(&mut vocab, &mut merges, pair)?;
            let replaced = counter.merge_pair(pair, new_id);

            debug!(
                rank = merges.len() - 1,
                left = pair.0,
                right = pair.1,
                count = stats.count,
                replaced,
                new_id,
                "merged pair"
            );
        }

        info!(
            merges = merges.len(),
            vocab_size = vocab.len(),
            final_len = counter.len(),
            ?stop_reason,
            "finished BPE training"
        );

        Ok(TrainingOutcome {
            vocab,
            merges,
            final_len: counter.len(),
            stop_reason,
        })
    }

    /// Record a merge in both tables, keeping their ids in step.
    fn learn(
        &self,
        vocab: &mut Vocabulary,
        merges: &mut MergeRules,
        pair: Pair,
    ) -> Result<SymbolId> {
        let new_id = merges.add_merge(pair)?;
        vocab.add_merge(pair, new_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use abpe_core::TokenizerError;

    #[test]
    fn test_one_merge() {
        let (vocab, merges) = BpeTrainer::with_num_merges(1)
            .train("123123")
            .unwrap()
            .into_parts();

        assert_eq!(vocab.len(), 129);
        assert_eq!(vocab.get_token(128), Some("12"));
        assert_eq!(merges.len(), 1);
        assert_eq!(merges.get((49, 50)), Some(128));
    }

    #[test]
    fn test_two_merges() {
        let (vocab, merges) = BpeTrainer::with_num_merges(2)
            .train("123123")
            .unwrap()
            .into_parts();

        assert_eq!(vocab.len(), 130);
        assert_eq!(vocab.get_token(129), Some("123"));
        assert_eq!(merges.len(), 2);
        assert_eq!(merges.get((49, 50)), Some(128));
        assert_eq!(merges.get((128, 51)), Some(129));
    }

    #[test]
    fn test_zero_merges() {
        let outcome = BpeTrainer::with_num_merges(0).train("hello").unwrap();
        assert_eq!(outcome.vocab.len(), 128);
        assert!(outcome.merges.is_empty());
        assert_eq!(outcome.final_len, 5);
        assert_eq!(outcome.stop_reason, StopReason::BudgetReached);
    }

    #[test]
    fn test_stops_when_sequence_exhausted() {
        // "123123" collapses to a single token after 3 merges.
        let outcome = BpeTrainer::with_num_merges(10).train("123123").unwrap();

        assert_eq!(outcome.merges.len(), 3);
        assert_eq!(outcome.vocab.get_token(130), Some("123123"));
        assert_eq!(outcome.final_len, 1);
        assert_eq!(outcome.stop_reason, StopReason::SequenceExhausted);
    }

    #[test]
    fn test_huge_budget_stops_when_sequence_exhausted() {
        for num_merges in [usize::MAX, usize::MAX / 8, usize::MAX >> 30] {
            let outcome = BpeTrainer::with_num_merges(num_merges)
                .train("123123")
                .unwrap();

            assert_eq!(outcome.merges.len(), 3);
            assert_eq!(outcome.vocab.len(), 131);
            assert_eq!(outcome.stop_reason, StopReason::SequenceExhausted);
        }
    }

    #[test]
    fn test_empty_and_single_char_corpus() {
        for text in ["", "x"] {
            let outcome = BpeTrainer::with_num_merges(3).train(text).unwrap();
            assert!(outcome.merges.is_empty());
            assert_eq!(outcome.stop_reason, StopReason::SequenceExhausted);
        }
    }

    #[test]
    fn test_min_frequency_filter() {
        let config = TrainingConfig::builder()
            .num_merges(100)
            .min_frequency(2)
            .build()
            .unwrap();

        let outcome = BpeTrainer::new(config).train("abcabcxyz").unwrap();

        // "ab" then "abc" occur twice; every remaining pair occurs once.
        assert_eq!(outcome.merges.len(), 2);
        assert_eq!(outcome.vocab.get_token(129), Some("abc"));
        assert_eq!(outcome.stop_reason, StopReason::BelowMinFrequency);
    }

    #[test]
    fn test_frequency_ties_go_to_first_seen_pair() {
        // Every pair occurs once: merges walk the string from the left.
        let (vocab, merges) = BpeTrainer::with_num_merges(2)
            .train("abcd")
            .unwrap()
            .into_parts();

        assert_eq!(merges.get((97, 98)), Some(128));
        assert_eq!(merges.get((128, 99)), Some(129));
        assert_eq!(vocab.get_token(129), Some("abc"));
    }

    #[test]
    fn test_tie_break_is_first_seen_not_smallest_pair() {
        // (122, 121) and (97, 98) both occur once; "zy" comes first.
        let (_, merges) = BpeTrainer::with_num_merges(1)
            .train("zyab")
            .unwrap()
            .into_parts();

        assert_eq!(merges.get((122, 121)), Some(128));
        assert_eq!(merges.get((97, 98)), None);
    }

    #[test]
    fn test_tie_break_across_parallel_chunks() {
        // "zy" fills the first half and "ab" the second, tying at 50k each;
        // the two runs land in different rayon splits.
        let text = format!("{}{}", "zy".repeat(50_000), "ab".repeat(50_000));

        for parallel in [true, false] {
            let config = TrainingConfig::builder()
                .num_merges(1)
                .parallel(parallel)
                .build()
                .unwrap();
            let (_, merges) = BpeTrainer::new(config).train(&text).unwrap().into_parts();

            assert_eq!(merges.iter().next(), Some(((122, 121), 128)));
        }
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let text = "It was the best of times, it was the worst of times, ".repeat(200);
        let parallel = TrainingConfig::builder()
            .num_merges(40)
            .parallel(true)
            .build()
            .unwrap();
        let sequential = TrainingConfig {
            parallel: false,
            ..parallel.clone()
        };

        let a = BpeTrainer::new(parallel).train(&text).unwrap();
        let b = BpeTrainer::new(sequential).train(&text).unwrap();

        assert_eq!(a.merges, b.merges);
        assert_eq!(a.vocab, b.vocab);
    }

    #[test]
    fn test_training_is_deterministic() {
        let text = "to be, or not to be, that is the question";
        let trainer = BpeTrainer::with_num_merges(15);

        let first = trainer.train(text).unwrap();
        let second = trainer.train(text).unwrap();

        assert_eq!(first.merges, second.merges);
        assert_eq!(first.vocab, second.vocab);
    }

    #[test]
    fn test_non_ascii_corpus_rejected() {
        let err = BpeTrainer::with_num_merges(1).train("naïve").unwrap_err();
        assert_eq!(
            err,
            TokenizerError::NonAscii {
                ch: 'ï',
                position: 2
            }
        );
    }

    #[test]
    fn test_merge_ids_follow_creation_order() {
        let outcome = BpeTrainer::with_num_merges(20)
            .train("she sells sea shells by the sea shore")
            .unwrap();

        for (rank, (pair, id)) in outcome.merges.iter().enumerate() {
            assert_eq!(id, 128 + rank as u32);
            let expected = format!("{}{}", &outcome.vocab[pair.0], &outcome.vocab[pair.1]);
            assert_eq!(&outcome.vocab[id], expected);
        }
    }
}
