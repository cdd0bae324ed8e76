//! Pair counting for BPE training.
//!
//! This module counts adjacent pair frequencies over the working token
//! sequence, with support for parallel processing. Each pair also records the
//! index of its first occurrence, which breaks frequency ties.

use super::merge::merge_pair;
use abpe_core::{Pair, SymbolId};
use ahash::AHashMap;
use rayon::prelude::*;

/// Frequency and first position of one adjacent pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairStats {
    /// Number of occurrences (overlapping occurrences all count)
    pub count: u64,
    /// Index of the left element of the first occurrence
    pub first: usize,
}

impl PairStats {
    fn new(first: usize) -> Self {
        Self { count: 1, first }
    }

    fn absorb(&mut self, other: PairStats) {
        self.count += other.count;
        self.first = self.first.min(other.first);
    }

    /// True if `self` should be merged in preference to `other`.
    ///
    /// Higher count wins; equal counts go to the pair seen first.
    #[inline]
    pub fn beats(&self, other: &PairStats) -> bool {
        self.count > other.count || (self.count == other.count && self.first < other.first)
    }
}

/// Pair -> statistics over the whole sequence.
pub type PairCounts = AHashMap<Pair, PairStats>;

/// Counter owning the working token sequence during training.
#[derive(Debug, Clone, Default)]
pub struct PairCounter {
    ids: Vec<SymbolId>,
}

impl PairCounter {
    /// Create a counter over an initial token sequence.
    pub fn new(ids: Vec<SymbolId>) -> Self {
        Self { ids }
    }

    /// Count all pairs in parallel.
    ///
    /// Per-thread tables are folded into one, so the result is identical to
    /// [`count_pairs_sequential`](Self::count_pairs_sequential).
    pub fn count_pairs_parallel(&self) -> PairCounts {
        self.ids
            .par_windows(2)
            .enumerate()
            .fold(PairCounts::new, |mut acc, (i, window)| {
                acc.entry((window[0], window[1]))
                    .and_modify(|stats| stats.count += 1)
                    .or_insert_with(|| PairStats::new(i));
                acc
            })
            .reduce(PairCounts::new, |mut acc, part| {
                for (pair, stats) in part {
                    acc.entry(pair)
                        .and_modify(|existing| existing.absorb(stats))
                        .or_insert(stats);
                }
                acc
            })
    }

    /// Count all pairs sequentially.
    pub fn count_pairs_sequential(&self) -> PairCounts {
        let mut pair_counts = PairCounts::new();

        for (i, window) in self.ids.windows(2).enumerate() {
            pair_counts
                .entry((window[0], window[1]))
                .and_modify(|stats| stats.count += 1)
                .or_insert_with(|| PairStats::new(i));
        }

        pair_counts
    }

    /// Count pairs, in parallel or not.
    pub fn count_pairs(&self, parallel: bool) -> PairCounts {
        if parallel {
            self.count_pairs_parallel()
        } else {
            self.count_pairs_sequential()
        }
    }

    /// Replace every non-overlapping occurrence of `pair`, left to right.
    ///
    /// Returns the number of replacements.
    pub fn merge_pair(&mut self, pair: Pair, new_id: SymbolId) -> usize {
        merge_pair(&mut self.ids, pair, new_id)
    }

    /// Length of the working sequence.
    pub(crate) fn len(&self) -> usize {
        self.ids.len()
    }
}

/// Pick the pair to merge next.
pub fn best_pair(counts: &PairCounts) -> Option<(Pair, PairStats)> {
    counts
        .iter()
        .map(|(&pair, &stats)| (pair, stats))
        .reduce(|best, candidate| {
            if candidate.1.beats(&best.1) {
                candidate
            } else {
                best
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(text: &str) -> Vec<SymbolId> {
        text.bytes().map(SymbolId::from).collect()
    }

    #[test]
    fn test_count_pairs_sequential() {
        let counter = PairCounter::new(ids("123123"));
        let pairs = counter.count_pairs_sequential();

        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs.get(&(49, 50)), Some(&PairStats { count: 2, first: 0 }));
        assert_eq!(pairs.get(&(50, 51)), Some(&PairStats { count: 2, first: 1 }));
        assert_eq!(pairs.get(&(51, 49)), Some(&PairStats { count: 1, first: 2 }));
    }

    #[test]
    fn test_overlapping_occurrences_all_count() {
        let counter = PairCounter::new(ids("aaaa"));
        let pairs = counter.count_pairs_sequential();
        assert_eq!(pairs.get(&(97, 97)).map(|stats| stats.count), Some(3));
    }

    #[test]
    fn test_count_pairs_parallel_matches_sequential() {
        let text = "the quick brown fox jumps over the lazy dog. ".repeat(500);
        let counter = PairCounter::new(ids(&text));

        let parallel = counter.count_pairs_parallel();
        let sequential = counter.count_pairs_sequential();

        assert_eq!(parallel.len(), sequential.len());
        for (pair, stats) in sequential.iter() {
            assert_eq!(parallel.get(pair), Some(stats));
        }
    }

    #[test]
    fn test_short_sequences_have_no_pairs() {
        assert!(PairCounter::new(vec![]).count_pairs_parallel().is_empty());
        assert!(PairCounter::new(vec![7]).count_pairs_sequential().is_empty());
    }

    #[test]
    fn test_best_pair_prefers_first_seen_on_tie() {
        let counter = PairCounter::new(ids("123123"));
        let pairs = counter.count_pairs_sequential();

        let (pair, stats) = best_pair(&pairs).unwrap();
        assert_eq!(pair, (49, 50));
        assert_eq!(stats.count, 2);
    }

    #[test]
    fn test_best_pair_tie_goes_to_earliest_not_smallest() {
        let counter = PairCounter::new(ids("zyab"));
        let (pair, _) = best_pair(&counter.count_pairs_sequential()).unwrap();
        assert_eq!(pair, (122, 121));
    }

    #[test]
    fn test_parallel_tie_keeps_global_first_position() {
        let text = format!("{}{}", "zy".repeat(50_000), "ab".repeat(50_000));
        let counter = PairCounter::new(ids(&text));
        let pairs = counter.count_pairs_parallel();

        assert_eq!(
            pairs.get(&(122, 121)),
            Some(&PairStats { count: 50_000, first: 0 })
        );
        assert_eq!(
            pairs.get(&(97, 98)),
            Some(&PairStats { count: 50_000, first: 100_000 })
        );
        assert_eq!(best_pair(&pairs).map(|(pair, _)| pair), Some((122, 121)));
    }

    #[test]
    fn test_best_pair_prefers_higher_count() {
        // "cd" appears after "ab" but more often.
        let counter = PairCounter::new(ids("ab cdcdcd"));
        let (pair, _) = best_pair(&counter.count_pairs_sequential()).unwrap();
        assert_eq!(pair, (99, 100));
    }

    #[test]
    fn test_merge_pair() {
        let mut counter = PairCounter::new(ids("123123"));
        assert_eq!(counter.merge_pair((49, 50), 128), 2);
        assert_eq!(counter.ids, vec![128, 51, 128, 51]);
        assert_eq!(counter.len(), 4);
    }
}
