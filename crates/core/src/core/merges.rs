//! Merge rule management for BPE.
//!
//! Merge rules are stored using symbol ids rather than strings for fast
//! comparison. Creation order is priority order: the rule learned first has
//! rank 0 and produces id 128, the next has rank 1 and produces id 129, and
//! so on.

use crate::ascii::FIRST_MERGE_ID;
use crate::error::{Result, TokenizerError};
use ahash::AHashMap;

/// Identifier of one vocabulary entry.
pub type SymbolId = u32;

/// A pair of symbol ids that can be merged.
pub type Pair = (SymbolId, SymbolId);

/// Merge rule mapping: pair -> (rank, new_symbol_id).
///
/// The rank indicates the priority of this merge rule (lower rank = higher priority).
pub type MergeMap = AHashMap<Pair, (u32, SymbolId)>;

/// Collection of BPE merge rules with efficient lookup.
#[derive(Debug, Clone, Default)]
pub struct MergeRules {
    /// Merge rules: pair -> (rank, new_symbol_id)
    merges: MergeMap,
    /// Pairs in creation order; index is the rank
    order: Vec<Pair>,
}

impl MergeRules {
    /// Create a new empty collection of merge rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new collection with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            merges: MergeMap::with_capacity(capacity),
            order: Vec::with_capacity(capacity),
        }
    }

    /// The id the next merge will produce.
    #[inline]
    pub fn next_id(&self) -> SymbolId {
        FIRST_MERGE_ID + self.order.len() as SymbolId
    }

    /// Append a merge rule and return the id it produces.
    ///
    /// Both operands must already exist (ASCII or an earlier merge) and the
    /// pair must not have been learned before.
    pub fn add_merge(&mut self, pair: Pair) -> Result<SymbolId> {
        let next_id = self.next_id();

        if pair.0 >= next_id || pair.1 >= next_id {
            return Err(TokenizerError::InvalidMerge(format!(
                "pair ({}, {}) references an id not below {}",
                pair.0, pair.1, next_id
            )));
        }
        if self.merges.contains_key(&pair) {
            return Err(TokenizerError::InvalidMerge(format!(
                "pair ({}, {}) already merged",
                pair.0, pair.1
            )));
        }

        let rank = self.order.len() as u32;
        self.merges.insert(pair, (rank, next_id));
        self.order.push(pair);

        Ok(next_id)
    }

    /// Get the id a pair merges into.
    #[inline]
    pub fn get(&self, pair: Pair) -> Option<SymbolId> {
        self.merges.get(&pair).map(|&(_, id)| id)
    }

    /// Get the rank (creation index) of a pair.
    #[inline]
    pub fn rank(&self, pair: Pair) -> Option<u32> {
        self.merges.get(&pair).map(|&(rank, _)| rank)
    }

    /// Get the number of merge rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if there are no merge rules.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate over `(pair, new_id)` in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (Pair, SymbolId)> + '_ {
        self.order
            .iter()
            .enumerate()
            .map(|(rank, &pair)| (pair, FIRST_MERGE_ID + rank as SymbolId))
    }

    /// Borrow the underlying lookup map.
    pub fn as_map(&self) -> &MergeMap {
        &self.merges
    }

    /// Create merge rules from a list of pairs.
    ///
    /// The pairs are assigned ranks in order (0, 1, 2, ...).
    pub fn from_pairs(pairs: impl IntoIterator<Item = Pair>) -> Result<Self> {
        let mut rules = Self::new();

        for pair in pairs {
            rules.add_merge(pair)?;
        }

        Ok(rules)
    }
}

// The lookup map is derived from `order`.
impl PartialEq for MergeRules {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl Eq for MergeRules {}
