//! Vocabulary storage and lookup.
//!
//! The vocabulary is an ordered table from symbol id to the literal string it
//! expands to, using CompactString for memory-efficient storage of the short
//! entries BPE produces.

use crate::ascii::ASCII_SIZE;
use crate::core::merges::{Pair, SymbolId};
use crate::error::{Result, TokenizerError};
use compact_str::CompactString;

/// Reverse mapping: id -> token string, indexed by id.
pub type VocabR = Vec<CompactString>;

/// Symbol table seeded with the 128 ASCII characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    /// Reverse mapping: id -> token string
    vocab_r: VocabR,
}

impl Vocabulary {
    /// Create a vocabulary holding only the ASCII alphabet.
    pub fn new() -> Self {
        Self::with_capacity(ASCII_SIZE)
    }

    /// Create an ASCII vocabulary with room for `capacity` entries in total.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut vocab_r = VocabR::with_capacity(capacity.max(ASCII_SIZE));
        vocab_r.extend((0..ASCII_SIZE as u8).map(|b| {
            let mut s = CompactString::default();
            s.push(char::from(b));
            s
        }));

        Self { vocab_r }
    }

    /// Add the entry for a merge and return its id.
    ///
    /// `new_id` must be the next free id; the entry is the concatenation of
    /// the two operands' strings.
    pub fn add_merge(&mut self, pair: Pair, new_id: SymbolId) -> Result<SymbolId> {
        if new_id as usize != self.vocab_r.len() {
            return Err(TokenizerError::InvalidMerge(format!(
                "expected next id {}, got {}",
                self.vocab_r.len(),
                new_id
            )));
        }

        let left = self.expand(pair.0)?;
        let right = self.expand(pair.1)?;
        let mut token = CompactString::with_capacity(left.len() + right.len());
        token.push_str(left);
        token.push_str(right);

        self.vocab_r.push(token);
        Ok(new_id)
    }

    /// Get the token string for an id.
    #[inline]
    pub fn get_token(&self, id: SymbolId) -> Option<&str> {
        self.vocab_r.get(id as usize).map(CompactString::as_str)
    }

    /// Like [`get_token`](Self::get_token), failing with a vocabulary error.
    #[inline]
    pub fn expand(&self, id: SymbolId) -> Result<&str> {
        self.get_token(id).ok_or(TokenizerError::Vocabulary(id))
    }

    /// Get the size of the vocabulary.
    #[inline]
    pub fn len(&self) -> usize {
        self.vocab_r.len()
    }

    /// Always false: the ASCII entries are never removed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vocab_r.is_empty()
    }

    /// Iterate over `(id, token)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &str)> + '_ {
        self.vocab_r
            .iter()
            .enumerate()
            .map(|(id, token)| (id as SymbolId, token.as_str()))
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<SymbolId> for Vocabulary {
    type Output = str;

    fn index(&self, id: SymbolId) -> &str {
        &self.vocab_r[id as usize]
    }
}
