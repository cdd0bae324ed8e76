//! In-place pair replacement shared by training and encoding.

use abpe_core::{Pair, SymbolId};

/// Replace every non-overlapping occurrence of `pair` in `ids` with `new_id`.
///
/// Single left-to-right pass: a freshly produced `new_id` is never matched
/// again in the same pass. Returns the number of replacements.
pub fn merge_pair(ids: &mut Vec<SymbolId>, pair: Pair, new_id: SymbolId) -> usize {
    let len = ids.len();
    let mut read = 0;
    let mut write = 0;
    let mut merged = 0;

    while read < len {
        if read + 1 < len && ids[read] == pair.0 && ids[read + 1] == pair.1 {
            ids[write] = new_id;
            read += 2;
            merged += 1;
        } else {
            ids[write] = ids[read];
            read += 1;
        }
        write += 1;
    }

    ids.truncate(write);
    merged
}
