use super::{Block, hash::hash_value, pow};

/// Validate an entire candidate chain: linkage and proof-of-work.
///
/// Walks from block 1 onward (genesis is trusted structurally); the first
/// broken link or failed proof makes the whole chain invalid. Validity is
/// binary, with no partial-validity notion.
pub fn is_valid_chain(chain: &[Block], difficulty_target: &str) -> bool {
    for i in 1..chain.len() {
        let block = &chain[i];
        let prev = &chain[i - 1];

        // Check linkage
        if block.previous_hash != hash_value(prev) {
            return false;
        }

        // Check proof-of-work
        if !pow::valid_proof(
            block.index,
            &block.previous_hash,
            &block.transactions,
            block.nonce,
            difficulty_target,
        ) {
            return false;
        }
    }
    true
}
