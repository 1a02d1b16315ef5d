use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::transaction::Transaction;

/// A single block in the chain, holding the transactions settled at that
/// point and the proof-of-work nonce that sealed it.
///
/// Fields are declared in lexicographic order so `hash::hash_value` sees a
/// canonical serialization; see that function for the invariant. Blocks are
/// never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub nonce: u64,
    pub previous_hash: String,
    pub timestamp: f64,
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Create a block stamped with the current wall-clock time.
    pub fn new(
        index: u64,
        previous_hash: String,
        transactions: Vec<Transaction>,
        nonce: u64,
    ) -> Self {
        Self {
            index,
            nonce,
            previous_hash,
            timestamp: Utc::now().timestamp_micros() as f64 / 1_000_000.0,
            transactions,
        }
    }
}
