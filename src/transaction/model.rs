use serde::{Deserialize, Serialize};

/// A transfer of `amount` from `sender` to `recipient`.
///
/// Fields are declared in lexicographic order so the derived serde output is
/// already canonical: a transaction list hashes to the same digest whether it
/// came from the local pending pool or was deserialized from a peer payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub amount: u64,
    pub recipient: String,
    pub sender: String,
}

impl Transaction {
    pub fn new(sender: String, recipient: String, amount: u64) -> Self {
        Self {
            amount,
            recipient,
            sender,
        }
    }
}
