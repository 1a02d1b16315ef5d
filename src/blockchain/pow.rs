use std::sync::atomic::{AtomicBool, Ordering};

use super::hash::hash_bytes;
use crate::transaction::Transaction;

/// Serialize a transaction list for the proof-of-work preimage.
///
/// Mining (pool-origin transactions) and validation (peer-origin
/// transactions) both go through this single call site, so the two paths
/// produce byte-identical strings for equal logical content.
pub fn canonical_transactions(transactions: &[Transaction]) -> String {
    serde_json::to_string(transactions).expect("serialize transactions")
}

fn guess_digest(index: u64, previous_hash: &str, transactions_json: &str, nonce: u64) -> String {
    let guess = format!("{index}{previous_hash}{transactions_json}{nonce}");
    hash_bytes(guess.as_bytes())
}

/// Check a single nonce against the difficulty target.
pub fn valid_proof(
    index: u64,
    previous_hash: &str,
    transactions: &[Transaction],
    nonce: u64,
    target: &str,
) -> bool {
    let txs_json = canonical_transactions(transactions);
    guess_digest(index, previous_hash, &txs_json, nonce).starts_with(target)
}

/// Brute-force the nonce for a block, starting at 0 and incrementing.
///
/// CPU-bound and blocking; there is no upper bound on the search, which
/// terminates probabilistically. The `cancel` flag is checked every
/// iteration so a stale mining attempt can be abandoned; a cancelled
/// search returns `None`.
pub fn solve(
    index: u64,
    previous_hash: &str,
    transactions: &[Transaction],
    target: &str,
    cancel: &AtomicBool,
) -> Option<u64> {
    let txs_json = canonical_transactions(transactions);
    let mut nonce: u64 = 0;
    loop {
        if cancel.load(Ordering::Relaxed) {
            return None;
        }
        if guess_digest(index, previous_hash, &txs_json, nonce).starts_with(target) {
            return Some(nonce);
        }
        nonce += 1;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;

    use super::{canonical_transactions, solve, valid_proof};
    use crate::transaction::Transaction;

    #[test]
    fn solve_finds_a_nonce_valid_proof_accepts() {
        let txs = vec![Transaction::new("alice".into(), "bob".into(), 10)];
        let nonce = solve(1, "prev", &txs, "00", &AtomicBool::new(false)).unwrap();
        assert!(valid_proof(1, "prev", &txs, nonce, "00"));
    }

    #[test]
    fn proof_is_target_specific() {
        let txs = vec![Transaction::new("alice".into(), "bob".into(), 10)];
        let nonce = solve(1, "prev", &txs, "00", &AtomicBool::new(false)).unwrap();
        // The digest starts with "00", so it cannot also start with "ff".
        assert!(!valid_proof(1, "prev", &txs, nonce, "ff"));
    }

    #[test]
    fn cancelled_search_returns_none() {
        let flag = AtomicBool::new(true);
        assert_eq!(solve(1, "prev", &[], "00", &flag), None);
    }

    #[test]
    fn pool_and_peer_transactions_serialize_identically() {
        let pool = vec![Transaction::new("alice".into(), "bob".into(), 10)];
        let wire = serde_json::to_string(&pool).unwrap();
        let from_peer: Vec<Transaction> = serde_json::from_str(&wire).unwrap();
        assert_eq!(canonical_transactions(&pool), canonical_transactions(&from_peer));
    }
}
