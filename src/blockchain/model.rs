use std::sync::atomic::AtomicBool;

use super::{Block, GENESIS_SEED, MINING_REWARD, MINING_SENDER, hash::hash_value, pow};
use crate::error::NodeError;
use crate::transaction::Transaction;

/// Simple in-memory ledger with Proof-of-Work: the chain plus the pool of
/// transactions awaiting inclusion in the next block.
#[derive(Debug)]
pub struct Blockchain {
    pub chain: Vec<Block>,
    pending: Vec<Transaction>,
    difficulty_target: String,
}

impl Blockchain {
    /// Initialize a new ledger seeded with its genesis block.
    ///
    /// The genesis `previous_hash` is the digest of a fixed placeholder
    /// value, not of a real block, and its nonce is mined over that digest
    /// with an empty transaction list. Blocking: proof-of-work for index 0
    /// completes before the ledger is usable.
    pub fn new(difficulty_target: String) -> Self {
        let mut bc = Self {
            chain: Vec::new(),
            pending: Vec::new(),
            difficulty_target,
        };

        let genesis_hash = hash_value(&GENESIS_SEED);
        let nonce = pow::solve(
            0,
            &genesis_hash,
            &[],
            &bc.difficulty_target,
            &AtomicBool::new(false),
        )
        .expect("genesis mining is never cancelled");

        bc.append_block(nonce, Some(genesis_hash))
            .expect("genesis append cannot fail");
        bc
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> Result<&Block, NodeError> {
        self.chain.last().ok_or(NodeError::EmptyChain)
    }

    /// Queue a transaction for the next mined block and return the index
    /// that block will receive.
    pub fn add_transaction(&mut self, sender: String, recipient: String, amount: u64) -> u64 {
        self.pending
            .push(Transaction::new(sender, recipient, amount));
        self.chain.len() as u64
    }

    /// Inject the mining reward ahead of the queued transactions, so the
    /// reward rides first in the sealed block.
    pub fn push_reward(&mut self, recipient: String) {
        self.pending.insert(
            0,
            Transaction::new(MINING_SENDER.to_string(), recipient, MINING_REWARD),
        );
    }

    /// Undo `push_reward` after an abandoned mining attempt.
    pub fn pop_reward(&mut self) {
        if self.pending.first().is_some_and(|tx| tx.sender == MINING_SENDER) {
            self.pending.remove(0);
        }
    }

    /// Seal the pending pool into a new block and push it onto the chain.
    ///
    /// The block's index is the current chain length. When `previous_hash`
    /// is not supplied it is computed from the current last block. The pool
    /// is drained into the block; chain and pool mutate together, so no
    /// partial state is observable through `&self` afterwards.
    pub fn append_block(
        &mut self,
        nonce: u64,
        previous_hash: Option<String>,
    ) -> Result<&Block, NodeError> {
        let previous_hash = match previous_hash {
            Some(h) => h,
            None => hash_value(self.last_block()?),
        };

        let block = Block::new(
            self.chain.len() as u64,
            previous_hash,
            std::mem::take(&mut self.pending),
            nonce,
        );
        self.chain.push(block);

        Ok(self.chain.last().expect("chain non-empty after push"))
    }

    /// Wholesale chain substitution; used only after a longer candidate
    /// passed validation. The pending pool is left untouched.
    pub fn replace_chain(&mut self, new_chain: Vec<Block>) {
        self.chain = new_chain;
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn difficulty_target(&self) -> &str {
        &self.difficulty_target
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;

    use super::Blockchain;
    use crate::blockchain::{DEFAULT_DIFFICULTY_TARGET, GENESIS_SEED, hash::hash_value, pow};

    #[test]
    fn fresh_ledger_holds_only_genesis() {
        let bc = Blockchain::new(DEFAULT_DIFFICULTY_TARGET.to_string());
        assert_eq!(bc.len(), 1);

        let genesis = bc.last_block().unwrap();
        assert_eq!(genesis.index, 0);
        assert!(genesis.transactions.is_empty());
        assert_eq!(genesis.previous_hash, hash_value(&GENESIS_SEED));
        assert!(pow::valid_proof(
            0,
            &genesis.previous_hash,
            &genesis.transactions,
            genesis.nonce,
            DEFAULT_DIFFICULTY_TARGET,
        ));
    }

    #[test]
    fn add_transaction_reports_next_block_index() {
        let mut bc = Blockchain::new("0".to_string());
        assert_eq!(bc.add_transaction("alice".into(), "bob".into(), 10), 1);
        assert_eq!(bc.pending().len(), 1);
        // A second queued transaction lands in the same upcoming block.
        assert_eq!(bc.add_transaction("bob".into(), "carol".into(), 3), 1);
    }

    #[test]
    fn append_drains_pool_and_links_to_tip() {
        let mut bc = Blockchain::new("0".to_string());
        bc.add_transaction("alice".into(), "bob".into(), 10);

        let tip_hash = hash_value(bc.last_block().unwrap());
        let nonce = pow::solve(1, &tip_hash, bc.pending(), "0", &AtomicBool::new(false)).unwrap();
        let block = bc.append_block(nonce, Some(tip_hash.clone())).unwrap();

        assert_eq!(block.index, 1);
        assert_eq!(block.previous_hash, tip_hash);
        assert_eq!(block.transactions.len(), 1);
        assert!(bc.pending().is_empty());
    }

    #[test]
    fn append_without_previous_hash_uses_tip_digest() {
        let mut bc = Blockchain::new("0".to_string());
        let tip_hash = hash_value(bc.last_block().unwrap());
        let nonce = pow::solve(1, &tip_hash, &[], "0", &AtomicBool::new(false)).unwrap();

        let block = bc.append_block(nonce, None).unwrap();
        assert_eq!(block.previous_hash, tip_hash);
    }

    #[test]
    fn reward_rides_first_and_can_be_retracted() {
        let mut bc = Blockchain::new("0".to_string());
        bc.add_transaction("alice".into(), "bob".into(), 10);
        bc.push_reward("node-1".into());

        assert_eq!(bc.pending().len(), 2);
        assert_eq!(bc.pending()[0].sender, crate::blockchain::MINING_SENDER);
        assert_eq!(bc.pending()[0].recipient, "node-1");

        bc.pop_reward();
        assert_eq!(bc.pending().len(), 1);
        assert_eq!(bc.pending()[0].sender, "alice");
        // A second retraction must not eat a real transaction.
        bc.pop_reward();
        assert_eq!(bc.pending().len(), 1);
    }

    #[test]
    fn replace_chain_swaps_wholesale() {
        let mut bc = Blockchain::new("0".to_string());
        let other = Blockchain::new("0".to_string());
        let replacement = other.chain.clone();

        bc.add_transaction("alice".into(), "bob".into(), 10);
        bc.replace_chain(replacement.clone());

        assert_eq!(bc.chain, replacement);
        // The pool survives a chain swap.
        assert_eq!(bc.pending().len(), 1);
    }
}
