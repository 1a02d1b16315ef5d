use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::blockchain::{Block, Blockchain, DEFAULT_DIFFICULTY_TARGET};
use crate::transaction::Transaction;

/// Shared application state: the in-memory ledger, the registry of known
/// peers and this node's identity. Nothing here survives a restart.
pub struct AppState {
    pub blockchain: Mutex<Blockchain>,
    pub peers: Mutex<HashSet<String>>,
    pub node_id: String,
    /// Raised by the sync endpoint to abort an in-flight mining search.
    pub mine_cancel: AtomicBool,
    pub http: reqwest::Client,
}

impl AppState {
    /// Build a node with an explicit identity and difficulty target.
    ///
    /// The ledger is owned here rather than living in a process global, so
    /// tests can run several independent nodes side by side.
    pub fn new(node_id: String, difficulty_target: String) -> Self {
        Self {
            blockchain: Mutex::new(Blockchain::new(difficulty_target)),
            peers: Mutex::new(HashSet::new()),
            node_id,
            mine_cancel: AtomicBool::new(false),
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(5))
                .build()
                .expect("build http client"),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        let node_id = uuid::Uuid::new_v4().simple().to_string();
        Self::new(node_id, DEFAULT_DIFFICULTY_TARGET.to_string())
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub chain: &'a [Block],
    pub length: usize,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
}

/* ---------- Mining API Models ---------- */

#[derive(Serialize)]
pub struct MineResponse {
    pub message: String,
    pub index: u64,
    pub previous_hash: String,
    pub nonce: u64,
    pub transactions: Vec<Transaction>,
}

/* ---------- TX API Models ---------- */

#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: String,
    pub recipient: String,
    pub amount: u64,
}

#[derive(Serialize)]
pub struct NewTxResponse {
    pub message: String,
    pub index: u64,
}

/* ---------- Peer API Models ---------- */

#[derive(Deserialize)]
pub struct RegisterPeersRequest {
    pub peers: Vec<String>,
}

#[derive(Serialize)]
pub struct RegisterPeersResponse {
    pub message: String,
    pub peers: Vec<String>,
}

#[derive(Serialize)]
pub struct SyncResponse {
    pub updated: bool,
    pub chain: Vec<Block>,
    pub length: usize,
}
