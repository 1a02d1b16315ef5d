use std::sync::atomic::Ordering;

use actix_web::{HttpResponse, Responder, post, web};
use log::{info, warn};

use super::models::{AppState, MineResponse};
use crate::blockchain::{hash::hash_value, pow};

/// Mine a new block from the pending pool:
/// - Inject the mining reward (sentinel sender, this node as recipient)
/// - Brute-force a nonce over (index, tip hash, pool)
/// - Seal pool and nonce into a block and append it
///
/// The ledger lock is held for the whole search, so the pool cannot change
/// underneath the proof. A concurrent sync raises `mine_cancel` to abort a
/// search whose result it is about to obsolete.
#[post("/mine/")]
pub async fn mine_block(state: web::Data<AppState>) -> impl Responder {
    let mut bc = state.blockchain.lock().expect("mutex poisoned");
    state.mine_cancel.store(false, Ordering::Relaxed);

    bc.push_reward(state.node_id.clone());

    let last_block_hash = hash_value(bc.last_block().expect("ledger seeded with genesis"));
    let index = bc.len() as u64;

    let nonce = match pow::solve(
        index,
        &last_block_hash,
        bc.pending(),
        bc.difficulty_target(),
        &state.mine_cancel,
    ) {
        Some(nonce) => nonce,
        None => {
            bc.pop_reward();
            warn!("MINER - search for block #{index} aborted by chain sync");
            return HttpResponse::Conflict().body("mining aborted");
        }
    };

    let block = bc
        .append_block(nonce, Some(last_block_hash))
        .expect("append with explicit previous_hash cannot fail");

    info!(
        "MINER - sealed block #{} (nonce={}, txs={})",
        block.index,
        block.nonce,
        block.transactions.len()
    );

    HttpResponse::Ok().json(MineResponse {
        message: "Block successfully added (mined)".to_string(),
        index: block.index,
        previous_hash: block.previous_hash.clone(),
        nonce: block.nonce,
        transactions: block.transactions.clone(),
    })
}
