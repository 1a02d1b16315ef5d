use std::sync::atomic::Ordering;

use actix_web::{HttpResponse, Responder, post, web};
use log::info;

use super::models::{AppState, RegisterPeersRequest, RegisterPeersResponse, SyncResponse};
use crate::consensus;

/// Register one or more peer addresses. Each is normalized to `host:port`
/// and deduplicated; an empty list is rejected.
#[post("/peers/")]
pub async fn register_peers(
    state: web::Data<AppState>,
    body: web::Json<RegisterPeersRequest>,
) -> impl Responder {
    if body.peers.is_empty() {
        return HttpResponse::BadRequest().body("peers list required");
    }

    let mut normalized = Vec::with_capacity(body.peers.len());
    for addr in &body.peers {
        match consensus::normalize_peer(addr) {
            Some(host) => normalized.push(host),
            None => {
                return HttpResponse::BadRequest().body(format!("invalid peer address: {addr}"));
            }
        }
    }

    let peers = {
        let mut registered = state.peers.lock().expect("mutex poisoned");
        registered.extend(normalized);
        let mut peers: Vec<String> = registered.iter().cloned().collect();
        peers.sort();
        peers
    };

    info!("PEERS - registry now holds {} address(es)", peers.len());
    HttpResponse::Created().json(RegisterPeersResponse {
        message: "Peers registered".to_string(),
        peers,
    })
}

/// Run one reconciliation pass against the registered peers and report
/// whether the local chain was replaced.
#[post("/sync/")]
pub async fn sync_chain(state: web::Data<AppState>) -> impl Responder {
    // Abort any in-flight mining search before competing for the ledger.
    state.mine_cancel.store(true, Ordering::Relaxed);

    let peers: Vec<String> = {
        let registered = state.peers.lock().expect("mutex poisoned");
        registered.iter().cloned().collect()
    };

    let updated = consensus::reconcile(&state.blockchain, &peers, &state.http).await;
    state.mine_cancel.store(false, Ordering::Relaxed);

    let bc = state.blockchain.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(SyncResponse {
        updated,
        chain: bc.chain.clone(),
        length: bc.len(),
    })
}
