use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, ChainResponse, ValidateResponse};
use crate::blockchain::validation;

/// Get the full chain. Peers poll this endpoint during reconciliation.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let bc = state.blockchain.lock().expect("mutex poisoned");
    let resp = ChainResponse {
        chain: &bc.chain,
        length: bc.len(),
    };
    HttpResponse::Ok().json(resp)
}

/// Validate the local chain: linkage and proof-of-work, end to end.
#[get("/validate/")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let bc = state.blockchain.lock().expect("mutex poisoned");
    let resp = ValidateResponse {
        valid: validation::is_valid_chain(&bc.chain, bc.difficulty_target()),
        length: bc.len(),
    };
    HttpResponse::Ok().json(resp)
}
