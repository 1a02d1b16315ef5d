use actix_web::{HttpResponse, Responder, post, web};
use log::debug;

use super::models::{AppState, NewTxRequest, NewTxResponse};

/// Submit a transaction into the pending pool.
///
/// All three fields are required; a body missing any of them is rejected by
/// the JSON extractor with a 400 naming the field, before the ledger is
/// touched.
#[post("/transactions/")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTxRequest>,
) -> impl Responder {
    let req = body.into_inner();

    let index = {
        let mut bc = state.blockchain.lock().expect("mutex poisoned");
        bc.add_transaction(req.sender, req.recipient, req.amount)
    };

    debug!("TX - queued for block #{index}");
    HttpResponse::Created().json(NewTxResponse {
        message: format!("Transaction will be added to block {index}"),
        index,
    })
}
