use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use std::env;

use nanochain::api::{self, AppState};
use nanochain::blockchain::DEFAULT_DIFFICULTY_TARGET;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8080);
    let difficulty_target =
        env::var("DIFFICULTY_TARGET").unwrap_or_else(|_| DEFAULT_DIFFICULTY_TARGET.to_string());

    let node_id = uuid::Uuid::new_v4().simple().to_string();
    println!("⛓️ Starting nanochain node {node_id} at http://{host}:{port}");

    // Blocking: genesis proof-of-work completes before the server binds.
    let state = web::Data::new(AppState::new(node_id, difficulty_target));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
