use std::io;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};

use crate::handlers;
use crate::middleware::RequestIdMiddleware;
use crate::state::AppState;

pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/tokenize-sentences",
        web::post().to(handlers::tokenize::handler),
    )
    .route("/chain-models", web::post().to(handlers::chain::handler))
    .route("/health", web::get().to(handlers::health::handler));
}

pub async fn run_server(state: AppState, host: &str, port: u16) -> io::Result<()> {
    let state = web::Data::new(state);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Cors::permissive())
            .wrap(RequestIdMiddleware)
            .configure(app_config)
    })
    .bind((host, port))?
    .run();

    log::info!("Klartext server listening on http://{}:{}", host, port);
    server.await
}
