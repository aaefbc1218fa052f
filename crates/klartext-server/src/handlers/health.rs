use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
struct ProviderStatus {
    provider: String,
    credentials: bool,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    drafter: ProviderStatus,
    simplifier: ProviderStatus,
}

/// Liveness plus credential readiness of both chain stages.
pub async fn handler(state: web::Data<AppState>) -> impl Responder {
    let drafter = state.pipeline.drafter();
    let simplifier = state.pipeline.simplifier();

    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        drafter: ProviderStatus {
            provider: drafter.name().to_string(),
            credentials: drafter.has_credentials(),
        },
        simplifier: ProviderStatus {
            provider: simplifier.name().to_string(),
            credentials: simplifier.has_credentials(),
        },
    })
}
