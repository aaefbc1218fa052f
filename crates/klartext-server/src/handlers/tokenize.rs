use actix_web::{web, HttpRequest, HttpResponse, Responder};
use klartext_core::{SentencesResponse, TextPayload};

use crate::middleware::RequestId;
use crate::state::AppState;

pub async fn handler(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Json<TextPayload>,
) -> impl Responder {
    let sentences = state.segmenter.segment(&payload.text);

    log::debug!(
        "[{}] Segmented {} chars into {} sentences",
        RequestId::of(&req),
        payload.text.chars().count(),
        sentences.len()
    );

    HttpResponse::Ok().json(SentencesResponse { sentences })
}
