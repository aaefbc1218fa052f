use actix_web::{web, HttpRequest, HttpResponse};
use klartext_core::{ChainResponse, PromptRequest};

use crate::error::ApiError;
use crate::middleware::RequestId;
use crate::state::AppState;

/// Runs the prompt through both providers.
///
/// Actix drops this future when the client disconnects, which cancels the
/// provider call in flight.
pub async fn handler(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Json<PromptRequest>,
) -> Result<HttpResponse, ApiError> {
    let request_id = RequestId::of(&req);

    let prompt = payload
        .prompt()
        .or(state.default_system_prompt.as_deref())
        .ok_or_else(|| ApiError::InvalidRequest("system_prompt is required".to_string()))?;

    log::info!(
        "[{}] Running chain for a {} char prompt",
        request_id,
        prompt.chars().count()
    );

    let output = state.pipeline.run_chain(prompt).await.map_err(|error| {
        log::error!("[{}] Chain failed: {}", request_id, error);
        ApiError::from(error)
    })?;

    Ok(HttpResponse::Ok().json(ChainResponse {
        final_output: output.final_output,
        intermediate_output: output.intermediate_output,
    }))
}
