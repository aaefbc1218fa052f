use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use klartext_pipeline::PipelineError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("{0}")]
    InvalidRequest(String),
}

/// Error payload. `detail` carries the message; `kind` and `stage` let
/// clients tell configuration problems from provider failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
}

impl ApiError {
    fn kind(&self) -> &'static str {
        match self {
            ApiError::Pipeline(error) => error.kind(),
            ApiError::InvalidRequest(_) => "invalid_request",
        }
    }

    fn stage(&self) -> Option<String> {
        match self {
            ApiError::Pipeline(error) => error.stage().map(|stage| stage.to_string()),
            ApiError::InvalidRequest(_) => None,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Pipeline(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            detail: self.to_string(),
            kind: self.kind().to_string(),
            stage: self.stage(),
        })
    }
}
