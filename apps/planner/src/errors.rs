use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Generation service error: {0}")]
    GenerationService(String),

    /// The model answered, but neither the raw text nor its fence-stripped form is JSON.
    #[error("Malformed response: {reason}")]
    MalformedResponse { reason: String, raw: String },
}

impl AppError {
    /// Message safe to show to the person who submitted the form.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::GenerationService(_) => {
                "The plan generation service could not be reached. Please try again.".to_string()
            }
            AppError::MalformedResponse { .. } => {
                "Failed to parse JSON response. The model may have returned invalid data."
                    .to_string()
            }
        }
    }

    /// Raw model output, when the failure is a parse failure.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            AppError::MalformedResponse { raw, .. } => Some(raw),
            _ => None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::GenerationService(_) | AppError::MalformedResponse { .. } => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::GenerationService(_) => "GENERATION_SERVICE_ERROR",
            AppError::MalformedResponse { .. } => "MALFORMED_RESPONSE",
        }
    }

    /// Logs server-side detail that the user-facing message hides.
    pub fn log(&self) {
        match self {
            AppError::Validation(msg) => tracing::debug!("Rejected profile: {msg}"),
            AppError::GenerationService(msg) => tracing::error!("Generation service error: {msg}"),
            AppError::MalformedResponse { reason, raw } => tracing::warn!(
                raw_len = raw.len(),
                "Model returned unparsable plan: {reason}"
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();

        let mut error = json!({
            "code": self.code(),
            "message": self.user_message(),
        });
        if let Some(raw) = self.raw_response() {
            error["raw_response"] = json!(raw);
        }

        (self.status_code(), Json(json!({ "error": error }))).into_response()
    }
}
