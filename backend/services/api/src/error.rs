use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use persona_common::error::PersonaError;

pub struct ApiError(pub PersonaError);

impl From<PersonaError> for ApiError {
    fn from(err: PersonaError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            PersonaError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            PersonaError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            PersonaError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            PersonaError::Enrichment(_) => {
                tracing::error!(error = %self.0, "enrichment failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "enrichment service unavailable".to_string(),
                )
            }
            other => {
                tracing::error!(error = %other, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, Json(body)).into_response()
    }
}
