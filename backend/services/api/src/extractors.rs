use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use persona_common::error::PersonaError;

use crate::error::ApiError;

/// Positive integer id taken from the `{id}` path segment.
pub struct PersonId(pub i64);

impl<S: Send + Sync> FromRequestParts<S> for PersonId {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError(PersonaError::Validation("missing person id".to_string())))?;

        match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(PersonId(id)),
            _ => Err(ApiError(PersonaError::Validation(format!(
                "invalid person id: {raw}"
            )))),
        }
    }
}
