use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersonaError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("validation error: {0}")]
    Validation(String),

    /// Dedup-key collision on create, or a stale write rejected by the
    /// version check on update. Stale writes are safe to retry.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("enrichment error: {0}")]
    Enrichment(String),

    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type PersonaResult<T> = Result<T, PersonaError>;
