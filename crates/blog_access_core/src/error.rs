use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlogError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("internal: {0}")]
    Internal(#[from] anyhow::Error),
}

impl BlogError {
    pub fn http_status(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::Conflict(_) => 409,
            Self::InvalidInput(_) => 400,
            Self::Internal(_) => 500,
        }
    }
}

/// Malformed access policy declarations. Raised when routes are built,
/// never while a request is being checked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("allow-set must name at least one tier")]
    EmptyAllowSet,
}

impl From<GateError> for BlogError {
    fn from(e: GateError) -> Self {
        Self::InvalidInput(e.to_string())
    }
}
