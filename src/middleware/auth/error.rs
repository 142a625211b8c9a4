use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::services::auth::VerifyError;

/// Why the gate stopped a request.
#[derive(Debug, Error)]
pub enum GateRejection {
    /// The gate's own failure path. `message` is already resolved against the custom messages.
    #[error("{message}")]
    Unauthorized { expired: bool, message: String },
    /// A verifier failure passed through untouched (propagating mode).
    #[error(transparent)]
    Verification(#[from] VerifyError),
}

impl GateRejection {
    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Unauthorized { expired: true, .. })
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }
}

impl IntoResponse for GateRejection {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
