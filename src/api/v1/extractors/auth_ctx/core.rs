use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};

use super::AuthCtx;
use crate::middleware::auth::ClaimsHandler;

/// Claims callback that stores an [`AuthCtx`] in the request extensions.
pub fn attach_auth_ctx() -> ClaimsHandler {
    Arc::new(|extensions, token| {
        extensions.insert(AuthCtx::from_token(token));
    })
}

/// Extractor handing the gate's `AuthCtx` to a handler.
/// Answers 401 when it is missing (route not behind the gate, or a callback that stores nothing).
pub struct AuthCtxExtractor(pub AuthCtx);

impl<S> FromRequestParts<S> for AuthCtxExtractor
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthCtx>()
            .cloned()
            .map(AuthCtxExtractor)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
