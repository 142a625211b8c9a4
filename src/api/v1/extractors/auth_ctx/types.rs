/*
 * Responsibility
 * - Type handlers see for an authenticated request
 * - The gate's claims callback builds it and stores it in request extensions
 *
 * Notes
 * - Identity only; nothing here grants permissions
 */
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::services::auth::{Claims, DecodedToken};

/// Identity established by the token gate.
///
/// - `subject` is the `sub` claim when it is a string
/// - `issued_at` is the parsed `iat` claim
/// - `claims` is the full payload, for application-specific claims
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub subject: Option<String>,
    pub issued_at: Option<DateTime<Utc>>,
    pub claims: Claims,
}

impl AuthCtx {
    pub fn from_token(token: &DecodedToken) -> Self {
        Self {
            subject: token.subject().map(str::to_owned),
            issued_at: token.issued_at(),
            claims: token.payload.clone(),
        }
    }

    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }
}
