//! Bearer token gate: header parsing, verifier call, expiration window, allow/deny.

use std::fmt;
use std::sync::Arc;

use axum::http::{Extensions, HeaderMap, header};
use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, warn};

use super::error::GateRejection;
use super::options::{CustomMessages, GateOptions};
use crate::services::auth::{DecodedToken, HmacVerifier, Verifier, VerifyError, VerifyOptions};

const BEARER_PREFIX: &str = "Bearer ";

/// Per-request outcome. Starts out unauthorized and not expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub unauthorized: bool,
    pub expired: bool,
}

impl Default for Decision {
    fn default() -> Self {
        Self {
            unauthorized: true,
            expired: false,
        }
    }
}

impl Decision {
    fn into_result(self, messages: &CustomMessages) -> Result<(), GateRejection> {
        if !self.unauthorized {
            return Ok(());
        }

        let message = if self.expired {
            messages.expired_message()
        } else {
            messages.invalid_message()
        };

        Err(GateRejection::Unauthorized {
            expired: self.expired,
            message: message.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HeaderFault {
    Missing,
    Malformed,
}

impl HeaderFault {
    fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing_header",
            Self::Malformed => "malformed_header",
        }
    }
}

/// Token part of `Authorization: Bearer <token>`.
///
/// The scheme is matched case-sensitively and nothing is trimmed; an empty token is malformed.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Result<&str, HeaderFault> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(HeaderFault::Missing)?
        .to_str()
        .map_err(|_| HeaderFault::Malformed)?;

    match value.strip_prefix(BEARER_PREFIX) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(HeaderFault::Malformed),
    }
}

/// Authenticates requests before they reach application handlers.
///
/// Holds only read-only configuration, so one instance is shared by every request.
pub struct TokenGate {
    options: GateOptions,
    verifier: Arc<dyn Verifier>,
}

impl TokenGate {
    /// Gate backed by [`HmacVerifier`] for the configured algorithm.
    pub fn new(options: GateOptions) -> Result<Self, VerifyError> {
        let verifier = HmacVerifier::new(options.algorithm())?;
        Ok(Self::with_verifier(options, Arc::new(verifier)))
    }

    pub fn with_verifier(options: GateOptions, verifier: Arc<dyn Verifier>) -> Self {
        Self { options, verifier }
    }

    pub fn options(&self) -> &GateOptions {
        &self.options
    }

    pub async fn authorize(
        &self,
        headers: &HeaderMap,
        extensions: &mut Extensions,
    ) -> Result<(), GateRejection> {
        self.authorize_at(headers, extensions, Utc::now()).await
    }

    /// Same as [`authorize`](Self::authorize) with an explicit clock for the expiration window.
    ///
    /// On success the claims callback (if any) has already run against `extensions`.
    pub async fn authorize_at(
        &self,
        headers: &HeaderMap,
        extensions: &mut Extensions,
        now: DateTime<Utc>,
    ) -> Result<(), GateRejection> {
        let mut decision = Decision::default();

        match bearer_token(headers) {
            Ok(token) => {
                let options = VerifyOptions {
                    is_throwing: self.options.is_throwing(),
                    crit_handlers: self.options.crit_handlers(),
                };

                let verified = self
                    .verifier
                    .verify(token, self.options.secret(), &options)
                    .await
                    .inspect_err(|err| {
                        warn!(reason = "verification", error = %err, "bearer token rejected");
                    })?;

                match verified {
                    Some(decoded) if self.is_expired(&decoded, now) => {
                        decision.expired = true;
                        warn!(
                            reason = "expired",
                            iat = ?decoded.issued_at(),
                            "bearer token rejected"
                        );
                    }
                    Some(decoded) => {
                        decision.unauthorized = false;
                        if let Some(handler) = self.options.decrypted_token_handler() {
                            handler(extensions, &decoded);
                        }
                        debug!(sub = ?decoded.subject(), "bearer token accepted");
                    }
                    None => warn!(reason = "verification", "bearer token rejected"),
                }
            }
            Err(fault) => warn!(reason = fault.as_str(), "bearer token rejected"),
        }

        decision.into_result(self.options.custom_messages())
    }

    /// Whether `token` falls outside the configured window at `now`.
    ///
    /// Only `iat` (epoch milliseconds) is considered; `iat` exactly at the window edge
    /// is still valid.
    pub fn is_expired(&self, token: &DecodedToken, now: DateTime<Utc>) -> bool {
        let Some(window) = self.options.expires_after() else {
            return false;
        };
        let Some(issued_at) = token.issued_at() else {
            return false;
        };
        let Ok(window) = TimeDelta::from_std(window) else {
            return false;
        };

        now.checked_sub_signed(window)
            .is_some_and(|cutoff| issued_at < cutoff)
    }
}

impl fmt::Debug for TokenGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenGate")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
