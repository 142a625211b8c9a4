use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use axum::http::Extensions;
use jsonwebtoken::Algorithm;

use crate::services::auth::{CritHandlers, DecodedToken};

pub const DEFAULT_EXPIRED_MESSAGE: &str = "Token expired";
pub const DEFAULT_INVALID_MESSAGE: &str = "Authentication failed";

/// Callback invoked with the request extensions and the accepted token, before the
/// request continues downstream.
pub type ClaimsHandler = Arc<dyn Fn(&mut Extensions, &DecodedToken) + Send + Sync>;

/// Replacement texts for the gate's own 401 responses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomMessages {
    pub expired: Option<String>,
    pub invalid: Option<String>,
}

impl CustomMessages {
    pub fn expired_message(&self) -> &str {
        self.expired.as_deref().unwrap_or(DEFAULT_EXPIRED_MESSAGE)
    }

    pub fn invalid_message(&self) -> &str {
        self.invalid.as_deref().unwrap_or(DEFAULT_INVALID_MESSAGE)
    }
}

/// Gate configuration. Built once at start-up and never mutated afterwards.
///
/// Defaults: verifier failures propagate (`is_throwing = true`), no expiration
/// window, no custom messages, no claims callback, no crit handlers, HS512.
#[derive(Clone)]
pub struct GateOptions {
    secret: String,
    expires_after: Option<Duration>,
    is_throwing: bool,
    custom_messages: CustomMessages,
    decrypted_token_handler: Option<ClaimsHandler>,
    crit_handlers: Option<CritHandlers>,
    algorithm: Algorithm,
}

impl GateOptions {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expires_after: None,
            is_throwing: true,
            custom_messages: CustomMessages::default(),
            decrypted_token_handler: None,
            crit_handlers: None,
            algorithm: Algorithm::HS512,
        }
    }

    /// Reject tokens whose `iat` is older than `window`. A zero window disables the check.
    pub fn with_expires_after(mut self, window: Duration) -> Self {
        self.expires_after = (!window.is_zero()).then_some(window);
        self
    }

    /// `false` collapses verifier failures into the gate's invalid message.
    pub fn throwing(mut self, is_throwing: bool) -> Self {
        self.is_throwing = is_throwing;
        self
    }

    pub fn with_custom_messages(mut self, messages: CustomMessages) -> Self {
        self.custom_messages = messages;
        self
    }

    pub fn with_claims_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut Extensions, &DecodedToken) + Send + Sync + 'static,
    {
        self.decrypted_token_handler = Some(Arc::new(handler));
        self
    }

    pub fn with_shared_claims_handler(mut self, handler: ClaimsHandler) -> Self {
        self.decrypted_token_handler = Some(handler);
        self
    }

    pub fn with_crit_handler<F>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Option<&str>) -> Result<(), String> + Send + Sync + 'static,
    {
        self.crit_handlers
            .get_or_insert_with(CritHandlers::new)
            .insert(name, handler);
        self
    }

    pub fn with_crit_handlers(mut self, handlers: CritHandlers) -> Self {
        self.crit_handlers = Some(handlers);
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn expires_after(&self) -> Option<Duration> {
        self.expires_after
    }

    pub fn is_throwing(&self) -> bool {
        self.is_throwing
    }

    pub fn custom_messages(&self) -> &CustomMessages {
        &self.custom_messages
    }

    pub fn decrypted_token_handler(&self) -> Option<&ClaimsHandler> {
        self.decrypted_token_handler.as_ref()
    }

    pub fn crit_handlers(&self) -> Option<&CritHandlers> {
        self.crit_handlers.as_ref()
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
}

impl fmt::Debug for GateOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("GateOptions")
            .field("expires_after", &self.expires_after)
            .field("is_throwing", &self.is_throwing)
            .field("custom_messages", &self.custom_messages)
            .field(
                "decrypted_token_handler",
                &self.decrypted_token_handler.is_some(),
            )
            .field("crit_handlers", &self.crit_handlers)
            .field("algorithm", &self.algorithm)
            .finish()
    }
}
