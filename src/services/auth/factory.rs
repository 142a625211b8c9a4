/*
 * Responsibility
 * - Build the shared TokenGate from GateSettings
 * - Attach the AuthCtx claims callback used by the v1 handlers
 */
use std::sync::Arc;

use crate::api::v1::extractors::attach_auth_ctx;
use crate::config::GateSettings;
use crate::middleware::auth::{CustomMessages, GateOptions, TokenGate};
use crate::services::auth::VerifyError;

pub fn build_token_gate(settings: &GateSettings) -> Result<Arc<TokenGate>, VerifyError> {
    let mut options = GateOptions::new(settings.secret.clone())
        .with_algorithm(settings.algorithm)
        .throwing(settings.is_throwing)
        .with_custom_messages(CustomMessages {
            expired: settings.expired_message.clone(),
            invalid: settings.invalid_message.clone(),
        })
        .with_shared_claims_handler(attach_auth_ctx());

    if let Some(window) = settings.expires_after {
        options = options.with_expires_after(window);
    }

    Ok(Arc::new(TokenGate::new(options)?))
}
