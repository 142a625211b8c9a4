/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - Hand the gate's AuthCtx to handlers
 * - axum-facing code lives in core, the type itself in types
 *
 * Public API:
 * - AuthCtx
 * - AuthCtxExtractor
 * - attach_auth_ctx (claims callback for the gate)
 */

mod core;
mod types;

pub use self::core::{AuthCtxExtractor, attach_auth_ctx};
pub use types::AuthCtx;
