pub mod auth_ctx;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor, attach_auth_ctx};
