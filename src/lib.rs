//! Bearer token authentication gate for axum services.
//!
//! [`TokenGate`] reads `Authorization: Bearer <token>`, hands the token to a
//! [`Verifier`], applies an optional `iat`-based expiration window and either lets
//! the request continue (after running the optional claims callback) or answers
//! `401 Unauthorized`.
//!
//! ```ignore
//! let gate = TokenGate::new(
//!     GateOptions::new("secret")
//!         .throwing(false)
//!         .with_expires_after(Duration::from_secs(3600)),
//! )?;
//! let router = middleware::auth::apply(Router::new().route("/me", get(me)), Arc::new(gate));
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

pub use middleware::auth::{
    ClaimsHandler, CustomMessages, Decision, GateOptions, GateRejection, TokenGate,
};
pub use services::auth::{
    Claims, CritHandlers, DecodedToken, HmacVerifier, Verifier, VerifyError, VerifyOptions,
};
