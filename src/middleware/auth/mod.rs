pub mod access;
pub mod error;
pub mod gate;
pub mod options;

pub use access::{apply, token_gate_middleware};
pub use error::GateRejection;
pub use gate::{Decision, TokenGate};
pub use options::{
    ClaimsHandler, CustomMessages, DEFAULT_EXPIRED_MESSAGE, DEFAULT_INVALID_MESSAGE, GateOptions,
};
