pub mod crit;
pub mod factory;
pub mod token;
pub mod verifier;

pub use crit::{CritHandler, CritHandlers};
pub use factory::build_token_gate;
pub use token::{Claims, DecodedToken};
pub use verifier::{HmacVerifier, Verifier, VerifyError, VerifyOptions};
