use std::collections::HashSet;

use async_trait::async_trait;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, AlgorithmFamily, DecodingKey, Validation};
use thiserror::Error;
use tracing::debug;

use super::crit::{self, CritHandlers};
use super::token::{Claims, DecodedToken};

/// Why a verifier refused a token.
///
/// These messages are what a caller sees when verifier failures are propagated.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("jwt is malformed")]
    Malformed(#[source] jsonwebtoken::errors::Error),
    #[error("jwt signature does not match the verification signature")]
    Signature,
    #[error("jwt algorithm is not accepted")]
    Algorithm,
    #[error("jwt is expired")]
    Expired,
    #[error("jwt is not yet valid")]
    Immature,
    #[error("jwt claim '{0}' has an invalid format")]
    Claim(String),
    #[error("jwt critical header list is invalid")]
    InvalidCrit,
    #[error("jwt critical header '{0}' is not supported")]
    UnsupportedCrit(String),
    #[error("jwt critical header '{name}' rejected: {reason}")]
    CritRejected { name: String, reason: String },
    #[error("jwt verification failed: {0}")]
    Decode(#[source] jsonwebtoken::errors::Error),
}

impl From<jsonwebtoken::errors::Error> for VerifyError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => Self::Malformed(e),
            ErrorKind::InvalidSignature => Self::Signature,
            ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName
            | ErrorKind::MissingAlgorithm => Self::Algorithm,
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::ImmatureSignature => Self::Immature,
            ErrorKind::MissingRequiredClaim(claim) => Self::Claim(claim.clone()),
            _ => Self::Decode(e),
        }
    }
}

/// Per-call options handed to a [`Verifier`].
#[derive(Debug, Clone, Copy)]
pub struct VerifyOptions<'a> {
    /// `true`: failures are returned as `Err`. `false`: failures are reported as `Ok(None)`.
    pub is_throwing: bool,
    pub crit_handlers: Option<&'a CritHandlers>,
}

impl Default for VerifyOptions<'_> {
    fn default() -> Self {
        Self {
            is_throwing: true,
            crit_handlers: None,
        }
    }
}

/// Checks a token's structure and signature and decodes its claims.
#[async_trait]
pub trait Verifier: Send + Sync {
    async fn verify(
        &self,
        token: &str,
        secret: &str,
        options: &VerifyOptions<'_>,
    ) -> Result<Option<DecodedToken>, VerifyError>;
}

/// HMAC (HS256/HS384/HS512) verifier backed by `jsonwebtoken`.
///
/// Enforces the token's own `exp`/`nbf` when present, without leeway. No claim is required.
#[derive(Debug, Clone)]
pub struct HmacVerifier {
    validation: Validation,
}

impl HmacVerifier {
    pub fn new(algorithm: Algorithm) -> Result<Self, VerifyError> {
        if algorithm.family() != AlgorithmFamily::Hmac {
            return Err(VerifyError::Algorithm);
        }

        Ok(Self::with_validation(algorithm))
    }

    fn with_validation(algorithm: Algorithm) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.required_spec_claims = HashSet::new();
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.leeway = 0;

        Self { validation }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.validation.algorithms[0]
    }

    /// Verify and decode, always reporting failures as `Err`.
    pub fn decode(
        &self,
        token: &str,
        secret: &str,
        crit_handlers: Option<&CritHandlers>,
    ) -> Result<DecodedToken, VerifyError> {
        let signature = token
            .rsplit_once('.')
            .map(|(_, sig)| sig.to_string())
            .unwrap_or_default();

        let key = DecodingKey::from_secret(secret.as_bytes());
        let data = jsonwebtoken::decode::<Claims>(token, &key, &self.validation)?;

        crit::process(&data.header, crit_handlers)?;

        Ok(DecodedToken {
            header: data.header,
            payload: data.claims,
            signature,
        })
    }
}

impl Default for HmacVerifier {
    fn default() -> Self {
        Self::with_validation(Algorithm::HS512)
    }
}

#[async_trait]
impl Verifier for HmacVerifier {
    async fn verify(
        &self,
        token: &str,
        secret: &str,
        options: &VerifyOptions<'_>,
    ) -> Result<Option<DecodedToken>, VerifyError> {
        match self.decode(token, secret, options.crit_handlers) {
            Ok(decoded) => Ok(Some(decoded)),
            Err(err) if options.is_throwing => Err(err),
            Err(err) => {
                debug!(error = %err, "token rejected by verifier");
                Ok(None)
            }
        }
    }
}
