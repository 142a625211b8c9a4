use chrono::{DateTime, Utc};
use jsonwebtoken::Header;
use serde::Serialize;
use serde_json::Value;

/// Claim set carried in the token payload, keyed by claim name.
pub type Claims = serde_json::Map<String, Value>;

/// A token the verifier accepted: protected header, payload and the raw signature segment.
///
/// Produced once per request by a [`Verifier`](super::Verifier) and only ever read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedToken {
    pub header: Header,
    pub payload: Claims,
    pub signature: String,
}

impl DecodedToken {
    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.payload.get(name)
    }

    pub fn subject(&self) -> Option<&str> {
        self.claim("sub").and_then(Value::as_str)
    }

    /// Issued-at time from the `iat` claim, in milliseconds since the epoch.
    ///
    /// Fractional values are rounded to the nearest millisecond. A missing, non-numeric
    /// or out-of-range value yields `None`.
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        let iat = self.claim("iat")?;

        let millis = match iat.as_i64() {
            Some(millis) => millis,
            None => {
                let millis = iat.as_f64()?;
                if !millis.is_finite() {
                    return None;
                }
                millis.round() as i64
            }
        };

        DateTime::from_timestamp_millis(millis)
    }
}
