use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use jsonwebtoken::Header;

use super::VerifyError;

/// Handler for one critical header extension.
///
/// Receives the value of the header parameter it is registered for (`None` when the
/// token lists the name in `crit` without carrying the parameter). Returning `Err`
/// rejects the token with the given reason.
pub type CritHandler = Arc<dyn Fn(Option<&str>) -> Result<(), String> + Send + Sync>;

/// Extensions the verifier understands, keyed by header parameter name.
#[derive(Clone, Default)]
pub struct CritHandlers {
    handlers: HashMap<String, CritHandler>,
}

impl CritHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(Option<&str>) -> Result<(), String> + Send + Sync + 'static,
    {
        self.handlers.insert(name.into(), Arc::new(handler));
    }

    pub fn with<F>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Option<&str>) -> Result<(), String> + Send + Sync + 'static,
    {
        self.insert(name, handler);
        self
    }

    pub fn get(&self, name: &str) -> Option<&CritHandler> {
        self.handlers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for CritHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("CritHandlers").field("names", &names).finish()
    }
}

/// Process the `crit` header parameter (RFC 7515 §4.1.11).
///
/// Every listed name needs a registered handler, and every handler must accept the
/// parameter value. An empty list is malformed.
pub(crate) fn process(header: &Header, handlers: Option<&CritHandlers>) -> Result<(), VerifyError> {
    let Some(crit) = header.crit.as_deref() else {
        return Ok(());
    };

    if crit.is_empty() {
        return Err(VerifyError::InvalidCrit);
    }

    for name in crit {
        let handler = handlers
            .and_then(|h| h.get(name))
            .ok_or_else(|| VerifyError::UnsupportedCrit(name.clone()))?;

        let value = header.extras.get(name).map(String::as_str);
        handler(value).map_err(|reason| VerifyError::CritRejected {
            name: name.clone(),
            reason,
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::Algorithm;

    fn header_with_crit(crit: &[&str], extras: &[(&str, &str)]) -> Header {
        let mut header = Header::new(Algorithm::HS512);
        header.crit = Some(crit.iter().map(|s| s.to_string()).collect());
        header.extras = extras
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        header
    }

    #[test]
    fn header_without_crit_passes() {
        let header = Header::new(Algorithm::HS512);
        assert!(process(&header, None).is_ok());
    }

    #[test]
    fn unknown_crit_name_is_rejected() {
        let header = header_with_crit(&["tenant"], &[("tenant", "acme")]);
        let err = process(&header, None).expect_err("no handler registered");
        assert!(matches!(err, VerifyError::UnsupportedCrit(name) if name == "tenant"));
    }

    #[test]
    fn handler_receives_parameter_value() {
        let handlers = CritHandlers::new().with("tenant", |value| match value {
            Some("acme") => Ok(()),
            other => Err(format!("unexpected tenant {other:?}")),
        });

        let accepted = header_with_crit(&["tenant"], &[("tenant", "acme")]);
        assert!(process(&accepted, Some(&handlers)).is_ok());

        let rejected = header_with_crit(&["tenant"], &[("tenant", "globex")]);
        let err = process(&rejected, Some(&handlers)).expect_err("handler rejects");
        assert!(matches!(err, VerifyError::CritRejected { name, .. } if name == "tenant"));
    }

    #[test]
    fn empty_crit_list_is_malformed() {
        let header = header_with_crit(&[], &[]);
        let handlers = CritHandlers::new();
        let err = process(&header, Some(&handlers)).expect_err("empty crit");
        assert!(matches!(err, VerifyError::InvalidCrit));
    }

    #[test]
    fn registry_tracks_registered_names() {
        let mut handlers = CritHandlers::new();
        assert!(handlers.is_empty());

        handlers.insert("tenant", |_| Ok(()));
        let handlers = handlers.with("region", |_| Ok(()));

        assert_eq!(handlers.len(), 2);
        assert!(handlers.contains("tenant"));
        assert!(handlers.contains("region"));
        assert!(!handlers.contains("b64"));
    }

    #[test]
    fn debug_lists_names_only() {
        let handlers = CritHandlers::new()
            .with("b", |_| Ok(()))
            .with("a", |_| Ok(()));
        assert_eq!(format!("{handlers:?}"), r#"CritHandlers { names: ["a", "b"] }"#);
    }
}
