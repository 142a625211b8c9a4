/*
 * Responsibility
 * - Read environment variables (and .env) once at start-up
 * - Validate them; a missing or invalid value fails start-up
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use jsonwebtoken::{Algorithm, AlgorithmFamily};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: Option<String>) -> Self {
        match value
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings for the bearer token gate.
#[derive(Clone)]
pub struct GateSettings {
    pub secret: String,
    pub algorithm: Algorithm,
    pub expires_after: Option<Duration>,
    pub is_throwing: bool,
    pub expired_message: Option<String>,
    pub invalid_message: Option<String>,
}

impl fmt::Debug for GateSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("GateSettings")
            .field("algorithm", &self.algorithm)
            .field("expires_after", &self.expires_after)
            .field("is_throwing", &self.is_throwing)
            .field("expired_message", &self.expired_message)
            .field("invalid_message", &self.invalid_message)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub timeout: Duration,
    pub body_limit_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub gate: GateSettings,
    pub http: HttpSettings,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = parse_or(&lookup, "PORT", 3000)?;
        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let secret = lookup("TOKEN_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("TOKEN_SECRET"))?;

        let algorithm = match lookup("TOKEN_ALGORITHM") {
            Some(raw) => Algorithm::from_str(raw.trim())
                .ok()
                .filter(|alg| alg.family() == AlgorithmFamily::Hmac)
                .ok_or(ConfigError::Invalid("TOKEN_ALGORITHM"))?,
            None => Algorithm::HS512,
        };

        // 0 disables the window, same as leaving it unset.
        let expires_after = lookup("TOKEN_EXPIRES_AFTER_MS")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::Invalid("TOKEN_EXPIRES_AFTER_MS"))
            })
            .transpose()?
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis);

        let is_throwing = match lookup("TOKEN_IS_THROWING") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid("TOKEN_IS_THROWING"))?,
            None => true,
        };

        let expired_message = lookup("TOKEN_EXPIRED_MESSAGE").filter(|s| !s.is_empty());
        let invalid_message = lookup("TOKEN_INVALID_MESSAGE").filter(|s| !s.is_empty());

        let timeout_seconds: u64 = parse_or(&lookup, "HTTP_TIMEOUT_SECONDS", 30)?;
        if timeout_seconds == 0 {
            return Err(ConfigError::Invalid("HTTP_TIMEOUT_SECONDS"));
        }
        let body_limit_bytes: usize = parse_or(&lookup, "HTTP_BODY_LIMIT_BYTES", 1024 * 1024)?;

        Ok(Self {
            addr,
            app_env,
            gate: GateSettings {
                secret,
                algorithm,
                expires_after,
                is_throwing,
                expired_message,
                invalid_message,
            },
            http: HttpSettings {
                timeout: Duration::from_secs(timeout_seconds),
                body_limit_bytes,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
