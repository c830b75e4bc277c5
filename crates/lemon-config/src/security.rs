use std::env;

/// Default token lifetime: 7 days.
pub const DEFAULT_TOKEN_EXPIRY: i64 = 7 * 24 * 60 * 60;

/// Longest accepted token lifetime: 365 days.
pub const MAX_TOKEN_EXPIRY: i64 = 365 * 24 * 60 * 60;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set when authentication is enforced")]
    MissingSecret,
    #[error("JWT_TOKEN_EXPIRY must be between 1 and {MAX_TOKEN_EXPIRY} seconds, got {0}")]
    InvalidTokenExpiry(i64),
    #[error("JWT_TOKEN_EXPIRY is not a number of seconds: {0:?}")]
    UnparsableTokenExpiry(String),
}

/// Security settings consumed by the authentication core.
///
/// Passed by reference into every issuance and verification call.
#[derive(Clone)]
pub struct SecurityConfig {
    /// Symmetric key used to sign and verify session tokens.
    pub secret: String,
    /// Server-wide salt mixed into credential digests.
    pub salt: String,
    /// When false, session authentication never rejects (local/dev only).
    pub enforce: bool,
    /// Shared value required to promote an account. `None` disables elevation.
    pub elevation_secret: Option<String>,
    /// Token lifetime in seconds.
    pub token_expiry: i64,
}

impl SecurityConfig {
    /// Reads the security settings from the environment.
    ///
    /// Fails only when `JWT_TOKEN_EXPIRY` is set but not an integer; range
    /// checks happen in [`SecurityConfig::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret: env::var("JWT_SECRET").unwrap_or_default(),
            salt: env::var("CREDENTIAL_SALT").unwrap_or_default(),
            enforce: env::var("AUTH_ENFORCE")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),
            elevation_secret: env::var("ELEVATION_SECRET")
                .ok()
                .filter(|s| !s.is_empty()),
            token_expiry: parse_token_expiry(env::var("JWT_TOKEN_EXPIRY").ok())?,
        })
    }

    /// Checks the invariants the authentication core relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enforce && self.secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        if !(1..=MAX_TOKEN_EXPIRY).contains(&self.token_expiry) {
            return Err(ConfigError::InvalidTokenExpiry(self.token_expiry));
        }
        Ok(())
    }
}

fn parse_token_expiry(raw: Option<String>) -> Result<i64, ConfigError> {
    match raw {
        None => Ok(DEFAULT_TOKEN_EXPIRY),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::UnparsableTokenExpiry(value)),
    }
}

// Secrets stay out of logs and panics.
impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("secret", &"<redacted>")
            .field("salt", &"<redacted>")
            .field("enforce", &self.enforce)
            .field(
                "elevation_secret",
                &self.elevation_secret.as_ref().map(|_| "<redacted>"),
            )
            .field("token_expiry", &self.token_expiry)
            .finish()
    }
}
