use std::env;

pub const DEFAULT_COOKIE_NAME: &str = "lemon-token";

/// Attributes of the session cookie that carries the token.
#[derive(Clone, Debug)]
pub struct CookieConfig {
    pub name: String,
    /// `None` issues a host-only cookie.
    pub domain: Option<String>,
    pub secure: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_COOKIE_NAME.to_string(),
            domain: None,
            secure: true,
        }
    }
}

impl CookieConfig {
    pub fn from_env() -> Self {
        Self {
            name: env::var("SESSION_COOKIE_NAME")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string()),
            domain: env::var("SESSION_COOKIE_DOMAIN")
                .ok()
                .filter(|s| !s.is_empty()),
            secure: env::var("SESSION_COOKIE_SECURE")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),
        }
    }
}
