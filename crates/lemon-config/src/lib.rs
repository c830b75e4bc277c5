//! # Lemon Config
//!
//! Configuration types for the Lemon API, loaded once at startup from
//! environment variables and treated as read-only afterwards:
//!
//! - [`security`]: token signing key, credential salt, enforcement switch, elevation secret
//! - [`cookie`]: session cookie name and attributes
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: listen address and database URL
//!
//! # Example
//!
//! ```ignore
//! use lemon_config::{SecurityConfig, CookieConfig};
//!
//! let security = SecurityConfig::from_env()?;
//! security.validate()?;
//! let cookie = CookieConfig::from_env();
//! ```

pub mod cookie;
pub mod cors;
pub mod security;
pub mod server;

// Re-export commonly used types at crate root
pub use cookie::CookieConfig;
pub use cors::CorsConfig;
pub use security::{ConfigError, SecurityConfig};
pub use server::ServerConfig;
