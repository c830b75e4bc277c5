//! # Lemon Auth
//!
//! The authentication and authorization core of the Lemon API.
//!
//! - [`claims`]: the typed claim set carried inside every session token
//! - [`jwt`]: the token codec (HS512 issue, HMAC-only verified decode) and issuance
//! - [`session`]: recovers a caller's identity from a cookie or bearer header
//! - [`credentials`]: registration and password verification against the account store
//! - [`elevation`]: shared-secret promotion of an account to `DEVELOPER`
//! - [`cookie`]: building and expiring the session cookie
//! - [`error`]: the [`AuthError`] taxonomy and its HTTP mapping
//!
//! Every operation takes the [`SecurityConfig`](lemon_config::SecurityConfig)
//! explicitly; nothing here reads process-wide state.
//!
//! # Example
//!
//! ```ignore
//! use lemon_auth::{authenticate, issue_token};
//!
//! let token = issue_token(&account, &security)?;
//! let session = authenticate(&headers, &security, &cookie_config)?;
//! assert_eq!(session.account_id(), Some(account.id.as_str()));
//! ```

pub mod claims;
pub mod cookie;
pub mod credentials;
pub mod elevation;
pub mod error;
pub mod jwt;
pub mod session;

// Re-export commonly used types at crate root
pub use claims::{AUDIENCE, Claims, ISSUER};
pub use credentials::{register_account, verify_login};
pub use elevation::{Elevation, elevate};
pub use error::{AuthError, TokenError};
pub use jwt::{decode_token, encode_token, issue_token, issue_token_at};
pub use session::{Session, authenticate, authenticate_at, extract_token};
