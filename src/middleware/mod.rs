//! Request extractors for authentication and authorization.
//!
//! - [`auth::AuthSession`]: any authenticated caller (or any caller at all
//!   when enforcement is off)
//! - [`auth::RequireDeveloper`]: callers whose token carries the
//!   `DEVELOPER` role
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::{AuthSession, RequireDeveloper};
//!
//! async fn get_save(State(state): State<AppState>, session: AuthSession) -> ... {
//!     let id = session.account_id()?;
//!     // ...
//! }
//!
//! async fn mark_read(RequireDeveloper(_): RequireDeveloper, Path(id): Path<i64>) -> ... {
//!     // only reached by developers
//! }
//! ```

pub mod auth;
