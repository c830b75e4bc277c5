//! # Lemon Core
//!
//! Core types shared by every Lemon crate.
//!
//! - [`errors`]: the HTTP-facing [`AppError`] and the storage-layer [`StoreError`]
//! - [`password`]: salted credential hashing and constant-time verification
//!
//! # Example
//!
//! ```ignore
//! use lemon_core::password::{hash_credential, verify_credential};
//!
//! let stored = hash_credential("hunter2", "server-salt", "alice");
//! assert!(verify_credential("hunter2", "alice", &stored, "server-salt"));
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::{AppError, StoreError};
pub use password::{hash_credential, verify_credential};
