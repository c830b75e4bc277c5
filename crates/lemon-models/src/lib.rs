//! # Lemon Models
//!
//! Domain models and DTOs for the Lemon API.
//!
//! # Modules
//!
//! - [`accounts`]: accounts, roles, and the auth/save-state request bodies
//! - [`feedback`]: player feedback entries

pub mod accounts;
pub mod feedback;

// Re-export commonly used types at crate root for convenience
pub use accounts::{
    Account, ElevateRequest, LoginRequest, RegisterRequest, Role, TokenResponse,
    UpdateSaveRequest,
};
pub use feedback::{CreateFeedbackDto, Feedback, FeedbackCreated};
