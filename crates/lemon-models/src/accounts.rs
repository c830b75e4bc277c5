//! Account domain model and the request/response bodies around it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Privilege level of an account.
///
/// Accounts start as [`Role::User`] and can only ever be promoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    User,
    Developer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Developer => "DEVELOPER",
        }
    }

    /// Whether this role carries every privilege of `required`.
    pub fn includes(self, required: Role) -> bool {
        matches!(
            (self, required),
            (Role::Developer, _) | (Role::User, Role::User)
        )
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Role::User),
            "DEVELOPER" => Ok(Role::Developer),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// A player account.
///
/// The credential hash is never serialized into responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Account {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub hash: String,
    pub role: Role,
    pub save_state: String,
}

impl Account {
    /// A fresh `USER` account with a generated identifier.
    pub fn new(username: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username: username.into(),
            hash: hash.into(),
            role: Role::User,
            save_state: String::new(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    #[serde(alias = "hash")]
    #[validate(length(min = 8))]
    pub password: String,
    #[serde(default)]
    pub save_state: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    /// Older clients send the credential as `hash`.
    #[serde(alias = "hash")]
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSaveRequest {
    pub save_state: String,
    /// Replaces the account credential when present.
    #[validate(length(min = 8))]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ElevateRequest {
    #[validate(length(min = 1))]
    pub secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}
