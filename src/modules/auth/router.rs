use axum::{
    Router,
    routing::{get, post, put},
};

use super::controller::{elevate, login, logout, register, username_taken};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/taken/{username}", get(username_taken))
        .route("/login", post(login))
        .route("/logout", get(logout))
        .route("/elevate", put(elevate))
}
