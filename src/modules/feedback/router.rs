use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{get_feedback, list_feedback, mark_feedback_read, submit_feedback};
use crate::state::AppState;

pub fn init_feedback_router() -> Router<AppState> {
    Router::new()
        .route("/feedback", post(submit_feedback).get(list_feedback))
        .route("/feedback/{id}", get(get_feedback).put(mark_feedback_read))
}
