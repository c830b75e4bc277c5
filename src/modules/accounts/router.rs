use axum::{Router, routing::get};

use super::controller::{delete_save, get_save, update_save};
use crate::state::AppState;

pub fn init_accounts_router() -> Router<AppState> {
    Router::new().route("/save", get(get_save).put(update_save).delete(delete_save))
}
