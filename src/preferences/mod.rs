use crate::state::AppState;
use axum::{routing::get, Router};

pub mod dto;
mod handlers;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/preferences",
        get(handlers::get_preferences).put(handlers::update_preferences),
    )
}
