use crate::state::AppState;
use axum::Router;

mod dto;
pub mod extractors;
pub mod handlers;
pub mod password;
pub mod service;
pub mod token;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::credential_routes())
        .merge(handlers::session_routes())
}
