use crate::state::AppState;
use axum::Router;

mod dto;
pub mod error;
pub(crate) mod extractors;
pub mod handlers;
mod jwt;
pub mod password;
pub mod repo;
mod tokens;

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
