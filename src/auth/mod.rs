use crate::state::AppState;
use axum::Router;

mod claims;
mod dto;
pub(crate) mod extractors;
pub mod google;
pub mod handlers;
pub mod jwt;
pub mod repo;

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
