use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

pub mod error;
pub mod extract;
pub mod handlers;
pub mod state;

pub use error::{error_mapper, HttpError};
pub use extract::ValidatedJson;
pub use handlers::*;
pub use state::AppState;

pub fn create_app_routes(state: AppState) -> Router {
    // Audio uploads serialized as byte arrays can be large; raise route body limit.
    let create_route = post(create_track).layer(DefaultBodyLimit::max(64 * 1024 * 1024));

    Router::new()
        .route("/health", get(health))
        .route("/api/tracks", create_route)
        .route("/api/tracks/{track_id}", delete(delete_track))
        .route("/api/dictation/check", post(check_dictation))
        .with_state(state)
}
