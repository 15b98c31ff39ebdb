mod v1;

use axum::Router;
use axum::routing::get;
use utoipa_axum::router::OpenApiRouter;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

/// Documented JSON API, mounted under `/api`.
pub fn api_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new().nest("/v1", v1::routes(config))
}

/// Credential-free routes used by physical displays.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/ad/{id}", get(handlers::playback::play_advertisement))
        .route("/media/{*path}", get(handlers::media::get_media))
}
