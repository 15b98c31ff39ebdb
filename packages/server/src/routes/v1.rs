use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers::{advertisement, auth, overview, screen, upload};
use crate::state::AppState;

pub fn routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/screens", screen_routes())
        .nest("/ads", advertisement_routes())
        .nest("/uploads", upload_routes(config))
        .routes(routes!(overview::get_overview))
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(auth::login))
        .routes(routes!(auth::logout))
        .routes(routes!(auth::session))
}

fn screen_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(screen::list_screens, screen::create_screen))
        .routes(routes!(screen::update_screen, screen::delete_screen))
        .routes(routes!(screen::set_screen_active))
}

fn advertisement_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            advertisement::list_advertisements,
            advertisement::create_advertisement
        ))
        .routes(routes!(
            advertisement::get_advertisement,
            advertisement::delete_advertisement
        ))
        .routes(routes!(advertisement::preview_advertisement))
}

fn upload_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(upload::upload_image))
        .layer(upload::upload_body_limit(&config.storage))
}
