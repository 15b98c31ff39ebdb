pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod seed;
pub mod state;
pub mod utils;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, Method, header};
use common::storage::ObjectStore;
use common::storage::filesystem::FilesystemObjectStore;
use common::storage::s3::S3ObjectStore;
use tower_http::cors::{AllowOrigin, CorsLayer};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::{CorsConfig, StorageBackend, StorageConfig};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AdEase Signage API",
        version = "1.0.0",
        description = "Operator API for managing signage screens and their image advertisements"
    ),
    tags(
        (name = "Auth", description = "Operator sign-in and sessions"),
        (name = "Screens", description = "Screen registry and activation"),
        (name = "Advertisements", description = "Advertisement registry and preview gating"),
        (name = "Overview", description = "Joined dashboard view and summary counts"),
        (name = "Uploads", description = "Image uploads to object storage"),
    ),
    modifiers(&SecurityAddon),
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = cors
        .allow_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(cors.max_age))
}

/// Open the object store selected by `storage.backend`.
pub async fn build_object_store(
    storage: &StorageConfig,
) -> anyhow::Result<Arc<dyn ObjectStore>> {
    let store: Arc<dyn ObjectStore> = match storage.backend {
        StorageBackend::Filesystem => Arc::new(
            FilesystemObjectStore::new(storage.data_dir.clone(), storage.max_upload_size).await?,
        ),
        StorageBackend::S3 => {
            let s3 = storage.s3.as_ref().ok_or_else(|| {
                anyhow::anyhow!("storage.backend is \"s3\" but [storage.s3] is not configured")
            })?;
            Arc::new(S3ObjectStore::new(s3, storage.max_upload_size)?)
        }
    };
    Ok(store)
}

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api", routes::api_routes(&state.config))
        .split_for_parts();

    let cors = cors_layer(&state.config.server.cors);

    router
        .merge(routes::public_routes())
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
        .layer(cors)
}
