use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::preview::{check_preview, playback_url};
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::advertisement;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::handlers::screen::load_screens;
use crate::models::advertisement::{
    Advertisement, CreateAdvertisementRequest, PreviewResponse, validate_create_advertisement,
};
use crate::models::shared::parse_id;
use crate::state::AppState;

/// All advertisements, newest first.
pub async fn load_advertisements<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<Advertisement>, DbErr> {
    let models = advertisement::Entity::find()
        .order_by_desc(advertisement::Column::CreatedAt)
        .order_by_desc(advertisement::Column::Id)
        .all(db)
        .await?;
    Ok(models.into_iter().map(Advertisement::from).collect())
}

/// Look up a single advertisement; malformed ids simply do not match.
pub async fn find_advertisement<C: ConnectionTrait>(
    db: &C,
    id: &str,
) -> Result<Option<Advertisement>, DbErr> {
    let Some(id) = parse_id(id) else {
        return Ok(None);
    };
    let model = advertisement::Entity::find_by_id(id).one(db).await?;
    Ok(model.map(Advertisement::from))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Advertisements",
    operation_id = "listAdvertisements",
    summary = "List advertisements",
    description = "Returns every advertisement ordered by creation time, newest first. Screen references are returned as stored.",
    responses(
        (status = 200, description = "Advertisement list", body = Vec<Advertisement>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_advertisements(
    _auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Advertisement>>, AppError> {
    Ok(Json(load_advertisements(&state.db).await?))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Advertisements",
    operation_id = "createAdvertisement",
    summary = "Create an advertisement",
    description = "Creates an advertisement for a screen. `image_url` must be the URL of a completed upload. The screen reference is stored as given and is not checked against the screen list.",
    request_body = CreateAdvertisementRequest,
    responses(
        (status = 201, description = "Advertisement created", body = Advertisement),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, payload), fields(title = %payload.title, screen = %payload.screen_id))]
pub async fn create_advertisement(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateAdvertisementRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_advertisement(&payload)?;

    let new_ad = advertisement::ActiveModel {
        id: Set(Uuid::now_v7()),
        title: Set(payload.title.trim().to_string()),
        screen_id: Set(payload.screen_id.trim().to_string()),
        image_url: Set(payload.image_url.trim().to_string()),
        created_at: Set(chrono::Utc::now()),
    };
    let model = new_ad.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(Advertisement::from(model))))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Advertisements",
    operation_id = "getAdvertisement",
    summary = "Get an advertisement by ID",
    params(("id" = String, Path, description = "Advertisement ID")),
    responses(
        (status = 200, description = "Advertisement", body = Advertisement),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Advertisement not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user), fields(id = %id))]
pub async fn get_advertisement(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Advertisement>, AppError> {
    find_advertisement(&state.db, &id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Advertisement not found".into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Advertisements",
    operation_id = "deleteAdvertisement",
    summary = "Delete an advertisement",
    description = "Deletes one advertisement. Deleting a missing advertisement is a no-op. The uploaded image is left in storage.",
    params(("id" = String, Path, description = "Advertisement ID")),
    responses(
        (status = 204, description = "Advertisement deleted or already gone"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user), fields(id = %id))]
pub async fn delete_advertisement(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if let Some(id) = parse_id(&id) {
        let result = advertisement::Entity::delete_by_id(id)
            .exec(&state.db)
            .await?;
        tracing::debug!(rows = result.rows_affected, "Advertisement deleted");
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/{id}/preview",
    tag = "Advertisements",
    operation_id = "previewAdvertisement",
    summary = "Check whether an advertisement may be previewed",
    description = "Resolves the advertisement's screen by title (then by ID) and returns the playback URL when that screen is active. The public playback page itself does not apply this check.",
    params(("id" = String, Path, description = "Advertisement ID")),
    responses(
        (status = 200, description = "Preview allowed", body = PreviewResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Advertisement not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Preview blocked (SCREEN_INACTIVE, SCREEN_NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user), fields(id = %id))]
pub async fn preview_advertisement(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PreviewResponse>, AppError> {
    let ad = find_advertisement(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Advertisement not found".into()))?;

    let screens = load_screens(&state.db).await?;
    check_preview(&screens, &ad)?;

    Ok(Json(PreviewResponse {
        playback_url: playback_url(&state.config.server.public_url, &ad.id),
    }))
}
