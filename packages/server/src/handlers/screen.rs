use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::sea_query::Expr;
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::screen;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::screen::{
    CreateScreenRequest, Screen, SetActiveRequest, UpdateScreenRequest, validate_create_screen,
    validate_update_screen,
};
use crate::models::shared::parse_id;
use crate::state::AppState;

/// All screens, newest first.
pub async fn load_screens<C: ConnectionTrait>(db: &C) -> Result<Vec<Screen>, DbErr> {
    let models = screen::Entity::find()
        .order_by_desc(screen::Column::CreatedAt)
        .order_by_desc(screen::Column::Id)
        .all(db)
        .await?;
    Ok(models.into_iter().map(Screen::from).collect())
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Screens",
    operation_id = "listScreens",
    summary = "List screens",
    description = "Returns every registered screen ordered by creation time, newest first.",
    responses(
        (status = 200, description = "Screen list", body = Vec<Screen>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_screens(
    _auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Screen>>, AppError> {
    Ok(Json(load_screens(&state.db).await?))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Screens",
    operation_id = "createScreen",
    summary = "Register a screen",
    description = "Creates a screen. New screens always start inactive; an `active` field in the body is ignored.",
    request_body = CreateScreenRequest,
    responses(
        (status = 201, description = "Screen created", body = Screen),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, payload), fields(title = %payload.title))]
pub async fn create_screen(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateScreenRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_screen(&payload)?;

    let new_screen = screen::ActiveModel {
        id: Set(Uuid::now_v7()),
        title: Set(payload.title.trim().to_string()),
        location: Set(payload.location.trim().to_string()),
        screen_type: Set(payload.screen_type),
        is_active: Set(false),
        created_at: Set(chrono::Utc::now()),
    };
    let model = new_screen.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(Screen::from(model))))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Screens",
    operation_id = "updateScreen",
    summary = "Update a screen",
    description = "Partially updates title, location and type. Updating a screen that does not exist is a no-op.",
    params(("id" = String, Path, description = "Screen ID")),
    request_body = UpdateScreenRequest,
    responses(
        (status = 204, description = "Screen updated, or nothing to update"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, payload), fields(id = %id))]
pub async fn update_screen(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateScreenRequest>,
) -> Result<StatusCode, AppError> {
    validate_update_screen(&payload)?;

    if payload == UpdateScreenRequest::default() {
        return Ok(StatusCode::NO_CONTENT);
    }
    let Some(id) = parse_id(&id) else {
        return Ok(StatusCode::NO_CONTENT);
    };
    let Some(existing) = screen::Entity::find_by_id(id).one(&state.db).await? else {
        tracing::debug!("Update of missing screen ignored");
        return Ok(StatusCode::NO_CONTENT);
    };

    let mut active: screen::ActiveModel = existing.into();
    if let Some(title) = payload.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(location) = payload.location {
        active.location = Set(location.trim().to_string());
    }
    if let Some(screen_type) = payload.screen_type {
        active.screen_type = Set(screen_type);
    }
    active.update(&state.db).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/{id}/active",
    tag = "Screens",
    operation_id = "setScreenActive",
    summary = "Activate or deactivate a screen",
    description = "Writes the active flag unconditionally, even when it already has the requested value. A missing screen is a no-op.",
    params(("id" = String, Path, description = "Screen ID")),
    request_body = SetActiveRequest,
    responses(
        (status = 204, description = "Flag written"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, payload), fields(id = %id, active = payload.active))]
pub async fn set_screen_active(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<SetActiveRequest>,
) -> Result<StatusCode, AppError> {
    let Some(id) = parse_id(&id) else {
        return Ok(StatusCode::NO_CONTENT);
    };

    let result = screen::Entity::update_many()
        .col_expr(screen::Column::IsActive, Expr::value(payload.active))
        .filter(screen::Column::Id.eq(id))
        .exec(&state.db)
        .await?;
    tracing::debug!(rows = result.rows_affected, "Screen active flag written");

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Screens",
    operation_id = "deleteScreen",
    summary = "Delete a screen",
    description = "Deletes a screen without checking for advertisements that reference it. Those advertisements remain and show as `Unknown Screen`. Deleting a missing screen is a no-op.",
    params(("id" = String, Path, description = "Screen ID")),
    responses(
        (status = 204, description = "Screen deleted or already gone"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user), fields(id = %id))]
pub async fn delete_screen(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if let Some(id) = parse_id(&id) {
        let result = screen::Entity::delete_by_id(id).exec(&state.db).await?;
        tracing::debug!(rows = result.rows_affected, "Screen deleted");
    }
    Ok(StatusCode::NO_CONTENT)
}
