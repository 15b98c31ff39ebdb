use axum::{Json, extract::State};
use common::Overview;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::handlers::advertisement::load_advertisements;
use crate::handlers::screen::load_screens;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/overview",
    tag = "Overview",
    operation_id = "getOverview",
    summary = "Dashboard overview",
    description = "Joins every advertisement with its screen (by ID, falling back to title) and returns summary counts plus the five most recently created screens. Unresolved references show as `Unknown Screen` with status `false`.",
    responses(
        (status = 200, description = "Overview", body = Overview),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_overview(
    _auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Overview>, AppError> {
    let (screens, ads) = tokio::try_join!(
        load_screens(&state.db),
        load_advertisements(&state.db)
    )?;
    Ok(Json(Overview::build(&screens, &ads)))
}
