use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use common::Playback;
use tracing::instrument;

use crate::error::AppError;
use crate::handlers::advertisement::find_advertisement;
use crate::models::shared::parse_id;
use crate::state::AppState;

/// Public full-screen playback page for one advertisement.
///
/// No session is required and the screen's active flag is not checked.
#[instrument(skip(state))]
pub async fn play_advertisement(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let lookup = find_advertisement(&state.db, &id).await?;
    // The lookup accepts any UUID spelling; the page compares against the stored form.
    let ad_id = parse_id(&id).map(|u| u.to_string()).unwrap_or(id);
    let page = Playback::new(ad_id).resolve(lookup);

    let status = if page.is_found() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    Ok((status, Html(page.render_html())))
}
