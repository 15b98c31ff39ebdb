use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use common::storage::validate_key;
use sha2::{Digest, Sha256};
use tokio_util::io::ReaderStream;
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;

/// Strong ETag for an object key. Upload keys embed a timestamp and a random
/// nonce, so a key never names two different contents.
fn etag_for(key: &str) -> String {
    format!("\"{}\"", hex::encode(Sha256::digest(key.as_bytes())))
}

/// Serve a stored object publicly. Image URLs on advertisements point here.
#[instrument(skip(state, headers))]
pub async fn get_media(
    State(state): State<AppState>,
    Path(path): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let key = validate_key(&path)?;

    let etag_value = etag_for(key);
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && let Ok(val) = if_none_match.to_str()
        && (val == etag_value || val == "*")
        && state.store.exists(key).await?
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let reader = state.store.get_stream(key).await?;
    let body = Body::from_stream(ReaderStream::new(reader));

    let content_type = mime_guess::from_path(key)
        .first_raw()
        .unwrap_or("application/octet-stream");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::ETAG, &etag_value)
        .header(header::CACHE_CONTROL, "public, max-age=3600")
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}
