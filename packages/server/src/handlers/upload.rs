use axum::Json;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::storage::{BoxReader, ObjectStore, public_url};
use tokio::io::AsyncWriteExt;
use tracing::instrument;
use uuid::Uuid;

use crate::config::StorageConfig;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::advertisement::UploadResponse;
use crate::state::AppState;
use crate::utils::filename::{
    AD_IMAGE_PREFIX, upload_key, upload_nonce, validate_flat_filename,
};

/// Multipart framing overhead allowed on top of the object size limit.
const MULTIPART_OVERHEAD: u64 = 64 * 1024;

pub fn upload_body_limit(storage: &StorageConfig) -> DefaultBodyLimit {
    let limit = storage.max_upload_size.saturating_add(MULTIPART_OVERHEAD);
    DefaultBodyLimit::max(usize::try_from(limit).unwrap_or(usize::MAX))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Uploads",
    operation_id = "uploadImage",
    summary = "Upload an advertisement image",
    description = "Stores the `file` multipart field under `ads/{unix_millis}_{nonce}_{filename}` and returns its public URL. \
        The URL is what `POST /ads` expects as `image_url`. The content is not inspected or transcoded.",
    request_body(content_type = "multipart/form-data", description = "Image file in the `file` field"),
    responses(
        (status = 201, description = "Image stored", body = UploadResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, multipart))]
pub async fn upload_image(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some("file") {
            continue; // Ignore unknown fields.
        }

        let filename = field
            .file_name()
            .ok_or_else(|| AppError::Validation("File field must have a filename".into()))?;
        let filename = validate_flat_filename(filename)
            .map_err(|e| AppError::Validation(e.message().into()))?
            .to_string();

        let key = upload_key(
            AD_IMAGE_PREFIX,
            chrono::Utc::now().timestamp_millis(),
            &upload_nonce(),
            &filename,
        );
        let size = stream_field_to_store(
            field,
            &key,
            &*state.store,
            state.config.storage.max_upload_size,
        )
        .await?;

        let content_type = mime_guess::from_path(&filename)
            .first()
            .map(|m| m.to_string());

        tracing::info!(%key, size, "Image uploaded");

        return Ok((
            StatusCode::CREATED,
            Json(UploadResponse {
                url: public_url(&state.config.server.public_url, &key),
                path: key,
                content_type,
                size,
            }),
        ));
    }

    Err(AppError::Validation("Missing 'file' field".into()))
}

/// Spool a multipart field to a temp file, then hand it to the object store under `key`.
async fn stream_field_to_store(
    mut field: axum::extract::multipart::Field<'_>,
    key: &str,
    store: &dyn ObjectStore,
    max_size: u64,
) -> Result<u64, AppError> {
    let temp_path = std::env::temp_dir().join(format!("adease-upload-{}", Uuid::new_v4()));

    let result = async {
        let mut temp_file = tokio::fs::File::create(&temp_path)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create temp file: {e}")))?;

        let mut total_size: u64 = 0;

        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?
        {
            total_size += chunk.len() as u64;
            if total_size > max_size {
                return Err(AppError::Validation(format!(
                    "File exceeds maximum size of {max_size} bytes"
                )));
            }
            temp_file
                .write_all(&chunk)
                .await
                .map_err(|e| AppError::Internal(format!("Temp file write failed: {e}")))?;
        }

        if total_size == 0 {
            return Err(AppError::Validation("Uploaded file is empty".into()));
        }

        temp_file
            .flush()
            .await
            .map_err(|e| AppError::Internal(format!("Temp file flush failed: {e}")))?;
        drop(temp_file);

        let file = tokio::fs::File::open(&temp_path)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to reopen temp file: {e}")))?;
        let reader: BoxReader = Box::new(file);
        Ok(store.put_stream(key, reader).await?)
    }
    .await;

    // Best effort.
    let _ = tokio::fs::remove_file(&temp_path).await;

    result
}
