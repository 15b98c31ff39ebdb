use crate::entity::advertisement;
use crate::error::AppError;

pub use common::advertisement::{
    Advertisement, CreateAdvertisementRequest, PreviewResponse, UploadResponse,
};

use super::shared::validate_title;

pub fn validate_create_advertisement(
    payload: &CreateAdvertisementRequest,
) -> Result<(), AppError> {
    validate_title(&payload.title)?;
    if payload.screen_id.trim().is_empty() {
        return Err(AppError::Validation("Screen must not be empty".into()));
    }
    if payload.image_url.trim().is_empty() {
        return Err(AppError::Validation(
            "Image is required; upload one before creating the advertisement".into(),
        ));
    }
    Ok(())
}

impl From<advertisement::Model> for Advertisement {
    fn from(m: advertisement::Model) -> Self {
        Self {
            id: m.id.to_string(),
            title: m.title,
            screen_id: m.screen_id,
            image_url: m.image_url,
            created_at: m.created_at,
        }
    }
}
