use crate::entity::screen;
use crate::error::AppError;

pub use common::screen::{CreateScreenRequest, Screen, SetActiveRequest, UpdateScreenRequest};

use super::shared::{validate_location, validate_title};

pub fn validate_create_screen(payload: &CreateScreenRequest) -> Result<(), AppError> {
    validate_title(&payload.title)?;
    validate_location(&payload.location)?;
    Ok(())
}

pub fn validate_update_screen(payload: &UpdateScreenRequest) -> Result<(), AppError> {
    if let Some(ref title) = payload.title {
        validate_title(title)?;
    }
    if let Some(ref location) = payload.location {
        validate_location(location)?;
    }
    Ok(())
}

impl From<screen::Model> for Screen {
    fn from(m: screen::Model) -> Self {
        Self {
            id: m.id.to_string(),
            title: m.title,
            location: m.location,
            screen_type: m.screen_type,
            active: m.is_active,
            created_at: m.created_at,
        }
    }
}
