#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Orientation of a physical display.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in SeaORM entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
pub enum ScreenType {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Landscape"))]
    Landscape,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Portrait"))]
    Portrait,
}

impl ScreenType {
    /// All possible screen types.
    pub const ALL: &'static [ScreenType] = &[Self::Landscape, Self::Portrait];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Landscape => "Landscape",
            Self::Portrait => "Portrait",
        }
    }
}

impl fmt::Display for ScreenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an invalid screen type string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseScreenTypeError {
    invalid: String,
}

impl fmt::Display for ParseScreenTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid screen type '{}'. Valid values: {}",
            self.invalid,
            ScreenType::ALL
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseScreenTypeError {}

impl FromStr for ScreenType {
    type Err = ParseScreenTypeError;

    /// Case-insensitive, so operators can type `portrait` on the command line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "landscape" => Ok(Self::Landscape),
            "portrait" => Ok(Self::Portrait),
            _ => Err(ParseScreenTypeError {
                invalid: s.to_string(),
            }),
        }
    }
}

/// A registered display endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Screen {
    /// Opaque identifier assigned on creation.
    #[schema(example = "0193a1b2-7c4d-7e8f-9a0b-1c2d3e4f5a6b")]
    pub id: String,
    #[schema(example = "Lobby")]
    pub title: String,
    #[schema(example = "1F, next to the elevators")]
    pub location: String,
    #[serde(rename = "type")]
    pub screen_type: ScreenType,
    /// Whether ads referencing this screen may be previewed.
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Request body for registering a screen.
///
/// There is deliberately no `active` field: new screens always start inactive,
/// and unknown fields in the payload are ignored.
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateScreenRequest {
    #[schema(example = "Lobby")]
    pub title: String,
    #[serde(default)]
    #[schema(example = "1F")]
    pub location: String,
    #[serde(rename = "type")]
    pub screen_type: ScreenType,
}

/// PATCH body for a screen; absent fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateScreenRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub screen_type: Option<ScreenType>,
}

/// Body for `PUT /screens/{id}/active`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SetActiveRequest {
    pub active: bool,
}
