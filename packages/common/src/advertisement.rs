use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An image advertisement bound to one screen reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Advertisement {
    #[schema(example = "0193a1b2-7c4d-7e8f-9a0b-1c2d3e4f5a6b")]
    pub id: String,
    #[schema(example = "Summer Sale")]
    pub title: String,
    /// Screen reference as supplied at creation. Never validated against the screen list.
    #[schema(example = "Lobby")]
    pub screen_id: String,
    /// Public URL of the uploaded image.
    #[schema(example = "http://localhost:3000/media/ads/1718000000000_sale.png")]
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating an advertisement.
///
/// `image_url` must be the URL returned by a completed upload.
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateAdvertisementRequest {
    #[schema(example = "Summer Sale")]
    pub title: String,
    #[schema(example = "Lobby")]
    pub screen_id: String,
    #[schema(example = "http://localhost:3000/media/ads/1718000000000_sale.png")]
    pub image_url: String,
}

/// Response for a completed image upload.
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UploadResponse {
    /// Object key within storage.
    #[schema(example = "ads/1718000000000_sale.png")]
    pub path: String,
    /// Public URL to store on the advertisement.
    #[schema(example = "http://localhost:3000/media/ads/1718000000000_sale.png")]
    pub url: String,
    #[schema(example = "image/png")]
    pub content_type: Option<String>,
    pub size: u64,
}

/// Response for an allowed preview.
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PreviewResponse {
    #[schema(example = "http://localhost:3000/ad/0193a1b2-7c4d-7e8f-9a0b-1c2d3e4f5a6b")]
    pub playback_url: String,
}
