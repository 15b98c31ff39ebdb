use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "adease_session";

/// Request body for operator sign-in.
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "operator@example.com")]
    pub email: String,
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
}

/// Successful sign-in. The token is also set as the `adease_session` cookie.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// JWT bearer token.
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    #[schema(example = "operator@example.com")]
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

/// The session attached to the current request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SessionInfo {
    #[schema(example = 1)]
    pub operator_id: i32,
    #[schema(example = "operator@example.com")]
    pub email: String,
    pub expires_at: DateTime<Utc>,
}
