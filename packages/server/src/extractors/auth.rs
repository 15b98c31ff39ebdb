use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;
use chrono::{DateTime, Utc};
use common::auth::SESSION_COOKIE;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt;

/// Authenticated operator, taken from the `Authorization: Bearer <token>` header
/// or, failing that, from the session cookie.
///
/// Add this as a handler parameter to require a session.
#[derive(Debug)]
pub struct AuthUser {
    pub operator_id: i32,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = match parts.headers.get("Authorization") {
            Some(value) => value
                .to_str()
                .ok()
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(str::to_owned)
                .ok_or(AppError::TokenInvalid)?,
            None => CookieJar::from_headers(&parts.headers)
                .get(SESSION_COOKIE)
                .map(|c| c.value().to_owned())
                .ok_or(AppError::TokenMissing)?,
        };

        let claims =
            jwt::verify(&token, &state.config.auth.jwt_secret).map_err(|_| AppError::TokenInvalid)?;

        Ok(AuthUser {
            operator_id: claims.uid,
            email: claims.sub.clone(),
            expires_at: claims.expires_at(),
        })
    }
}
