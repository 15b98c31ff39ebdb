use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use common::auth::SESSION_COOKIE;
use sea_orm::*;
use tracing::instrument;

use crate::entity::operator;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::auth::{LoginRequest, LoginResponse, SessionInfo, validate_login_request};
use crate::state::AppState;
use crate::utils::{hash, jwt};

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    operation_id = "login",
    summary = "Sign in as an operator",
    description = "Verifies the email and password and issues a session token. The token is returned in the body and also set as the `adease_session` cookie. Any failure returns the same `INVALID_CREDENTIALS` message.",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = LoginResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Rejected (INVALID_CREDENTIALS)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, jar, payload), fields(email = %payload.email))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_login_request(&payload)?;

    let email = payload.email.trim();

    let operator = operator::Entity::find()
        .filter(operator::Column::Email.eq(email))
        .one(&state.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let is_valid = hash::verify_password(&payload.password, &operator.password)
        .map_err(|e| AppError::Internal(format!("Password verify error: {}", e)))?;

    if !is_valid {
        return Err(AppError::InvalidCredentials);
    }

    let (token, expires_at) = jwt::sign(
        operator.id,
        &operator.email,
        &state.config.auth.jwt_secret,
        state.config.auth.session_ttl_hours,
    )
    .map_err(|e| AppError::Internal(format!("JWT sign error: {}", e)))?;

    tracing::info!(operator_id = operator.id, "Operator signed in");

    Ok((
        jar.add(session_cookie(token.clone())),
        Json(LoginResponse {
            token,
            email: operator.email,
            expires_at,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/logout",
    tag = "Auth",
    operation_id = "logout",
    summary = "Sign out",
    description = "Clears the session cookie. Tokens are stateless and are not revoked server-side.",
    responses(
        (status = 204, description = "Signed out"),
    ),
)]
#[instrument(skip(jar))]
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
    )
}

#[utoipa::path(
    get,
    path = "/session",
    tag = "Auth",
    operation_id = "getSession",
    summary = "Get the current session",
    responses(
        (status = 200, description = "Current session", body = SessionInfo),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user), fields(operator_id = auth_user.operator_id))]
pub async fn session(auth_user: AuthUser) -> Json<SessionInfo> {
    Json(SessionInfo {
        operator_id: auth_user.operator_id,
        email: auth_user.email,
        expires_at: auth_user.expires_at,
    })
}
