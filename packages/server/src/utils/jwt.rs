use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// JWT Claims structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Operator email
    pub uid: i32,    // Operator ID
    pub exp: usize,  // Expiration timestamp
}

impl Claims {
    pub fn expires_at(&self) -> DateTime<Utc> {
        i64::try_from(self.exp)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// Sign a new session token. Returns the token and its expiry.
pub fn sign(
    operator_id: i32,
    email: &str,
    secret: &str,
    ttl_hours: i64,
) -> Result<(String, DateTime<Utc>)> {
    let expires_at = Utc::now()
        .checked_add_signed(Duration::hours(ttl_hours))
        .context("session expiry out of range")?;

    let claims = Claims {
        sub: email.to_owned(),
        uid: operator_id,
        exp: usize::try_from(expires_at.timestamp()).context("session expiry before epoch")?,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok((token, expires_at))
}

/// Verify and decode a session token.
pub fn verify(token: &str, secret: &str) -> Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}
