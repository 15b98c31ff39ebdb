//! Persisted operator session.
//!
//! The session lives in `{config_dir}/adease/session.json` under a single fixed
//! key. It is read once at startup, written on sign-in and removed on sign-out.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Key under which the session is stored in the session file.
pub const SESSION_KEY: &str = "@session_id";

/// A signed-in operator session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Server the token was issued by.
    pub server: String,
    pub token: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("could not determine the user configuration directory")]
    NoConfigDir,
    #[error("session file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("session file is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

/// File-backed storage for the current session.
#[derive(Clone, Debug)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform configuration directory.
    pub fn default_location() -> Result<Self, SessionStoreError> {
        let dir = dirs::config_dir().ok_or(SessionStoreError::NoConfigDir)?;
        Ok(Self::new(dir.join("adease").join("session.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored session, if any.
    pub fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut entries: BTreeMap<String, Session> = serde_json::from_str(&raw)?;
        Ok(entries.remove(SESSION_KEY))
    }

    pub fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let entries = BTreeMap::from([(SESSION_KEY, session)]);
        std::fs::write(&self.path, serde_json::to_vec_pretty(&entries)?)?;
        Ok(())
    }

    /// Remove the stored session. Clearing an absent session succeeds.
    pub fn clear(&self) -> Result<(), SessionStoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
