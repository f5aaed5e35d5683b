//! Explicit sign-in session and its on-disk store.
//!
//! A [`Session`] is created on successful sign-in or sign-up and passed to
//! every API call that needs an identity. [`SessionStore`] keeps it between
//! runs and removes it on sign-out.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::Result;
use crate::models::User;

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Bearer token plus the user it was issued for.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn new<S: Into<String>>(token: S, user: User) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// SessionStore
// ---------------------------------------------------------------------------

/// Persists the current [`Session`] as a JSON file.
pub struct SessionStore {
    /// Location of the session file.
    pub path: PathBuf,
}

impl SessionStore {
    /// Create a store at `path`, or at the platform config directory if `None`.
    ///
    /// Nothing is read or written until [`load`](Self::load) or [`save`](Self::save).
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path: path.unwrap_or_else(config::default_session_path),
        }
    }

    /// Load the stored session, if any.
    ///
    /// A file that cannot be parsed is deleted and treated as signed out.
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)?;
        match serde_json::from_str::<Session>(&contents) {
            Ok(session) => {
                log::debug!("Loaded session for user {}", session.user.id);
                Ok(Some(session))
            }
            Err(e) => {
                log::warn!(
                    "Corrupt session file {}: {} -- removing",
                    self.path.display(),
                    e
                );
                if let Err(e) = fs::remove_file(&self.path) {
                    log::warn!(
                        "Could not remove corrupt session file {}: {}",
                        self.path.display(),
                        e
                    );
                }
                Ok(None)
            }
        }
    }

    /// Write the session to disk.
    ///
    /// Writes to a temp file first and renames on success, so an interrupted
    /// write never leaves a truncated session behind.
    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = tmp_path(&self.path);
        let result = (|| -> Result<()> {
            let json = serde_json::to_string_pretty(session)?;
            fs::write(&tmp, json)?;
            fs::rename(&tmp, &self.path)?;
            Ok(())
        })();

        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result
    }

    /// Remove the stored session. Succeeds if there was none.
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            log::debug!("Removed session file {}", self.path.display());
        }
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
