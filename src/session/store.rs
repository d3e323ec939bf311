//! The signed-in user blob and its JSON file persistence.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::config::AppPaths;

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// The signed-in user.  `name` is only known after signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
}

// ---------------------------------------------------------------------------
// SessionStore
// ---------------------------------------------------------------------------

/// Key-value persistence boundary for the current user.
///
/// One JSON file; absent file means nobody is signed in.  A corrupt file is
/// treated the same as an absent one (logged, never fatal).
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store at the platform-appropriate `session.json`.
    pub fn new() -> Self {
        Self::at(AppPaths::new().session_file)
    }

    /// Store at an explicit path (useful for tests).
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Persist `user` as the current session.
    pub fn set_user(&self, user: &User) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(user)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// The current user, or `None` when nobody is signed in or the blob
    /// cannot be read.
    pub fn get_user(&self) -> Option<User> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&content) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("session: failed to parse user blob: {e}");
                None
            }
        }
    }

    /// Remove the current session, if any.
    pub fn clear_user(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// `true` when a user blob is present and readable.
    pub fn is_logged_in(&self) -> bool {
        self.get_user().is_some()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
