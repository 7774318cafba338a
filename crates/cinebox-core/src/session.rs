//! Session state module
//!
//! A single boolean authentication flag, persisted as a small JSON file so
//! the login survives process restarts. Login compares the submitted
//! credentials against the configured admin secrets with exact string
//! equality; logout clears both the in-memory flag and the file.
//!
//! The comparison happens in the client, against values the client was
//! configured with. It gates the UI, nothing more.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::error::AppError;

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionState {
    authenticated: bool,
}

/// Persisted session store. Construct with [`SessionStore::open`]; the flag
/// rehydrates from disk, and every mutation is written back immediately.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    state: SessionState,
}

impl SessionStore {
    /// Opens the store at `path`, rehydrating the authenticated flag. A
    /// missing or unreadable state file means "not authenticated".
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = read_state(&path);
        debug!(path = %path.display(), authenticated = state.authenticated, "session loaded");
        Self { path, state }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.authenticated
    }

    /// Compares the submitted credentials against the configured secrets.
    /// On an exact match of both, the session becomes authenticated and is
    /// persisted; any mismatch returns `false` with no state change.
    pub fn login(
        &mut self,
        username: &str,
        password: &str,
        config: &Config,
    ) -> Result<bool, AppError> {
        if username != config.admin_username || password != config.admin_password {
            return Ok(false);
        }

        self.state.authenticated = true;
        self.persist()?;
        Ok(true)
    }

    /// Clears the in-memory flag and removes the persisted state file.
    pub fn logout(&mut self) -> Result<(), AppError> {
        self.state.authenticated = false;
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        debug!(path = %self.path.display(), "session cleared");
        Ok(())
    }

    /// The gate in front of protected commands.
    pub fn require_auth(&self) -> Result<(), AppError> {
        if self.state.authenticated {
            Ok(())
        } else {
            Err(AppError::Unauthorized(
                "Not logged in. Run `cinebox login <username> <password>` first.".to_string(),
            ))
        }
    }

    fn persist(&self) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_vec(&self.state)?)?;
        debug!(path = %self.path.display(), "session persisted");
        Ok(())
    }
}

fn read_state(path: &Path) -> SessionState {
    fs::read(path)
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            admin_username: "admin".to_string(),
            admin_password: "hunter2".to_string(),
            api_base_url: "http://localhost:4000".to_string(),
            session_file_override: None,
        }
    }

    fn session_path(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("session.json")
    }

    #[test]
    fn test_login_succeeds_on_exact_match() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = SessionStore::open(session_path(&dir));

        assert!(store.login("admin", "hunter2", &test_config()).unwrap());
        assert!(store.is_authenticated());
        assert!(store.require_auth().is_ok());
    }

    #[test]
    fn test_login_mismatch_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = session_path(&dir);
        let mut store = SessionStore::open(&path);

        assert!(!store.login("admin", "wrong", &test_config()).unwrap());
        assert!(!store.login("Admin", "hunter2", &test_config()).unwrap());
        assert!(!store.is_authenticated());
        assert!(!path.exists());
        assert!(store.require_auth().is_err());
    }

    #[test]
    fn test_session_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = session_path(&dir);

        let mut store = SessionStore::open(&path);
        assert!(store.login("admin", "hunter2", &test_config()).unwrap());
        drop(store);

        let reopened = SessionStore::open(&path);
        assert!(reopened.is_authenticated());
    }

    #[test]
    fn test_logout_clears_memory_and_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = session_path(&dir);

        let mut store = SessionStore::open(&path);
        assert!(store.login("admin", "hunter2", &test_config()).unwrap());
        store.logout().unwrap();

        assert!(!store.is_authenticated());
        assert!(!path.exists());

        let reopened = SessionStore::open(&path);
        assert!(!reopened.is_authenticated());
        assert!(reopened.require_auth().is_err());
    }

    #[test]
    fn test_corrupt_state_file_reads_as_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = session_path(&dir);
        fs::write(&path, b"not json").unwrap();

        let store = SessionStore::open(&path);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_persist_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("dirs").join("session.json");

        let mut store = SessionStore::open(&path);
        assert!(store.login("admin", "hunter2", &test_config()).unwrap());
        assert!(path.exists());
    }
}
