//! # Durable Session State
//!
//! The only state that outlives a dashboard session: a remembered username
//! (plain string) and the serialized authenticated user (JSON). Both are
//! best-effort — a corrupt stored user is discarded and the session starts
//! logged-out.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Session State Lifecycle                            │
//! │                                                                         │
//! │  startup ──► load_user()            read once, corrupt → logged-out    │
//! │  login ────► store_user()           plus remember/forget username      │
//! │  logout ───► clear_user()           single writer, no concurrency      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use tracing::{debug, warn};

use medsync_core::User;

use crate::config::ClientConfig;
use crate::error::{SyncError, SyncResult};

const USER_FILE: &str = "session_user.json";
const USERNAME_FILE: &str = "remembered_user";

/// File-backed store for the two durable session keys.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Creates a store rooted at an explicit directory.
    pub fn new(dir: PathBuf) -> Self {
        SessionStore { dir }
    }

    /// Creates a store rooted at the configured session directory.
    pub fn from_config(config: &ClientConfig) -> SyncResult<Self> {
        let dir = config
            .session_dir()
            .ok_or_else(|| SyncError::SessionStorage("no session directory available".into()))?;
        Ok(SessionStore { dir })
    }

    fn user_path(&self) -> PathBuf {
        self.dir.join(USER_FILE)
    }

    fn username_path(&self) -> PathBuf {
        self.dir.join(USERNAME_FILE)
    }

    fn ensure_dir(&self) -> SyncResult<()> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| SyncError::SessionStorage(e.to_string()))
    }

    // =========================================================================
    // Current User
    // =========================================================================

    /// Reads the persisted user, discarding anything unreadable.
    pub fn load_user(&self) -> Option<User> {
        let path = self.user_path();
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(?path, error = %e, "Could not read stored session");
                return None;
            }
        };

        match serde_json::from_str::<User>(&contents) {
            Ok(user) => {
                debug!(username = %user.username, "Restored session user");
                Some(user)
            }
            Err(e) => {
                warn!(?path, error = %e, "Discarding corrupt stored session");
                let _ = std::fs::remove_file(&path);
                None
            }
        }
    }

    /// Persists the authenticated user.
    pub fn store_user(&self, user: &User) -> SyncResult<()> {
        self.ensure_dir()?;
        let contents = serde_json::to_string(user)?;
        std::fs::write(self.user_path(), contents)
            .map_err(|e| SyncError::SessionStorage(e.to_string()))
    }

    /// Removes the persisted user. Missing file is not an error.
    pub fn clear_user(&self) -> SyncResult<()> {
        match std::fs::remove_file(self.user_path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SyncError::SessionStorage(e.to_string())),
        }
    }

    // =========================================================================
    // Remembered Username
    // =========================================================================

    /// Reads the remembered username, if one was saved.
    pub fn remembered_username(&self) -> Option<String> {
        match std::fs::read_to_string(self.username_path()) {
            Ok(username) => {
                let username = username.trim().to_string();
                (!username.is_empty()).then_some(username)
            }
            Err(_) => None,
        }
    }

    /// Saves the username for pre-filling the next login form.
    pub fn remember_username(&self, username: &str) -> SyncResult<()> {
        self.ensure_dir()?;
        std::fs::write(self.username_path(), username)
            .map_err(|e| SyncError::SessionStorage(e.to_string()))
    }

    /// Forgets the remembered username. Missing file is not an error.
    pub fn forget_username(&self) -> SyncResult<()> {
        match std::fs::remove_file(self.username_path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SyncError::SessionStorage(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medsync_core::UserRole;

    fn user() -> User {
        User {
            id: "USR001".into(),
            username: "admin".into(),
            name: "Administrator".into(),
            email: "admin@rama.com".into(),
            role: UserRole::Admin,
            branch: None,
            last_login: None,
        }
    }

    #[test]
    fn test_user_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().to_path_buf());

        assert!(store.load_user().is_none());
        store.store_user(&user()).unwrap();

        let restored = store.load_user().unwrap();
        assert_eq!(restored, user());

        store.clear_user().unwrap();
        assert!(store.load_user().is_none());
        // Clearing twice is fine.
        store.clear_user().unwrap();
    }

    #[test]
    fn test_corrupt_user_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().to_path_buf());

        std::fs::create_dir_all(dir.path()).unwrap();
        std::fs::write(dir.path().join("session_user.json"), "{not json").unwrap();

        assert!(store.load_user().is_none());
        // The corrupt file was removed, not left to fail again.
        assert!(!dir.path().join("session_user.json").exists());
    }

    #[test]
    fn test_remembered_username() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().to_path_buf());

        assert!(store.remembered_username().is_none());
        store.remember_username("admin").unwrap();
        assert_eq!(store.remembered_username().as_deref(), Some("admin"));

        store.forget_username().unwrap();
        assert!(store.remembered_username().is_none());
    }
}
