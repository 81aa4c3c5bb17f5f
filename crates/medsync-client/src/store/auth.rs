//! # Auth Store
//!
//! Session-context state: the authenticated user, its durable copy, and
//! the login/register/logout operations.
//!
//! ## Session Rules
//! - Construction restores the persisted user (corrupt data reads as
//!   logged-out).
//! - `login` persists the echoed user and, per the remember-me flag,
//!   saves or forgets the username used.
//! - `logout` clears the local session even when the remote call fails:
//!   the user asked to leave, and the endpoint holds no session state of
//!   its own.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::warn;

use medsync_core::{NewUser, User};

use crate::error::SyncResult;
use crate::service::SupplyService;
use crate::session::SessionStore;

#[derive(Debug, Default)]
struct AuthState {
    user: Option<User>,
    loading: bool,
    error: Option<String>,
}

/// Owns the authenticated-user state and its durable copy.
pub struct AuthStore {
    service: Arc<SupplyService>,
    session: SessionStore,
    state: RwLock<AuthState>,
}

impl AuthStore {
    /// Builds the store, restoring any persisted session user.
    pub fn new(service: Arc<SupplyService>, session: SessionStore) -> Self {
        let user = session.load_user();
        AuthStore {
            service,
            session,
            state: RwLock::new(AuthState {
                user,
                loading: false,
                error: None,
            }),
        }
    }

    pub async fn current_user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.user.is_some()
    }

    pub async fn loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    /// Username saved by a previous remember-me login, for form pre-fill.
    pub fn remembered_username(&self) -> Option<String> {
        self.session.remembered_username()
    }

    /// Authenticates and establishes the session.
    pub async fn login(&self, username: &str, password: &str, remember: bool) -> SyncResult<User> {
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }

        match self.service.authenticate(username, password).await {
            Ok(user) => {
                if let Err(e) = self.session.store_user(&user) {
                    warn!(error = %e, "Could not persist session user");
                }
                let result = if remember {
                    self.session.remember_username(username)
                } else {
                    self.session.forget_username()
                };
                if let Err(e) = result {
                    warn!(error = %e, "Could not update remembered username");
                }

                let mut state = self.state.write().await;
                state.user = Some(user.clone());
                state.loading = false;
                Ok(user)
            }
            Err(e) => {
                let mut state = self.state.write().await;
                state.loading = false;
                state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Registers a new dashboard user. Does not establish a session.
    pub async fn register(&self, user: &NewUser) -> SyncResult<()> {
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }

        match self.service.register_user(user).await {
            Ok(()) => {
                self.state.write().await.loading = false;
                Ok(())
            }
            Err(e) => {
                let mut state = self.state.write().await;
                state.loading = false;
                state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Ends the session: best-effort remote logout, then local teardown.
    pub async fn logout(&self) -> SyncResult<()> {
        let remote = self.service.logout().await;
        if let Err(e) = &remote {
            warn!(error = %e, "Remote logout failed, clearing local session anyway");
        }

        if let Err(e) = self.session.clear_user() {
            warn!(error = %e, "Could not clear persisted session user");
        }

        let mut state = self.state.write().await;
        state.user = None;
        state.loading = false;
        remote
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncError;
    use crate::gateway::ScriptTransport;
    use crate::protocol::ScriptResponse;
    use crate::testing::StubTransport;
    use serde_json::{json, Value};

    fn auth_envelope() -> ScriptResponse {
        ScriptResponse {
            success: true,
            data: None,
            error: None,
            user: Some(json!({
                "id": "USR001",
                "username": "admin",
                "name": "Administrator",
                "email": "admin@rama.com",
                "role": "admin"
            })),
        }
    }

    fn store(stub: &Arc<StubTransport>, dir: &std::path::Path) -> AuthStore {
        AuthStore::new(
            Arc::new(SupplyService::new(stub.clone() as Arc<dyn ScriptTransport>)),
            SessionStore::new(dir.to_path_buf()),
        )
    }

    #[tokio::test]
    async fn test_login_persists_session_and_username() {
        let dir = tempfile::tempdir().unwrap();
        let stub = StubTransport::new();
        stub.push_envelope(auth_envelope());
        let auth = store(&stub, dir.path());

        assert!(!auth.is_authenticated().await);
        let user = auth.login("admin", "secret", true).await.unwrap();
        assert_eq!(user.id, "USR001");
        assert!(auth.is_authenticated().await);
        assert_eq!(auth.remembered_username().as_deref(), Some("admin"));

        // A fresh store restores the session from disk.
        let restored = store(&stub, dir.path());
        assert!(restored.is_authenticated().await);
        assert_eq!(restored.current_user().await.unwrap().username, "admin");
    }

    #[tokio::test]
    async fn test_login_without_remember_forgets_username() {
        let dir = tempfile::tempdir().unwrap();
        let stub = StubTransport::new();
        stub.push_envelope(auth_envelope());
        let auth = store(&stub, dir.path());
        auth.session.remember_username("stale").unwrap();

        auth.login("admin", "secret", false).await.unwrap();
        assert!(auth.remembered_username().is_none());
    }

    #[tokio::test]
    async fn test_failed_login_sets_error_and_stays_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let stub = StubTransport::new();
        stub.push_rejected("Invalid credentials");
        let auth = store(&stub, dir.path());

        let err = auth.login("admin", "wrong", false).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(!auth.is_authenticated().await);
        assert_eq!(auth.error().await.as_deref(), Some("Invalid credentials"));
    }

    #[tokio::test]
    async fn test_logout_clears_session_even_when_remote_fails() {
        let dir = tempfile::tempdir().unwrap();
        let stub = StubTransport::new();
        stub.push_envelope(auth_envelope());
        let auth = store(&stub, dir.path());
        auth.login("admin", "secret", true).await.unwrap();

        stub.push_err(SyncError::ConnectionFailed("offline".into()));
        assert!(auth.logout().await.is_err());

        assert!(!auth.is_authenticated().await);
        let restored = store(&stub, dir.path());
        assert!(!restored.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_register_does_not_establish_session() {
        let dir = tempfile::tempdir().unwrap();
        let stub = StubTransport::new();
        stub.push_ok(Value::Null);
        let auth = store(&stub, dir.path());

        let new_user = NewUser {
            username: "clerk".into(),
            password: "hunter2!".into(),
            name: "Clerk".into(),
            email: "clerk@rama.com".into(),
            role: Default::default(),
        };
        auth.register(&new_user).await.unwrap();
        assert!(!auth.is_authenticated().await);
    }
}
