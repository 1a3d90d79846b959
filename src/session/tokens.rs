/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Session token state
//!
//! The in-memory tokens are the source of truth for the running process. The
//! key-value store is an advisory cache: every change is written through on a
//! best-effort basis and a storage failure never rolls back or blocks the
//! in-memory update. Failures are reported only through the diagnostics sink.

use crate::constants::LEGACY_KEYS;
use crate::diagnostics::LogSink;
use crate::model::auth::User;
use crate::storage::{KeyValueStore, StorageKeys};
use crate::utils::jwt::user_id_from_token;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Snapshot of the session tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Bearer token sent with every request
    pub access_token: Option<String>,
    /// Token exchanged for a new access token
    pub refresh_token: Option<String>,
}

impl SessionState {
    /// Whether an access token is held
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

/// Authentication state shared by every caller of the client
///
/// Only [`Session::set_tokens`] and [`Session::load_tokens`] mutate the tokens.
/// The lock is never held across an `.await`.
pub struct Session {
    state: RwLock<SessionState>,
    store: Arc<dyn KeyValueStore>,
    keys: StorageKeys,
    sink: LogSink,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.snapshot().is_authenticated())
            .field("keys", &self.keys)
            .field("sink", &self.sink)
            .finish()
    }
}

impl Session {
    /// Creates an empty session persisted to `store` under `keys`
    pub fn new(store: Arc<dyn KeyValueStore>, keys: StorageKeys, sink: LogSink) -> Self {
        Self {
            state: RwLock::new(SessionState::default()),
            store,
            keys,
            sink,
        }
    }

    /// Current access token
    #[must_use]
    pub fn auth_token(&self) -> Option<String> {
        self.read().access_token.clone()
    }

    /// Current refresh token
    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.read().refresh_token.clone()
    }

    /// Copy of both tokens
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.read().clone()
    }

    /// Whether an access token is held
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read().access_token.is_some()
    }

    /// User id claimed by the access token, without verifying it
    #[must_use]
    pub fn current_user_id(&self) -> Option<String> {
        self.auth_token().as_deref().and_then(user_id_from_token)
    }

    /// Storage keys of this session
    #[must_use]
    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Replaces the tokens and writes them through to storage
    ///
    /// With an access token, the access token, refresh token and user are
    /// persisted independently. An absent refresh token is removed from
    /// storage so a restart cannot revive it; an absent user leaves the cached
    /// profile as it is. Without an access token, all three keys are removed,
    /// which is how logout is expressed. Storage failures are logged and
    /// otherwise ignored.
    pub async fn set_tokens(
        &self,
        access: Option<&str>,
        refresh: Option<&str>,
        user: Option<&User>,
    ) {
        {
            let mut state = self.write();
            state.access_token = access.map(str::to_string);
            state.refresh_token = refresh.map(str::to_string);
        }

        match access {
            Some(token) => {
                self.persist(&self.keys.access_token(), token).await;
                match refresh {
                    Some(refresh) => self.persist(&self.keys.refresh_token(), refresh).await,
                    None => self.forget(&self.keys.refresh_token()).await,
                }
                if let Some(user) = user {
                    match serde_json::to_string(user) {
                        Ok(json) => self.persist(&self.keys.user(), &json).await,
                        Err(e) => self.sink.error(&format!("Failed to encode user: {e}")),
                    }
                }
            }
            None => {
                for key in [
                    self.keys.access_token(),
                    self.keys.refresh_token(),
                    self.keys.user(),
                ] {
                    self.forget(&key).await;
                }
            }
        }
    }

    /// Restores the tokens persisted by a previous run
    ///
    /// Unnamespaced keys from older builds are deleted first, ignoring
    /// failures. If either read fails, both tokens are reset to `None`.
    pub async fn load_tokens(&self) -> SessionState {
        for key in LEGACY_KEYS {
            if let Err(e) = self.store.remove(key).await {
                debug!("Ignoring failure to clear legacy key {}: {}", key, e);
            }
        }

        let loaded = async {
            let access_token = self.store.get(&self.keys.access_token()).await?;
            let refresh_token = self.store.get(&self.keys.refresh_token()).await?;
            Ok::<_, crate::error::AppError>(SessionState {
                access_token,
                refresh_token,
            })
        }
        .await;

        let state = loaded.unwrap_or_else(|e| {
            self.sink.error(&format!("Failed to load tokens: {e}"));
            SessionState::default()
        });
        *self.write() = state.clone();
        state
    }

    /// Last cached user profile, `None` on any read or decode failure
    pub async fn stored_user(&self) -> Option<User> {
        let raw = self.store.get(&self.keys.user()).await.ok()??;
        serde_json::from_str(&raw).ok()
    }

    /// Writes only the cached user, leaving the tokens untouched
    pub async fn store_user(&self, user: &User) {
        match serde_json::to_string(user) {
            Ok(json) => self.persist(&self.keys.user(), &json).await,
            Err(e) => self.sink.error(&format!("Failed to encode user: {e}")),
        }
    }

    async fn persist(&self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value).await {
            self.sink.error(&format!("Failed to persist {key}: {e}"));
        }
    }

    async fn forget(&self, key: &str) {
        if let Err(e) = self.store.remove(key).await {
            self.sink
                .error(&format!("Failed to remove persisted {key}: {e}"));
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
