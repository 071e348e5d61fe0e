//! Session store: the single authority for the client's auth state

use crate::auth::clock::{Clock, SystemClock};
use crate::auth::models::{Role, UserInfo};
use crate::auth::storage::{FileStorage, MemoryStorage, Storage};
use crate::auth::token::{self, TokenStatus};
use crate::error::Result;
use std::path::PathBuf;
use std::sync::Arc;

pub const TOKEN_KEY: &str = "bookadmin_token";
pub const USER_INFO_KEY: &str = "bookadmin_user";

/// Persisted token and user info plus the queries derived from them.
///
/// Cheap to clone; clones share the same storage.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn Storage>,
    clock: Arc<dyn Clock>,
}

impl SessionStore {
    /// Build a store over existing storage and clock
    pub fn new(storage: Arc<dyn Storage>, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    /// Hydrate a store from the session file at `path`
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let storage = FileStorage::open(path)?;
        Ok(Self::new(Arc::new(storage), Arc::new(SystemClock)))
    }

    /// A store that forgets everything on exit
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()), Arc::new(SystemClock))
    }

    /// Persist token and user info together. No validation is done here.
    pub fn set_session(&self, token: &str, user_info: &UserInfo) -> Result<()> {
        let user_json = serde_json::to_string(user_info)?;
        self.storage
            .set_many(&[(TOKEN_KEY, token), (USER_INFO_KEY, &user_json)])?;
        tracing::debug!("Session stored for role {}", user_info.role);
        Ok(())
    }

    /// Raw stored token
    pub fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY)
    }

    /// Stored user info; anything unparsable counts as absent
    pub fn user_info(&self) -> Option<UserInfo> {
        let raw = self.storage.get(USER_INFO_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(info) => Some(info),
            Err(e) => {
                tracing::debug!("Stored user info is unreadable: {}", e);
                None
            }
        }
    }

    /// Remove token and user info. Clearing an empty session is a no-op.
    pub fn clear_session(&self) -> Result<()> {
        self.storage.remove_many(&[TOKEN_KEY, USER_INFO_KEY])
    }

    /// Whether a usable token is stored.
    ///
    /// Not a pure query: a malformed or expired token clears the whole
    /// session before `false` is returned.
    pub fn is_logged_in(&self) -> bool {
        let token = match self.token() {
            Some(t) if !t.is_empty() => t,
            _ => return false,
        };

        match token::inspect(&token, self.clock.now_millis()) {
            TokenStatus::Valid(_) => true,
            TokenStatus::Malformed(reason) => {
                tracing::info!("Discarding stored token: {}", reason);
                self.evict();
                false
            }
            TokenStatus::Expired { exp } => {
                tracing::info!("Discarding stored token: expired at {}", exp);
                self.evict();
                false
            }
        }
    }

    /// Exact role equality. Unrecognised role strings all parse to
    /// `Role::Unknown`, so asking for `Unknown` never matches.
    pub fn has_role(&self, role: Role) -> bool {
        role != Role::Unknown && self.user_info().is_some_and(|u| u.role == role)
    }

    /// Admin or librarian
    pub fn has_elevated_role(&self) -> bool {
        self.user_info().is_some_and(|u| u.role.is_elevated())
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    fn evict(&self) {
        if let Err(e) = self.clear_session() {
            tracing::warn!("Failed to clear session: {}", e);
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("has_token", &self.token().is_some())
            .finish()
    }
}
