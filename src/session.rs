//! Authenticated session context.
//!
//! The one durable blob the console keeps: `{data_dir}/session.json` holding
//! the bearer token and the user it belongs to. Written on successful OTP
//! verification, removed on logout. Everything else reads the session through
//! [`SessionStore`] — populated on verify, cleared on logout, read-only
//! elsewhere.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, warn};

/// Role attached to the authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRole {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// The user identity returned by OTP verification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub phone_number: String,
    pub role: UserRole,
}

/// Token + user pair, exactly the shape persisted to disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_token: String,
    pub user: AuthUser,
}

/// In-memory session slot backed by `{data_dir}/session.json`.
///
/// Read-mostly: list/show commands only call [`SessionStore::token`]; writes
/// happen on login and logout.
pub struct SessionStore {
    path: PathBuf,
    current: RwLock<Option<Session>>,
}

impl SessionStore {
    /// Create a store rooted at `data_dir` and load any persisted session.
    ///
    /// A missing file means logged out; an unreadable or corrupt file is
    /// treated the same way with a warning, never an abort.
    pub fn open(data_dir: &Path) -> Self {
        let path = data_dir.join("session.json");
        let current = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => {
                    debug!(user = %session.user.phone_number, "restored session");
                    Some(session)
                }
                Err(e) => {
                    warn!(path = %path.display(), err = %e, "corrupt session file — ignoring");
                    None
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %path.display(), err = %e, "could not read session file");
                None
            }
        };
        Self {
            path,
            current: RwLock::new(current),
        }
    }

    /// Store a session in memory and persist it to disk (mode 0600 on Unix).
    pub fn store(&self, session: Session) -> std::io::Result<()> {
        {
            let mut slot = self.current.write().expect("session lock poisoned");
            *slot = Some(session.clone());
        }

        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(&session)?;
        std::fs::write(&self.path, json)?;

        // The token is a live credential — keep it owner-readable only.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    /// Forget the session in memory and remove the file.
    pub fn clear(&self) -> std::io::Result<()> {
        {
            let mut slot = self.current.write().expect("session lock poisoned");
            *slot = None;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Snapshot of the current session, if authenticated.
    pub fn current(&self) -> Option<Session> {
        self.current.read().expect("session lock poisoned").clone()
    }

    /// The bearer token, if authenticated.
    pub fn token(&self) -> Option<String> {
        self.current
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.read().expect("session lock poisoned").is_some()
    }
}
