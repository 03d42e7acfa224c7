use dashmap::DashMap;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::types::{Role, Session};

/// Key under which the bearer token is persisted.
pub const TOKEN_KEY: &str = "token";
/// Key under which the coarse role is persisted.
pub const ROLE_KEY: &str = "role";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// CredentialStore
// ---------------------------------------------------------------------------

/// String key/value storage for client credentials.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), SessionStoreError>;
    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), SessionStoreError>;
}

/// File-system-backed credential storage.
///
/// All keys live in a single JSON object file. A missing file reads as an
/// empty store.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, SessionStoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let data = std::fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&data)?)
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), SessionStoreError> {
        if entries.is_empty() {
            if self.path.exists() {
                std::fs::remove_file(&self.path)?;
            }
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        let mut file = open_private(&self.path)?;
        std::io::Write::write_all(&mut file, json.as_bytes())?;
        Ok(())
    }
}

/// Open `path` for writing, creating it owner-only (0600) from the start.
/// A pre-existing file is tightened to 0600 before it is truncated.
#[cfg(unix)]
fn open_private(path: &std::path::Path) -> std::io::Result<std::fs::File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
    let file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    file.set_len(0)?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &std::path::Path) -> std::io::Result<std::fs::File> {
    std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), SessionStoreError> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

/// In-process credential storage, used by tests and embedders that do not
/// want anything written to disk.
#[derive(Default)]
pub struct MemoryCredentialStore {
    entries: DashMap<String, String>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionStoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SessionStore
// ---------------------------------------------------------------------------

/// Typed view over a [`CredentialStore`] holding the `token` and `role` keys.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn CredentialStore>,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn CredentialStore>) -> Self {
        Self { backend }
    }

    /// Store backed by a JSON file at `path`.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileCredentialStore::new(path)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryCredentialStore::new()))
    }

    /// Default session file (`~/.config/zeaz-admin/session.json`).
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("zeaz-admin")
            .join("session.json")
    }

    /// The persisted bearer token, if any. Empty strings count as absent.
    pub fn token(&self) -> Result<Option<String>, SessionStoreError> {
        Ok(self.backend.get(TOKEN_KEY)?.filter(|t| !t.is_empty()))
    }

    /// The persisted role. A value that does not name a known role reads as
    /// absent.
    pub fn role(&self) -> Result<Option<Role>, SessionStoreError> {
        let raw = self.backend.get(ROLE_KEY)?;
        Ok(raw.and_then(|r| match r.parse::<Role>() {
            Ok(role) => Some(role),
            Err(err) => {
                tracing::warn!(%err, "ignoring unrecognised persisted role");
                None
            }
        }))
    }

    /// Load the full session. Returns `None` when no token is held; a token
    /// without a readable role is paired with [`Role::User`].
    pub fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        let Some(token) = self.token()? else {
            return Ok(None);
        };
        let role = self.role()?.unwrap_or_default();
        Ok(Some(Session { token, role }))
    }

    pub fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        self.backend.set(TOKEN_KEY, &session.token)?;
        self.backend.set(ROLE_KEY, session.role.as_str())?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), SessionStoreError> {
        self.backend.remove(TOKEN_KEY)?;
        self.backend.remove(ROLE_KEY)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
