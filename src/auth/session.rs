//! Session store: keeps the token issued at login and moves the client to the
//! application root once it is stored.
//!
//! Storage is pluggable through [`TokenStorage`]. [`FileStorage`] keeps a
//! small JSON object on disk so the token survives restarts; it is created
//! with owner-only permissions on Unix. The token itself is never logged.

use super::types::SessionToken;
use serde_json::{Map, Value};
use std::{
    collections::HashMap,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

/// Storage key holding the session token.
pub const TOKEN_KEY: &str = "token";
/// Where the client goes after a successful login.
pub const ROOT_PATH: &str = "/";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] io::Error),
    #[error("storage file is not a JSON object: {0}")]
    Format(#[from] serde_json::Error),
}

/// Persistent key-value storage for the client.
pub trait TokenStorage {
    /// # Errors
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    /// Returns an error if the backing store cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Client-side navigation.
pub trait Navigator {
    fn navigate(&mut self, path: &str);
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl TokenStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Map<String, Value>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(Map::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Map::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn store(&self, values: &Map<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        // Staged write: the rename swaps the file in one step.
        let staging = self.staging_path();
        let mut file = options.open(&staging)?;
        file.write_all(serde_json::to_string_pretty(values)?.as_bytes())?;
        file.sync_all()?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl TokenStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .load()?
            .get(key)
            .and_then(Value::as_str)
            .map(ToString::to_string))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = match self.load() {
            Ok(values) => values,
            Err(StorageError::Format(err)) => {
                warn!(path = %self.path.display(), error = %err, "discarding unreadable storage file");
                Map::new()
            }
            Err(err) => return Err(err),
        };
        values.insert(key.to_string(), Value::String(value.to_string()));
        self.store(&values)
    }
}

/// Navigator that records where the client has been sent.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl Navigator for History {
    fn navigate(&mut self, path: &str) {
        debug!(path, "navigating");
        self.entries.push(path.to_string());
    }
}

#[derive(Debug)]
pub struct SessionStore<S, N> {
    storage: S,
    navigator: N,
}

impl<S: TokenStorage, N: Navigator> SessionStore<S, N> {
    pub fn new(storage: S, navigator: N) -> Self {
        Self { storage, navigator }
    }

    /// Stores the token under [`TOKEN_KEY`] and navigates to [`ROOT_PATH`].
    /// A storage failure is logged and navigation still happens.
    #[instrument(skip_all)]
    pub fn establish_session(&mut self, token: &SessionToken) {
        match self.storage.set(TOKEN_KEY, token.expose()) {
            Ok(()) => info!("session token stored"),
            Err(err) => error!(error = %err, "failed to store session token"),
        }
        self.navigator.navigate(ROOT_PATH);
    }

    /// Token from a previous login, if any.
    pub fn token(&self) -> Option<SessionToken> {
        match self.storage.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()).map(SessionToken::new),
            Err(err) => {
                error!(error = %err, "failed to read session token");
                None
            }
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ulid::Ulid;

    struct BrokenStorage;

    impl TokenStorage for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied").into())
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied").into())
        }
    }

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("libris-test-{}", Ulid::new()))
            .join("session.json")
    }

    #[test]
    fn establish_session_stores_token_and_navigates_home() {
        let mut store = SessionStore::new(MemoryStorage::default(), History::default());

        store.establish_session(&SessionToken::new("tok"));

        assert_eq!(
            store.storage().get(TOKEN_KEY).ok().flatten().as_deref(),
            Some("tok")
        );
        assert_eq!(store.token(), Some(SessionToken::new("tok")));
        assert_eq!(store.navigator().current(), Some(ROOT_PATH));
    }

    #[test]
    fn establish_session_replaces_previous_token() {
        let mut store = SessionStore::new(MemoryStorage::default(), History::default());

        store.establish_session(&SessionToken::new("first"));
        store.establish_session(&SessionToken::new("second"));

        assert_eq!(store.token(), Some(SessionToken::new("second")));
        assert_eq!(store.navigator().entries().len(), 2);
    }

    #[test]
    fn storage_failure_still_navigates() {
        let mut store = SessionStore::new(BrokenStorage, History::default());

        store.establish_session(&SessionToken::new("tok"));

        assert_eq!(store.token(), None);
        assert_eq!(store.navigator().current(), Some(ROOT_PATH));
    }

    #[test]
    fn file_storage_survives_reopen() -> Result<(), StorageError> {
        let path = temp_path();

        let mut store = SessionStore::new(FileStorage::new(&path), History::default());
        assert_eq!(store.token(), None);
        store.establish_session(&SessionToken::new("persisted"));

        let reopened = SessionStore::new(FileStorage::new(&path), History::default());
        assert_eq!(reopened.token(), Some(SessionToken::new("persisted")));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path)?.permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }

        if let Some(dir) = path.parent() {
            fs::remove_dir_all(dir)?;
        }
        Ok(())
    }

    #[test]
    fn file_storage_keeps_unrelated_keys() -> Result<(), StorageError> {
        let path = temp_path();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, r#"{"theme": "dark"}"#)?;

        let mut storage = FileStorage::new(&path);
        storage.set(TOKEN_KEY, "tok")?;

        assert_eq!(storage.get("theme")?.as_deref(), Some("dark"));
        assert_eq!(storage.get(TOKEN_KEY)?.as_deref(), Some("tok"));

        if let Some(dir) = path.parent() {
            fs::remove_dir_all(dir)?;
        }
        Ok(())
    }

    #[test]
    fn file_storage_rejects_corrupt_file() -> Result<(), StorageError> {
        let path = temp_path();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, "not json")?;

        let storage = FileStorage::new(&path);
        assert!(matches!(storage.get(TOKEN_KEY), Err(StorageError::Format(_))));

        if let Some(dir) = path.parent() {
            fs::remove_dir_all(dir)?;
        }
        Ok(())
    }

    #[test]
    fn corrupt_file_is_replaced_on_next_login() -> Result<(), StorageError> {
        let path = temp_path();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, r#"{"token": "ol"#)?;

        let mut store = SessionStore::new(FileStorage::new(&path), History::default());
        assert_eq!(store.token(), None);
        store.establish_session(&SessionToken::new("fresh"));

        assert_eq!(store.token(), Some(SessionToken::new("fresh")));
        assert!(!store.storage().staging_path().exists());
        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get(TOKEN_KEY)?.as_deref(), Some("fresh"));

        if let Some(dir) = path.parent() {
            fs::remove_dir_all(dir)?;
        }
        Ok(())
    }
}
