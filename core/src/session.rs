//! Session persistence and bearer-token lookup.
//!
//! # Design
//! The session blob is written by whoever performs login (usually through
//! `TokenProvider::store_session`) and read back on every request. Reading
//! never fails: a missing, corrupted or token-less blob means "logged out",
//! so a bad session can't block unauthenticated calls such as tracking.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use crate::types::Session;

/// Storage key under which the serialized session lives.
pub const SESSION_KEY: &str = "fleet_user";

/// Persistent string key-value storage.
pub trait SessionStore: Send + Sync {
    /// Storage errors read as absence.
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> io::Result<()>;
    fn remove(&self, key: &str) -> io::Result<()>;
}

/// Process-local store, mostly useful for tests and short-lived tools.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

/// One file per key, `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// Reads the bearer token out of the persisted session.
#[derive(Clone)]
pub struct TokenProvider {
    store: Arc<dyn SessionStore>,
}

impl TokenProvider {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// The current token, or `None` when logged out or the blob is unusable.
    /// No expiry check: a stale token is sent as-is.
    pub fn token(&self) -> Option<String> {
        let raw = self.store.get(SESSION_KEY)?;
        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(value) => value
                .get("token")
                .and_then(|t| t.as_str())
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            Err(e) => {
                tracing::warn!(key = SESSION_KEY, error = %e, "ignoring corrupted session blob");
                None
            }
        }
    }

    /// Persist a login/register result in the shape `token` reads back.
    pub fn store_session(&self, session: &Session) -> io::Result<()> {
        let raw = serde_json::to_string(session)?;
        self.store.set(SESSION_KEY, &raw)
    }

    pub fn clear(&self) -> io::Result<()> {
        self.store.remove(SESSION_KEY)
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    fn provider_with(raw: Option<&str>) -> TokenProvider {
        let store = MemoryStore::new();
        if let Some(raw) = raw {
            store.set(SESSION_KEY, raw).unwrap();
        }
        TokenProvider::new(Arc::new(store))
    }

    #[test]
    fn no_blob_means_no_token() {
        assert_eq!(provider_with(None).token(), None);
    }

    #[test]
    fn token_is_extracted_from_session_blob() {
        let provider = provider_with(Some(
            r#"{"id":1,"email":"a@b.c","name":"A","role":"ADMIN","token":"tok-123"}"#,
        ));
        assert_eq!(provider.token().as_deref(), Some("tok-123"));
    }

    #[test]
    fn corrupted_blob_is_treated_as_logged_out() {
        assert_eq!(provider_with(Some("{not json")).token(), None);
    }

    #[test]
    fn blob_without_string_token_yields_none() {
        assert_eq!(provider_with(Some(r#"{"id":1}"#)).token(), None);
        assert_eq!(provider_with(Some(r#"{"token":42}"#)).token(), None);
        assert_eq!(provider_with(Some(r#""just a string""#)).token(), None);
    }

    #[test]
    fn empty_token_is_no_token() {
        assert_eq!(provider_with(Some(r#"{"id":1,"token":""}"#)).token(), None);
    }

    #[test]
    fn store_session_then_clear() {
        let provider = provider_with(None);
        let session = Session {
            id: 5,
            email: "driver@fleet.io".to_string(),
            name: "Driver".to_string(),
            role: Role::Driver,
            token: "abc".to_string(),
        };
        provider.store_session(&session).unwrap();
        assert_eq!(provider.token().as_deref(), Some("abc"));

        provider.clear().unwrap();
        assert_eq!(provider.token(), None);
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("session"));
        assert_eq!(store.dir(), dir.path().join("session"));
        assert_eq!(store.get(SESSION_KEY), None);

        store.set(SESSION_KEY, r#"{"token":"t"}"#).unwrap();
        assert_eq!(store.get(SESSION_KEY).as_deref(), Some(r#"{"token":"t"}"#));

        store.remove(SESSION_KEY).unwrap();
        assert_eq!(store.get(SESSION_KEY), None);
        // Removing a missing key is fine.
        store.remove(SESSION_KEY).unwrap();
    }
}
