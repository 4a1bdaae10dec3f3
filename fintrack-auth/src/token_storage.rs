use crate::error::AuthError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::fs;

/// Storage key holding the session token.
pub const TOKEN_KEY: &str = "jwtToken";

const STORE_FILE: &str = "session.json";

/// Durable string key-value storage.
///
/// Every operation either completes or returns an error; callers await the
/// result before acting on it.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, AuthError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), AuthError>;

    async fn remove(&self, key: &str) -> Result<(), AuthError>;
}

/// Keeps all entries in one JSON object on disk, readable by the owner only.
pub struct FileStore {
    path: PathBuf,
    // serializes read-modify-write cycles within the process
    write_lock: tokio::sync::Mutex<()>,
}

impl FileStore {
    /// Store under the user cache directory (`~/.cache/fintrack` on Linux).
    pub fn new() -> Result<Self, AuthError> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| AuthError::Configuration("Could not find cache directory".to_string()))?
            .join("fintrack");
        Ok(Self::in_dir(cache_dir))
    }

    pub fn in_dir(dir: PathBuf) -> Self {
        Self {
            path: dir.join(STORE_FILE),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    async fn read_entries(&self) -> Result<HashMap<String, String>, AuthError> {
        match fs::read_to_string(&self.path).await {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(AuthError::TokenStorage(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    async fn write_entries(&self, entries: &HashMap<String, String>) -> Result<(), AuthError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).await.map_err(|e| {
                AuthError::TokenStorage(format!("Failed to create storage directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(entries)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .await
            .map_err(|e| AuthError::TokenStorage(format!("Failed to save token: {}", e)))?;

        // Set permissions to 0600 (read/write for owner only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))
                .await
                .map_err(|e| {
                    AuthError::TokenStorage(format!("Failed to set file permissions: {}", e))
                })?;
        }

        fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| AuthError::TokenStorage(format!("Failed to save token: {}", e)))?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AuthError> {
        Ok(self.read_entries().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AuthError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries().await?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries).await?;
        tracing::debug!(key, path = %self.path.display(), "Stored value");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), AuthError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries().await?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries).await?;
            tracing::debug!(key, path = %self.path.display(), "Removed value");
        }
        Ok(())
    }
}

/// Process-local store. Clones share the same entries, so a clone outlives
/// the manager that wrote to it the way a file would.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, AuthError> {
        self.entries
            .lock()
            .map_err(|_| AuthError::TokenStorage("memory store poisoned".to_string()))
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AuthError> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AuthError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), AuthError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_store_round_trips_across_instances() {
        let dir = tempfile::tempdir().unwrap();

        let store = FileStore::in_dir(dir.path().to_path_buf());
        assert_eq!(store.get(TOKEN_KEY).await.unwrap(), None);
        store.set(TOKEN_KEY, "jwt-1").await.unwrap();

        let reopened = FileStore::in_dir(dir.path().to_path_buf());
        assert_eq!(
            reopened.get(TOKEN_KEY).await.unwrap().as_deref(),
            Some("jwt-1")
        );

        reopened.remove(TOKEN_KEY).await.unwrap();
        assert_eq!(store.get(TOKEN_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn removing_a_missing_key_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::in_dir(dir.path().join("nested"));
        store.remove(TOKEN_KEY).await.unwrap();
        assert!(!dir.path().join("nested").join(STORE_FILE).exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::in_dir(dir.path().to_path_buf());
        store.set(TOKEN_KEY, "jwt").await.unwrap();

        let mode = std::fs::metadata(dir.path().join(STORE_FILE))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[tokio::test]
    async fn unreadable_store_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(STORE_FILE)).unwrap();

        let store = FileStore::in_dir(dir.path().to_path_buf());
        let err = store.get(TOKEN_KEY).await.unwrap_err();
        assert!(matches!(err, AuthError::TokenStorage(_)), "{:?}", err);
    }

    #[tokio::test]
    async fn memory_store_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("k", "v").await.unwrap();
        assert_eq!(other.get("k").await.unwrap().as_deref(), Some("v"));
        other.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }
}
