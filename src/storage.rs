use crate::errors::StorageError;
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use tokio::fs;
use tokio::sync::Mutex as WriteLock;
use tracing::{error, warn};

pub const USERS_KEY: &str = "users";
pub const CURRENT_USER_KEY: &str = "currentUser";
pub const DIARY_KEY: &str = "diaryEntriesV2";
pub const JOURNAL_KEY: &str = "journalEntries";
pub const CHAT_KEY: &str = "chatHistory";
pub const QUIZ_RESULTS_KEY: &str = "moodQuizResults";

/// String-keyed, string-valued persistence in the shape of browser local storage.
///
/// Every collection is written back whole on each mutation, so implementations only need
/// whole-value get/set/remove. Reads are served from memory; writes may touch disk.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

pub type SharedStore = Arc<dyn KeyValueStore>;

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedStore {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        lock(&self.entries).insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        lock(&self.entries).remove(key);
        Ok(())
    }
}

/// Keeps every key in memory and rewrites the backing JSON file after each change.
///
/// A change only becomes visible in memory once the file write succeeded. Writers are
/// serialised.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
    writer: WriteLock<()>,
}

impl JsonFileStore {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let entries = load_entries(&path).await;
        Ok(Self {
            path,
            entries: Mutex::new(entries),
            writer: WriteLock::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn commit<F>(&self, change: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool + Send,
    {
        let _writer = self.writer.lock().await;
        let mut next = lock(&self.entries).clone();
        if !change(&mut next) {
            return Ok(());
        }

        let payload = serde_json::to_vec_pretty(&next)?;
        fs::write(&self.path, payload).await?;
        *lock(&self.entries) = next;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.commit(|entries| {
            entries.insert(key.to_string(), value);
            true
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.commit(|entries| entries.remove(key).is_some()).await
    }
}

async fn load_entries(path: &Path) -> BTreeMap<String, String> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(err) => {
                error!("failed to parse data file: {err}");
                BTreeMap::new()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
        Err(err) => {
            error!("failed to read data file: {err}");
            BTreeMap::new()
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Reads a JSON-encoded value, treating an absent or unreadable value as the default.
pub fn load_json<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let Some(raw) = store.get(key) else {
        return T::default();
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(key, "ignoring unparsable stored value: {err}");
            T::default()
        }
    }
}

pub async fn save_json<T>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
{
    let payload = serde_json::to_string(value)?;
    store.set(key, payload).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("wellness_store_{name}_{}_{nanos}.json", std::process::id()));
        path
    }

    #[tokio::test]
    async fn memory_store_get_set_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k"), None);
        store.set("k", "v".to_string()).await.unwrap();
        assert_eq!(store.get("k").as_deref(), Some("v"));
        store.remove("k").await.unwrap();
        store.remove("k").await.unwrap();
        assert_eq!(store.get("k"), None);
    }

    #[tokio::test]
    async fn load_json_falls_back_to_default_on_garbage() {
        let store = MemoryStore::new();
        store.set(USERS_KEY, "{not json".to_string()).await.unwrap();
        let users: Vec<String> = load_json(&store, USERS_KEY);
        assert!(users.is_empty());
    }

    #[tokio::test]
    async fn file_store_survives_reopen() {
        let path = temp_path("reopen");
        {
            let store = JsonFileStore::open(&path).await.unwrap();
            save_json(&store, DIARY_KEY, &vec!["a", "b"]).await.unwrap();
            store
                .set(CURRENT_USER_KEY, "me@example.com".to_string())
                .await
                .unwrap();
        }

        let reopened = JsonFileStore::open(&path).await.unwrap();
        let values: Vec<String> = load_json(&reopened, DIARY_KEY);
        assert_eq!(values, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(
            reopened.get(CURRENT_USER_KEY).as_deref(),
            Some("me@example.com")
        );
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn file_store_starts_empty_when_file_is_corrupt() {
        let path = temp_path("corrupt");
        std::fs::write(&path, b"[[[").unwrap();
        let store = JsonFileStore::open(&path).await.unwrap();
        assert_eq!(store.get(USERS_KEY), None);
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn failed_write_leaves_memory_untouched() {
        let path = temp_path("unwritable");
        let store = JsonFileStore::open(&path).await.unwrap();
        store.set("kept", "old".to_string()).await.unwrap();

        // A directory in place of the data file makes every write fail.
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        assert!(store.set("kept", "new".to_string()).await.is_err());
        assert!(store.set("added", "x".to_string()).await.is_err());
        assert!(store.remove("kept").await.is_err());
        assert_eq!(store.get("kept").as_deref(), Some("old"));
        assert_eq!(store.get("added"), None);

        std::fs::remove_dir(&path).unwrap();
        store.set("added", "x".to_string()).await.unwrap();
        let reopened = JsonFileStore::open(&path).await.unwrap();
        assert_eq!(reopened.get("kept").as_deref(), Some("old"));
        assert_eq!(reopened.get("added").as_deref(), Some("x"));
        let _ = std::fs::remove_file(&path);
    }
}
