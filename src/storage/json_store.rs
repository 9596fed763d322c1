//! Flat-file JSON record store
//!
//! Each store owns a single JSON file holding the full record collection
//! as a plain array. Every mutation is load, transform in memory, save.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::error::{BookshelfError, Result};

/// A durable collection of records backed by one JSON file
pub struct JsonStore<T> {
    path: PathBuf,
    /// Serializes load-modify-save cycles so concurrent mutations
    /// cannot clobber each other's writes
    write_lock: Mutex<()>,
    _marker: std::marker::PhantomData<T>,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Create a store bound to the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
            _marker: std::marker::PhantomData,
        }
    }

    /// File path backing this store
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full collection.
    ///
    /// A missing or unparseable file yields an empty collection: first run
    /// and a deleted store file are not error conditions.
    pub async fn load(&self) -> Vec<T> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(records) => records,
                Err(e) => {
                    log::warn!(
                        "Store file {} is not parseable, treating as empty: {}",
                        self.path.display(),
                        e
                    );
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        }
    }

    /// Persist the full collection, replacing the file contents.
    ///
    /// Writes go to a sibling temp file which is renamed over the target,
    /// so a partial write never leaves a truncated file visible.
    pub async fn save(&self, records: &[T]) -> Result<()> {
        let json = serde_json::to_vec_pretty(records)
            .map_err(|e| BookshelfError::StorageError(format!("Serialization failed: {}", e)))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    BookshelfError::StorageError(format!(
                        "Failed to create {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, &json).await.map_err(|e| {
            BookshelfError::StorageError(format!("Failed to write {}: {}", tmp_path.display(), e))
        })?;
        tokio::fs::rename(&tmp_path, &self.path).await.map_err(|e| {
            BookshelfError::StorageError(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Run a load-transform-save cycle under the store's write lock.
    ///
    /// The transform returns the new collection to persist plus a value
    /// handed back to the caller, or an error to abort without saving.
    pub async fn mutate<F, R>(&self, transform: F) -> Result<R>
    where
        F: FnOnce(Vec<T>) -> Result<(Vec<T>, R)>,
    {
        let _guard = self.write_lock.lock().await;
        let records = self.load().await;
        let (updated, value) = transform(records)?;
        self.save(&updated).await?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Entry {
        id: String,
        label: String,
    }

    fn sample() -> Vec<Entry> {
        vec![
            Entry {
                id: "1".to_string(),
                label: "first".to_string(),
            },
            Entry {
                id: "2".to_string(),
                label: "second".to_string(),
            },
        ]
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store: JsonStore<Entry> = JsonStore::new(dir.path().join("entries.json"));

        let entries = sample();
        store.save(&entries).await.unwrap();

        // Order-preserving round trip
        assert_eq!(store.load().await, entries);
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store: JsonStore<Entry> = JsonStore::new(dir.path().join("nothing.json"));

        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.json");
        std::fs::write(&path, b"{not json at all").unwrap();

        let store: JsonStore<Entry> = JsonStore::new(path);
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store: JsonStore<Entry> = JsonStore::new(dir.path().join("entries.json"));

        store.save(&sample()).await.unwrap();
        let shorter = vec![Entry {
            id: "3".to_string(),
            label: "only".to_string(),
        }];
        store.save(&shorter).await.unwrap();

        assert_eq!(store.load().await, shorter);
    }

    #[tokio::test]
    async fn test_mutate_appends_under_lock() {
        let dir = tempfile::tempdir().unwrap();
        let store: JsonStore<Entry> = JsonStore::new(dir.path().join("entries.json"));

        let added = store
            .mutate(|mut entries| {
                let entry = Entry {
                    id: "9".to_string(),
                    label: "appended".to_string(),
                };
                entries.push(entry.clone());
                Ok((entries, entry))
            })
            .await
            .unwrap();

        assert_eq!(added.id, "9");
        assert_eq!(store.load().await.len(), 1);
    }

    #[tokio::test]
    async fn test_mutate_error_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let store: JsonStore<Entry> = JsonStore::new(dir.path().join("entries.json"));
        store.save(&sample()).await.unwrap();

        let result: Result<()> = store
            .mutate(|_| Err(crate::error::BookshelfError::NotFound))
            .await;
        assert!(result.is_err());
        assert_eq!(store.load().await, sample());
    }
}
