//! A small file-backed key-value store.
//!
//! All keys live in one JSON object at `$BUDGET_HOME/storage.json`. Values are strings; callers
//! that store structured data serialize it to JSON first (see `get_json` and `set_json`).
//!
//! `Storage` is only a handle holding the file path. Every read goes to disk and every write is a
//! read-modify-write of the whole file, so several handles (for example one held by the
//! `AuthStore` and one by the `BudgetStore`) can share the same file without clobbering each
//! other's keys. Nothing is locked: two processes writing at the same time race, and the last
//! write wins.

use crate::{utils, Result};
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Key holding the opaque session token.
pub const AUTH_TOKEN: &str = "auth_token";

/// Key holding the JSON-serialized logged-in `User`.
pub const USER: &str = "user";

/// Key holding the JSON-serialized list of every `Transaction`.
pub const BUDGET_TRANSACTIONS: &str = "budget_transactions";

type Items = BTreeMap<String, String>;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    /// Creates a handle for the storage file at `path`. The file does not need to exist yet; a
    /// missing file reads as an empty store.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the value stored under `key`, if any.
    pub async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let mut items = self.read_all().await?;
        Ok(items.remove(key))
    }

    /// Stores `value` under `key`, overwriting any previous value.
    pub async fn set_item(&self, key: &str, value: impl Into<String>) -> Result<()> {
        let mut items = self.read_all().await?;
        items.insert(key.to_string(), value.into());
        trace!("Setting storage key '{key}'");
        self.write_all(&items).await
    }

    /// Removes `key`. Removing a key that does not exist is not an error.
    pub async fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.read_all().await?;
        if items.remove(key).is_some() {
            trace!("Removed storage key '{key}'");
            self.write_all(&items).await?;
        }
        Ok(())
    }

    /// Reads the value under `key` and parses it as JSON.
    pub async fn get_json<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self.get_item(key).await? {
            None => Ok(None),
            Some(value) => serde_json::from_str(&value)
                .map(Some)
                .with_context(|| format!("Unable to parse the stored value of '{key}'")),
        }
    }

    /// Serializes `value` to JSON and stores it under `key`.
    pub async fn set_json<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let json = serde_json::to_string(value)
            .with_context(|| format!("Unable to serialize the value for '{key}'"))?;
        self.set_item(key, json).await
    }

    async fn read_all(&self) -> Result<Items> {
        if !self.path.is_file() {
            return Ok(Items::new());
        }
        utils::deserialize(&self.path).await
    }

    async fn write_all(&self, items: &Items) -> Result<()> {
        let json = serde_json::to_string_pretty(items).context("Unable to serialize storage")?;
        utils::write_atomic(&self.path, json).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    fn storage(dir: &TempDir) -> Storage {
        Storage::new(dir.path().join("storage.json"))
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);
        assert_eq!(storage.get_item(AUTH_TOKEN).await.unwrap(), None);
        assert!(!storage.path().exists());
    }

    #[tokio::test]
    async fn test_set_get_remove() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);
        storage.set_item(AUTH_TOKEN, "abc").await.unwrap();
        assert_eq!(
            storage.get_item(AUTH_TOKEN).await.unwrap().as_deref(),
            Some("abc")
        );
        storage.set_item(AUTH_TOKEN, "def").await.unwrap();
        assert_eq!(
            storage.get_item(AUTH_TOKEN).await.unwrap().as_deref(),
            Some("def")
        );
        storage.remove_item(AUTH_TOKEN).await.unwrap();
        assert_eq!(storage.get_item(AUTH_TOKEN).await.unwrap(), None);

        // Removing again is a no-op.
        storage.remove_item(AUTH_TOKEN).await.unwrap();
    }

    #[tokio::test]
    async fn test_handles_share_the_file() {
        let dir = TempDir::new().unwrap();
        let a = storage(&dir);
        let b = storage(&dir);
        a.set_item(AUTH_TOKEN, "token").await.unwrap();
        b.set_item(BUDGET_TRANSACTIONS, "[]").await.unwrap();

        let reopened = storage(&dir);
        assert_eq!(
            reopened.get_item(AUTH_TOKEN).await.unwrap().as_deref(),
            Some("token")
        );
        assert_eq!(
            reopened
                .get_item(BUDGET_TRANSACTIONS)
                .await
                .unwrap()
                .as_deref(),
            Some("[]")
        );
    }

    #[tokio::test]
    async fn test_json_values() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Thing {
            name: String,
            count: u32,
        }

        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);
        let thing = Thing {
            name: "x".into(),
            count: 3,
        };
        storage.set_json(USER, &thing).await.unwrap();

        // The value itself is a JSON string inside the storage file.
        let raw = storage.get_item(USER).await.unwrap().unwrap();
        assert_eq!(raw, r#"{"name":"x","count":3}"#);

        let loaded: Option<Thing> = storage.get_json(USER).await.unwrap();
        assert_eq!(loaded, Some(thing));
    }

    #[tokio::test]
    async fn test_corrupt_value_is_an_error() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);
        storage.set_item(USER, "not json").await.unwrap();
        let result: Result<Option<serde_json::Value>> = storage.get_json(USER).await;
        assert!(result.is_err());
    }
}
