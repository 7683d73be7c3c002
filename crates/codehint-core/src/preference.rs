//! The single persisted user preference: the selected provider.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// Key under which the selected provider is stored.
pub const SELECTED_PROVIDER_KEY: &str = "selectedProvider";

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt preference file {path}: {message}")]
    Corrupt { path: String, message: String },
}

/// Storage for the selected provider.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// The saved provider name, if any.
    async fn load_provider(&self) -> Result<Option<String>, PreferenceError>;

    async fn save_provider(&self, provider: &str) -> Result<(), PreferenceError>;
}

/// JSON object file, e.g. `~/.codehint/preferences.json`.
///
/// Keys other than [`SELECTED_PROVIDER_KEY`] are preserved on save.
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_object(&self) -> Result<Map<String, Value>, PreferenceError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(self.corrupt("expected a JSON object")),
            Err(e) => Err(self.corrupt(e.to_string())),
        }
    }

    fn corrupt(&self, message: impl Into<String>) -> PreferenceError {
        PreferenceError::Corrupt {
            path: self.path.display().to_string(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl PreferenceStore for FilePreferenceStore {
    async fn load_provider(&self) -> Result<Option<String>, PreferenceError> {
        let map = self.read_object().await?;
        Ok(map
            .get(SELECTED_PROVIDER_KEY)
            .and_then(Value::as_str)
            .map(String::from))
    }

    async fn save_provider(&self, provider: &str) -> Result<(), PreferenceError> {
        let mut map = self.read_object().await?;
        map.insert(
            SELECTED_PROVIDER_KEY.to_string(),
            Value::String(provider.to_string()),
        );

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(&Value::Object(map))
            .map_err(|e| self.corrupt(e.to_string()))?;
        tokio::fs::write(&self.path, content).await?;

        debug!("Saved provider preference to {}", self.path.display());
        Ok(())
    }
}

/// In-process store.
#[derive(Default)]
pub struct MemoryPreferenceStore {
    provider: Mutex<Option<String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provider(provider: impl Into<String>) -> Self {
        Self {
            provider: Mutex::new(Some(provider.into())),
        }
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn load_provider(&self) -> Result<Option<String>, PreferenceError> {
        Ok(self.provider.lock().clone())
    }

    async fn save_provider(&self, provider: &str) -> Result<(), PreferenceError> {
        *self.provider.lock() = Some(provider.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_store_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = FilePreferenceStore::new(dir.path().join("preferences.json"));
        assert_eq!(store.load_provider().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_roundtrip_creates_parent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("preferences.json");
        let store = FilePreferenceStore::new(&path);

        store.save_provider("anthropic").await.unwrap();
        assert!(path.exists());
        assert_eq!(store.load_provider().await.unwrap().as_deref(), Some("anthropic"));

        let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["selectedProvider"], "anthropic");
    }

    #[tokio::test]
    async fn test_file_store_preserves_other_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, r#"{"theme": "dark", "selectedProvider": "openai"}"#).unwrap();

        let store = FilePreferenceStore::new(&path);
        store.save_provider("gemini").await.unwrap();

        let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
        assert_eq!(raw["selectedProvider"], "gemini");
    }

    #[tokio::test]
    async fn test_file_store_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "").unwrap();

        let store = FilePreferenceStore::new(&path);
        assert_eq!(store.load_provider().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FilePreferenceStore::new(&path);
        let err = store.load_provider().await.unwrap_err();
        assert!(matches!(err, PreferenceError::Corrupt { .. }));
    }

    #[tokio::test]
    async fn test_file_store_non_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, r#"["openai"]"#).unwrap();

        let store = FilePreferenceStore::new(&path);
        assert!(store.load_provider().await.is_err());
    }

    #[tokio::test]
    async fn test_file_store_non_string_value() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, r#"{"selectedProvider": 3}"#).unwrap();

        let store = FilePreferenceStore::new(&path);
        assert_eq!(store.load_provider().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryPreferenceStore::new();
        assert_eq!(store.load_provider().await.unwrap(), None);
        store.save_provider("openai").await.unwrap();
        assert_eq!(store.load_provider().await.unwrap().as_deref(), Some("openai"));

        let store = MemoryPreferenceStore::with_provider("gemini");
        assert_eq!(store.load_provider().await.unwrap().as_deref(), Some("gemini"));
    }
}
