use crate::error::AppError;
use crate::storage::kv::KeyValueStore;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

const DATA_DIR_NAME: &str = "dale";
const FILE_NAME: &str = "session.json";

/// Store persisting every key in a single JSON object file
///
/// Each operation reads the file, applies the change and rewrites it through a
/// temporary sibling, under a lock local to this instance. A file that is not
/// valid JSON fails reads and is replaced by the next write.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// Opens (lazily) the store at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Default location under the platform data directory
    ///
    /// # Returns
    /// * `Ok(PathBuf)` - e.g. `~/.local/share/dale/session.json`
    /// * `Err(AppError)` - If the platform exposes no data directory
    pub fn default_location() -> Result<PathBuf, AppError> {
        dirs::data_dir()
            .map(|dir| dir.join(DATA_DIR_NAME).join(FILE_NAME))
            .ok_or_else(|| AppError::Storage("no platform data directory".to_string()))
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>, AppError> {
        match fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Entries to rewrite; an unreadable file is replaced rather than kept
    async fn read_for_write(&self) -> Result<BTreeMap<String, String>, AppError> {
        match self.read_all().await {
            Err(AppError::Json(e)) => {
                warn!("Overwriting unreadable {}: {}", self.path.display(), e);
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    async fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(entries)?).await?;
        fs::rename(&tmp, &self.path).await?;
        debug!("Wrote {} keys to {}", entries.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_all().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_for_write().await?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        let _guard = self.lock.lock().await;
        match self.read_all().await {
            Ok(mut entries) => {
                if entries.remove(key).is_some() {
                    self.write_all(&entries).await?;
                }
                Ok(())
            }
            Err(AppError::Json(e)) => {
                warn!("Overwriting unreadable {}: {}", self.path.display(), e);
                self.write_all(&BTreeMap::new()).await
            }
            Err(e) => Err(e),
        }
    }
}
