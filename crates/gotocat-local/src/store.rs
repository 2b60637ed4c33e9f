//! Key/value stores for the persisted redirect flags.

use gotocat_core::{Error, KvStore, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Process-local store. State dies with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: Mutex<BTreeMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, Value>> {
        // A poisoned map is still a valid map.
        self.map.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait::async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.lock().get(key).cloned())
    }

    async fn set_many(&self, entries: &[(String, Value)]) -> Result<()> {
        let mut map = self.lock();
        for (k, v) in entries {
            map.insert(k.clone(), v.clone());
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.lock().remove(key);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        Ok(self.lock().keys().cloned().collect())
    }
}

/// Single JSON object file. Every write replaces the file atomically, so the entries of one
/// `set_many` call land together or not at all.
#[derive(Debug, Clone)]
pub struct FsStore {
    path: PathBuf,
}

impl FsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `<data dir>/gotocat/state.json`, falling back to the temp dir.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("gotocat")
            .join("state.json")
    }

    fn read_map(path: &Path) -> Result<BTreeMap<String, Value>> {
        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(Error::Store(format!("read {}: {e}", path.display()))),
        };
        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(BTreeMap::new());
        }
        serde_json::from_slice(&bytes)
            .map_err(|e| Error::Store(format!("parse {}: {e}", path.display())))
    }

    fn write_map(path: &Path, map: &BTreeMap<String, Value>) -> Result<()> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)
            .map_err(|e| Error::Store(format!("create {}: {e}", dir.display())))?;
        let bytes = serde_json::to_vec_pretty(map).map_err(|e| Error::Store(e.to_string()))?;
        let mut tmp =
            tempfile::NamedTempFile::new_in(&dir).map_err(|e| Error::Store(e.to_string()))?;
        tmp.write_all(&bytes)
            .map_err(|e| Error::Store(e.to_string()))?;
        tmp.persist(path)
            .map_err(|e| Error::Store(format!("persist {}: {e}", path.display())))?;
        Ok(())
    }

    async fn blocking<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Path) -> Result<T> + Send + 'static,
    {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || f(&path))
            .await
            .map_err(|e| Error::Store(format!("store join failed: {e}")))?
    }
}

#[async_trait::async_trait]
impl KvStore for FsStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let key = key.to_string();
        self.blocking(move |p| Ok(Self::read_map(p)?.remove(&key)))
            .await
    }

    async fn set_many(&self, entries: &[(String, Value)]) -> Result<()> {
        let entries = entries.to_vec();
        self.blocking(move |p| {
            let mut map = Self::read_map(p)?;
            map.extend(entries);
            Self::write_map(p, &map)
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let key = key.to_string();
        self.blocking(move |p| {
            let mut map = Self::read_map(p)?;
            if map.remove(&key).is_some() {
                Self::write_map(p, &map)?;
            }
            Ok(())
        })
        .await
    }

    async fn keys(&self) -> Result<Vec<String>> {
        self.blocking(|p| Ok(Self::read_map(p)?.into_keys().collect()))
            .await
    }
}
