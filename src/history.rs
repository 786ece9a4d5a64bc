use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::{PromptLensError, Result};
use crate::records::OptimizationRecord;

pub const HISTORY_KEY: &str = "promptlens.history";
pub const USAGE_KEY: &str = "promptlens.usage";
pub const DEFAULT_HISTORY_CAPACITY: usize = 5;

/// String key-value persistence owned by the caller.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: String) -> Result<()>;
}

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.entries.lock().await.insert(key.to_string(), value);
        Ok(())
    }
}

/// Single JSON object file holding every key.
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PromptLensError::Store("Could not find home directory".to_string()))?;
        Ok(home.join(".promptlens").join("store.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Map<String, Value>> {
        if !fs::try_exists(&self.path).await? {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(PromptLensError::Store(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
        }
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        let entries = self.read_all().await?;
        Ok(entries.get(key).and_then(|v| v.as_str()).map(str::to_string))
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_all().await?;
        entries.insert(key.to_string(), Value::String(value));

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(&Value::Object(entries))?;
        fs::write(&self.path, content).await?;
        debug!(key, path = %self.path.display(), "store updated");
        Ok(())
    }
}

/// Newest-first optimization history with a running usage counter.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    records: Vec<OptimizationRecord>,
    usage_count: u64,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: Vec::new(),
            usage_count: 0,
            capacity: capacity.max(1),
        }
    }

    /// Loads history and usage; unreadable values start fresh.
    pub async fn load(store: &dyn KeyValueStore, capacity: usize) -> Result<Self> {
        let mut history = Self::new(capacity);

        if let Some(raw) = store.get(HISTORY_KEY).await? {
            match serde_json::from_str::<Vec<OptimizationRecord>>(&raw) {
                Ok(mut records) => {
                    records.truncate(history.capacity);
                    history.records = records;
                }
                Err(e) => warn!("Ignoring unreadable history: {}", e),
            }
        }

        if let Some(raw) = store.get(USAGE_KEY).await? {
            match raw.trim().parse::<u64>() {
                Ok(count) => history.usage_count = count,
                Err(e) => warn!("Ignoring unreadable usage counter {:?}: {}", raw, e),
            }
        }

        Ok(history)
    }

    pub async fn save(&self, store: &dyn KeyValueStore) -> Result<()> {
        store.set(HISTORY_KEY, serde_json::to_string(&self.records)?).await?;
        store.set(USAGE_KEY, self.usage_count.to_string()).await?;
        Ok(())
    }

    /// Adds a fresh record at the front, dropping the oldest beyond capacity.
    pub fn record(&mut self, record: OptimizationRecord) {
        self.records.insert(0, record);
        self.records.truncate(self.capacity);
        self.usage_count += 1;
    }

    /// Empties the list. The usage counter is cumulative and survives.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn records(&self) -> &[OptimizationRecord] {
        &self.records
    }

    pub fn latest(&self) -> Option<&OptimizationRecord> {
        self.records.first()
    }

    pub fn find(&self, id_prefix: &str) -> Option<&OptimizationRecord> {
        self.records.iter().find(|r| r.id.starts_with(id_prefix))
    }

    pub fn usage_count(&self) -> u64 {
        self.usage_count
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
