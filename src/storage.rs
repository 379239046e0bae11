use crate::models::{Settings, StepRecord};
use std::{
    collections::HashMap,
    env,
    future::Future,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Mutex,
};
use thiserror::Error;
use tokio::fs;
use tracing::{error, info};

pub const RECORDS_KEY: &str = "step_memo_records";
pub const SETTINGS_KEY: &str = "step_memo_settings";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored data is malformed: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub fn resolve_data_dir() -> PathBuf {
    env::var("APP_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

/// String values under fixed string keys.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> impl Future<Output = std::io::Result<Option<String>>> + Send;

    fn set_item(
        &self,
        key: &str,
        value: String,
    ) -> impl Future<Output = std::io::Result<()>> + Send;

    /// Removing a key that is not present is not an error.
    fn remove_items(&self, keys: &[&str]) -> impl Future<Output = std::io::Result<()>> + Send;
}

/// One JSON document per key inside a data directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub async fn open(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    async fn get_item(&self, key: &str) -> std::io::Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn set_item(&self, key: &str, value: String) -> std::io::Result<()> {
        fs::write(self.path_for(key), value).await
    }

    async fn remove_items(&self, keys: &[&str]) -> std::io::Result<()> {
        for key in keys {
            match fs::remove_file(self.path_for(key)).await {
                Err(err) if err.kind() != ErrorKind::NotFound => return Err(err),
                _ => {}
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    fn items(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &str) -> std::io::Result<Option<String>> {
        Ok(self.items().get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: String) -> std::io::Result<()> {
        self.items().insert(key.to_string(), value);
        Ok(())
    }

    async fn remove_items(&self, keys: &[&str]) -> std::io::Result<()> {
        let mut items = self.items();
        for key in keys {
            items.remove(*key);
        }
        Ok(())
    }
}

/// Step records and settings on top of a [`KeyValueStore`].
///
/// Reads never fail: errors are logged and the first-run value is returned. Writes
/// report errors and leave the stored data as it was. There is no coordination
/// between writers; callers sequence read-modify-write cycles themselves.
pub struct RecordStore<S> {
    kv: S,
}

impl<S: KeyValueStore> RecordStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    /// All records, newest date first.
    pub async fn records(&self) -> Vec<StepRecord> {
        match self.load_records().await {
            Ok(records) => records,
            Err(err) => {
                error!("failed to load step records: {err}");
                Vec::new()
            }
        }
    }

    /// Inserts `record`, replacing any record with the same date.
    pub async fn save_record(&self, record: StepRecord) -> Result<(), StoreError> {
        let mut records = self.load_records().await?;
        match records.iter_mut().find(|existing| existing.date == record.date) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
        records.sort_by(|a, b| b.date.cmp(&a.date));
        self.persist_records(&records).await
    }

    pub async fn record_by_date(&self, date: &str) -> Option<StepRecord> {
        self.records()
            .await
            .into_iter()
            .find(|record| record.date == date)
    }

    pub async fn delete_record(&self, date: &str) -> Result<(), StoreError> {
        let mut records = self.load_records().await?;
        let before = records.len();
        records.retain(|record| record.date != date);
        if records.len() == before {
            return Ok(());
        }
        self.persist_records(&records).await
    }

    /// Stored settings with missing fields filled from the defaults.
    pub async fn settings(&self) -> Settings {
        match self.load_settings().await {
            Ok(settings) => settings,
            Err(err) => {
                error!("failed to load settings: {err}");
                Settings::default()
            }
        }
    }

    pub async fn save_settings(&self, settings: &Settings) -> Result<(), StoreError> {
        let payload = serde_json::to_string(settings)?;
        self.kv.set_item(SETTINGS_KEY, payload).await?;
        info!(goal_steps = settings.goal_steps, "settings saved");
        Ok(())
    }

    /// Removes records and settings; later reads behave like a first run.
    pub async fn clear_all(&self) -> Result<(), StoreError> {
        self.kv.remove_items(&[RECORDS_KEY, SETTINGS_KEY]).await?;
        info!("all data cleared");
        Ok(())
    }

    async fn load_records(&self) -> Result<Vec<StepRecord>, StoreError> {
        match self.kv.get_item(RECORDS_KEY).await? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    async fn load_settings(&self) -> Result<Settings, StoreError> {
        match self.kv.get_item(SETTINGS_KEY).await? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Settings::default()),
        }
    }

    async fn persist_records(&self, records: &[StepRecord]) -> Result<(), StoreError> {
        let payload = serde_json::to_string(records)?;
        self.kv.set_item(RECORDS_KEY, payload).await?;
        Ok(())
    }
}
