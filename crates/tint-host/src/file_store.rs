//! JSON-file-backed settings store.
//!
//! The record is one pretty-printed JSON object of camelCase keys. A missing
//! or unreadable file reads as the empty record, so a fresh profile and a
//! corrupted one both degrade to defaults instead of failing.

use crate::SettingsStore;
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use tint_core::{SettingsPatch, TintError, TintResult};
use tokio::sync::broadcast;
use tracing::warn;

pub struct JsonFileStore {
    path: PathBuf,
    changes: broadcast::Sender<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            path: path.into(),
            changes,
        }
    }

    /// Store at the platform config location (`<config_dir>/tint/settings.json`).
    pub fn at_default_location() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join("tint").join("settings.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> SettingsPatch {
        if !self.path.exists() {
            return SettingsPatch::default();
        }
        match fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                warn!(path = %self.path.display(), error = %e, "Unreadable settings file, starting empty");
                SettingsPatch::default()
            }),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read settings file, starting empty");
                SettingsPatch::default()
            }
        }
    }

    fn save(&self, record: &SettingsPatch) -> TintResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(record)
            .map_err(|e| TintError::storage(format!("Failed to serialize settings: {}", e)))?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for JsonFileStore {
    async fn read(&self) -> TintResult<SettingsPatch> {
        Ok(self.load())
    }

    async fn write(&self, patch: SettingsPatch) -> TintResult<()> {
        let mut record = self.load();
        record.apply(&patch);
        self.save(&record)?;
        let _ = self.changes.send(());
        Ok(())
    }

    fn changes(&self) -> broadcast::Receiver<()> {
        self.changes.subscribe()
    }
}
