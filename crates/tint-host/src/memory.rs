//! In-memory host implementations.
//!
//! These back the integration tests and the smoke harness. They implement the
//! full trait contracts, including change notification and failure injection,
//! so coordinator behavior under host errors can be exercised without a
//! browser.

use crate::{ContentChannel, DeliveryError, SettingsStore, TabHost, WindowHost};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tint_core::{SettingsPatch, StyleMessage, TabId, TabInfo, TintError, TintResult, WindowId};
use tokio::sync::broadcast;

/// In-memory settings record with broadcast change notification.
pub struct MemoryStore {
    record: Mutex<SettingsPatch>,
    changes: broadcast::Sender<()>,
    fail: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            record: Mutex::new(SettingsPatch::default()),
            changes,
            fail: AtomicBool::new(false),
        }
    }

    /// Start from an existing record instead of an empty one.
    pub fn with_record(record: SettingsPatch) -> Self {
        let store = Self::new();
        *store.record.lock().unwrap() = record;
        store
    }

    /// Make every read and write fail until cleared.
    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::Relaxed);
    }

    /// Snapshot the current record without going through the trait.
    pub fn snapshot(&self) -> SettingsPatch {
        self.record.lock().unwrap().clone()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn read(&self) -> TintResult<SettingsPatch> {
        if self.fail.load(Ordering::Relaxed) {
            return Err(TintError::storage("injected storage failure"));
        }
        Ok(self.record.lock().unwrap().clone())
    }

    async fn write(&self, patch: SettingsPatch) -> TintResult<()> {
        if self.fail.load(Ordering::Relaxed) {
            return Err(TintError::storage("injected storage failure"));
        }
        self.record.lock().unwrap().apply(&patch);
        // No subscribers is fine; notification is best-effort.
        let _ = self.changes.send(());
        Ok(())
    }

    fn changes(&self) -> broadcast::Receiver<()> {
        self.changes.subscribe()
    }
}

/// Fixed tab set with failure injection.
pub struct MemoryTabs {
    tabs: Mutex<Vec<TabInfo>>,
    fail: AtomicBool,
}

impl MemoryTabs {
    pub fn new(tabs: Vec<TabInfo>) -> Self {
        Self {
            tabs: Mutex::new(tabs),
            fail: AtomicBool::new(false),
        }
    }

    pub fn set_tabs(&self, tabs: Vec<TabInfo>) {
        *self.tabs.lock().unwrap() = tabs;
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::Relaxed);
    }
}

#[async_trait]
impl TabHost for MemoryTabs {
    async fn query_tabs(&self) -> TintResult<Vec<TabInfo>> {
        if self.fail.load(Ordering::Relaxed) {
            return Err(TintError::tabs("injected tab query failure"));
        }
        Ok(self.tabs.lock().unwrap().clone())
    }
}

/// Mutable window focus state.
pub struct MemoryWindows {
    focused: Mutex<Option<WindowId>>,
    fail: AtomicBool,
}

impl MemoryWindows {
    pub fn new(focused: Option<WindowId>) -> Self {
        Self {
            focused: Mutex::new(focused),
            fail: AtomicBool::new(false),
        }
    }

    pub fn set_focused(&self, focused: Option<WindowId>) {
        *self.focused.lock().unwrap() = focused;
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::Relaxed);
    }
}

#[async_trait]
impl WindowHost for MemoryWindows {
    async fn last_focused(&self) -> TintResult<Option<WindowId>> {
        if self.fail.load(Ordering::Relaxed) {
            return Err(TintError::windows("injected window query failure"));
        }
        Ok(*self.focused.lock().unwrap())
    }
}

/// Records every delivered message; tabs can be marked dead (no receiving
/// end) or broken (generic send failure).
pub struct RecordingChannel {
    sent: Mutex<Vec<(TabId, StyleMessage)>>,
    dead: Mutex<HashSet<TabId>>,
    broken: Mutex<HashSet<TabId>>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            dead: Mutex::new(HashSet::new()),
            broken: Mutex::new(HashSet::new()),
        }
    }

    /// Mark a tab as having no content-script listener.
    pub fn mark_dead(&self, tab: TabId) {
        self.dead.lock().unwrap().insert(tab);
    }

    /// Mark a tab so sends fail with a generic error.
    pub fn mark_broken(&self, tab: TabId) {
        self.broken.lock().unwrap().insert(tab);
    }

    /// Everything successfully delivered, in send order.
    pub fn sent(&self) -> Vec<(TabId, StyleMessage)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

impl Default for RecordingChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentChannel for RecordingChannel {
    async fn send(&self, tab: TabId, message: &StyleMessage) -> Result<(), DeliveryError> {
        if self.dead.lock().unwrap().contains(&tab) {
            return Err(DeliveryError::NoReceiver(tab));
        }
        if self.broken.lock().unwrap().contains(&tab) {
            return Err(DeliveryError::Failed {
                tab,
                message: "injected send failure".into(),
            });
        }
        self.sent.lock().unwrap().push((tab, message.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_write_merges_and_notifies() {
        let store = MemoryStore::new();
        let mut changes = store.changes();

        store
            .write(SettingsPatch {
                contrast_level: Some(80),
                ..Default::default()
            })
            .await
            .unwrap();
        store
            .write(SettingsPatch {
                contrast_enabled: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();

        let record = store.read().await.unwrap();
        assert_eq!(record.contrast_level, Some(80));
        assert_eq!(record.contrast_enabled, Some(true));

        assert!(changes.recv().await.is_ok());
        assert!(changes.recv().await.is_ok());
    }

    #[tokio::test]
    async fn test_store_failure_injection() {
        let store = MemoryStore::new();
        store.set_failing(true);
        assert!(store.read().await.is_err());
        assert!(store.write(SettingsPatch::default()).await.is_err());

        store.set_failing(false);
        assert!(store.read().await.is_ok());
    }

    #[tokio::test]
    async fn test_channel_dead_and_broken_tabs() {
        let channel = RecordingChannel::new();
        channel.mark_dead(TabId(1));
        channel.mark_broken(TabId(2));

        let msg = StyleMessage::ApplyStyle {
            enabled: true,
            level: 100,
            brightness: 100,
            saturation: 100,
        };

        assert!(matches!(
            channel.send(TabId(1), &msg).await,
            Err(DeliveryError::NoReceiver(_))
        ));
        assert!(matches!(
            channel.send(TabId(2), &msg).await,
            Err(DeliveryError::Failed { .. })
        ));
        channel.send(TabId(3), &msg).await.unwrap();
        assert_eq!(channel.sent().len(), 1);
    }
}
