//! # Tint Host
//!
//! The boundary between the tint coordinator and the browser platform.
//!
//! Every platform capability the coordinator needs is a small `Send + Sync`
//! trait object: the persisted settings record, tab enumeration, window
//! focus, and the per-tab content-script channel. A real host adapts the
//! browser's extension APIs onto these traits; tests and the smoke harness
//! use the in-memory host in [`memory`].

pub mod file_store;
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;
use tint_core::{SettingsPatch, StyleMessage, TabId, TabInfo, TintResult, WindowId};
use tokio::sync::broadcast;

pub use file_store::JsonFileStore;
pub use memory::{MemoryStore, MemoryTabs, MemoryWindows, RecordingChannel};

/// Per-tab message delivery failure.
///
/// `NoReceiver` is the expected case of a tab whose content script never
/// attached; callers ignore it silently. Everything else is `Failed` and is
/// logged at most.
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("tab {0:?} has no receiving end")]
    NoReceiver(TabId),

    #[error("send to tab {tab:?} failed: {message}")]
    Failed { tab: TabId, message: String },
}

/// Persisted flat key-value settings record.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Read the full record. Keys never written stay absent.
    async fn read(&self) -> TintResult<SettingsPatch>;

    /// Merge a partial record into storage. Only keys present in `patch`
    /// overwrite; every successful write notifies [`changes`](Self::changes)
    /// subscribers.
    async fn write(&self, patch: SettingsPatch) -> TintResult<()>;

    /// Subscribe to change notifications. The channel carries no payload;
    /// subscribers re-read the record, so a lagged receiver only needs one
    /// catch-up read.
    fn changes(&self) -> broadcast::Receiver<()>;
}

/// Tab enumeration. Always queried fresh; the host owns tab lifetime.
#[async_trait]
pub trait TabHost: Send + Sync {
    /// All currently open tabs, any scheme.
    async fn query_tabs(&self) -> TintResult<Vec<TabInfo>>;
}

/// Window focus queries.
#[async_trait]
pub trait WindowHost: Send + Sync {
    /// The last-focused normal window, if any. `None` when no normal window
    /// exists (e.g. only devtools or a popup is open).
    async fn last_focused(&self) -> TintResult<Option<WindowId>>;
}

/// Unicast channel to a tab's content script.
#[async_trait]
pub trait ContentChannel: Send + Sync {
    /// Fire-and-forget send. The outcome for one tab says nothing about any
    /// other tab.
    async fn send(&self, tab: TabId, message: &StyleMessage) -> Result<(), DeliveryError>;
}
