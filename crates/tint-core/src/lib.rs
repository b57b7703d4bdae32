//! Core types for the tint filter coordinator.
//!
//! Shared by every tint crate: tab/window identity, the persisted settings
//! record with its default-merge rules, the content-script wire messages,
//! and the common error type.

pub mod error;
pub mod logging;
pub mod message;
pub mod settings;
pub mod types;

pub use error::{TintError, TintResult};
pub use message::{InboundMessage, StyleMessage};
pub use settings::{FilterSettings, Scope, SettingsPatch};
pub use types::{LoadStatus, TabId, TabInfo, WindowId};
