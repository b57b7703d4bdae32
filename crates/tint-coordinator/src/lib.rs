//! # Tint Coordinator
//!
//! Keeps the persisted visual-filter settings in sync with every open tab.
//!
//! Two responsibilities:
//!
//! 1. **Settings propagation** ([`Coordinator::apply_styles_to_tabs`]): read
//!    the settings record, decide per tab whether the filter applies, and
//!    unicast an `applyStyle` message to each http/https tab.
//! 2. **Active window tracking** ([`Coordinator::update_active_window`]):
//!    persist the id of the last-focused window, which the `window` scope
//!    uses to pick its tabs.
//!
//! Both are idempotent single-pass sweeps over host state. Nothing is cached
//! between calls, so concurrently triggered sweeps cannot corrupt anything;
//! whichever reads the store last reflects the newer record.

pub mod events;

use std::sync::Arc;
use tint_core::{FilterSettings, Scope, SettingsPatch, StyleMessage, TabInfo, WindowId};
use tint_host::{ContentChannel, DeliveryError, SettingsStore, TabHost, WindowHost};
use tokio::sync::broadcast;
use tracing::{debug, trace, warn};

pub use events::{Command, HostEvent, InstallReason};

/// Background coordinator over an injected host platform.
pub struct Coordinator {
    store: Arc<dyn SettingsStore>,
    tabs: Arc<dyn TabHost>,
    windows: Arc<dyn WindowHost>,
    channel: Arc<dyn ContentChannel>,
}

impl Coordinator {
    pub fn new(
        store: Arc<dyn SettingsStore>,
        tabs: Arc<dyn TabHost>,
        windows: Arc<dyn WindowHost>,
        channel: Arc<dyn ContentChannel>,
    ) -> Self {
        Self {
            store,
            tabs,
            windows,
            channel,
        }
    }

    /// Push the current settings to every scriptable tab.
    ///
    /// Never fails: storage or tab-query errors turn the whole sweep into a
    /// logged no-op, and per-tab delivery errors never abort the remaining
    /// tabs. The next triggering event retries implicitly.
    pub async fn apply_styles_to_tabs(&self) {
        let record = match self.store.read().await {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "Skipping propagation, settings unreadable");
                return;
            }
        };
        let settings = FilterSettings::merged(&record);
        let active_window = record.active_window_id;

        let tabs = match self.tabs.query_tabs().await {
            Ok(tabs) => tabs,
            Err(e) => {
                warn!(error = %e, "Skipping propagation, tab query failed");
                return;
            }
        };

        for tab in tabs.iter().filter(|t| t.is_scriptable()) {
            let enabled = should_apply(&settings, active_window, tab);
            let message = StyleMessage::ApplyStyle {
                enabled,
                level: settings.contrast_level,
                brightness: settings.brightness_level,
                saturation: settings.saturation_level,
            };

            match self.channel.send(tab.id, &message).await {
                Ok(()) => trace!(tab = tab.id.0, enabled, "Delivered style"),
                // A tab without a content script is expected, not a failure.
                Err(DeliveryError::NoReceiver(_)) => {
                    trace!(tab = tab.id.0, "No receiver, skipped")
                }
                Err(e) => debug!(tab = tab.id.0, error = %e, "Style delivery failed"),
            }
        }
    }

    /// Persist the id of the last-focused window.
    ///
    /// Degrades to a no-op on any host error; a stale `activeWindowId` only
    /// weakens the `window` scope until the next focus event, it breaks
    /// nothing.
    pub async fn update_active_window(&self) {
        let focused = match self.windows.last_focused().await {
            Ok(focused) => focused,
            Err(e) => {
                warn!(error = %e, "Window query failed, keeping previous active window");
                return;
            }
        };

        if let Some(window_id) = focused {
            let patch = SettingsPatch {
                active_window_id: Some(window_id),
                ..Default::default()
            };
            if let Err(e) = self.store.write(patch).await {
                warn!(error = %e, "Failed to persist active window");
            } else {
                trace!(window = window_id.0, "Active window updated");
            }
        }
    }

    /// Seed the five filter keys with explicit defaults on a fresh install.
    pub async fn seed_default_settings(&self) {
        if let Err(e) = self.store.write(SettingsPatch::seed_defaults()).await {
            warn!(error = %e, "Failed to seed default settings");
        }
    }

    /// Subscribe to the settings store's change notifications.
    pub fn store_changes(&self) -> broadcast::Receiver<()> {
        self.store.changes()
    }

    /// Flip `contrastEnabled`. Propagation follows through the store-change
    /// cascade, not from here; see [`events`].
    pub async fn toggle_enabled(&self) {
        let record = match self.store.read().await {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "Toggle skipped, settings unreadable");
                return;
            }
        };
        let current = FilterSettings::merged(&record).contrast_enabled;

        let patch = SettingsPatch {
            contrast_enabled: Some(!current),
            ..Default::default()
        };
        match self.store.write(patch).await {
            Ok(()) => debug!(enabled = !current, "Filter toggled"),
            Err(e) => warn!(error = %e, "Failed to persist toggle"),
        }
    }
}

/// Per-tab apply decision.
///
/// Disabled beats everything; `all` scope hits every scriptable tab; `window`
/// scope hits only tabs in the tracked active window. A missing
/// `activeWindowId` under `window` scope matches no tab.
fn should_apply(
    settings: &FilterSettings,
    active_window: Option<WindowId>,
    tab: &TabInfo,
) -> bool {
    if !settings.contrast_enabled {
        return false;
    }
    match settings.scope {
        Scope::All => true,
        Scope::Window => active_window == Some(tab.window_id),
    }
}
