//! Host event wiring.
//!
//! The host feeds [`HostEvent`]s into [`Coordinator::run`] over an mpsc
//! channel. The loop also subscribes to the settings store, so any write,
//! whatever triggered it, cascades into a propagation sweep. That makes the
//! toggle command's storage-write → re-broadcast dependency an explicit,
//! tested wiring invariant instead of a coincidence of listener order.

use crate::Coordinator;
use tint_core::{InboundMessage, LoadStatus, TabId, TabInfo, WindowId};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

/// Why the install event fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallReason {
    /// First install: storage is empty and must be seeded.
    Install,
    /// Extension update or host reload: settings already exist.
    Update,
}

/// Registered keyboard commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// "toggle-contrast": flip the master enable flag.
    ToggleFilter,
}

/// Events the host platform delivers to the background coordinator.
#[derive(Debug, Clone)]
pub enum HostEvent {
    Installed { reason: InstallReason },
    Startup,
    /// A settings key changed. Usually synthesized from the store's own
    /// change notification rather than sent by the host.
    SettingsChanged,
    TabUpdated { tab: TabInfo, status: LoadStatus },
    /// `window_id` is `None` for the host's "no window focused" sentinel.
    WindowFocusChanged { window_id: Option<WindowId> },
    WindowCreated { window_id: WindowId },
    Command(Command),
    TabMessage { from: TabId, message: InboundMessage },
}

impl Coordinator {
    /// Dispatch one host event.
    pub async fn handle_event(&self, event: HostEvent) {
        match event {
            HostEvent::Installed { reason } => {
                info!(?reason, "Install event");
                if reason == InstallReason::Install {
                    self.seed_default_settings().await;
                }
                self.update_active_window().await;
                self.apply_styles_to_tabs().await;
            }
            HostEvent::Startup => {
                info!("Startup event");
                self.update_active_window().await;
                self.apply_styles_to_tabs().await;
            }
            HostEvent::SettingsChanged => {
                self.apply_styles_to_tabs().await;
            }
            HostEvent::TabUpdated { tab, status } => {
                // Only a completed load has a content script worth messaging.
                if status == LoadStatus::Complete {
                    debug!(tab = tab.id.0, "Tab finished loading");
                    self.apply_styles_to_tabs().await;
                }
            }
            HostEvent::WindowFocusChanged { window_id } => {
                if window_id.is_some() {
                    // Tracker first so propagation sees the fresh id.
                    self.update_active_window().await;
                    self.apply_styles_to_tabs().await;
                }
            }
            HostEvent::WindowCreated { window_id } => {
                debug!(window = window_id.0, "Window created");
                self.apply_styles_to_tabs().await;
            }
            HostEvent::Command(Command::ToggleFilter) => {
                // Propagation cascades from the resulting store change.
                self.toggle_enabled().await;
            }
            HostEvent::TabMessage { from, message } => match message {
                // Deliberately a broadcast to all tabs, not a reply.
                InboundMessage::GetCurrentSettings => {
                    debug!(tab = from.0, "Settings requested");
                    self.apply_styles_to_tabs().await;
                }
            },
        }
    }

    /// Event loop: host events plus store-change notifications, until the
    /// host side of the channel closes.
    pub async fn run(&self, mut events: mpsc::Receiver<HostEvent>) {
        let mut changes = self.store_changes();
        let mut changes_open = true;
        loop {
            if changes_open {
                tokio::select! {
                    event = events.recv() => match event {
                        Some(event) => self.handle_event(event).await,
                        None => break,
                    },
                    change = changes.recv() => match change {
                        Ok(()) => self.handle_event(HostEvent::SettingsChanged).await,
                        // Missed notifications collapse into one sweep; the
                        // sweep re-reads the record anyway.
                        Err(broadcast::error::RecvError::Lagged(missed)) => {
                            warn!(missed, "Change notifications lagged, resyncing");
                            self.handle_event(HostEvent::SettingsChanged).await;
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            warn!("Settings change channel closed");
                            changes_open = false;
                        }
                    },
                }
            } else {
                match events.recv().await {
                    Some(event) => self.handle_event(event).await,
                    None => break,
                }
            }
        }
    }
}
