//! Tint smoke harness
//!
//! Drives the coordinator through a scripted event sequence against the
//! in-memory host and prints a JSON summary of every delivery. Useful as a
//! quick end-to-end sanity check without a browser attached.

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tint_coordinator::{Command, Coordinator, HostEvent, InstallReason};
use tint_core::logging::{init_logging, LogConfig};
use tint_core::{LoadStatus, Scope, SettingsPatch, TabId, TabInfo, WindowId};
use tint_host::{MemoryStore, MemoryTabs, MemoryWindows, RecordingChannel, SettingsStore};
use tokio::sync::mpsc;
use tracing::info;
use url::Url;

fn tab(id: u64, window: u64, url: &str) -> TabInfo {
    TabInfo {
        id: TabId(id),
        window_id: WindowId(window),
        url: Url::parse(url).expect("scripted tab url"),
    }
}

#[tokio::main]
async fn main() {
    init_logging(LogConfig::default().with_filter("tint_coordinator=debug,tint_host=debug"));

    let store = Arc::new(MemoryStore::new());
    let tabs = Arc::new(MemoryTabs::new(vec![
        tab(1, 10, "https://news.example/"),
        tab(2, 10, "https://docs.example/"),
        tab(3, 11, "http://mail.example/"),
        tab(4, 11, "chrome://settings"),
    ]));
    let windows = Arc::new(MemoryWindows::new(Some(WindowId(10))));
    let channel = Arc::new(RecordingChannel::new());
    // Tab 3 never loaded its content script
    channel.mark_dead(TabId(3));

    let coordinator = Arc::new(Coordinator::new(
        store.clone(),
        tabs.clone(),
        windows.clone(),
        channel.clone(),
    ));

    let (tx, rx) = mpsc::channel(32);
    let runner = coordinator.clone();
    let loop_task = tokio::spawn(async move { runner.run(rx).await });

    let script = [
        HostEvent::Installed {
            reason: InstallReason::Install,
        },
        HostEvent::SettingsChanged,
        HostEvent::Command(Command::ToggleFilter),
        HostEvent::TabUpdated {
            tab: tab(2, 10, "https://docs.example/"),
            status: LoadStatus::Complete,
        },
        HostEvent::WindowFocusChanged {
            window_id: Some(WindowId(10)),
        },
        HostEvent::WindowCreated {
            window_id: WindowId(12),
        },
    ];

    let event_count = script.len();
    info!("Running scripted sequence, {} events", event_count);

    // User dials in custom levels and window scope before the sequence runs
    store
        .write(SettingsPatch {
            contrast_level: Some(80),
            scope: Some(Scope::Window),
            ..Default::default()
        })
        .await
        .expect("memory store write");

    for event in script {
        tx.send(event).await.expect("event channel");
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    drop(tx);
    loop_task.await.expect("run loop");

    let sent = channel.sent();
    let deliveries: Vec<_> = sent
        .iter()
        .map(|(tab, msg)| json!({ "tab": tab.0, "message": msg }))
        .collect();
    let summary = json!({
        "events": event_count,
        "deliveries": deliveries.len(),
        "final_record": store.snapshot(),
        "log": deliveries,
    });
    println!("{}", serde_json::to_string_pretty(&summary).expect("summary json"));
}
