//! Common types used throughout tint

use serde::{Deserialize, Serialize};
use url::Url;

/// Unique identifier for a tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabId(pub u64);

/// Unique identifier for a browser window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

/// Browser tab metadata, read fresh from the host on every propagation.
///
/// Never cached: the host owns tab lifetime, so holding on to a `TabInfo`
/// across events would only invite staleness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabInfo {
    pub id: TabId,
    pub window_id: WindowId,
    pub url: Url,
}

/// Tab load status as reported by the host's tab-updated event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Complete,
}

impl TabInfo {
    /// Whether this tab can host a content script (http/https pages only;
    /// browser-internal, file and extension pages are excluded).
    pub fn is_scriptable(&self) -> bool {
        matches!(self.url.scheme(), "http" | "https")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(url: &str) -> TabInfo {
        TabInfo {
            id: TabId(1),
            window_id: WindowId(1),
            url: Url::parse(url).unwrap(),
        }
    }

    #[test]
    fn test_scriptable_schemes() {
        assert!(tab("https://example.com/").is_scriptable());
        assert!(tab("http://example.com/").is_scriptable());
        assert!(!tab("file:///tmp/page.html").is_scriptable());
        assert!(!tab("chrome://settings").is_scriptable());
        assert!(!tab("chrome-extension://abc/popup.html").is_scriptable());
    }
}
