//! Content-script messaging contract
//!
//! Wire shapes are JSON with an `action` discriminator, matching what the
//! content layer expects.

use serde::{Deserialize, Serialize};

/// Background → content script message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum StyleMessage {
    /// Apply (or clear, when `enabled` is false) the visual filter.
    /// `level`/`brightness`/`saturation` are always carried so an idempotent
    /// consumer can apply the message without consulting prior state.
    #[serde(rename = "applyStyle", rename_all = "camelCase")]
    ApplyStyle {
        enabled: bool,
        level: u32,
        brightness: u32,
        saturation: u32,
    },
}

/// Content script → background message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum InboundMessage {
    /// Request a re-broadcast of current settings. The reply goes to every
    /// tab, not just the requester.
    #[serde(rename = "getCurrentSettings")]
    GetCurrentSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_style_wire_shape() {
        let msg = StyleMessage::ApplyStyle {
            enabled: true,
            level: 80,
            brightness: 110,
            saturation: 100,
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "action": "applyStyle",
                "enabled": true,
                "level": 80,
                "brightness": 110,
                "saturation": 100,
            })
        );
    }

    #[test]
    fn test_inbound_parse() {
        let msg: InboundMessage =
            serde_json::from_str(r#"{"action":"getCurrentSettings"}"#).unwrap();
        assert_eq!(msg, InboundMessage::GetCurrentSettings);
    }
}
