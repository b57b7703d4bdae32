//! Filter settings model
//!
//! The persisted record is a flat key-value document with camelCase keys
//! (`contrastEnabled`, `contrastLevel`, ...). `SettingsPatch` is that
//! document: every field optional, so a store can hold any subset of keys.
//! `FilterSettings` is the concrete view the propagator works with, produced
//! by merging a patch over the documented defaults.

use crate::types::WindowId;
use serde::{Deserialize, Serialize};

/// Whether the filter applies to every tab or only the focused window's tabs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    All,
    Window,
}

/// Partial settings record, exactly as persisted.
///
/// Absent keys stay `None`; a present `false` or `0` is a real value and
/// survives the merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrast_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrast_level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness_level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturation_level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_window_id: Option<WindowId>,
}

impl SettingsPatch {
    /// Overlay `other` on top of this patch. Only keys present in `other`
    /// overwrite; this is the store's write semantics.
    pub fn apply(&mut self, other: &SettingsPatch) {
        if other.contrast_enabled.is_some() {
            self.contrast_enabled = other.contrast_enabled;
        }
        if other.contrast_level.is_some() {
            self.contrast_level = other.contrast_level;
        }
        if other.brightness_level.is_some() {
            self.brightness_level = other.brightness_level;
        }
        if other.saturation_level.is_some() {
            self.saturation_level = other.saturation_level;
        }
        if other.scope.is_some() {
            self.scope = other.scope;
        }
        if other.active_window_id.is_some() {
            self.active_window_id = other.active_window_id;
        }
    }

    /// Patch carrying every filter default as an explicit value, used to seed
    /// the store on first install. Does not touch `activeWindowId`.
    pub fn seed_defaults() -> Self {
        let d = FilterSettings::default();
        Self {
            contrast_enabled: Some(d.contrast_enabled),
            contrast_level: Some(d.contrast_level),
            brightness_level: Some(d.brightness_level),
            saturation_level: Some(d.saturation_level),
            scope: Some(d.scope),
            active_window_id: None,
        }
    }
}

/// Effective filter settings with every key resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSettings {
    pub contrast_enabled: bool,
    pub contrast_level: u32,
    pub brightness_level: u32,
    pub saturation_level: u32,
    pub scope: Scope,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            contrast_enabled: false,
            contrast_level: 100,
            brightness_level: 100,
            saturation_level: 100,
            scope: Scope::All,
        }
    }
}

impl FilterSettings {
    /// Resolve a partial record against the defaults. Defaults win only for
    /// absent keys.
    pub fn merged(patch: &SettingsPatch) -> Self {
        let d = Self::default();
        Self {
            contrast_enabled: patch.contrast_enabled.unwrap_or(d.contrast_enabled),
            contrast_level: patch.contrast_level.unwrap_or(d.contrast_level),
            brightness_level: patch.brightness_level.unwrap_or(d.brightness_level),
            saturation_level: patch.saturation_level.unwrap_or(d.saturation_level),
            scope: patch.scope.unwrap_or(d.scope),
        }
    }
}
