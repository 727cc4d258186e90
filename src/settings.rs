//! Interaction settings.
//!
//! A JSON file holding the tunables hosts usually expose to users: edge
//! auto-scroll thresholds and speeds, resize handle size and the scrollbar's
//! minimum thumb length. Every field is optional in the file; missing fields
//! take the built-in defaults.

use crate::auto_scroll::{AutoScrollConfig, EdgeThresholdSpec, EdgeThresholds, PointerSource, SpeedTiers};
use crate::constants::{AUTO_SCROLL_TICK_MS, DEFAULT_HANDLE_SIZE, MIN_THUMB_EXTENT};
use crate::dnr::DnrConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::geometry::Axis;
use crate::scrollbar::ScrollbarConfig;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

static DEFAULT_SETTINGS: Lazy<InteractionSettings> = Lazy::new(InteractionSettings::default);

/// Auto-scroll section of the settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AutoScrollSettings {
    pub thresholds: EdgeThresholdSpec,
    pub speed: SpeedTiers,
    pub tick_ms: u64,
    pub within_bounds: bool,
    pub event_type: PointerSource,
}

impl Default for AutoScrollSettings {
    fn default() -> Self {
        Self {
            thresholds: EdgeThresholdSpec::default(),
            speed: SpeedTiers::default(),
            tick_ms: AUTO_SCROLL_TICK_MS,
            within_bounds: false,
            event_type: PointerSource::Drag,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InteractionSettings {
    pub auto_scroll: AutoScrollSettings,
    pub handle_size: f32,
    pub min_thumb_extent: f32,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            auto_scroll: AutoScrollSettings::default(),
            handle_size: DEFAULT_HANDLE_SIZE,
            min_thumb_extent: MIN_THUMB_EXTENT,
        }
    }
}

impl InteractionSettings {
    /// Process-wide built-in defaults.
    pub fn defaults() -> &'static InteractionSettings {
        &DEFAULT_SETTINGS
    }

    /// Parse and validate settings from JSON text.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let settings: InteractionSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json_str(&json)?;
        info!(path = %path.display(), "interaction settings loaded");
        Ok(settings)
    }

    /// Load from `path`, falling back to the defaults when the file is
    /// missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Self::defaults().clone()
            }
            Err(e) => {
                warn!(path = %path.display(), "invalid interaction settings, using defaults: {}", e);
                Self::defaults().clone()
            }
        }
    }

    /// Load from [`default_settings_path`], or the defaults if there is none.
    pub fn load() -> Self {
        match default_settings_path() {
            Some(path) => Self::load_or_default(&path),
            None => Self::defaults().clone(),
        }
    }

    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Reject settings the gesture engine would behave badly with.
    pub fn validate(&self) -> ConfigResult<()> {
        let edges = self.edge_thresholds().unordered_edges();
        if !edges.is_empty() {
            return Err(ConfigError::InvalidThresholds { edges });
        }
        if !self.auto_scroll.speed.is_monotonic() {
            return Err(ConfigError::InvalidSpeed);
        }
        if self.auto_scroll.tick_ms == 0 {
            return Err(ConfigError::InvalidTick(self.auto_scroll.tick_ms));
        }
        if self.handle_size.is_nan() || self.handle_size < 0.0 {
            return Err(format!("handle size must be non-negative (got {})", self.handle_size).into());
        }
        if self.min_thumb_extent.is_nan() || self.min_thumb_extent < 0.0 {
            return Err(format!(
                "minimum thumb extent must be non-negative (got {})",
                self.min_thumb_extent
            )
            .into());
        }
        Ok(())
    }

    pub fn edge_thresholds(&self) -> EdgeThresholds {
        self.auto_scroll.thresholds.into()
    }

    /// An inactive auto-scroll configuration built from these settings.
    pub fn auto_scroll_config(&self) -> AutoScrollConfig {
        AutoScrollConfig {
            active: false,
            event_type: self.auto_scroll.event_type,
            thresholds: self.edge_thresholds(),
            within_bounds: self.auto_scroll.within_bounds,
            speed: self.auto_scroll.speed,
            tick: Duration::from_millis(self.auto_scroll.tick_ms),
        }
    }

    /// Apply the handle size to a drag/resize configuration.
    pub fn apply_to_dnr(&self, config: DnrConfig) -> DnrConfig {
        config.with_handle_size(self.handle_size)
    }

    pub fn scrollbar_config(&self, axis: Axis, track_extent: f32) -> ScrollbarConfig {
        ScrollbarConfig::new(axis, track_extent).with_min_thumb_extent(self.min_thumb_extent)
    }
}

/// `<config dir>/timeline-gestures/settings.json`, if the platform has a
/// config directory.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("timeline-gestures").join("settings.json"))
}
