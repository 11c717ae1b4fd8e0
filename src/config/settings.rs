//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and handed to the app
//! whole.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// CaptureConfig
// ---------------------------------------------------------------------------

/// Settings for audio capture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Audio input device name — `None` means the system default.
    pub device: Option<String>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self { device: None }
    }
}

// ---------------------------------------------------------------------------
// DisplayConfig
// ---------------------------------------------------------------------------

/// Window geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Inner window width in logical pixels.
    pub width: f32,
    /// Inner window height in logical pixels.
    pub height: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

// ---------------------------------------------------------------------------
// ScopeConfig
// ---------------------------------------------------------------------------

/// Settings for the waveform lanes and the auto-hold trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeConfig {
    /// Number of device channels displayed, one lane each.  Clamped to the
    /// channel count the device actually delivers.
    pub channels: usize,
    /// Index of the channel whose peak deflection triggers the auto-hold
    /// (0-based into the displayed channels).
    pub monitor_channel: usize,
    /// Number of trailing samples drawn per lane.
    pub window_samples: usize,
    /// Vertical deflection in pixels for a full-scale (±1.0) sample.
    pub gain: f32,
    /// Vertical distance in pixels between adjacent lane centers.
    pub lane_spacing: f32,
    /// Peak deflection in pixels above which the scope holds.
    pub hold_threshold: f32,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            channels: 3,
            monitor_channel: 1,
            window_samples: 2048,
            gain: 100.0,
            lane_spacing: 200.0,
            hold_threshold: 20.0,
        }
    }
}

// ---------------------------------------------------------------------------
// SpectrumConfig
// ---------------------------------------------------------------------------

/// Settings for the per-lane spectrum bars.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpectrumConfig {
    /// Number of frequency bands (FFT magnitude bins) per channel.
    pub bands: usize,
    /// Bar height in pixels for a band-count-normalised magnitude of 1.0.
    pub gain: f32,
    /// Horizontal distance in pixels between adjacent bar left edges.
    pub bar_spacing: f32,
    /// Bar width in pixels.
    pub bar_width: f32,
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            bands: 512,
            gain: 1000.0,
            bar_spacing: 3.0,
            bar_width: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use triscope::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Audio capture settings.
    pub capture: CaptureConfig,
    /// Window geometry.
    pub display: DisplayConfig,
    /// Waveform lane / auto-hold settings.
    pub scope: ScopeConfig,
    /// Spectrum bar settings.
    pub spectrum: SpectrumConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Verify that a default `AppConfig` can be serialised to TOML and
    /// deserialised back without any data loss.
    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        // CaptureConfig
        assert_eq!(original.capture.device, loaded.capture.device);

        // DisplayConfig
        assert_eq!(original.display.width, loaded.display.width);
        assert_eq!(original.display.height, loaded.display.height);

        // ScopeConfig
        assert_eq!(original.scope.channels, loaded.scope.channels);
        assert_eq!(original.scope.monitor_channel, loaded.scope.monitor_channel);
        assert_eq!(original.scope.window_samples, loaded.scope.window_samples);
        assert_eq!(original.scope.gain, loaded.scope.gain);
        assert_eq!(original.scope.lane_spacing, loaded.scope.lane_spacing);
        assert_eq!(original.scope.hold_threshold, loaded.scope.hold_threshold);

        // SpectrumConfig
        assert_eq!(original.spectrum.bands, loaded.spectrum.bands);
        assert_eq!(original.spectrum.gain, loaded.spectrum.gain);
        assert_eq!(original.spectrum.bar_spacing, loaded.spectrum.bar_spacing);
        assert_eq!(original.spectrum.bar_width, loaded.spectrum.bar_width);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        let default = AppConfig::default();

        assert_eq!(config.capture.device, default.capture.device);
        assert_eq!(config.display.width, default.display.width);
        assert_eq!(config.scope.window_samples, default.scope.window_samples);
        assert_eq!(config.spectrum.bands, default.spectrum.bands);
    }

    /// Verify the out-of-the-box constants.
    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert!(cfg.capture.device.is_none());
        assert_eq!(cfg.display.width, 1280.0);
        assert_eq!(cfg.display.height, 720.0);
        assert_eq!(cfg.scope.channels, 3);
        assert_eq!(cfg.scope.monitor_channel, 1);
        assert_eq!(cfg.scope.window_samples, 2048);
        assert_eq!(cfg.scope.gain, 100.0);
        assert_eq!(cfg.scope.lane_spacing, 200.0);
        assert_eq!(cfg.scope.hold_threshold, 20.0);
        assert_eq!(cfg.spectrum.bands, 512);
        assert_eq!(cfg.spectrum.gain, 1000.0);
        assert_eq!(cfg.spectrum.bar_spacing, 3.0);
        assert_eq!(cfg.spectrum.bar_width, 1.0);
    }

    /// Verify that modified non-default values survive a round trip.
    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.capture.device = Some("Scarlett 2i2".into());
        cfg.display.width = 1920.0;
        cfg.scope.channels = 2;
        cfg.scope.monitor_channel = 0;
        cfg.scope.window_samples = 4096;
        cfg.scope.hold_threshold = 35.0;
        cfg.spectrum.bands = 256;

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.capture.device, Some("Scarlett 2i2".into()));
        assert_eq!(loaded.display.width, 1920.0);
        assert_eq!(loaded.scope.channels, 2);
        assert_eq!(loaded.scope.monitor_channel, 0);
        assert_eq!(loaded.scope.window_samples, 4096);
        assert_eq!(loaded.scope.hold_threshold, 35.0);
        assert_eq!(loaded.spectrum.bands, 256);
    }
}
