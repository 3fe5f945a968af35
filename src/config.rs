// SPDX-License-Identifier: GPL-3.0-only

//! Recorder settings and the observable store that owns them

use crate::constants::{
    AudioSource, CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_FRAME_RATE, DEFAULT_RESOLUTION_INDEX,
    Resolution, default_resolutions,
};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};

/// Recording settings as persisted on disk
///
/// Deserialization goes through [`RawSettings`] and is validated, so a
/// `Settings` value always has a non-empty catalog and an in-range default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSettings")]
pub struct Settings {
    /// Audio input used while recording
    audio_source: AudioSource,
    /// Explicitly chosen resolution; `None` means "use the default"
    resolution: Option<Resolution>,
    /// Frame rate in frames per second
    frame_rate: u32,
    /// Resolutions offered by the resolution picker
    resolutions: Vec<Resolution>,
    /// Index into `resolutions` of the default resolution
    default_resolution_index: usize,
}

/// Settings as read from disk, before validation
///
/// Missing fields take their defaults.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawSettings {
    audio_source: AudioSource,
    resolution: Option<Resolution>,
    frame_rate: u32,
    resolutions: Vec<Resolution>,
    default_resolution_index: usize,
}

impl Default for RawSettings {
    fn default() -> Self {
        Self {
            audio_source: AudioSource::default(),
            resolution: None,
            frame_rate: DEFAULT_FRAME_RATE,
            resolutions: default_resolutions(),
            default_resolution_index: DEFAULT_RESOLUTION_INDEX,
        }
    }
}

impl TryFrom<RawSettings> for Settings {
    type Error = AppError;

    fn try_from(raw: RawSettings) -> AppResult<Self> {
        let settings = Self::from_raw(raw);
        settings.validate()?;
        Ok(settings)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_raw(RawSettings::default())
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Self {
        Self {
            audio_source: raw.audio_source,
            resolution: raw.resolution,
            frame_rate: raw.frame_rate,
            resolutions: raw.resolutions,
            default_resolution_index: raw.default_resolution_index,
        }
    }

    /// Create default settings with a custom resolution catalog
    pub fn with_catalog(resolutions: Vec<Resolution>, default_index: usize) -> AppResult<Self> {
        let settings = Self {
            resolutions,
            default_resolution_index: default_index,
            ..Self::default()
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from JSON; invariants are checked while deserializing
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> AppResult<()> {
        if self.resolutions.is_empty() {
            return Err(AppError::Config("resolution catalog is empty".into()));
        }
        if self.default_resolution_index >= self.resolutions.len() {
            return Err(AppError::Config(format!(
                "default resolution index {} out of range (0-{})",
                self.default_resolution_index,
                self.resolutions.len() - 1
            )));
        }
        if let Some(r) = self.resolutions.iter().find(|r| r.width == 0 || r.height == 0) {
            return Err(AppError::Config(format!(
                "resolution '{}' has a zero dimension",
                r.label
            )));
        }
        if let Some(selected) = &self.resolution
            && !self.resolutions.contains(selected)
        {
            return Err(AppError::Config(format!(
                "selected resolution '{}' is not in the catalog",
                selected.label
            )));
        }
        Ok(())
    }

    pub fn audio_source(&self) -> AudioSource {
        self.audio_source
    }

    pub fn resolution(&self) -> Option<&Resolution> {
        self.resolution.as_ref()
    }

    /// The catalog's designated default resolution
    pub fn default_resolution(&self) -> &Resolution {
        // Catalog is non-empty and the index in range once validated
        &self.resolutions[self.default_resolution_index]
    }

    /// The chosen resolution, or the default when none was chosen
    pub fn effective_resolution(&self) -> &Resolution {
        self.resolution
            .as_ref()
            .unwrap_or_else(|| self.default_resolution())
    }

    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    pub fn resolutions(&self) -> &[Resolution] {
        &self.resolutions
    }
}

/// Default settings file location (`~/.config/recorder-settings/settings.json`)
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Shared, observable settings store
///
/// Cloning yields another handle to the same settings. Every successful
/// change is published to subscribers and, when a file path is attached,
/// written through to disk.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    state: Arc<watch::Sender<Settings>>,
    path: Option<PathBuf>,
}

impl SettingsStore {
    /// Load settings from `path`, falling back to defaults when the file does not exist
    pub fn initialize(path: Option<PathBuf>) -> AppResult<Self> {
        let settings = match &path {
            Some(p) if p.exists() => {
                let json = std::fs::read_to_string(p)?;
                let settings = Settings::from_json(&json)?;
                info!(path = %p.display(), "Loaded settings");
                settings
            }
            Some(p) => {
                info!(path = %p.display(), "No settings file, using defaults");
                Settings::default()
            }
            None => Settings::default(),
        };

        Ok(Self {
            state: Arc::new(watch::Sender::new(settings)),
            path,
        })
    }

    /// Store that never touches the filesystem
    pub fn in_memory(settings: Settings) -> Self {
        Self {
            state: Arc::new(watch::Sender::new(settings)),
            path: None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Receive a notification on every settings change
    pub fn subscribe(&self) -> watch::Receiver<Settings> {
        self.state.subscribe()
    }

    /// Copy of the current settings
    pub fn snapshot(&self) -> Settings {
        self.state.borrow().clone()
    }

    pub fn audio_source(&self) -> AudioSource {
        self.state.borrow().audio_source
    }

    pub fn resolution(&self) -> Option<Resolution> {
        self.state.borrow().resolution.clone()
    }

    pub fn default_resolution(&self) -> Resolution {
        self.state.borrow().default_resolution().clone()
    }

    pub fn resolutions(&self) -> Vec<Resolution> {
        self.state.borrow().resolutions.clone()
    }

    pub fn frame_rate(&self) -> u32 {
        self.state.borrow().frame_rate
    }

    pub fn set_audio_source(&self, audio_source: AudioSource) -> AppResult<()> {
        debug!(?audio_source, "Setting audio source");
        self.modify(|s| {
            let changed = s.audio_source != audio_source;
            s.audio_source = audio_source;
            changed
        })
    }

    /// Select a resolution; it must be one of the catalog entries
    pub fn set_resolution(&self, resolution: Resolution) -> AppResult<()> {
        if !self.state.borrow().resolutions.contains(&resolution) {
            return Err(AppError::InvalidSelection(format!(
                "resolution '{}' is not in the catalog",
                resolution.label
            )));
        }
        debug!(label = %resolution.label, "Setting resolution");
        self.modify(|s| {
            let changed = s.resolution.as_ref() != Some(&resolution);
            s.resolution = Some(resolution);
            changed
        })
    }

    /// Select the catalog entry at `index` and return it
    pub fn set_resolution_index(&self, index: usize) -> AppResult<Resolution> {
        let resolution = self
            .state
            .borrow()
            .resolutions
            .get(index)
            .cloned()
            .ok_or_else(|| {
                AppError::InvalidSelection(format!("no resolution at index {}", index))
            })?;
        self.set_resolution(resolution.clone())?;
        Ok(resolution)
    }

    /// Restore defaults, keeping the current catalog
    pub fn reset(&self) -> AppResult<()> {
        info!("Resetting settings to defaults");
        self.modify(|s| {
            let before = s.clone();
            s.audio_source = AudioSource::default();
            s.resolution = None;
            s.frame_rate = DEFAULT_FRAME_RATE;
            *s != before
        })
    }

    /// Apply `f`, publish and persist when it reports a change
    ///
    /// The in-memory value stays updated even if persisting fails.
    fn modify(&self, f: impl FnOnce(&mut Settings) -> bool) -> AppResult<()> {
        if self.state.send_if_modified(f) {
            self.save()?;
        }
        Ok(())
    }

    /// Write the current settings to the attached path, if any
    ///
    /// The file is replaced by renaming a fully written sibling, so an
    /// interrupted save never leaves a truncated settings file behind.
    pub fn save(&self) -> AppResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let json = self.state.borrow().to_json()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, path)?;
        debug!(path = %path.display(), "Saved settings");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SettingsStore {
        SettingsStore::in_memory(Settings::default())
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.audio_source(), AudioSource::Mic);
        assert!(settings.resolution().is_none());
        assert_eq!(settings.default_resolution().label, "720p");
        assert_eq!(settings.effective_resolution().label, "720p");
        assert_eq!(settings.frame_rate(), DEFAULT_FRAME_RATE);
    }

    #[test]
    fn test_with_catalog_rejects_bad_index() {
        let catalog = vec![Resolution::new("720p", 1280, 720)];
        assert!(Settings::with_catalog(catalog.clone(), 0).is_ok());
        assert!(matches!(
            Settings::with_catalog(catalog, 1),
            Err(AppError::Config(_))
        ));
        assert!(Settings::with_catalog(Vec::new(), 0).is_err());
    }

    #[test]
    fn test_set_resolution_index_selects_catalog_entry() {
        let store = store();
        let catalog = store.resolutions();
        let chosen = store.set_resolution_index(2).unwrap();
        assert_eq!(chosen, catalog[2]);
        assert_eq!(store.resolution(), Some(catalog[2].clone()));
    }

    #[test]
    fn test_set_resolution_outside_catalog_rejected() {
        let store = store();
        let result = store.set_resolution(Resolution::new("8K", 7680, 4320));
        assert!(matches!(result, Err(AppError::InvalidSelection(_))));
        assert!(store.resolution().is_none());
        assert!(store.set_resolution_index(99).is_err());
    }

    #[test]
    fn test_subscribers_see_changes_only() {
        let store = store();
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        // Same value as before: no notification
        store.set_audio_source(AudioSource::Mic).unwrap();
        assert!(!rx.has_changed().unwrap());

        store.set_audio_source(AudioSource::Mute).unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().audio_source(), AudioSource::Mute);
    }

    #[test]
    fn test_clones_share_state() {
        let store = store();
        let other = store.clone();
        other.set_audio_source(AudioSource::Mute).unwrap();
        assert_eq!(store.audio_source(), AudioSource::Mute);
    }

    #[test]
    fn test_reset_keeps_catalog() {
        let catalog = vec![
            Resolution::new("a", 100, 200),
            Resolution::new("b", 300, 400),
        ];
        let store = SettingsStore::in_memory(Settings::with_catalog(catalog.clone(), 0).unwrap());
        store.set_resolution_index(1).unwrap();
        store.set_audio_source(AudioSource::Mute).unwrap();
        store.reset().unwrap();
        assert_eq!(store.audio_source(), AudioSource::Mic);
        assert!(store.resolution().is_none());
        assert_eq!(store.resolutions(), catalog);
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let settings = Settings::from_json(r#"{ "audio_source": "mute" }"#).unwrap();
        assert_eq!(settings.audio_source(), AudioSource::Mute);
        assert_eq!(settings.resolutions(), default_resolutions().as_slice());
    }

    #[test]
    fn test_from_json_rejects_unknown_selection() {
        let json = r#"{ "resolution": { "label": "8K", "width": 7680, "height": 4320 } }"#;
        assert!(matches!(Settings::from_json(json), Err(AppError::Config(_))));
    }

    #[test]
    fn test_direct_deserialize_rejects_empty_catalog() {
        let result = serde_json::from_str::<Settings>(r#"{"resolutions":[]}"#);
        assert!(result.is_err());

        let result = serde_json::from_str::<Settings>(r#"{"default_resolution_index":9}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_direct_deserialize_fills_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.default_resolution().label, "720p");
    }
}
