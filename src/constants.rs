// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants and setting value types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Audio input mode used while recording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioSource {
    /// Record from the microphone (default)
    #[default]
    Mic,
    /// Record without audio
    Mute,
}

impl AudioSource {
    /// All variants in picker order
    pub const ALL: [AudioSource; 2] = [AudioSource::Mic, AudioSource::Mute];

    /// Get display name for the audio source
    pub fn display_name(&self) -> &'static str {
        match self {
            AudioSource::Mic => "Microphone",
            AudioSource::Mute => "Mute",
        }
    }

    /// Parse a command-line value ("mic", "microphone", "mute")
    pub fn from_arg(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mic" | "microphone" => Some(AudioSource::Mic),
            "mute" | "muted" | "none" => Some(AudioSource::Mute),
            _ => None,
        }
    }
}

impl fmt::Display for AudioSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A named video frame size
///
/// Dimensions are stored in the orientation the device reports, which may be
/// portrait. Display helpers always present the landscape-major form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub label: String,
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(label: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            label: label.into(),
            width,
            height,
        }
    }

    /// Dimensions as (long edge, short edge)
    pub fn landscape_dimensions(&self) -> (u32, u32) {
        (
            self.width.max(self.height),
            self.width.min(self.height),
        )
    }

    /// Picker label, e.g. "720p - 1280x720"
    pub fn picker_label(&self) -> String {
        let (long, short) = self.landscape_dimensions();
        format!("{} - {}x{}", self.label, long, short)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Resolution catalog used when no settings file exists
///
/// Sizes follow the portrait orientation of a phone-class display.
pub fn default_resolutions() -> Vec<Resolution> {
    vec![
        Resolution::new("1080p", 1080, 1920),
        Resolution::new("720p", 720, 1280),
        Resolution::new("480p", 480, 854),
        Resolution::new("360p", 360, 640),
    ]
}

/// Index into [`default_resolutions`] of the designated default ("720p")
pub const DEFAULT_RESOLUTION_INDEX: usize = 1;

/// Frame rate reported before the user has ever changed it
pub const DEFAULT_FRAME_RATE: u32 = 15;

/// Labels offered by the frame rate picker
pub const FRAME_RATE_OPTIONS: [&str; 5] = ["5 fps", "10 fps", "15 fps", "30 fps", "40 fps"];

/// Directory name under the user's config dir
pub const CONFIG_DIR_NAME: &str = "recorder-settings";

/// Settings file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "settings.json";

/// Dialog titles
pub mod titles {
    pub const SETTINGS: &str = "Settings";
    pub const AUDIO: &str = "Audio";
    pub const RESOLUTION: &str = "Resolution";
    pub const FRAME_RATE: &str = "Frame rate";
    pub const HIDE_ICON: &str = "Hide icon";
}

/// Terminal UI constants
pub mod ui {
    use std::time::Duration;

    /// Width of the summary dialog in cells
    pub const SUMMARY_WIDTH: u16 = 44;

    /// Height of the summary dialog including borders
    pub const SUMMARY_HEIGHT: u16 = 8;

    /// Minimum picker width in cells
    pub const PICKER_MIN_WIDTH: u16 = 24;

    /// How long to wait for input before redrawing
    pub const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(100);
}

/// Application information
pub mod app_info {
    /// Get the application version from the build script
    pub fn version() -> &'static str {
        env!("GIT_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_dimensions_swap_portrait() {
        let portrait = Resolution::new("720p", 720, 1280);
        assert_eq!(portrait.landscape_dimensions(), (1280, 720));

        let landscape = Resolution::new("720p", 1280, 720);
        assert_eq!(landscape.landscape_dimensions(), (1280, 720));
    }

    #[test]
    fn test_picker_label() {
        assert_eq!(
            Resolution::new("1080p", 1080, 1920).picker_label(),
            "1080p - 1920x1080"
        );
        assert_eq!(
            Resolution::new("square", 500, 500).picker_label(),
            "square - 500x500"
        );
    }

    #[test]
    fn test_audio_source_from_arg() {
        assert_eq!(AudioSource::from_arg("mic"), Some(AudioSource::Mic));
        assert_eq!(AudioSource::from_arg(" MUTE "), Some(AudioSource::Mute));
        assert_eq!(AudioSource::from_arg("speaker"), None);
    }

    #[test]
    fn test_default_index_in_range() {
        assert!(DEFAULT_RESOLUTION_INDEX < default_resolutions().len());
    }
}
