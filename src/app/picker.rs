// SPDX-License-Identifier: GPL-3.0-only

//! Option pickers opened from the summary dialog

use crate::app::state::{Message, ViewState};
use crate::config::Settings;
use crate::constants::{AudioSource, FRAME_RATE_OPTIONS, titles};

/// The three single-purpose pickers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKind {
    Audio,
    Resolution,
    FrameRate,
}

impl PickerKind {
    pub fn title(&self) -> &'static str {
        match self {
            PickerKind::Audio => titles::AUDIO,
            PickerKind::Resolution => titles::RESOLUTION,
            PickerKind::FrameRate => titles::FRAME_RATE,
        }
    }

    /// View state showing this picker
    pub fn view_state(&self) -> ViewState {
        match self {
            PickerKind::Audio => ViewState::ShowingAudioPicker,
            PickerKind::Resolution => ViewState::ShowingResolutionPicker,
            PickerKind::FrameRate => ViewState::ShowingFrameRatePicker,
        }
    }

    /// Labels listed by the picker, in selection order
    pub fn items(&self, settings: &Settings) -> Vec<String> {
        match self {
            PickerKind::Audio => AudioSource::ALL
                .iter()
                .map(|a| a.display_name().to_string())
                .collect(),
            PickerKind::Resolution => settings
                .resolutions()
                .iter()
                .map(|r| r.picker_label())
                .collect(),
            PickerKind::FrameRate => FRAME_RATE_OPTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Message sent when item `index` is chosen
    pub fn select_message(&self, index: usize) -> Message {
        match self {
            PickerKind::Audio => Message::SelectAudio(index),
            PickerKind::Resolution => Message::SelectResolution(index),
            PickerKind::FrameRate => Message::SelectFrameRate(index),
        }
    }

    /// Item to highlight when the picker opens
    pub fn current_index(&self, settings: &Settings) -> usize {
        match self {
            PickerKind::Audio => AudioSource::ALL
                .iter()
                .position(|a| *a == settings.audio_source())
                .unwrap_or(0),
            PickerKind::Resolution => settings
                .resolutions()
                .iter()
                .position(|r| r == settings.effective_resolution())
                .unwrap_or(0),
            PickerKind::FrameRate => {
                let current = format!("{} fps", settings.frame_rate());
                FRAME_RATE_OPTIONS
                    .iter()
                    .position(|label| *label == current)
                    .unwrap_or(0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::Resolution;

    #[test]
    fn test_audio_items() {
        let items = PickerKind::Audio.items(&Settings::default());
        assert_eq!(items, vec!["Microphone", "Mute"]);
    }

    #[test]
    fn test_resolution_items_are_landscape() {
        let settings = Settings::with_catalog(
            vec![
                Resolution::new("720p", 1280, 720),
                Resolution::new("1080p", 1080, 1920),
            ],
            0,
        )
        .unwrap();
        let items = PickerKind::Resolution.items(&settings);
        assert_eq!(items, vec!["720p - 1280x720", "1080p - 1920x1080"]);
    }

    #[test]
    fn test_frame_rate_items() {
        let items = PickerKind::FrameRate.items(&Settings::default());
        assert_eq!(items, vec!["5 fps", "10 fps", "15 fps", "30 fps", "40 fps"]);
    }

    #[test]
    fn test_current_index_tracks_settings() {
        let settings = Settings::default();
        // Default resolution is "720p", second in the catalog
        assert_eq!(PickerKind::Resolution.current_index(&settings), 1);
        assert_eq!(PickerKind::Audio.current_index(&settings), 0);
        assert_eq!(PickerKind::FrameRate.current_index(&settings), 2);
    }

    #[test]
    fn test_frame_rate_index_from_stored_rate() {
        let settings = Settings::from_json(r#"{ "frame_rate": 30 }"#).unwrap();
        assert_eq!(PickerKind::FrameRate.current_index(&settings), 3);

        // Rates without a matching option highlight the first item
        let settings = Settings::from_json(r#"{ "frame_rate": 24 }"#).unwrap();
        assert_eq!(PickerKind::FrameRate.current_index(&settings), 0);
    }
}
