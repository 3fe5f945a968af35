// SPDX-License-Identifier: GPL-3.0-only

//! Settings summary dialog content

use crate::app::state::Message;
use crate::config::Settings;
use crate::constants::titles;

/// Text shown by the summary dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub audio_text: String,
    pub resolution_text: String,
    pub frame_rate_text: String,
    /// Hide-icon switch; lives only as long as the dialog
    pub hide_icon: bool,
}

impl SummaryView {
    pub fn new(settings: &Settings) -> Self {
        let mut view = Self {
            audio_text: String::new(),
            resolution_text: String::new(),
            frame_rate_text: String::new(),
            hide_icon: false,
        };
        view.refresh(settings);
        view
    }

    /// Rewrite the text fields from `settings`
    pub fn refresh(&mut self, settings: &Settings) {
        self.audio_text = settings.audio_source().display_name().to_string();
        self.resolution_text = settings.effective_resolution().label.clone();
        self.frame_rate_text = format!("{} fps", settings.frame_rate());
    }

    /// Value column for `row`
    pub fn value(&self, row: SummaryRow) -> &str {
        match row {
            SummaryRow::Audio => self.audio_text.as_str(),
            SummaryRow::Resolution => self.resolution_text.as_str(),
            SummaryRow::FrameRate => self.frame_rate_text.as_str(),
            SummaryRow::HideIcon => {
                if self.hide_icon {
                    "[x]"
                } else {
                    "[ ]"
                }
            }
        }
    }
}

/// Activatable rows of the summary dialog, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryRow {
    Audio,
    Resolution,
    FrameRate,
    HideIcon,
}

impl SummaryRow {
    pub const ALL: [SummaryRow; 4] = [
        SummaryRow::Audio,
        SummaryRow::Resolution,
        SummaryRow::FrameRate,
        SummaryRow::HideIcon,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            SummaryRow::Audio => titles::AUDIO,
            SummaryRow::Resolution => titles::RESOLUTION,
            SummaryRow::FrameRate => titles::FRAME_RATE,
            SummaryRow::HideIcon => titles::HIDE_ICON,
        }
    }

    /// Message sent when the row is activated
    pub fn message(&self) -> Message {
        match self {
            SummaryRow::Audio => Message::OpenAudioPicker,
            SummaryRow::Resolution => Message::OpenResolutionPicker,
            SummaryRow::FrameRate => Message::OpenFrameRatePicker,
            SummaryRow::HideIcon => Message::ToggleHideIcon,
        }
    }
}
