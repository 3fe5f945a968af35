// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! `update()` applies one message to the view state, then checks the
//! settings subscription so the summary always reflects the store.

use crate::app::picker::PickerKind;
use crate::app::state::{AppModel, Message, ViewState};
use crate::app::summary::SummaryView;
use crate::constants::{AudioSource, FRAME_RATE_OPTIONS};
use tracing::{debug, info, warn};

impl AppModel {
    /// Main message handler
    pub fn update(&mut self, message: Message) {
        if self.finished {
            debug!(?message, "Session finished, ignoring message");
            return;
        }

        match message {
            // ===== Session lifecycle =====
            Message::Activate => self.handle_activate(),
            Message::Deactivate => {
                info!("Settings session deactivated");
                self.finish();
            }
            Message::DismissSummary => {
                info!("Summary dismissed");
                self.finish();
            }
            Message::SettingsChanged => self.settings_changed(),

            // ===== Summary rows =====
            Message::OpenAudioPicker => self.handle_open_picker(PickerKind::Audio),
            Message::OpenResolutionPicker => self.handle_open_picker(PickerKind::Resolution),
            Message::OpenFrameRatePicker => self.handle_open_picker(PickerKind::FrameRate),
            Message::ToggleHideIcon => self.handle_toggle_hide_icon(),

            // ===== Pickers =====
            Message::SelectAudio(index) => self.handle_select_audio(index),
            Message::SelectResolution(index) => self.handle_select_resolution(index),
            Message::SelectFrameRate(index) => self.handle_select_frame_rate(index),
            Message::ClosePicker => {
                if self.view.picker().is_some() {
                    self.view = ViewState::ShowingSummary;
                }
            }
        }

        self.sync_settings();
    }

    /// Refresh the summary if the store changed since the last look
    fn sync_settings(&mut self) {
        // A closed channel means no further changes can arrive
        if self.settings_rx.has_changed().unwrap_or(false) {
            debug!("Settings changed, refreshing summary");
            self.settings_changed();
        }
    }

    fn handle_activate(&mut self) {
        if self.view.is_open() {
            return;
        }
        let settings = self.settings_rx.borrow_and_update().clone();
        info!(
            audio = %settings.audio_source(),
            resolution = %settings.effective_resolution(),
            "Showing settings summary"
        );
        self.summary = Some(SummaryView::new(&settings));
        self.view = ViewState::ShowingSummary;
    }

    fn handle_open_picker(&mut self, picker: PickerKind) {
        if self.view != ViewState::ShowingSummary {
            return;
        }
        debug!(?picker, "Opening picker");
        self.view = picker.view_state();
    }

    fn handle_toggle_hide_icon(&mut self) {
        if self.view != ViewState::ShowingSummary {
            return;
        }
        if let Some(summary) = self.summary.as_mut() {
            summary.hide_icon = !summary.hide_icon;
            debug!(hide_icon = summary.hide_icon, "Toggled hide icon");
        }
    }

    fn handle_select_audio(&mut self, index: usize) {
        if self.view != ViewState::ShowingAudioPicker {
            return;
        }
        let Some(&audio_source) = AudioSource::ALL.get(index) else {
            warn!(index, "Audio option out of range");
            return;
        };

        if let Err(e) = self.store.set_audio_source(audio_source) {
            warn!(error = %e, "Failed to store audio source");
        }
        self.view = ViewState::ShowingSummary;
    }

    fn handle_select_resolution(&mut self, index: usize) {
        if self.view != ViewState::ShowingResolutionPicker {
            return;
        }
        if index >= self.settings_rx.borrow().resolutions().len() {
            warn!(index, "Resolution option out of range");
            return;
        }

        match self.store.set_resolution_index(index) {
            Ok(resolution) => info!(label = %resolution.label, "Resolution selected"),
            Err(e) => warn!(error = %e, "Failed to store resolution"),
        }
        self.view = ViewState::ShowingSummary;
    }

    fn handle_select_frame_rate(&mut self, index: usize) {
        if self.view != ViewState::ShowingFrameRatePicker {
            return;
        }
        let Some(label) = FRAME_RATE_OPTIONS.get(index) else {
            warn!(index, "Frame rate option out of range");
            return;
        };

        // No frame rate mapping exists yet; the choice is not stored.
        debug!(label, "Frame rate selected, not applied");
        self.view = ViewState::ShowingSummary;
    }
}
