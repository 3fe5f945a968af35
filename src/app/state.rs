// SPDX-License-Identifier: GPL-3.0-only

//! Application state management

use crate::app::picker::PickerKind;
use crate::app::summary::SummaryView;
use crate::config::{Settings, SettingsStore};
use crate::service::{RecorderNotifier, ServiceIntent};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Which dialog is on screen
///
/// Pickers always sit on top of the summary, so leaving a picker returns to
/// `ShowingSummary`. Leaving the summary ends the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    /// No dialog shown (before activation or after the session finished)
    #[default]
    Closed,
    /// Summary of the current settings
    ShowingSummary,
    /// Audio source picker
    ShowingAudioPicker,
    /// Resolution picker
    ShowingResolutionPicker,
    /// Frame rate picker
    ShowingFrameRatePicker,
}

impl ViewState {
    /// The picker shown in this state, if any
    pub fn picker(&self) -> Option<PickerKind> {
        match self {
            ViewState::ShowingAudioPicker => Some(PickerKind::Audio),
            ViewState::ShowingResolutionPicker => Some(PickerKind::Resolution),
            ViewState::ShowingFrameRatePicker => Some(PickerKind::FrameRate),
            ViewState::Closed | ViewState::ShowingSummary => None,
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, ViewState::Closed)
    }
}

/// Messages driving the settings session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    // ===== Session lifecycle =====
    /// Show the summary dialog
    Activate,
    /// Session lost the foreground; finish immediately
    Deactivate,
    /// Summary dismissed (Esc, Ctrl+C, ...); finish the session
    DismissSummary,
    /// Re-read the settings store and refresh the summary text
    SettingsChanged,

    // ===== Summary rows =====
    /// Open the audio source picker
    OpenAudioPicker,
    /// Open the resolution picker
    OpenResolutionPicker,
    /// Open the frame rate picker
    OpenFrameRatePicker,
    /// Flip the hide-icon switch
    ToggleHideIcon,

    // ===== Pickers =====
    /// Audio option selected by list position
    SelectAudio(usize),
    /// Resolution selected by catalog position
    SelectResolution(usize),
    /// Frame rate option selected by list position
    SelectFrameRate(usize),
    /// Picker dismissed without a selection
    ClosePicker,
}

/// State of one settings session
pub struct AppModel {
    /// Settings being edited
    pub(crate) store: SettingsStore,
    /// Subscription used to refresh the summary after store changes
    pub(crate) settings_rx: watch::Receiver<Settings>,
    /// Dialog currently shown
    pub(crate) view: ViewState,
    /// Summary content, present while the summary exists
    pub(crate) summary: Option<SummaryView>,
    /// Receiver of the "settings closed" notification
    notifier: Box<dyn RecorderNotifier>,
    /// Set once the session finished; it cannot be reopened
    pub(crate) finished: bool,
    /// Set once the recorder service has been notified
    closed_notified: bool,
}

impl AppModel {
    /// Create a session for `store`; nothing is shown until [`Message::Activate`]
    pub fn new(store: SettingsStore, notifier: impl RecorderNotifier + 'static) -> Self {
        let settings_rx = store.subscribe();
        Self {
            store,
            settings_rx,
            view: ViewState::Closed,
            summary: None,
            notifier: Box::new(notifier),
            finished: false,
            closed_notified: false,
        }
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn summary(&self) -> Option<&SummaryView> {
        self.summary.as_ref()
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Refresh the summary from the store, if the summary exists
    pub fn settings_changed(&mut self) {
        let settings = self.settings_rx.borrow_and_update();
        if let Some(summary) = self.summary.as_mut() {
            summary.refresh(&settings);
        }
    }

    /// Close every dialog and tear the session down
    pub(crate) fn finish(&mut self) {
        if self.finished {
            return;
        }
        info!("Finishing settings session");
        self.view = ViewState::Closed;
        self.summary = None;
        self.finished = true;
        self.teardown();
    }

    /// Tell the recorder service that settings editing ended
    ///
    /// Only the first call sends anything.
    fn teardown(&mut self) {
        if self.closed_notified {
            return;
        }
        self.closed_notified = true;

        match self.notifier.notify(ServiceIntent::settings_closed()) {
            Ok(()) => debug!("Sent settings-closed intent"),
            Err(e) => warn!(error = %e, "Failed to notify recorder service"),
        }
    }
}

impl Drop for AppModel {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for AppModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppModel")
            .field("view", &self.view)
            .field("summary", &self.summary)
            .field("finished", &self.finished)
            .field("closed_notified", &self.closed_notified)
            .finish()
    }
}
