// SPDX-License-Identifier: GPL-3.0-only

//! Recorder Settings - settings dialogs for a screen recorder
//!
//! This library provides the settings session used by the recorder: a
//! summary of the current audio source, resolution and frame rate, and the
//! pickers used to change them.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`app`]: Settings session state machine and message handling
//! - [`config`]: Persisted settings and the observable settings store
//! - [`constants`]: Setting value types and defaults
//! - [`service`]: Notifications sent to the recorder service
//! - [`terminal`]: Terminal rendering of the dialogs
//!
//! # Example
//!
//! ```no_run
//! use recorder_settings::{RecorderServiceHandle, SettingsStore, terminal};
//!
//! let store = SettingsStore::initialize(recorder_settings::config::default_settings_path())?;
//! let (service, _intents) = RecorderServiceHandle::channel();
//! terminal::run(store, service)?;
//! # Ok::<(), recorder_settings::AppError>(())
//! ```

pub mod app;
pub mod config;
pub mod constants;
pub mod errors;
pub mod service;
pub mod terminal;

// Re-export commonly used types
pub use app::{AppModel, Message, ViewState};
pub use config::{Settings, SettingsStore};
pub use constants::{AudioSource, Resolution};
pub use errors::{AppError, AppResult};
pub use service::{RecorderNotifier, RecorderServiceHandle, ServiceIntent};
