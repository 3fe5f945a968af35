// SPDX-License-Identifier: GPL-3.0-only

//! Settings session: dialogs, messages and state transitions
//!
//! # Architecture
//!
//! - `state`: `AppModel`, `Message` and the `ViewState` machine
//! - `update`: message handling
//! - `summary`: summary dialog content
//! - `picker`: audio, resolution and frame rate pickers
//!
//! The session owns a subscription to the settings store. Any store change
//! is picked up after each message, so the summary never needs to be told
//! about selections made in a picker.

pub mod picker;
mod state;
pub mod summary;
mod update;

pub use picker::PickerKind;
pub use state::{AppModel, Message, ViewState};
pub use summary::{SummaryRow, SummaryView};
