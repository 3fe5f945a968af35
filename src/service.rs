// SPDX-License-Identifier: GPL-3.0-only

//! Notifications sent to the background recorder service

use crate::errors::{AppError, AppResult};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// One-way message delivered to the recorder service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ServiceIntent {
    /// Settings editing has ended and the service may re-read the settings
    pub settings_closed: bool,
}

impl ServiceIntent {
    pub fn settings_closed() -> Self {
        Self {
            settings_closed: true,
        }
    }
}

/// Something that can deliver intents to the recorder service
pub trait RecorderNotifier {
    fn notify(&self, intent: ServiceIntent) -> AppResult<()>;
}

/// Sender half handed to the settings session
#[derive(Debug, Clone)]
pub struct RecorderServiceHandle {
    sender: mpsc::UnboundedSender<ServiceIntent>,
}

impl RecorderServiceHandle {
    /// Create a handle and the receiver the service reads intents from
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ServiceIntent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl RecorderNotifier for RecorderServiceHandle {
    fn notify(&self, intent: ServiceIntent) -> AppResult<()> {
        self.sender
            .send(intent)
            .map_err(|_| AppError::Service("recorder service is not running".into()))
    }
}

/// Drain intents that are already queued and log them
///
/// Returns the number of "settings closed" intents seen.
pub fn drain_intents(receiver: &mut mpsc::UnboundedReceiver<ServiceIntent>) -> usize {
    let mut closed = 0;
    while let Ok(intent) = receiver.try_recv() {
        if intent.settings_closed {
            closed += 1;
            info!("Recorder service notified: settings closed");
        } else {
            warn!(?intent, "Ignoring recorder service intent without flags");
        }
    }
    closed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_delivers_intent() {
        let (handle, mut rx) = RecorderServiceHandle::channel();
        handle.notify(ServiceIntent::settings_closed()).unwrap();
        assert_eq!(rx.try_recv().unwrap(), ServiceIntent::settings_closed());
    }

    #[test]
    fn test_notify_after_receiver_dropped_is_error() {
        let (handle, rx) = RecorderServiceHandle::channel();
        drop(rx);
        let result = handle.notify(ServiceIntent::settings_closed());
        assert!(matches!(result, Err(AppError::Service(_))));
    }

    #[test]
    fn test_drain_counts_closed_intents() {
        let (handle, mut rx) = RecorderServiceHandle::channel();
        handle.notify(ServiceIntent::settings_closed()).unwrap();
        handle.notify(ServiceIntent::default()).unwrap();
        assert_eq!(drain_intents(&mut rx), 1);
        assert_eq!(drain_intents(&mut rx), 0);
    }
}
