//! Mock hook event source for unit testing.
//!
//! Allows tests to inject synthetic payloads without a running Windows
//! message loop or OS hooks. Events may be injected before `start()` is
//! called; the channel buffers them until a consumer drains it.

use std::sync::{
    mpsc::{self, Receiver, Sender},
    Mutex,
};

use super::{HookError, HookEventSource, RawHookEvent};

/// A mock implementation of [`HookEventSource`] that allows tests to inject events.
pub struct MockHookEventSource {
    sender: Mutex<Option<Sender<RawHookEvent>>>,
    receiver: Mutex<Option<Receiver<RawHookEvent>>>,
}

impl MockHookEventSource {
    /// Creates a new mock source with its channel already wired.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            sender: Mutex::new(Some(tx)),
            receiver: Mutex::new(Some(rx)),
        }
    }

    /// Injects a synthetic event, as if captured by a hook callback.
    ///
    /// Panics if `stop()` has already been called.
    pub fn inject(&self, event: RawHookEvent) {
        let guard = self.sender.lock().expect("lock poisoned");
        guard
            .as_ref()
            .expect("MockHookEventSource::inject called after stop()")
            .send(event)
            .expect("receiver dropped");
    }
}

impl Default for MockHookEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl HookEventSource for MockHookEventSource {
    fn start(&self) -> Result<mpsc::Receiver<RawHookEvent>, HookError> {
        self.receiver
            .lock()
            .expect("lock poisoned")
            .take()
            .ok_or(HookError::AlreadyStarted)
    }

    fn stop(&self) {
        // Drop the sender to close the channel; buffered events stay
        // receivable until drained.
        *self.sender.lock().expect("lock poisoned") = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookmon_core::{payload::wm, KeyboardPayload};

    fn key_down_a() -> RawHookEvent {
        RawHookEvent::Keyboard(KeyboardPayload::Global {
            message: wm::WM_KEYDOWN,
            vk_code: 0x41,
            scan_code: 0x1E,
            flags: 0,
            time_ms: 0,
        })
    }

    #[test]
    fn test_events_injected_before_start_are_buffered() {
        // Arrange
        let source = MockHookEventSource::new();
        source.inject(key_down_a());

        // Act
        let rx = source.start().expect("start should succeed");

        // Assert
        assert_eq!(rx.recv().unwrap(), key_down_a());
    }

    #[test]
    fn test_second_start_fails() {
        let source = MockHookEventSource::new();
        let _rx = source.start().expect("first start should succeed");

        assert!(matches!(source.start(), Err(HookError::AlreadyStarted)));
    }

    #[test]
    fn test_stop_closes_the_channel_after_buffered_events_drain() {
        // Arrange
        let source = MockHookEventSource::new();
        let rx = source.start().expect("start should succeed");
        source.inject(key_down_a());

        // Act
        source.stop();

        // Assert – buffered event still arrives, then the channel is closed
        assert!(rx.recv().is_ok());
        assert!(rx.recv().is_err(), "channel should be closed after stop()");
    }
}
