//! Hook event sources.
//!
//! On Windows, [`windows::WindowsHookEventSource`] installs low-level
//! keyboard and mouse hooks (WH_KEYBOARD_LL, WH_MOUSE_LL) on a dedicated
//! Win32 message-loop thread. The callbacks do the minimum possible work:
//! they read the hook structs into `hookmon-core` payload values and push
//! them into an `mpsc` channel; all decoding happens on the consumer thread.
//!
//! # Hook-chain discipline
//!
//! The hook callbacks always forward to `CallNextHookEx` and never re-enter
//! the decoder: decode calls happen strictly on the consumer side, one
//! notification at a time. This is the reentrancy guarantee the decoders
//! rely on, owned here rather than in `hookmon-core`.
//!
//! # Testability
//!
//! The [`HookEventSource`] trait allows unit tests to inject synthetic
//! payloads via [`mock::MockHookEventSource`] without OS hooks.

use std::sync::mpsc;

use hookmon_core::{KeyboardPayload, MousePayload};

pub mod mock;

#[cfg(target_os = "windows")]
pub mod windows;

/// One raw notification captured by a hook, before any decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawHookEvent {
    Keyboard(KeyboardPayload),
    Mouse(MousePayload),
}

/// Error type for hook installation and teardown.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("failed to install keyboard hook: {0}")]
    KeyboardHookInstallFailed(String),
    #[error("failed to install mouse hook: {0}")]
    MouseHookInstallFailed(String),
    #[error("hook event source is already running")]
    AlreadyStarted,
    #[error("platform not supported: {0}")]
    UnsupportedPlatform(String),
}

/// Trait abstracting raw hook event production.
///
/// The production implementation installs Windows hooks; tests use
/// [`mock::MockHookEventSource`].
pub trait HookEventSource: Send + Sync {
    /// Starts the source and returns the receiving end of the event channel.
    ///
    /// The channel closes when the source stops, which ends any consumer
    /// loop blocked on it.
    fn start(&self) -> Result<mpsc::Receiver<RawHookEvent>, HookError>;

    /// Stops the source and releases all OS resources.
    fn stop(&self);
}
