//! hookmon-win library entry point.
//!
//! Windows infrastructure around `hookmon-core`: low-level hook installation
//! on a dedicated message-loop thread, the live keyboard-state translator,
//! the event dispatcher with its subscriber registry, and TOML configuration.
//!
//! Re-exports all public modules so that the binary entry point in `main.rs`
//! and host applications embedding the monitor share the same module tree.

pub mod config;
pub mod dispatch;
pub mod hook;
pub mod translate;

pub use dispatch::{InputMonitor, KeyPressArgs, KeyStrokeArgs, MouseArgs};
pub use hook::{HookError, HookEventSource, RawHookEvent};
