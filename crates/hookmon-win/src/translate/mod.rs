//! Live keyboard-state character translation.
//!
//! The production [`CharacterTranslator`] implementation lives here. It is
//! inherently stateful from the process's point of view: the OS call reads
//! the current layout, modifier state, and dead-key buffer, so identical
//! inputs can translate differently across calls. Tests never use this
//! module – they inject the deterministic translators from `hookmon-core`.
//!
//! [`CharacterTranslator`]: hookmon_core::CharacterTranslator

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "windows")]
pub use windows::LiveKeyboardTranslator;
