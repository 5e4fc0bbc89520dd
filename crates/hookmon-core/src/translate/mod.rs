//! The character translation seam.
//!
//! Turning a (virtual key, scan code, flags) triple into a character is the
//! one step of key-press decoding that cannot be pure: the OS facility
//! consults the current keyboard layout, the live modifier state, and the
//! dead-key buffer. Two identical calls may return different results if the
//! user toggled a modifier in between – an accepted characteristic of the
//! platform API, deliberately preserved rather than papered over.
//!
//! Modelling the facility as a trait keeps that statefulness out of the
//! decoder: production injects the `ToUnicode`-backed implementation from
//! `hookmon-win`, tests inject [`StaticLayoutTranslator`] or a mockall mock.

pub mod static_layout;

pub use static_layout::StaticLayoutTranslator;

/// Capability for translating one key notification into a character.
///
/// Contract: `Some(char)` iff the keyboard-state translation produced exactly
/// one code unit. `None` covers every failure mode – no mapping for the key,
/// a dead-key (combining) result, a multi-unit result, or an OS call failure.
/// The distinction is irrelevant to callers: all of them classify the
/// notification as non-character.
#[cfg_attr(test, mockall::automock)]
pub trait CharacterTranslator {
    /// Translates a key notification using the current keyboard layout and state.
    fn translate(&self, vk_code: u32, scan_code: u32, state_flags: u32) -> Option<char>;
}
