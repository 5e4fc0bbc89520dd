//! `ToUnicode`-backed character translation.
//!
//! # Safety
//!
//! This module uses `unsafe` code exclusively for Windows API FFI calls.
//! All `unsafe` blocks are annotated with `// SAFETY:` comments.

#![cfg(target_os = "windows")]

use hookmon_core::CharacterTranslator;
use windows::Win32::UI::Input::KeyboardAndMouse::{GetKeyboardState, ToUnicode};

/// Translates key notifications through the live keyboard layout and state.
///
/// Consults `GetKeyboardState` for the modifier snapshot, then `ToUnicode`
/// for the layout translation. Dead keys are a genuine side effect of the
/// call: translating one primes the OS dead-key buffer exactly as normal
/// message processing would. That matches the behaviour a hook-based
/// monitor observes and is deliberately left as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveKeyboardTranslator;

impl LiveKeyboardTranslator {
    pub fn new() -> Self {
        Self
    }
}

impl CharacterTranslator for LiveKeyboardTranslator {
    fn translate(&self, vk_code: u32, scan_code: u32, state_flags: u32) -> Option<char> {
        let mut key_state = [0u8; 256];
        // SAFETY: GetKeyboardState fills exactly 256 bytes.
        unsafe { GetKeyboardState(&mut key_state) }.ok()?;

        let mut buffer = [0u16; 8];
        // SAFETY: both buffers outlive the call; lengths are passed via the
        // slice parameters.
        let produced = unsafe {
            ToUnicode(
                vk_code,
                scan_code,
                Some(&key_state),
                &mut buffer,
                state_flags,
            )
        };

        // Exactly one code unit is a character. Zero means no mapping, a
        // negative count is a dead key, and two or more units (ligatures,
        // surrogate pairs) have no single-character representation.
        if produced != 1 {
            return None;
        }
        char::from_u32(u32::from(buffer[0]))
    }
}
