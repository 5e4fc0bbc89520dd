//! Keyboard payload decoding: character classification and key strokes.
//!
//! The application-hook form packs its state into the flags word of the
//! original message:
//!
//! ```text
//! bit 31  transition state      1 = key is being released
//! bit 30  previous key state    1 = key was down before this message
//! bit 24  extended key          right-side modifiers, numpad Enter, arrows
//! bits 16–23  hardware scan code
//! bits 0–15   repeat count
//! ```
//!
//! The global-hook form arrives with those fields already broken out, so the
//! only decision on that path is which message identifiers to translate.

use tracing::trace;

use crate::event::{KeyAction, KeyPressEvent, KeyStrokeEvent};
use crate::payload::{wm, KeyboardPayload};
use crate::translate::CharacterTranslator;

/// Bit 30: the key was down before this message was sent.
const MASK_WAS_KEY_DOWN: u32 = 0x4000_0000;
/// Bit 31: the key is being released.
const MASK_KEY_RELEASED: u32 = 0x8000_0000;
/// Bits 16–23: hardware scan code.
const MASK_SCAN_CODE: u32 = 0x00FF_0000;
/// Bit 24: extended-key flag.
const MASK_EXTENDED: u32 = 0x0100_0000;

const SCAN_CODE_SHIFT: u32 = 16;

/// `KBDLLHOOKSTRUCT.flags` bit 0: extended key on the global path.
const LLKHF_EXTENDED: u32 = 0x01;

/// Decodes one keyboard notification into its character classification.
///
/// The application-hook path requires a usable transition state (bit 30 or
/// bit 31) before attempting translation; the global-hook path translates
/// key-down messages only. Both paths share the translation step: exactly
/// one code unit from `translator` is a character, anything else is the
/// non-character classification.
///
/// This is a classification, not a fallible operation – every input maps to
/// a [`KeyPressEvent`], and the `is_non_char` flag is the sole signal.
pub fn decode_key_press(
    payload: &KeyboardPayload,
    translator: &dyn CharacterTranslator,
) -> KeyPressEvent {
    match *payload {
        KeyboardPayload::Application { vk_code, flags } => {
            let was_key_down = flags & MASK_WAS_KEY_DOWN != 0;
            let is_key_released = flags & MASK_KEY_RELEASED != 0;

            // Neither bit set: the message carries no usable transition
            // state, so there is nothing to translate.
            if !was_key_down && !is_key_released {
                trace!(vk_code, "app-hook message without transition state");
                return KeyPressEvent::non_char();
            }

            // The app-hook form has no live flag-state field; translation
            // runs with state flags 0.
            translate_one(translator, vk_code, extract_scan_code(flags), 0)
        }
        KeyboardPayload::Global {
            message,
            vk_code,
            scan_code,
            flags,
            ..
        } => {
            // Only plain key-down messages produce characters on the global
            // path; WM_SYSKEYDOWN carries Alt-modified strokes.
            if message != wm::WM_KEYDOWN {
                trace!(message, vk_code, "global hook message is not key-down");
                return KeyPressEvent::non_char();
            }

            translate_one(translator, vk_code, scan_code, flags)
        }
    }
}

/// Decodes one keyboard notification into a key-down/key-up stroke.
///
/// Returns `None` for global-hook messages that are neither a key press nor
/// a key release. The application-hook form always classifies: bit 31 clear
/// means a press (first press or auto-repeat), set means a release.
pub fn decode_key_stroke(payload: &KeyboardPayload) -> Option<KeyStrokeEvent> {
    match *payload {
        KeyboardPayload::Application { vk_code, flags } => {
            let action = if flags & MASK_KEY_RELEASED != 0 {
                KeyAction::Up
            } else {
                KeyAction::Down
            };
            Some(KeyStrokeEvent {
                vk_code,
                scan_code: extract_scan_code(flags),
                action,
                is_extended: flags & MASK_EXTENDED != 0,
                time_ms: 0,
            })
        }
        KeyboardPayload::Global {
            message,
            vk_code,
            scan_code,
            flags,
            time_ms,
        } => {
            let action = match message {
                wm::WM_KEYDOWN | wm::WM_SYSKEYDOWN => KeyAction::Down,
                wm::WM_KEYUP | wm::WM_SYSKEYUP => KeyAction::Up,
                _ => {
                    trace!(message, "global hook message is not a key stroke");
                    return None;
                }
            };
            Some(KeyStrokeEvent {
                vk_code,
                scan_code,
                action,
                is_extended: flags & LLKHF_EXTENDED != 0,
                time_ms,
            })
        }
    }
}

/// Extracts the scan code from bits 16–23 of an application-hook flags word.
///
/// The mask confines the shifted value to one byte, so narrowing can never
/// overflow; the assertion documents that contract in test builds.
fn extract_scan_code(flags: u32) -> u32 {
    let scan_code = (flags & MASK_SCAN_CODE) >> SCAN_CODE_SHIFT;
    debug_assert!(scan_code <= 0xFF, "scan code mask must confine the value to one byte");
    scan_code
}

/// Shared translation step: exactly one code unit is a character, anything
/// else (no units, dead key, multiple units, call failure) is non-character.
fn translate_one(
    translator: &dyn CharacterTranslator,
    vk_code: u32,
    scan_code: u32,
    state_flags: u32,
) -> KeyPressEvent {
    match translator.translate(vk_code, scan_code, state_flags) {
        Some(character) => KeyPressEvent::from_char(character),
        None => {
            trace!(vk_code, scan_code, "translation produced no character");
            KeyPressEvent::non_char()
        }
    }
}
