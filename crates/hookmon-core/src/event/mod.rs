//! Decoded input event types handed to subscribers.
//!
//! Each value is constructed once per raw hook notification, consumed by the
//! subscriber, and discarded – nothing here is persisted or pooled. All types
//! derive `serde` so host applications can log or replay captured events.

use serde::{Deserialize, Serialize};

/// Result of decoding one keyboard notification into a character.
///
/// Invariant: when [`is_non_char`](Self::is_non_char) is `true` the character
/// is always the NUL sentinel; when `false` the character is whatever the
/// keyboard-state translation produced. The fields are private so the
/// invariant cannot be broken from outside – construct via
/// [`from_char`](Self::from_char) or [`non_char`](Self::non_char).
///
/// "Non-character" is a classification, not an error: function keys, bare
/// modifiers, key-up notifications on the application-hook path, and failed
/// translations all land here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPressEvent {
    character: char,
    is_non_char: bool,
}

impl KeyPressEvent {
    /// Sentinel character carried by every non-character event.
    pub const SENTINEL: char = '\0';

    /// Creates a character event for a successfully translated key.
    pub fn from_char(character: char) -> Self {
        Self {
            character,
            is_non_char: false,
        }
    }

    /// Creates the non-character classification.
    pub fn non_char() -> Self {
        Self {
            character: Self::SENTINEL,
            is_non_char: true,
        }
    }

    /// The translated character, or [`Self::SENTINEL`] for non-character events.
    pub fn character(&self) -> char {
        self.character
    }

    /// `true` when this notification does not correspond to a renderable character.
    pub fn is_non_char(&self) -> bool {
        self.is_non_char
    }
}

/// Whether a key stroke is a press or a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAction {
    Down,
    Up,
}

/// A decoded key-down or key-up notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyStrokeEvent {
    /// Windows Virtual Key code.
    pub vk_code: u32,
    /// Hardware scan code.
    pub scan_code: u32,
    /// Press or release.
    pub action: KeyAction,
    /// `true` for extended keys (right-side modifiers, numpad Enter, arrows).
    pub is_extended: bool,
    /// Milliseconds since system start; 0 on the application-hook path,
    /// which carries no timestamp.
    pub time_ms: u32,
}

/// Mouse button identifier used in [`MouseEventKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    X1,
    X2,
}

/// What a decoded mouse notification describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseEventKind {
    /// The cursor moved to an absolute screen position.
    Move,
    /// A button was pressed.
    ButtonDown(MouseButton),
    /// A button was released.
    ButtonUp(MouseButton),
    /// The vertical wheel was scrolled; positive = away from the user.
    Wheel(i16),
    /// The horizontal wheel was scrolled; positive = right.
    WheelHorizontal(i16),
}

/// A decoded mouse notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    /// Absolute X in virtual screen coordinates (multi-monitor aware).
    pub x: i32,
    /// Absolute Y in virtual screen coordinates.
    pub y: i32,
    /// Milliseconds since system start; 0 on the application-hook path.
    pub time_ms: u32,
}
