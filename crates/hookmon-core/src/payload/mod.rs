//! Raw hook payload types and the system-boundary narrowing constructors.
//!
//! Windows delivers hook data in two shapes. An application-level keyboard
//! hook (`WH_KEYBOARD`) packs everything into the message parameters: the
//! virtual key code travels in `WPARAM` and a bit-packed flags word in the
//! pointer-sized `LPARAM`. A global low-level hook (`WH_KEYBOARD_LL` /
//! `WH_MOUSE_LL`) instead points `LPARAM` at a structured record with the
//! fields broken out.
//!
//! Both shapes are represented here as tagged variants. The pointer-width
//! handling happens exactly once, in the `from_app_message` constructors:
//! the flags word is narrowed to `u32` at this boundary so the decoders in
//! [`crate::decode`] never see a pointer-sized value. The key-message flag
//! layout only uses bits 0–31, so truncating the high half of a 64-bit
//! `LPARAM` loses nothing on either pointer width.
//!
//! Reference: WM_KEYDOWN lParam layout,
//! <https://learn.microsoft.com/windows/win32/inputdev/wm-keydown>

use serde::{Deserialize, Serialize};

/// Windows message identifiers used by the decoders.
///
/// Defined locally so this crate stays free of OS API dependencies; the
/// values are fixed by the Win32 ABI.
pub mod wm {
    pub const WM_KEYDOWN: u32 = 0x0100;
    pub const WM_KEYUP: u32 = 0x0101;
    pub const WM_SYSKEYDOWN: u32 = 0x0104;
    pub const WM_SYSKEYUP: u32 = 0x0105;

    pub const WM_MOUSEMOVE: u32 = 0x0200;
    pub const WM_LBUTTONDOWN: u32 = 0x0201;
    pub const WM_LBUTTONUP: u32 = 0x0202;
    pub const WM_RBUTTONDOWN: u32 = 0x0204;
    pub const WM_RBUTTONUP: u32 = 0x0205;
    pub const WM_MBUTTONDOWN: u32 = 0x0207;
    pub const WM_MBUTTONUP: u32 = 0x0208;
    pub const WM_MOUSEWHEEL: u32 = 0x020A;
    pub const WM_XBUTTONDOWN: u32 = 0x020B;
    pub const WM_XBUTTONUP: u32 = 0x020C;
    pub const WM_MOUSEHWHEEL: u32 = 0x020E;

    /// High word of `mouse_data` identifying the first extra mouse button.
    pub const XBUTTON1: u16 = 0x0001;
    /// High word of `mouse_data` identifying the second extra mouse button.
    pub const XBUTTON2: u16 = 0x0002;
}

/// One raw keyboard hook notification, in either of its two delivery shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyboardPayload {
    /// `WH_KEYBOARD` form: the virtual key code from `WPARAM` and the
    /// already-narrowed flags word from `LPARAM`.
    ///
    /// Flag layout: bits 16–23 scan code, bit 24 extended-key, bit 30
    /// previous key state, bit 31 transition state.
    Application { vk_code: u32, flags: u32 },

    /// `WH_KEYBOARD_LL` form: fields read directly from `KBDLLHOOKSTRUCT`,
    /// no bit unpacking required.
    Global {
        /// The hook message identifier (`WM_KEYDOWN`, `WM_KEYUP`, ...),
        /// delivered in `WPARAM` for low-level hooks.
        message: u32,
        vk_code: u32,
        scan_code: u32,
        /// `KBDLLHOOKSTRUCT.flags` (extended/injected/alt-down/up bits).
        flags: u32,
        /// `KBDLLHOOKSTRUCT.time`, milliseconds since system start.
        time_ms: u32,
    },
}

impl KeyboardPayload {
    /// Builds the application-hook form from raw message parameters.
    ///
    /// This is the single place the pointer-sized `LPARAM` is narrowed: the
    /// low 32 bits are kept regardless of native pointer width, which
    /// preserves every bit the key-message layout defines.
    pub fn from_app_message(wparam: usize, lparam: isize) -> Self {
        Self::Application {
            vk_code: wparam as u32,
            flags: lparam as u32,
        }
    }
}

/// One raw mouse hook notification, in either of its two delivery shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MousePayload {
    /// `WH_MOUSE` form: message identifier from `WPARAM` plus the cursor
    /// position from `MOUSEHOOKSTRUCT`. This shape carries no wheel or
    /// X-button data.
    Application {
        message: u32,
        x: i32,
        y: i32,
        time_ms: u32,
    },

    /// `WH_MOUSE_LL` form: fields read directly from `MSLLHOOKSTRUCT`.
    Global {
        message: u32,
        x: i32,
        y: i32,
        /// `MSLLHOOKSTRUCT.mouseData`: wheel delta or X-button identifier
        /// in the high word, depending on the message.
        mouse_data: u32,
        time_ms: u32,
    },
}

impl MousePayload {
    /// Builds the application-hook form from raw message parameters.
    ///
    /// The caller reads the cursor position out of the `MOUSEHOOKSTRUCT`
    /// that `LPARAM` points to; only the message identifier needs narrowing.
    pub fn from_app_message(wparam: usize, x: i32, y: i32) -> Self {
        Self::Application {
            message: wparam as u32,
            x,
            y,
            time_ms: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_app_message_keeps_low_32_flag_bits() {
        // Arrange – bit 30 and a scan code in bits 16-23
        let flags: u32 = 0x4000_0000 | (0x1E << 16);

        // Act
        let payload = KeyboardPayload::from_app_message(0x41, flags as i32 as isize);

        // Assert
        assert_eq!(
            payload,
            KeyboardPayload::Application {
                vk_code: 0x41,
                flags,
            }
        );
    }

    #[test]
    fn test_narrowing_is_identical_for_both_pointer_widths() {
        // Bit 31 set makes the i32 representation negative; sign extension
        // to 64 bits fills the high half with ones, which narrowing must drop.
        let flags: u32 = 0x8000_0000 | 0x4000_0000 | (0xAB << 16);

        let via_32bit = KeyboardPayload::from_app_message(0x41, flags as i32 as isize);
        let via_64bit = KeyboardPayload::from_app_message(0x41, flags as i64 as isize);

        assert_eq!(via_32bit, via_64bit);
    }

    #[test]
    fn test_mouse_from_app_message_narrows_the_message_id() {
        let payload = MousePayload::from_app_message(wm::WM_LBUTTONDOWN as usize, 10, 20);

        assert_eq!(
            payload,
            MousePayload::Application {
                message: wm::WM_LBUTTONDOWN,
                x: 10,
                y: 20,
                time_ms: 0,
            }
        );
    }
}
