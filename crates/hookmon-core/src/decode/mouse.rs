//! Mouse payload decoding.
//!
//! Maps the mouse hook message identifiers to typed events. Wheel deltas and
//! X-button identifiers travel in the high word of `mouseData`, which only
//! the global (`MSLLHOOKSTRUCT`) form carries; wheel and X-button messages on
//! the application path therefore decode to `None` rather than guessing.

use tracing::trace;

use crate::event::{MouseButton, MouseEvent, MouseEventKind};
use crate::payload::{wm, MousePayload};

/// Decodes one mouse notification into a typed event.
///
/// Returns `None` for message identifiers outside the mouse range and for
/// messages whose data the payload form cannot supply.
pub fn decode_mouse(payload: &MousePayload) -> Option<MouseEvent> {
    let (message, x, y, mouse_data, time_ms) = match *payload {
        MousePayload::Application {
            message,
            x,
            y,
            time_ms,
        } => (message, x, y, None, time_ms),
        MousePayload::Global {
            message,
            x,
            y,
            mouse_data,
            time_ms,
        } => (message, x, y, Some(mouse_data), time_ms),
    };

    let kind = match message {
        wm::WM_MOUSEMOVE => MouseEventKind::Move,
        wm::WM_LBUTTONDOWN => MouseEventKind::ButtonDown(MouseButton::Left),
        wm::WM_LBUTTONUP => MouseEventKind::ButtonUp(MouseButton::Left),
        wm::WM_RBUTTONDOWN => MouseEventKind::ButtonDown(MouseButton::Right),
        wm::WM_RBUTTONUP => MouseEventKind::ButtonUp(MouseButton::Right),
        wm::WM_MBUTTONDOWN => MouseEventKind::ButtonDown(MouseButton::Middle),
        wm::WM_MBUTTONUP => MouseEventKind::ButtonUp(MouseButton::Middle),
        wm::WM_XBUTTONDOWN => MouseEventKind::ButtonDown(x_button(mouse_data?)),
        wm::WM_XBUTTONUP => MouseEventKind::ButtonUp(x_button(mouse_data?)),
        wm::WM_MOUSEWHEEL => MouseEventKind::Wheel(wheel_delta(mouse_data?)),
        wm::WM_MOUSEHWHEEL => MouseEventKind::WheelHorizontal(wheel_delta(mouse_data?)),
        _ => {
            trace!(message, "not a mouse message");
            return None;
        }
    };

    Some(MouseEvent { kind, x, y, time_ms })
}

/// Selects the extra button from the high word of `mouseData`.
fn x_button(mouse_data: u32) -> MouseButton {
    if (mouse_data >> 16) as u16 == wm::XBUTTON1 {
        MouseButton::X1
    } else {
        MouseButton::X2
    }
}

/// Signed wheel delta from the high word of `mouseData`.
///
/// One detent is ±120; positive means away from the user (vertical) or to
/// the right (horizontal).
fn wheel_delta(mouse_data: u32) -> i16 {
    (mouse_data >> 16) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global(message: u32, mouse_data: u32) -> MousePayload {
        MousePayload::Global {
            message,
            x: 640,
            y: 480,
            mouse_data,
            time_ms: 5,
        }
    }

    #[test]
    fn test_move_decodes_with_coordinates() {
        let event = decode_mouse(&global(wm::WM_MOUSEMOVE, 0)).unwrap();

        assert_eq!(event.kind, MouseEventKind::Move);
        assert_eq!((event.x, event.y, event.time_ms), (640, 480, 5));
    }

    #[test]
    fn test_standard_buttons_decode_down_and_up() {
        let cases = [
            (wm::WM_LBUTTONDOWN, MouseEventKind::ButtonDown(MouseButton::Left)),
            (wm::WM_LBUTTONUP, MouseEventKind::ButtonUp(MouseButton::Left)),
            (wm::WM_RBUTTONDOWN, MouseEventKind::ButtonDown(MouseButton::Right)),
            (wm::WM_RBUTTONUP, MouseEventKind::ButtonUp(MouseButton::Right)),
            (wm::WM_MBUTTONDOWN, MouseEventKind::ButtonDown(MouseButton::Middle)),
            (wm::WM_MBUTTONUP, MouseEventKind::ButtonUp(MouseButton::Middle)),
        ];

        for (message, expected) in cases {
            let event = decode_mouse(&global(message, 0)).unwrap();
            assert_eq!(event.kind, expected, "message 0x{message:04X}");
        }
    }

    #[test]
    fn test_x_buttons_select_on_the_high_word() {
        let one = decode_mouse(&global(wm::WM_XBUTTONDOWN, (wm::XBUTTON1 as u32) << 16)).unwrap();
        let two = decode_mouse(&global(wm::WM_XBUTTONUP, (wm::XBUTTON2 as u32) << 16)).unwrap();

        assert_eq!(one.kind, MouseEventKind::ButtonDown(MouseButton::X1));
        assert_eq!(two.kind, MouseEventKind::ButtonUp(MouseButton::X2));
    }

    #[test]
    fn test_wheel_delta_is_sign_extended_from_the_high_word() {
        // -120 (one detent toward the user) encoded in the high word
        let raw = ((-120i16 as u16) as u32) << 16;

        let event = decode_mouse(&global(wm::WM_MOUSEWHEEL, raw)).unwrap();

        assert_eq!(event.kind, MouseEventKind::Wheel(-120));
    }

    #[test]
    fn test_horizontal_wheel_decodes_positive_right() {
        let raw = (120u32) << 16;

        let event = decode_mouse(&global(wm::WM_MOUSEHWHEEL, raw)).unwrap();

        assert_eq!(event.kind, MouseEventKind::WheelHorizontal(120));
    }

    #[test]
    fn test_app_form_decodes_moves_and_buttons() {
        let payload = MousePayload::from_app_message(wm::WM_LBUTTONDOWN as usize, 10, 20);

        let event = decode_mouse(&payload).unwrap();

        assert_eq!(event.kind, MouseEventKind::ButtonDown(MouseButton::Left));
    }

    #[test]
    fn test_app_form_cannot_decode_wheel_or_x_buttons() {
        // MOUSEHOOKSTRUCT has no mouseData field, so these stay unclassified.
        for message in [wm::WM_MOUSEWHEEL, wm::WM_XBUTTONDOWN, wm::WM_XBUTTONUP] {
            let payload = MousePayload::from_app_message(message as usize, 0, 0);
            assert_eq!(decode_mouse(&payload), None, "message 0x{message:04X}");
        }
    }

    #[test]
    fn test_keyboard_messages_are_not_mouse_events() {
        assert_eq!(decode_mouse(&global(wm::WM_KEYDOWN, 0)), None);
    }
}
