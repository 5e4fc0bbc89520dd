//! Event dispatch: the consumer loop and subscriber registry.
//!
//! [`InputMonitor`] is the piece host applications talk to. It receives raw
//! payloads from a [`HookEventSource`], decodes each one exactly once, and
//! raises the result to registered subscribers. Decoding is synchronous
//! call-and-return on the consumer thread: one notification runs to
//! completion before the next is considered.
//!
//! Subscribers receive a mutable args value carrying the decoded event and a
//! `handled` flag. Setting the flag stops propagation to later subscribers,
//! and a handled key-down additionally suppresses the key-press notification
//! for the same raw message – the convention desktop event systems use.
//!
//! # Architecture
//!
//! The monitor depends only on the [`HookEventSource`] and
//! [`CharacterTranslator`] traits; both are injected, making the whole
//! dispatch path unit-testable with the mock source and a static layout.

use hookmon_core::{
    decode_key_press, decode_key_stroke, decode_mouse, CharacterTranslator, KeyAction,
    KeyPressEvent, KeyStrokeEvent, KeyboardPayload, MouseEvent, MouseEventKind, MousePayload,
};
use tracing::debug;

use crate::config::MonitorConfig;
use crate::hook::{HookError, HookEventSource, RawHookEvent};

pub mod click;

pub use click::ClickTracker;

/// Args raised to key-press subscribers. Always carries a character event;
/// non-character classifications are filtered before dispatch.
#[derive(Debug)]
pub struct KeyPressArgs {
    pub event: KeyPressEvent,
    /// Set to `true` to stop propagation to later subscribers.
    pub handled: bool,
}

/// Args raised to key-down/key-up subscribers.
#[derive(Debug)]
pub struct KeyStrokeArgs {
    pub event: KeyStrokeEvent,
    /// Set to `true` to stop propagation; on a key-down this also suppresses
    /// the key-press notification for the same raw message.
    pub handled: bool,
}

/// Args raised to mouse subscribers.
#[derive(Debug)]
pub struct MouseArgs {
    pub event: MouseEvent,
    /// Click number for button-down events (1 or 2), 0 otherwise.
    pub clicks: u8,
    /// Set to `true` to stop propagation to later subscribers.
    pub handled: bool,
}

type KeyStrokeSubscriber = Box<dyn FnMut(&mut KeyStrokeArgs) + Send>;
type KeyPressSubscriber = Box<dyn FnMut(&mut KeyPressArgs) + Send>;
type MouseSubscriber = Box<dyn FnMut(&mut MouseArgs) + Send>;

/// The input monitor: decodes raw hook payloads and raises them to subscribers.
pub struct InputMonitor {
    translator: Box<dyn CharacterTranslator + Send>,
    key_down: Vec<KeyStrokeSubscriber>,
    key_up: Vec<KeyStrokeSubscriber>,
    key_press: Vec<KeyPressSubscriber>,
    mouse: Vec<MouseSubscriber>,
    raise_mouse_moves: bool,
    clicks: ClickTracker,
}

impl InputMonitor {
    /// Creates a monitor with default options (mouse moves raised, OS-default
    /// double-click timing).
    pub fn new(translator: Box<dyn CharacterTranslator + Send>) -> Self {
        Self {
            translator,
            key_down: Vec::new(),
            key_up: Vec::new(),
            key_press: Vec::new(),
            mouse: Vec::new(),
            raise_mouse_moves: true,
            clicks: ClickTracker::default(),
        }
    }

    /// Creates a monitor configured from a [`MonitorConfig`].
    pub fn from_config(translator: Box<dyn CharacterTranslator + Send>, config: &MonitorConfig) -> Self {
        let mut monitor = Self::new(translator);
        monitor.raise_mouse_moves = config.monitor.raise_mouse_moves;
        monitor.clicks = ClickTracker::new(
            config.double_click.interval_ms,
            config.double_click.slop_px,
        );
        monitor
    }

    // ── Subscription ──────────────────────────────────────────────────────────

    pub fn on_key_down(&mut self, subscriber: impl FnMut(&mut KeyStrokeArgs) + Send + 'static) {
        self.key_down.push(Box::new(subscriber));
    }

    pub fn on_key_up(&mut self, subscriber: impl FnMut(&mut KeyStrokeArgs) + Send + 'static) {
        self.key_up.push(Box::new(subscriber));
    }

    /// Subscribes to character events. Non-character classifications are
    /// never raised; the `is_non_char` flag is the sole filter.
    pub fn on_key_press(&mut self, subscriber: impl FnMut(&mut KeyPressArgs) + Send + 'static) {
        self.key_press.push(Box::new(subscriber));
    }

    pub fn on_mouse(&mut self, subscriber: impl FnMut(&mut MouseArgs) + Send + 'static) {
        self.mouse.push(Box::new(subscriber));
    }

    // ── Dispatch ──────────────────────────────────────────────────────────────

    /// Decodes and dispatches one keyboard notification.
    pub fn dispatch_keyboard(&mut self, payload: &KeyboardPayload) {
        let mut suppress_press = false;

        if let Some(stroke) = decode_key_stroke(payload) {
            let mut args = KeyStrokeArgs {
                event: stroke,
                handled: false,
            };
            match stroke.action {
                KeyAction::Down => {
                    raise(&mut self.key_down, &mut args);
                    suppress_press = args.handled;
                }
                KeyAction::Up => raise(&mut self.key_up, &mut args),
            }
        }

        if suppress_press {
            debug!("key-press suppressed by a handled key-down");
            return;
        }

        let press = decode_key_press(payload, self.translator.as_ref());
        if !press.is_non_char() {
            let mut args = KeyPressArgs {
                event: press,
                handled: false,
            };
            raise(&mut self.key_press, &mut args);
        }
    }

    /// Decodes and dispatches one mouse notification.
    pub fn dispatch_mouse(&mut self, payload: &MousePayload) {
        let Some(event) = decode_mouse(payload) else {
            return;
        };

        if event.kind == MouseEventKind::Move && !self.raise_mouse_moves {
            return;
        }

        let clicks = match event.kind {
            MouseEventKind::ButtonDown(button) => {
                self.clicks.register(button, event.x, event.y, event.time_ms)
            }
            _ => 0,
        };

        let mut args = MouseArgs {
            event,
            clicks,
            handled: false,
        };
        raise(&mut self.mouse, &mut args);
    }

    /// Runs the consumer loop: starts the source and dispatches every raw
    /// event until the source stops and its channel closes.
    pub fn run(&mut self, source: &dyn HookEventSource) -> Result<(), HookError> {
        let receiver = source.start()?;
        for raw in receiver.iter() {
            match raw {
                RawHookEvent::Keyboard(payload) => self.dispatch_keyboard(&payload),
                RawHookEvent::Mouse(payload) => self.dispatch_mouse(&payload),
            }
        }
        Ok(())
    }
}

/// Raises args to each subscriber in registration order, stopping at the
/// first one that sets `handled`.
fn raise<A>(subscribers: &mut [Box<dyn FnMut(&mut A) + Send>], args: &mut A)
where
    A: Handled,
{
    for subscriber in subscribers {
        subscriber(args);
        if args.is_handled() {
            break;
        }
    }
}

/// Internal capability: every args type exposes its `handled` flag to the
/// propagation loop.
trait Handled {
    fn is_handled(&self) -> bool;
}

impl Handled for KeyPressArgs {
    fn is_handled(&self) -> bool {
        self.handled
    }
}

impl Handled for KeyStrokeArgs {
    fn is_handled(&self) -> bool {
        self.handled
    }
}

impl Handled for MouseArgs {
    fn is_handled(&self) -> bool {
        self.handled
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hook::mock::MockHookEventSource;
    use hookmon_core::{payload::wm, translate::StaticLayoutTranslator, MouseButton};
    use std::sync::{Arc, Mutex};

    fn monitor() -> InputMonitor {
        InputMonitor::new(Box::new(StaticLayoutTranslator::new()))
    }

    fn global_key(message: u32, vk_code: u32) -> KeyboardPayload {
        KeyboardPayload::Global {
            message,
            vk_code,
            scan_code: 0x1E,
            flags: 0,
            time_ms: 0,
        }
    }

    fn global_mouse(message: u32, x: i32, y: i32, time_ms: u32) -> MousePayload {
        MousePayload::Global {
            message,
            x,
            y,
            mouse_data: 0,
            time_ms,
        }
    }

    // ── Keyboard dispatch ─────────────────────────────────────────────────────

    #[test]
    fn test_key_down_raises_stroke_and_press() {
        // Arrange
        let mut monitor = monitor();
        let strokes = Arc::new(Mutex::new(Vec::new()));
        let presses = Arc::new(Mutex::new(Vec::new()));
        let strokes_rec = Arc::clone(&strokes);
        let presses_rec = Arc::clone(&presses);
        monitor.on_key_down(move |args| strokes_rec.lock().unwrap().push(args.event));
        monitor.on_key_press(move |args| presses_rec.lock().unwrap().push(args.event));

        // Act
        monitor.dispatch_keyboard(&global_key(wm::WM_KEYDOWN, 0x41));

        // Assert
        assert_eq!(strokes.lock().unwrap().len(), 1);
        let presses = presses.lock().unwrap();
        assert_eq!(presses.len(), 1);
        assert_eq!(presses[0].character(), 'a');
    }

    #[test]
    fn test_key_up_raises_stroke_but_no_press() {
        // Arrange
        let mut monitor = monitor();
        let ups = Arc::new(Mutex::new(0u32));
        let presses = Arc::new(Mutex::new(0u32));
        let ups_rec = Arc::clone(&ups);
        let presses_rec = Arc::clone(&presses);
        monitor.on_key_up(move |_| *ups_rec.lock().unwrap() += 1);
        monitor.on_key_press(move |_| *presses_rec.lock().unwrap() += 1);

        // Act – global key-up is a stroke but never a character
        monitor.dispatch_keyboard(&global_key(wm::WM_KEYUP, 0x41));

        // Assert
        assert_eq!(*ups.lock().unwrap(), 1);
        assert_eq!(*presses.lock().unwrap(), 0);
    }

    #[test]
    fn test_non_char_keys_are_not_raised_as_presses() {
        // Arrange – F1 has no character mapping
        let mut monitor = monitor();
        let presses = Arc::new(Mutex::new(0u32));
        let presses_rec = Arc::clone(&presses);
        monitor.on_key_press(move |_| *presses_rec.lock().unwrap() += 1);

        // Act
        monitor.dispatch_keyboard(&global_key(wm::WM_KEYDOWN, 0x70));

        // Assert
        assert_eq!(*presses.lock().unwrap(), 0);
    }

    #[test]
    fn test_handled_flag_stops_propagation() {
        // Arrange – first subscriber handles, second must not run
        let mut monitor = monitor();
        let second_ran = Arc::new(Mutex::new(false));
        let second_rec = Arc::clone(&second_ran);
        monitor.on_key_press(|args| args.handled = true);
        monitor.on_key_press(move |_| *second_rec.lock().unwrap() = true);

        // Act
        monitor.dispatch_keyboard(&global_key(wm::WM_KEYDOWN, 0x41));

        // Assert
        assert!(!*second_ran.lock().unwrap());
    }

    #[test]
    fn test_handled_key_down_suppresses_the_key_press() {
        // Arrange
        let mut monitor = monitor();
        let presses = Arc::new(Mutex::new(0u32));
        let presses_rec = Arc::clone(&presses);
        monitor.on_key_down(|args| args.handled = true);
        monitor.on_key_press(move |_| *presses_rec.lock().unwrap() += 1);

        // Act
        monitor.dispatch_keyboard(&global_key(wm::WM_KEYDOWN, 0x41));

        // Assert
        assert_eq!(*presses.lock().unwrap(), 0);
    }

    // ── Mouse dispatch ────────────────────────────────────────────────────────

    #[test]
    fn test_mouse_move_can_be_filtered_out() {
        // Arrange
        let mut monitor = monitor();
        monitor.raise_mouse_moves = false;
        let events = Arc::new(Mutex::new(0u32));
        let events_rec = Arc::clone(&events);
        monitor.on_mouse(move |_| *events_rec.lock().unwrap() += 1);

        // Act
        monitor.dispatch_mouse(&global_mouse(wm::WM_MOUSEMOVE, 1, 1, 0));
        monitor.dispatch_mouse(&global_mouse(wm::WM_LBUTTONDOWN, 1, 1, 0));

        // Assert – only the button event is raised
        assert_eq!(*events.lock().unwrap(), 1);
    }

    #[test]
    fn test_rapid_button_downs_report_a_double_click() {
        // Arrange
        let mut monitor = monitor();
        let clicks = Arc::new(Mutex::new(Vec::new()));
        let clicks_rec = Arc::clone(&clicks);
        monitor.on_mouse(move |args| {
            if let MouseEventKind::ButtonDown(MouseButton::Left) = args.event.kind {
                clicks_rec.lock().unwrap().push(args.clicks);
            }
        });

        // Act
        monitor.dispatch_mouse(&global_mouse(wm::WM_LBUTTONDOWN, 5, 5, 100));
        monitor.dispatch_mouse(&global_mouse(wm::WM_LBUTTONUP, 5, 5, 150));
        monitor.dispatch_mouse(&global_mouse(wm::WM_LBUTTONDOWN, 5, 5, 200));

        // Assert
        assert_eq!(*clicks.lock().unwrap(), vec![1, 2]);
    }

    // ── End-to-end through the mock source ────────────────────────────────────

    #[test]
    fn test_run_drains_the_source_and_returns_on_stop() {
        // Arrange
        let source = MockHookEventSource::new();
        source.inject(RawHookEvent::Keyboard(global_key(wm::WM_KEYDOWN, 0x48)));
        source.inject(RawHookEvent::Keyboard(global_key(wm::WM_KEYUP, 0x48)));
        source.inject(RawHookEvent::Mouse(global_mouse(wm::WM_MOUSEMOVE, 3, 4, 1)));
        source.stop();

        let mut monitor = monitor();
        let presses = Arc::new(Mutex::new(String::new()));
        let moves = Arc::new(Mutex::new(0u32));
        let presses_rec = Arc::clone(&presses);
        let moves_rec = Arc::clone(&moves);
        monitor.on_key_press(move |args| presses_rec.lock().unwrap().push(args.event.character()));
        monitor.on_mouse(move |args| {
            if args.event.kind == MouseEventKind::Move {
                *moves_rec.lock().unwrap() += 1;
            }
        });

        // Act – the closed channel ends the loop after the buffered events
        monitor.run(&source).expect("run should succeed");

        // Assert
        assert_eq!(*presses.lock().unwrap(), "h");
        assert_eq!(*moves.lock().unwrap(), 1);
    }
}
