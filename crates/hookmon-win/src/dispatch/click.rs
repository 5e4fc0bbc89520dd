//! Double-click synthesis.
//!
//! The raw hook stream only carries button-down/button-up notifications;
//! double-clicks are a windowing concept synthesized from timing. This
//! tracker applies the same rule the OS uses for windows: a second press of
//! the same button within the double-click interval and slop rectangle
//! counts as click number two.
//!
//! Timing uses the hook timestamps (`time_ms`), not wall-clock reads, so
//! synthesis is deterministic for a given event stream.

use hookmon_core::MouseButton;

/// Default double-click interval, matching the OS default of 500ms.
pub const DEFAULT_INTERVAL_MS: u32 = 500;
/// Default slop half-width in pixels, matching the OS default rectangle.
pub const DEFAULT_SLOP_PX: i32 = 4;

#[derive(Debug, Clone, Copy)]
struct LastPress {
    button: MouseButton,
    x: i32,
    y: i32,
    time_ms: u32,
}

/// Stateful click counter for button-down notifications.
#[derive(Debug)]
pub struct ClickTracker {
    interval_ms: u32,
    slop_px: i32,
    last: Option<LastPress>,
}

impl ClickTracker {
    pub fn new(interval_ms: u32, slop_px: i32) -> Self {
        Self {
            interval_ms,
            slop_px,
            last: None,
        }
    }

    /// Registers a button press and returns its click number (1 or 2).
    ///
    /// A press that completes a double-click clears the tracked state, so a
    /// third rapid press starts a new sequence (1, 2, 1, 2, ... – the same
    /// cadence the OS produces).
    pub fn register(&mut self, button: MouseButton, x: i32, y: i32, time_ms: u32) -> u8 {
        if let Some(last) = self.last.take() {
            let in_time = time_ms.wrapping_sub(last.time_ms) <= self.interval_ms;
            let in_slop =
                (x - last.x).abs() <= self.slop_px && (y - last.y).abs() <= self.slop_px;
            if last.button == button && in_time && in_slop {
                return 2;
            }
        }
        self.last = Some(LastPress {
            button,
            x,
            y,
            time_ms,
        });
        1
    }
}

impl Default for ClickTracker {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL_MS, DEFAULT_SLOP_PX)
    }
}
