//! Windows low-level keyboard and mouse hook implementation.
//!
//! This module installs WH_KEYBOARD_LL and WH_MOUSE_LL hooks using the
//! Windows API. Both hooks share a dedicated Win32 message-loop thread; the
//! callbacks read the hook structs into `hookmon-core` payload values and
//! hand them to the channel, deferring all decoding to the consumer thread.
//!
//! # Safety
//!
//! This module uses `unsafe` code exclusively for Windows API FFI calls.
//! All `unsafe` blocks are annotated with `// SAFETY:` comments.

#![cfg(target_os = "windows")]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::Mutex;
use std::thread;

use hookmon_core::{KeyboardPayload, MousePayload};
use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, GetMessageW, PostThreadMessageW, SetWindowsHookExW,
    UnhookWindowsHookEx, HC_ACTION, HHOOK, KBDLLHOOKSTRUCT, MSG, MSLLHOOKSTRUCT, WH_KEYBOARD_LL,
    WH_MOUSE_LL, WM_QUIT,
};

use super::{HookError, HookEventSource, RawHookEvent};

/// Sender used by the hook callbacks to deliver payloads to the consumer.
/// `Some` exactly while a source is running; cleared by the loop thread on
/// exit so the receiver side observes a closed channel.
static EVENT_SENDER: Mutex<Option<Sender<RawHookEvent>>> = Mutex::new(None);

/// Thread id of the running message-loop thread, 0 when none is running.
/// `stop()` posts WM_QUIT here to end the loop.
static HOOK_THREAD_ID: AtomicU32 = AtomicU32::new(0);

/// Windows low-level hook event source.
///
/// Installs the configured subset of `WH_KEYBOARD_LL` / `WH_MOUSE_LL` and
/// runs a dedicated Win32 message-loop thread. Only one instance may run at
/// a time per process; a second `start()` fails with
/// [`HookError::AlreadyStarted`].
pub struct WindowsHookEventSource {
    keyboard: bool,
    mouse: bool,
}

impl WindowsHookEventSource {
    /// Creates a source that installs both hooks.
    pub fn new() -> Self {
        Self {
            keyboard: true,
            mouse: true,
        }
    }

    /// Creates a source that installs only the selected hooks.
    pub fn with_hooks(keyboard: bool, mouse: bool) -> Self {
        Self { keyboard, mouse }
    }
}

impl Default for WindowsHookEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl HookEventSource for WindowsHookEventSource {
    fn start(&self) -> Result<mpsc::Receiver<RawHookEvent>, HookError> {
        let (tx, rx) = mpsc::channel::<RawHookEvent>();

        {
            let mut guard = EVENT_SENDER
                .lock()
                .map_err(|_| HookError::KeyboardHookInstallFailed("sender lock poisoned".into()))?;
            if guard.is_some() {
                return Err(HookError::AlreadyStarted);
            }
            *guard = Some(tx);
        }

        // Spawn the Win32 message-loop thread that installs and manages the hooks.
        let (keyboard, mouse) = (self.keyboard, self.mouse);
        thread::Builder::new()
            .name("hookmon-hook-loop".to_string())
            .spawn(move || run_hook_message_loop(keyboard, mouse))
            .map_err(|e| HookError::KeyboardHookInstallFailed(e.to_string()))?;

        Ok(rx)
    }

    fn stop(&self) {
        let tid = HOOK_THREAD_ID.load(Ordering::SeqCst);
        if tid != 0 {
            // SAFETY: posting WM_QUIT to the loop thread makes GetMessageW
            // return FALSE, which unwinds the hooks and closes the channel.
            unsafe {
                let _ = PostThreadMessageW(tid, WM_QUIT, WPARAM(0), LPARAM(0));
            }
        } else if let Ok(mut guard) = EVENT_SENDER.lock() {
            // Loop thread never came up; close the channel ourselves.
            *guard = None;
        }
    }
}

/// Entry point for the dedicated Win32 message-loop thread.
fn run_hook_message_loop(keyboard: bool, mouse: bool) {
    // SAFETY: reads the calling thread's own id.
    HOOK_THREAD_ID.store(unsafe { GetCurrentThreadId() }, Ordering::SeqCst);

    // SAFETY: SetWindowsHookExW requires the calling thread to run a message
    // loop, which this thread enters below. Low-level hooks take no module
    // handle.
    let kbd_hook: Option<HHOOK> = keyboard.then(|| unsafe {
        SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_hook_proc), None, 0)
            .expect("WH_KEYBOARD_LL hook installation failed")
    });
    let mouse_hook: Option<HHOOK> = mouse.then(|| unsafe {
        SetWindowsHookExW(WH_MOUSE_LL, Some(mouse_hook_proc), None, 0)
            .expect("WH_MOUSE_LL hook installation failed")
    });

    // Win32 message loop – blocks until WM_QUIT is posted by `stop()`.
    let mut msg = MSG::default();
    // SAFETY: standard Win32 GetMessage/DispatchMessage loop pattern.
    unsafe {
        while GetMessageW(&mut msg, None, 0, 0).as_bool() {
            DispatchMessageW(&msg);
        }
        if let Some(hook) = kbd_hook {
            UnhookWindowsHookEx(hook).ok();
        }
        if let Some(hook) = mouse_hook {
            UnhookWindowsHookEx(hook).ok();
        }
    }

    HOOK_THREAD_ID.store(0, Ordering::SeqCst);
    // Dropping the sender closes the channel, ending the consumer loop.
    if let Ok(mut guard) = EVENT_SENDER.lock() {
        *guard = None;
    }
}

/// Sends one captured payload to the consumer, ignoring channel errors
/// during shutdown races.
fn forward(event: RawHookEvent) {
    if let Ok(guard) = EVENT_SENDER.lock() {
        if let Some(sender) = guard.as_ref() {
            let _ = sender.send(event);
        }
    }
}

/// Low-level keyboard hook callback.
///
/// # Safety
///
/// Called by Windows on the hook message-loop thread. It must return quickly
/// (< ~300ms) to avoid hook removal by the OS, so it only copies struct
/// fields and forwards.
unsafe extern "system" fn keyboard_hook_proc(
    n_code: i32,
    w_param: WPARAM,
    l_param: LPARAM,
) -> LRESULT {
    if n_code != HC_ACTION as i32 {
        // SAFETY: must call CallNextHookEx when n_code < 0.
        return CallNextHookEx(None, n_code, w_param, l_param);
    }

    // SAFETY: l_param points to a KBDLLHOOKSTRUCT when n_code == HC_ACTION.
    let kbs = &*(l_param.0 as *const KBDLLHOOKSTRUCT);

    forward(RawHookEvent::Keyboard(KeyboardPayload::Global {
        message: w_param.0 as u32,
        vk_code: kbs.vkCode,
        scan_code: kbs.scanCode,
        flags: kbs.flags.0,
        time_ms: kbs.time,
    }));

    // SAFETY: forward the event to the next hook in the chain.
    CallNextHookEx(None, n_code, w_param, l_param)
}

/// Low-level mouse hook callback.
///
/// # Safety
///
/// Called by Windows on the hook message-loop thread; must return quickly.
unsafe extern "system" fn mouse_hook_proc(
    n_code: i32,
    w_param: WPARAM,
    l_param: LPARAM,
) -> LRESULT {
    if n_code != HC_ACTION as i32 {
        // SAFETY: must call CallNextHookEx when n_code < 0.
        return CallNextHookEx(None, n_code, w_param, l_param);
    }

    // SAFETY: l_param points to a MSLLHOOKSTRUCT when n_code == HC_ACTION.
    let mhs = &*(l_param.0 as *const MSLLHOOKSTRUCT);

    // Message classification happens in the decoder, not here.
    forward(RawHookEvent::Mouse(MousePayload::Global {
        message: w_param.0 as u32,
        x: mhs.pt.x,
        y: mhs.pt.y,
        mouse_data: mhs.mouseData,
        time_ms: mhs.time,
    }));

    // SAFETY: forward the event to the next hook in the chain.
    CallNextHookEx(None, n_code, w_param, l_param)
}
