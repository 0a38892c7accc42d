//! Windows input injection via the SendInput API.
//!
//! Pointer moves are injected as hardware-level mouse input rather than with
//! `SetCursorPos`, because many games ignore cursor repositioning but react to
//! `SendInput` events.  Keys are injected by scan code (`KEYEVENTF_SCANCODE`)
//! for the same reason: DirectInput consumers only see scan codes.
//!
//! Key resolution is layout-aware: `VkKeyScanW` finds the Virtual Key for the
//! character on the active keyboard layout, and
//! `MapVirtualKeyW(MAPVK_VK_TO_VSC)` turns it into a scan code.

#![cfg(target_os = "windows")]

use infalsus_core::ResolvedKey;
use windows::Win32::Foundation::POINT;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    MapVirtualKeyW, SendInput, VkKeyScanW, INPUT, INPUT_0, INPUT_KEYBOARD, INPUT_MOUSE,
    KEYBDINPUT, KEYBD_EVENT_FLAGS, KEYEVENTF_KEYUP, KEYEVENTF_SCANCODE, MAPVK_VK_TO_VSC,
    MOUSEEVENTF_ABSOLUTE, MOUSEEVENTF_MOVE, MOUSEINPUT, MOUSE_EVENT_FLAGS, VIRTUAL_KEY,
};
use windows::Win32::UI::WindowsAndMessaging::{GetCursorPos, GetSystemMetrics, SM_CYSCREEN};

use crate::application::synthesize_input::{InputSink, SinkError};

/// Windows implementation of [`InputSink`] using SendInput.
pub struct WindowsInputSink;

impl WindowsInputSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WindowsInputSink {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSink for WindowsInputSink {
    fn move_relative(&self, dx: i32, dy: i32) -> Result<(), SinkError> {
        send_mouse(dx, dy, MOUSEEVENTF_MOVE)
    }

    fn move_absolute(&self, x: i32, y: i32) -> Result<(), SinkError> {
        // MOUSEEVENTF_ABSOLUTE takes normalized coords [0, 65535] on the primary monitor
        send_mouse(x, y, MOUSEEVENTF_MOVE | MOUSEEVENTF_ABSOLUTE)
    }

    fn cursor_position(&self) -> Result<(i32, i32), SinkError> {
        let mut point = POINT::default();
        // SAFETY: point is a valid, writable POINT on the stack
        unsafe { GetCursorPos(&mut point) }.map_err(|_| SinkError::CursorUnavailable)?;
        Ok((point.x, point.y))
    }

    fn primary_screen_height(&self) -> i32 {
        // SAFETY: GetSystemMetrics is always safe to call
        unsafe { GetSystemMetrics(SM_CYSCREEN) }
    }

    fn send_key_event(&self, scan_code: u16, is_down: bool) -> Result<(), SinkError> {
        let mut flags = KEYEVENTF_SCANCODE;
        if !is_down {
            flags |= KEYEVENTF_KEYUP;
        }
        send_key(scan_code, flags)
    }

    fn resolve_key(&self, key: char) -> Option<ResolvedKey> {
        let mut units = [0u16; 2];
        let [unit] = key.encode_utf16(&mut units) else {
            // Characters outside the BMP have no single-key equivalent.
            return None;
        };

        // SAFETY: VkKeyScanW only reads its argument
        let scan = unsafe { VkKeyScanW(*unit) };
        if scan == -1 {
            return None;
        }
        // Low byte is the VK code; the high byte carries shift state, which is not injected.
        let virtual_key = (scan & 0xFF) as u8;

        // SAFETY: MapVirtualKeyW only reads its arguments
        let scan_code = unsafe { MapVirtualKeyW(u32::from(virtual_key), MAPVK_VK_TO_VSC) };
        if scan_code == 0 {
            return None;
        }
        Some(ResolvedKey {
            virtual_key,
            scan_code: scan_code as u16,
        })
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn send_mouse(dx: i32, dy: i32, flags: MOUSE_EVENT_FLAGS) -> Result<(), SinkError> {
    let input = INPUT {
        r#type: INPUT_MOUSE,
        Anonymous: INPUT_0 {
            mi: MOUSEINPUT {
                dx,
                dy,
                mouseData: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    };
    send(input)
}

fn send_key(scan_code: u16, flags: KEYBD_EVENT_FLAGS) -> Result<(), SinkError> {
    let input = INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                // Ignored when KEYEVENTF_SCANCODE is set
                wVk: VIRTUAL_KEY(0),
                wScan: scan_code,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    };
    send(input)
}

fn send(input: INPUT) -> Result<(), SinkError> {
    // SAFETY: input is a valid INPUT structure on the stack
    let inserted = unsafe { SendInput(&[input], std::mem::size_of::<INPUT>() as i32) };
    if inserted == 0 {
        return Err(SinkError::Platform(format!(
            "SendInput rejected the event: {}",
            windows::core::Error::from_win32()
        )));
    }
    Ok(())
}
