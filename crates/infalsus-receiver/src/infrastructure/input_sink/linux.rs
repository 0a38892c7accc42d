//! Linux X11 input injection via the XTest extension.
//!
//! # What is XTest? (for beginners)
//!
//! XTest is an X11 protocol extension that lets a process synthesize keyboard
//! and mouse events as if the user had physically interacted with the
//! hardware.  The receiving application cannot tell them apart from real input.
//!
//! The functions used here are:
//! - `XTestFakeRelativeMotionEvent(display, -1, dx, dy, delay)`: relative move
//!   on the current screen (`-1`).
//! - `XTestFakeMotionEvent(display, screen, x, y, delay)`: absolute move in
//!   pixels.
//! - `XTestFakeKeyEvent(display, keycode, is_press, delay)`: key press or
//!   release.
//!
//! # Coordinates
//!
//! The synthesizer hands over absolute targets in the 0–65535 normalized
//! space; they are mapped back to pixels on the default screen here.
//!
//! # Key codes
//!
//! `XTestFakeKeyEvent` takes an X11 *keycode*.  On the evdev driver every
//! keycode is the Linux input key code plus 8, and the Linux key codes of the
//! main keyboard block equal the set-1 scan codes, so:
//! ```text
//! scan code (set 1) + 8 → X11 keycode
//! ```
//!
//! # Permissions
//!
//! The process needs access to the X display named by `DISPLAY`.  If it cannot
//! be opened, or the server lacks XTest, [`X11InputSink::open`] fails and the
//! receiver exits at startup.

use std::ffi::c_int;
use std::ptr;
use std::sync::Mutex;

use infalsus_core::AbsolutePoint;
use x11::{xlib, xtest};

use crate::application::synthesize_input::{InputSink, SinkError};

/// Offset between evdev key codes and X11 keycodes.
const EVDEV_KEYCODE_OFFSET: u32 = 8;

/// Passing `CurrentTime` (0) as the delay injects the event immediately.
const NO_DELAY: std::os::raw::c_ulong = 0;

/// Owned connection to the X server.
struct DisplayHandle(*mut xlib::Display);

// SAFETY: the pointer is only dereferenced by Xlib while the sink's mutex is
// held, so the connection is never used from two threads at once.
unsafe impl Send for DisplayHandle {}

/// Linux X11/XTest input sink.
pub struct X11InputSink {
    display: Mutex<DisplayHandle>,
}

impl X11InputSink {
    /// Connects to the X display named by `DISPLAY` and checks for XTest.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Unavailable`] if the display cannot be opened or
    /// the server does not support the XTest extension.
    pub fn open() -> Result<Self, SinkError> {
        // SAFETY: a null name selects the display from the DISPLAY variable
        let display = unsafe { xlib::XOpenDisplay(ptr::null()) };
        if display.is_null() {
            let name = std::env::var("DISPLAY").unwrap_or_else(|_| "<unset>".to_string());
            return Err(SinkError::Unavailable(format!("XOpenDisplay failed; DISPLAY={name}")));
        }

        let (mut event_base, mut error_base, mut major, mut minor) = (0, 0, 0, 0);
        // SAFETY: display is a live connection and all out-pointers are valid
        let has_xtest = unsafe {
            xtest::XTestQueryExtension(display, &mut event_base, &mut error_base, &mut major, &mut minor)
        };
        if has_xtest == 0 {
            // SAFETY: display was opened above and is not used afterwards
            unsafe { xlib::XCloseDisplay(display) };
            return Err(SinkError::Unavailable("X server lacks the XTest extension".into()));
        }

        tracing::debug!("XTest {major}.{minor} available");
        Ok(Self {
            display: Mutex::new(DisplayHandle(display)),
        })
    }

    fn with_display<T>(&self, f: impl FnOnce(*mut xlib::Display) -> T) -> Result<T, SinkError> {
        let guard = self
            .display
            .lock()
            .map_err(|_| SinkError::Platform("X display lock poisoned".into()))?;
        Ok(f(guard.0))
    }

    /// Runs an XTest request and flushes it to the server.
    fn inject(
        &self,
        what: &str,
        request: impl FnOnce(*mut xlib::Display) -> c_int,
    ) -> Result<(), SinkError> {
        let status = self.with_display(|display| {
            let status = request(display);
            // SAFETY: display is a live connection guarded by the mutex
            unsafe { xlib::XFlush(display) };
            status
        })?;
        if status == 0 {
            return Err(SinkError::Platform(format!("{what} rejected by the X server")));
        }
        Ok(())
    }
}

impl Drop for X11InputSink {
    fn drop(&mut self) {
        if let Ok(handle) = self.display.get_mut() {
            // SAFETY: the connection is owned by this sink and closed once
            unsafe { xlib::XCloseDisplay(handle.0) };
        }
    }
}

impl InputSink for X11InputSink {
    fn move_relative(&self, dx: i32, dy: i32) -> Result<(), SinkError> {
        self.inject("XTestFakeRelativeMotionEvent", |display| {
            // SAFETY: display is a live connection guarded by the mutex
            unsafe { xtest::XTestFakeRelativeMotionEvent(display, -1, dx, dy, NO_DELAY) }
        })
    }

    fn move_absolute(&self, x: i32, y: i32) -> Result<(), SinkError> {
        self.inject("XTestFakeMotionEvent", |display| {
            // SAFETY: display is a live connection guarded by the mutex
            unsafe {
                let screen = xlib::XDefaultScreen(display);
                let width = xlib::XDisplayWidth(display, screen);
                let height = xlib::XDisplayHeight(display, screen);
                let (px, py) = AbsolutePoint { x, y }.to_pixels(width, height);
                xtest::XTestFakeMotionEvent(display, screen, px, py, NO_DELAY)
            }
        })
    }

    fn cursor_position(&self) -> Result<(i32, i32), SinkError> {
        let position = self.with_display(|display| {
            let (mut root, mut child): (xlib::Window, xlib::Window) = (0, 0);
            let (mut root_x, mut root_y, mut win_x, mut win_y) = (0, 0, 0, 0);
            let mut mask = 0;
            // SAFETY: display is live and every out-pointer refers to a local
            let on_screen = unsafe {
                xlib::XQueryPointer(
                    display,
                    xlib::XDefaultRootWindow(display),
                    &mut root,
                    &mut child,
                    &mut root_x,
                    &mut root_y,
                    &mut win_x,
                    &mut win_y,
                    &mut mask,
                )
            };
            (on_screen != 0).then_some((root_x, root_y))
        })?;
        // False means the pointer is on another screen of this display.
        position.ok_or(SinkError::CursorUnavailable)
    }

    fn primary_screen_height(&self) -> i32 {
        self.with_display(|display| {
            // SAFETY: display is a live connection guarded by the mutex
            unsafe { xlib::XDisplayHeight(display, xlib::XDefaultScreen(display)) }
        })
        .unwrap_or(0)
    }

    fn send_key_event(&self, scan_code: u16, is_down: bool) -> Result<(), SinkError> {
        let keycode = u32::from(scan_code) + EVDEV_KEYCODE_OFFSET;
        self.inject("XTestFakeKeyEvent", |display| {
            // SAFETY: display is a live connection guarded by the mutex
            unsafe { xtest::XTestFakeKeyEvent(display, keycode, c_int::from(is_down), NO_DELAY) }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_row_scan_codes_map_to_evdev_keycodes() {
        // evdev: KEY_S = 31, X keycode 39
        let scan = infalsus_core::KeyMapper::resolve('s').unwrap().scan_code;
        assert_eq!(u32::from(scan) + EVDEV_KEYCODE_OFFSET, 39);
    }

    #[test]
    fn test_open_without_display_reports_unavailable() {
        // Only meaningful on headless machines; with a display the sink opens.
        if std::env::var_os("DISPLAY").is_none() {
            assert!(matches!(X11InputSink::open(), Err(SinkError::Unavailable(_))));
        }
    }
}
