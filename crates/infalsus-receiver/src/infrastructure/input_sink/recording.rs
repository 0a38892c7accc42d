//! Recording input sink for tests.
//!
//! # Why a recording sink?
//!
//! The real sinks (`WindowsInputSink`, `X11InputSink`) make OS API calls that
//! need a desktop session, actually move the cursor or press keys on the test
//! machine, and cannot be observed from Rust test code.
//!
//! The `RecordingInputSink` replaces all OS calls with in-memory recording.
//! Each injected event is pushed into a `Mutex<Vec<...>>` so that assertions
//! can inspect exactly what was emitted and in what order.  The environment
//! it reports (cursor position, screen height) is fixed at construction.
//!
//! # Usage in tests
//!
//! ```ignore
//! let sink = Arc::new(RecordingInputSink { cursor: Some((0, 540)), ..Default::default() });
//! let synth = InputSynthesizer::new(Arc::clone(&sink), SynthesizerOptions::default());
//!
//! synth.apply(&decode(b"A0.5"));
//!
//! assert_eq!(*sink.absolute_moves.lock().unwrap(), vec![(32767, 32767)]);
//! ```

use std::sync::Mutex;

use crate::application::synthesize_input::{InputSink, SinkError};

/// A sink that records all calls without performing OS API calls.
pub struct RecordingInputSink {
    /// Records each `(dx, dy)` passed to `move_relative`.
    pub relative_moves: Mutex<Vec<(i32, i32)>>,
    /// Records each normalized `(x, y)` passed to `move_absolute`.
    pub absolute_moves: Mutex<Vec<(i32, i32)>>,
    /// Records each `(scan_code, is_down)` passed to `send_key_event`.
    pub key_events: Mutex<Vec<(u16, bool)>>,
    /// Reported pointer position; `None` makes the query fail.
    pub cursor: Option<(i32, i32)>,
    /// Reported primary screen height.
    pub screen_height: i32,
    /// When `true`, every injection returns `SinkError::Platform`.
    pub should_fail: bool,
}

impl Default for RecordingInputSink {
    /// A 1920x1080 screen with the pointer in its centre.
    fn default() -> Self {
        Self {
            relative_moves: Mutex::new(Vec::new()),
            absolute_moves: Mutex::new(Vec::new()),
            key_events: Mutex::new(Vec::new()),
            cursor: Some((960, 540)),
            screen_height: 1080,
            should_fail: false,
        }
    }
}

impl RecordingInputSink {
    /// Creates a sink with the default environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of injected events of every kind.
    pub fn event_count(&self) -> usize {
        lock_len(&self.relative_moves) + lock_len(&self.absolute_moves) + lock_len(&self.key_events)
    }

    fn check_fail(&self) -> Result<(), SinkError> {
        if self.should_fail {
            return Err(SinkError::Platform("recording sink failure".into()));
        }
        Ok(())
    }
}

fn lock_len<T>(records: &Mutex<Vec<T>>) -> usize {
    records.lock().map(|r| r.len()).unwrap_or(0)
}

fn push<T>(records: &Mutex<Vec<T>>, value: T) -> Result<(), SinkError> {
    records
        .lock()
        .map_err(|_| SinkError::Platform("record lock poisoned".into()))?
        .push(value);
    Ok(())
}

impl InputSink for RecordingInputSink {
    fn move_relative(&self, dx: i32, dy: i32) -> Result<(), SinkError> {
        self.check_fail()?;
        push(&self.relative_moves, (dx, dy))
    }

    fn move_absolute(&self, x: i32, y: i32) -> Result<(), SinkError> {
        self.check_fail()?;
        push(&self.absolute_moves, (x, y))
    }

    fn cursor_position(&self) -> Result<(i32, i32), SinkError> {
        self.cursor.ok_or(SinkError::CursorUnavailable)
    }

    fn primary_screen_height(&self) -> i32 {
        self.screen_height
    }

    fn send_key_event(&self, scan_code: u16, is_down: bool) -> Result<(), SinkError> {
        self.check_fail()?;
        push(&self.key_events, (scan_code, is_down))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_events_in_order() {
        // Arrange
        let sink = RecordingInputSink::new();

        // Act
        sink.move_relative(3, 0).unwrap();
        sink.move_relative(-2, 0).unwrap();
        sink.send_key_event(0x1F, true).unwrap();

        // Assert
        assert_eq!(*sink.relative_moves.lock().unwrap(), vec![(3, 0), (-2, 0)]);
        assert_eq!(*sink.key_events.lock().unwrap(), vec![(0x1F, true)]);
        assert_eq!(sink.event_count(), 3);
    }

    #[test]
    fn test_missing_cursor_fails_query() {
        let sink = RecordingInputSink {
            cursor: None,
            ..Default::default()
        };
        assert!(matches!(sink.cursor_position(), Err(SinkError::CursorUnavailable)));
    }

    #[test]
    fn test_should_fail_rejects_injection_without_recording() {
        let sink = RecordingInputSink {
            should_fail: true,
            ..Default::default()
        };
        assert!(sink.move_absolute(1, 1).is_err());
        assert_eq!(sink.event_count(), 0);
    }
}
