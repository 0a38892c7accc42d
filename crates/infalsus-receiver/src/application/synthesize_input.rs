//! InputSynthesizer: translates decoded actions into host input events.
//!
//! This use case sits at the application layer and delegates every host
//! interaction to an [`InputSink`] trait object.  The platform-specific
//! implementations are in the infrastructure layer.
//!
//! The synthesizer never fails towards its caller.  A failed environment
//! query, an unresolvable key or a rejected injection only means that this
//! one datagram has no effect; the outcome is reported as a [`Disposition`]
//! for statistics and logged at `trace` level.

use std::sync::Arc;

use infalsus_core::{AbsolutePoint, Action, KeyMapper, ResolvedKey};
use thiserror::Error;
use tracing::trace;

/// Error type for input sink operations.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("platform error: {0}")]
    Platform(String),
    #[error("cursor position unavailable")]
    CursorUnavailable,
    #[error("no key produces {0:?}")]
    UnmappedKey(char),
    #[error("input backend unavailable: {0}")]
    Unavailable(String),
}

/// The host input capability consumed by the synthesizer.
///
/// Each supported OS provides an implementation in the infrastructure layer.
/// Pointer coordinates passed to [`InputSink::move_absolute`] are in the
/// 0–65535 normalized device space.
#[cfg_attr(test, mockall::automock)]
pub trait InputSink: Send + Sync {
    /// Moves the pointer by a pixel delta.
    fn move_relative(&self, dx: i32, dy: i32) -> Result<(), SinkError>;

    /// Moves the pointer to a normalized absolute position.
    fn move_absolute(&self, x: i32, y: i32) -> Result<(), SinkError>;

    /// Returns the current pointer position in pixels.
    fn cursor_position(&self) -> Result<(i32, i32), SinkError>;

    /// Returns the height of the primary screen in pixels.
    ///
    /// May report 0 on a degenerate display configuration.
    fn primary_screen_height(&self) -> i32;

    /// Injects one key event identified by its hardware scan code.
    fn send_key_event(&self, scan_code: u16, is_down: bool) -> Result<(), SinkError>;

    /// Resolves a character to its Virtual Key and scan code.
    ///
    /// Defaults to the portable US-QWERTY tables.
    fn resolve_key(&self, key: char) -> Option<ResolvedKey> {
        KeyMapper::resolve(key)
    }
}

/// What applying one action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The sink was asked to inject an event.
    Emitted,
    /// Nothing to inject (zero delta or invalid payload).
    NoOp,
    /// The action was discarded because a query, lookup or injection failed.
    Dropped,
}

/// Tunables for the synthesizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SynthesizerOptions {
    /// Clamp absolute targets to the 0–65535 range instead of passing
    /// off-screen coordinates through.
    pub clamp_absolute: bool,
}

/// The input synthesis use case.
///
/// Receives decoded actions and dispatches them to the input sink.
pub struct InputSynthesizer {
    sink: Arc<dyn InputSink>,
    options: SynthesizerOptions,
}

impl InputSynthesizer {
    /// Creates a new synthesizer driving the given sink.
    pub fn new(sink: Arc<dyn InputSink>, options: SynthesizerOptions) -> Self {
        Self { sink, options }
    }

    /// Applies one decoded action.
    pub fn apply(&self, action: &Action) -> Disposition {
        match self.try_apply(action) {
            Ok(disposition) => disposition,
            Err(e) => {
                trace!(action = action.kind(), error = %e, "action dropped");
                Disposition::Dropped
            }
        }
    }

    fn try_apply(&self, action: &Action) -> Result<Disposition, SinkError> {
        match *action {
            Action::RelativeMove { delta_x: 0 } => Ok(Disposition::NoOp),
            Action::RelativeMove { delta_x } => {
                self.sink.move_relative(delta_x, 0)?;
                Ok(Disposition::Emitted)
            }
            Action::AbsoluteMoveX { normalized_x } => {
                // Re-read on every event: the real pointer may have moved.
                let (_, cursor_y) = self.sink.cursor_position()?;
                let height = self.sink.primary_screen_height();

                let mut target = AbsolutePoint::from_horizontal_fraction(normalized_x, cursor_y, height);
                if self.options.clamp_absolute {
                    target = target.clamped();
                }
                self.sink.move_absolute(target.x, target.y)?;
                Ok(Disposition::Emitted)
            }
            Action::KeyEvent { key, pressed } => {
                let resolved = self.sink.resolve_key(key).ok_or(SinkError::UnmappedKey(key))?;
                self.sink.send_key_event(resolved.scan_code, pressed)?;
                Ok(Disposition::Emitted)
            }
            Action::Invalid => Ok(Disposition::NoOp),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
