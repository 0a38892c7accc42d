//! The decoded meaning of one datagram.
//!
//! # Wire format (for beginners)
//!
//! Every datagram is a short piece of text.  Its first byte (the *tag*) alone
//! decides what kind of action it carries:
//!
//! | Tag byte | Rest of payload                        | Action            |
//! |----------|----------------------------------------|-------------------|
//! | `A`      | decimal float                          | [`Action::AbsoluteMoveX`] |
//! | `K`      | `D` (down) or anything else (up) + key | [`Action::KeyEvent`] |
//! | other    | the whole payload is a decimal float   | [`Action::RelativeMove`] |
//!
//! There is no length field and no checksum: each datagram is a complete,
//! independently decodable unit.

/// Tag byte of an absolute horizontal move (`"A0.5"`).
pub const TAG_ABSOLUTE: u8 = b'A';

/// Tag byte of a key event (`"KDs"`, `"KUs"`).
pub const TAG_KEY: u8 = b'K';

/// Discriminator byte marking a key press; any other byte means release.
pub const KEY_DOWN: u8 = b'D';

/// Minimum length of a key event payload: tag + discriminator + key.
pub const KEY_EVENT_LEN: usize = 3;

/// A decoded datagram.
///
/// Constructed once per datagram, consumed immediately by the input
/// synthesizer and then dropped.  Nothing is queued or batched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Move the pointer horizontally by a signed pixel delta.  The vertical
    /// delta is always zero in this protocol.
    RelativeMove { delta_x: i32 },

    /// Move the pointer to a fraction of the screen width, keeping the current
    /// vertical position.
    ///
    /// The value is not range-checked: anything outside `[0.0, 1.0]` maps to
    /// an off-screen coordinate unless the synthesizer is told to clamp.
    AbsoluteMoveX { normalized_x: f32 },

    /// Press or release a single character key.
    KeyEvent { key: char, pressed: bool },

    /// The payload matched no recognized framing and must be discarded.
    Invalid,
}

impl Action {
    /// Returns `true` for [`Action::Invalid`].
    pub fn is_invalid(&self) -> bool {
        matches!(self, Action::Invalid)
    }

    /// Short, stable name of the variant for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::RelativeMove { .. } => "relative_move",
            Action::AbsoluteMoveX { .. } => "absolute_move_x",
            Action::KeyEvent { .. } => "key_event",
            Action::Invalid => "invalid",
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
