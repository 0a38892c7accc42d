//! Textual decoder turning a datagram payload into an [`Action`].
//!
//! The decoder is a pure function: identical payloads always decode to
//! identical actions, no state is kept between calls, and nothing is logged.
//! Parse failures are an ordinary outcome on an untrusted channel, so they are
//! folded into [`Action::Invalid`] instead of being returned as errors.
//!
//! # Numeric parsing
//!
//! Numbers are parsed the way C's `strtof` does it: leading whitespace is
//! skipped, the longest numeric prefix is taken, and anything after it is
//! ignored.  `"12.5abc"` therefore decodes to a relative move of 12 pixels.

use thiserror::Error;

use crate::protocol::action::{Action, KEY_DOWN, KEY_EVENT_LEN, TAG_ABSOLUTE, TAG_KEY};

/// Why a byte sequence did not yield a number.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NumberError {
    /// No numeric prefix was found after the leading whitespace.
    #[error("no numeric prefix")]
    NoDigits,

    /// The literal is finite but its magnitude does not fit in an `f32`.
    #[error("numeric literal out of range: {0}")]
    OutOfRange(String),
}

/// Decodes one datagram payload.
///
/// - Empty payload → [`Action::Invalid`].
/// - `'A'` + float → [`Action::AbsoluteMoveX`].
/// - `'K'` + discriminator + key (at least 3 bytes) → [`Action::KeyEvent`].
/// - Anything else: the whole payload is a float, truncated toward zero →
///   [`Action::RelativeMove`].
///
/// # Examples
///
/// ```rust
/// use infalsus_core::{decode, Action};
///
/// assert_eq!(decode(b"-7.9"), Action::RelativeMove { delta_x: -7 });
/// assert_eq!(decode(b"A0.5"), Action::AbsoluteMoveX { normalized_x: 0.5 });
/// assert_eq!(decode(b"KDs"), Action::KeyEvent { key: 's', pressed: true });
/// assert_eq!(decode(b"KD"), Action::Invalid);
/// ```
pub fn decode(payload: &[u8]) -> Action {
    match payload.first() {
        None => Action::Invalid,
        Some(&TAG_ABSOLUTE) => match parse_float_prefix(&payload[1..]) {
            Ok(normalized_x) => Action::AbsoluteMoveX { normalized_x },
            Err(_) => Action::Invalid,
        },
        Some(&TAG_KEY) => decode_key(payload),
        Some(_) => match parse_delta_prefix(payload) {
            Ok(value) => Action::RelativeMove {
                delta_x: truncate_to_pixels(value),
            },
            Err(_) => Action::Invalid,
        },
    }
}

/// Parses the longest decimal floating-point prefix of `bytes`.
///
/// Accepted forms after optional leading ASCII whitespace:
///
/// ```text
/// [+-]? ( digits [ '.' digits? ] | '.' digits ) ( [eE] [+-]? digits )?
/// [+-]? ( inf | infinity | nan )          (case-insensitive)
/// ```
///
/// An exponent without digits is not part of the prefix (`"1e"` parses as 1).
///
/// # Errors
///
/// - [`NumberError::NoDigits`] when no numeric prefix is present.
/// - [`NumberError::OutOfRange`] when a finite literal overflows `f32`, or a
///   literal with non-zero digits underflows to zero.
pub fn parse_float_prefix(bytes: &[u8]) -> Result<f32, NumberError> {
    let text = numeric_prefix(bytes)?;
    let value: f32 = text.parse().map_err(|_| NumberError::NoDigits)?;

    if is_special_literal(text) {
        return Ok(value);
    }
    if value.is_infinite() || (value == 0.0 && has_nonzero_mantissa(text)) {
        return Err(NumberError::OutOfRange(text.to_string()));
    }
    Ok(value)
}

/// Parses a numeric prefix like [`parse_float_prefix`], keeping `f64`
/// precision.
///
/// The accepted range is still that of `f32`, but every integer literal that
/// fits an `i32` is represented exactly.
///
/// # Errors
///
/// Same as [`parse_float_prefix`].
pub fn parse_delta_prefix(bytes: &[u8]) -> Result<f64, NumberError> {
    parse_float_prefix(bytes)?;
    let text = numeric_prefix(bytes)?;
    text.parse().map_err(|_| NumberError::NoDigits)
}

/// Converts a pixel delta to an integer, truncating toward zero.
///
/// Out-of-range values saturate at `i32::MIN`/`i32::MAX`; NaN becomes 0.
pub fn truncate_to_pixels(value: f64) -> i32 {
    value as i32
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Non-numeric literals accepted by the parser, longest first.
const SPECIAL_WORDS: [&[u8]; 3] = [b"infinity", b"inf", b"nan"];

/// The numeric prefix of `bytes` after leading whitespace.
fn numeric_prefix(bytes: &[u8]) -> Result<&str, NumberError> {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let rest = &bytes[start..];

    let len = numeric_prefix_len(rest);
    if len == 0 {
        return Err(NumberError::NoDigits);
    }
    // The prefix scanner only accepts ASCII bytes.
    std::str::from_utf8(&rest[..len]).map_err(|_| NumberError::NoDigits)
}

fn decode_key(payload: &[u8]) -> Action {
    if payload.len() < KEY_EVENT_LEN {
        return Action::Invalid;
    }
    Action::KeyEvent {
        // One byte, read as Latin-1; further bytes are ignored.
        key: char::from(payload[2]),
        pressed: payload[1] == KEY_DOWN,
    }
}

/// Length of the numeric prefix of `s` (no leading whitespace), or 0.
fn numeric_prefix_len(s: &[u8]) -> usize {
    let mut i = usize::from(matches!(s.first(), Some(b'+' | b'-')));

    let tail = &s[i..];
    for word in SPECIAL_WORDS {
        if tail.len() >= word.len() && tail[..word.len()].eq_ignore_ascii_case(word) {
            return i + word.len();
        }
    }

    let int_digits = count_digits(&s[i..]);
    i += int_digits;

    let mut frac_digits = 0;
    if s.get(i) == Some(&b'.') {
        frac_digits = count_digits(&s[i + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            i += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    if matches!(s.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(s.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_digits = count_digits(&s[j..]);
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }
    i
}

fn count_digits(s: &[u8]) -> usize {
    s.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn is_special_literal(text: &str) -> bool {
    let unsigned = text.trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf")
        || unsigned.eq_ignore_ascii_case("infinity")
        || unsigned.eq_ignore_ascii_case("nan")
}

fn has_nonzero_mantissa(text: &str) -> bool {
    text.bytes()
        .take_while(|b| !matches!(b, b'e' | b'E'))
        .any(|b| matches!(b, b'1'..=b'9'))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
