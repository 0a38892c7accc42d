//! Bounded datagram framing.
//!
//! The receive buffer has a fixed capacity and the payload is string
//! terminated.  Both rules are applied here, before decoding, so the decoder
//! only ever sees a well-defined byte slice:
//!
//! 1. **Bound**: at most [`MAX_PAYLOAD_SIZE`] bytes of a datagram are kept.
//!    The channel receives into a [`RECV_BUFFER_SIZE`]-byte buffer (one byte
//!    larger) so that an oversized datagram can be told apart from one that
//!    exactly fills the payload; the excess is cut off and the datagram is
//!    flagged as truncated.
//! 2. **Terminate**: the payload ends at the first NUL byte.  `"\0abc"` is an
//!    empty payload and `"KD\0x"` is the two-byte payload `"KD"`.

use tracing::trace;

/// Maximum number of payload bytes honoured per datagram.
pub const MAX_PAYLOAD_SIZE: usize = 1023;

/// Size of the buffer a channel must receive into.
///
/// One byte larger than [`MAX_PAYLOAD_SIZE`] so that overflow is detectable.
pub const RECV_BUFFER_SIZE: usize = MAX_PAYLOAD_SIZE + 1;

/// A received datagram after bounding and termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Datagram<'a> {
    payload: &'a [u8],
    truncated: bool,
}

impl<'a> Datagram<'a> {
    /// Frames the bytes a channel received for one datagram.
    ///
    /// `received` is the filled part of the receive buffer, which may be
    /// longer than [`MAX_PAYLOAD_SIZE`].
    pub fn from_received(received: &'a [u8]) -> Self {
        let truncated = received.len() > MAX_PAYLOAD_SIZE;
        let bounded = &received[..received.len().min(MAX_PAYLOAD_SIZE)];
        if truncated {
            trace!(
                received = received.len(),
                kept = MAX_PAYLOAD_SIZE,
                "datagram exceeds payload capacity; truncating"
            );
        }

        let end = bounded.iter().position(|&b| b == 0).unwrap_or(bounded.len());
        Self {
            payload: &bounded[..end],
            truncated,
        }
    }

    /// The bytes handed to the decoder.
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// `true` when the datagram was longer than [`MAX_PAYLOAD_SIZE`].
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_datagram_is_kept_whole() {
        let d = Datagram::from_received(b"A0.5");
        assert_eq!(d.payload(), b"A0.5");
        assert!(!d.is_truncated());
    }

    #[test]
    fn test_payload_stops_at_first_nul() {
        assert_eq!(Datagram::from_received(b"KD\0x").payload(), b"KD");
        assert_eq!(Datagram::from_received(b"\0abc").payload(), b"");
    }

    #[test]
    fn test_exactly_full_payload_is_not_truncated() {
        // Arrange
        let bytes = vec![b'1'; MAX_PAYLOAD_SIZE];

        // Act
        let d = Datagram::from_received(&bytes);

        // Assert
        assert_eq!(d.payload().len(), MAX_PAYLOAD_SIZE);
        assert!(!d.is_truncated());
    }

    #[test]
    fn test_oversized_datagram_is_truncated_to_capacity() {
        // Arrange
        let bytes = vec![b'9'; RECV_BUFFER_SIZE];

        // Act
        let d = Datagram::from_received(&bytes);

        // Assert
        assert_eq!(d.payload().len(), MAX_PAYLOAD_SIZE);
        assert!(d.is_truncated());
    }

    #[test]
    fn test_nul_beyond_capacity_is_ignored() {
        let mut bytes = vec![b'5'; RECV_BUFFER_SIZE];
        bytes[MAX_PAYLOAD_SIZE] = 0;
        let d = Datagram::from_received(&bytes);
        assert_eq!(d.payload().len(), MAX_PAYLOAD_SIZE);
    }
}
