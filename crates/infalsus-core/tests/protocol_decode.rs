//! Integration tests for the infalsus-core decoding pipeline.
//!
//! These tests drive received bytes through the public API exactly as the
//! receiver does: framing with [`Datagram`], decoding with [`decode`], and
//! resolving keys and coordinates from the decoded [`Action`].

use infalsus_core::{
    decode, Action, AbsolutePoint, Datagram, KeyMapper, MAX_PAYLOAD_SIZE, RECV_BUFFER_SIZE,
};

/// Frames `received` and decodes the resulting payload.
fn receive(received: &[u8]) -> Action {
    decode(Datagram::from_received(received).payload())
}

#[test]
fn test_integer_payloads_decode_to_matching_relative_moves() {
    for d in [-1000, -42, -1, 0, 1, 7, 250, 99_999] {
        let payload = d.to_string();
        assert_eq!(
            receive(payload.as_bytes()),
            Action::RelativeMove { delta_x: d },
            "payload {payload:?}"
        );
    }
}

#[test]
fn test_integer_payloads_keep_full_i32_precision() {
    for d in [16_777_217, -16_777_217, 33_554_433, 123_456_789, i32::MAX, i32::MIN + 1, i32::MIN] {
        let payload = d.to_string();
        assert_eq!(
            receive(payload.as_bytes()),
            Action::RelativeMove { delta_x: d },
            "payload {payload:?}"
        );
    }
}

#[test]
fn test_float_payloads_from_phone_clients_truncate() {
    // Shapes produced by the phone's float formatting.
    assert_eq!(receive(b"3.7"), Action::RelativeMove { delta_x: 3 });
    assert_eq!(receive(b"-0.85"), Action::RelativeMove { delta_x: 0 });
    assert_eq!(receive(b"1.25E3"), Action::RelativeMove { delta_x: 1250 });
}

#[test]
fn test_absolute_half_width_targets_32767() {
    // Arrange
    let action = receive(b"A0.5");

    // Act
    let Action::AbsoluteMoveX { normalized_x } = action else {
        panic!("expected an absolute move, got {action:?}");
    };
    let point = AbsolutePoint::from_horizontal_fraction(normalized_x, 300, 1200);

    // Assert
    assert_eq!(point.x, 32767);
    assert_eq!(point.y, ((300.0_f64 / 1200.0) * 65535.0) as i32);
}

#[test]
fn test_absolute_edges() {
    assert_eq!(receive(b"A1.0"), Action::AbsoluteMoveX { normalized_x: 1.0 });
    assert_eq!(receive(b"A0.0"), Action::AbsoluteMoveX { normalized_x: 0.0 });
}

#[test]
fn test_key_payloads_resolve_to_scan_codes() {
    let down = receive(b"KDa");
    let up = receive(b"KUa");

    assert_eq!(down, Action::KeyEvent { key: 'a', pressed: true });
    assert_eq!(up, Action::KeyEvent { key: 'a', pressed: false });
    assert_eq!(KeyMapper::resolve('a').map(|k| k.scan_code), Some(0x1E));
}

#[test]
fn test_malformed_payloads_are_invalid() {
    let payloads: [&[u8]; 7] = [b"", b"KD", b"K", b"Axyz", b"A", b"abc", b"\0KDa"];
    for payload in payloads {
        assert_eq!(receive(payload), Action::Invalid, "payload {payload:?}");
    }
}

#[test]
fn test_nul_terminates_payload_before_decoding() {
    assert_eq!(receive(b"12\0garbage"), Action::RelativeMove { delta_x: 12 });
    assert_eq!(receive(b"KD\0a"), Action::Invalid);
}

#[test]
fn test_oversized_datagram_decodes_its_bounded_prefix() {
    // Arrange: a key event followed by padding far beyond capacity
    let mut bytes = b"KDs".to_vec();
    bytes.resize(RECV_BUFFER_SIZE, b'x');

    // Act
    let datagram = Datagram::from_received(&bytes);

    // Assert
    assert!(datagram.is_truncated());
    assert_eq!(datagram.payload().len(), MAX_PAYLOAD_SIZE);
    assert_eq!(decode(datagram.payload()), Action::KeyEvent { key: 's', pressed: true });
}

#[test]
fn test_decoding_is_pure() {
    let payloads: [&[u8]; 5] = [b"A0.3", b"-12.5", b"KDk", b"junk", b""];

    let first: Vec<Action> = payloads.iter().map(|p| decode(p)).collect();
    let reversed: Vec<Action> = payloads.iter().rev().map(|p| decode(p)).collect();

    let mut reversed_back = reversed;
    reversed_back.reverse();
    assert_eq!(first, reversed_back);
}
