//! # infalsus-core
//!
//! Shared library for the Infalsus Touch receiver containing the datagram
//! framing rules, the action decoder, the absolute-coordinate math, and the
//! key translation tables.
//!
//! It has zero dependencies on OS APIs or network sockets, so everything in
//! here can be unit-tested on any machine.
//!
//! # Architecture overview (for beginners)
//!
//! A phone sends tiny text datagrams such as `"12.5"`, `"A0.5"` or `"KDs"` to
//! the receiver over UDP.  The receiver turns each one into a pointer move or
//! a key press on the host computer.
//!
//! This crate (`infalsus-core`) is the pure part of that pipeline:
//!
//! - **`protocol`** – How bytes become meaning.  A received datagram is bounded
//!   and terminated ([`protocol::datagram`]), then decoded into a typed
//!   [`Action`] ([`protocol::codec`]).
//!
//! - **`domain`** – Pointer coordinate math: mapping a horizontal fraction and
//!   the live cursor height into the 0–65535 normalized device space.
//!
//! - **`keymap`** – Translation tables from a key character to a Windows
//!   Virtual Key code and a hardware scan code.

pub mod domain;
pub mod keymap;
pub mod protocol;

pub use domain::coordinates::{AbsolutePoint, NORMALIZED_MAX};
pub use keymap::{KeyMapper, ResolvedKey};
pub use protocol::action::Action;
pub use protocol::codec::decode;
pub use protocol::datagram::{Datagram, MAX_PAYLOAD_SIZE, RECV_BUFFER_SIZE};
