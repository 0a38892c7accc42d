//! Protocol module containing the action type, the datagram framing rules, and
//! the textual decoder.

pub mod action;
pub mod codec;
pub mod datagram;

pub use action::Action;
pub use codec::{decode, parse_delta_prefix, parse_float_prefix, NumberError};
pub use datagram::{Datagram, MAX_PAYLOAD_SIZE, RECV_BUFFER_SIZE};
