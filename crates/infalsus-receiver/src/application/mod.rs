//! Application layer use cases for the receiver.
//!
//! # What use cases does the receiver have?
//!
//! - **`synthesize_input`** – Turns a decoded [`infalsus_core::Action`] into
//!   calls on an [`synthesize_input::InputSink`].  The sink is the capability
//!   through which the host is both queried (cursor position, screen height)
//!   and driven (pointer moves, key events); it is injected at construction
//!   time so tests can substitute fixed values.

pub mod synthesize_input;
