//! infalsus-receiver library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does the receiver do? (for beginners)
//!
//! The receiver runs on the computer being controlled.  A phone running the
//! Infalsus Touch app sends it one small UDP datagram per gesture: a
//! horizontal finger movement, an absolute slider position, or a key pad
//! being pressed or released.
//!
//! For every datagram the receiver:
//!
//! 1. Bounds and terminates the received bytes ([`infalsus_core::Datagram`]).
//! 2. Decodes them into an [`infalsus_core::Action`].
//! 3. Replays the action through the platform input API (`SendInput` on
//!    Windows, XTest on Linux) as if a physical mouse or keyboard had been
//!    used.
//!
//! Malformed datagrams are discarded without any reply: the channel is
//! fire-and-forget and the receiver keeps running whatever it is sent.

/// Application layer: the input synthesis use case.
pub mod application;

/// Infrastructure layer: OS input sinks, the UDP channel, and configuration.
pub mod infrastructure;

/// Startup failure stages and their process exit codes.
pub mod startup;
