//! Domain logic for the receiver.
//!
//! This module contains pure pointer math with no infrastructure dependencies.
//! Code in outer layers (the synthesizer and the OS input sinks) depends on
//! it, never the other way round, so it can be tested on any platform.

/// Normalized absolute pointer coordinates (0–65535 device space).
///
/// See [`coordinates::AbsolutePoint`] for the main type.
pub mod coordinates;
