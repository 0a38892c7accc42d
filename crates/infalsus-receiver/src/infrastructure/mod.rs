//! Infrastructure layer for the receiver.
//!
//! Contains OS-facing adapters: input injection APIs, UDP network I/O, and
//! configuration storage.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `infalsus_core`, but MUST NOT be imported by the `application` layer.
//!
//! # Sub-modules
//!
//! - **`input_sink`** – OS-specific implementations of `InputSink`.  The
//!   correct implementation is selected at compile time using
//!   `#[cfg(target_os)]`.  A `RecordingInputSink` is also provided for tests.
//!
//! - **`network`** – The UDP datagram channel and the single-worker receive
//!   loop that frames, decodes and applies each datagram in arrival order.
//!
//! - **`storage`** – TOML configuration file loading.

pub mod input_sink;
pub mod network;
pub mod storage;
