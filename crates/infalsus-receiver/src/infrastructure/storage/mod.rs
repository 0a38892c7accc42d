//! Persistent storage for the receiver.
//!
//! - **`config`** – Loads `AppConfig` from a TOML file in the platform config
//!   directory (or an explicit path), falling back to defaults when absent.

pub mod config;
