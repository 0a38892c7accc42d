//! Platform-specific input sink implementations.
//!
//! The correct implementation is selected at compile time via
//! `#[cfg(target_os = ...)]` and constructed through [`native_sink`].

use std::sync::Arc;

use crate::application::synthesize_input::{InputSink, SinkError};

pub mod recording;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "linux")]
pub mod linux;

/// Opens the input sink for the platform this binary was built for.
///
/// # Errors
///
/// Returns [`SinkError::Unavailable`] when the platform input API cannot be
/// reached (no X display, missing XTest) or the platform has no backend.
pub fn native_sink() -> Result<Arc<dyn InputSink>, SinkError> {
    #[cfg(target_os = "windows")]
    {
        Ok(Arc::new(windows::WindowsInputSink::new()))
    }

    #[cfg(target_os = "linux")]
    {
        Ok(Arc::new(linux::X11InputSink::open()?))
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux")))]
    {
        Err(SinkError::Unavailable(format!(
            "no input backend for {}",
            std::env::consts::OS
        )))
    }
}
