//! Startup failure stages.
//!
//! Each stage that can abort the receiver before the receive loop starts has
//! its own process exit status, so a supervisor script can tell "port in use"
//! apart from "no X display" without parsing log output.

use thiserror::Error;

use crate::application::synthesize_input::SinkError;
use crate::infrastructure::network::ChannelError;
use crate::infrastructure::storage::config::ConfigError;

/// A fatal error raised while bringing the receiver up.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The configuration file or the command-line overrides are unusable.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The platform input API could not be initialised.
    #[error("input backend error: {0}")]
    InputBackend(#[from] SinkError),

    /// The UDP socket could not be bound.
    #[error(transparent)]
    Bind(ChannelError),

    /// The bound socket could not be prepared for receiving.
    #[error(transparent)]
    Socket(ChannelError),
}

impl From<ChannelError> for StartupError {
    fn from(e: ChannelError) -> Self {
        match e {
            ChannelError::BindFailed { .. } => Self::Bind(e),
            ChannelError::SocketSetup { .. } => Self::Socket(e),
        }
    }
}

impl StartupError {
    /// The process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::InputBackend(_) => 3,
            Self::Bind(_) => 4,
            Self::Socket(_) => 5,
        }
    }
}
