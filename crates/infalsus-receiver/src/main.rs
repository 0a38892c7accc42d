//! Infalsus Touch receiver entry point.
//!
//! Listens for touch-pad datagrams from the phone app and replays them as
//! native mouse and keyboard input on this machine.
//!
//! # Usage
//!
//! ```text
//! infalsus-receiver [OPTIONS]
//!
//! Options:
//!   --config <PATH>      Config file [default: platform config dir]
//!   --port <PORT>        UDP port to listen on [default: 8888]
//!   --bind <ADDR>        IP address to bind to [default: 0.0.0.0]
//!   --clamp-absolute     Keep absolute moves on screen
//!   --log-level <LEVEL>  error | warn | info | debug | trace
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable                  | Overrides          |
//! |---------------------------|--------------------|
//! | `INFALSUS_CONFIG`         | `--config`         |
//! | `INFALSUS_PORT`           | `--port`           |
//! | `INFALSUS_BIND`           | `--bind`           |
//! | `INFALSUS_CLAMP_ABSOLUTE` | `--clamp-absolute` |
//! | `INFALSUS_LOG`            | `--log-level`      |
//!
//! Command-line and environment values take precedence over the config file,
//! which takes precedence over built-in defaults.  `RUST_LOG`, when set,
//! replaces the log level entirely.
//!
//! # Exit status
//!
//! | Code | Meaning                             |
//! |------|-------------------------------------|
//! | 0    | Stopped by Ctrl+C                   |
//! | 1    | Unexpected failure                  |
//! | 2    | Configuration error                 |
//! | 3    | Input backend unavailable           |
//! | 4    | UDP port could not be bound         |
//! | 5    | UDP socket could not be set up      |

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use infalsus_receiver::application::synthesize_input::{InputSynthesizer, SynthesizerOptions};
use infalsus_receiver::infrastructure::input_sink::native_sink;
use infalsus_receiver::infrastructure::network::DatagramChannel;
use infalsus_receiver::infrastructure::storage::config::{
    load_config, load_config_from, AppConfig, ConfigError,
};
use infalsus_receiver::startup::StartupError;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Infalsus Touch receiver.
///
/// Every option left unset falls back to the config file, then to defaults.
#[derive(Debug, Parser)]
#[command(
    name = "infalsus-receiver",
    about = "Replays Infalsus Touch datagrams as native mouse and keyboard input",
    version
)]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, env = "INFALSUS_CONFIG")]
    config: Option<PathBuf>,

    /// UDP port to listen on.
    #[arg(long, env = "INFALSUS_PORT")]
    port: Option<u16>,

    /// IP address to bind to.  `0.0.0.0` accepts datagrams on every interface.
    #[arg(long, env = "INFALSUS_BIND")]
    bind: Option<String>,

    /// Clamp absolute moves to the screen.
    ///
    /// The environment variable accepts `1`/`0`, `yes`/`no`, `on`/`off`.
    #[arg(
        long,
        env = "INFALSUS_CLAMP_ABSOLUTE",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    clamp_absolute: bool,

    /// Log level used when `RUST_LOG` is not set.
    #[arg(long, env = "INFALSUS_LOG")]
    log_level: Option<String>,
}

impl Cli {
    /// Loads the config file and applies the command-line overrides on top.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed.
    fn resolve_config(&self) -> Result<AppConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config_from(path)?,
            None => load_config()?,
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(port) = self.port {
            config.network.port = port;
        }
        if let Some(bind) = &self.bind {
            config.network.bind_address = bind.clone();
        }
        if self.clamp_absolute {
            config.input.clamp_absolute = true;
        }
        if let Some(level) = &self.log_level {
            config.receiver.log_level = level.clone();
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Program entry point.
///
/// # What happens at startup
///
/// 1. CLI arguments are parsed and the config file is loaded.
/// 2. Logging is initialised, even if the config failed to load, so the
///    failure itself is reported.
/// 3. The UDP socket is bound and the platform input sink is opened.
/// 4. The receive loop runs until Ctrl+C; the counters are logged on exit.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = cli.resolve_config();

    let level = match &config {
        Ok(config) => config.receiver.log_level.as_str(),
        Err(_) => cli.log_level.as_deref().unwrap_or("info"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            let code = e.downcast_ref::<StartupError>().map_or(1, StartupError::exit_code);
            ExitCode::from(code)
        }
    }
}

async fn run(config: Result<AppConfig, ConfigError>) -> anyhow::Result<()> {
    let config = config
        .map_err(StartupError::from)
        .context("failed to load configuration")?;
    let addr = config
        .network
        .socket_addr()
        .map_err(StartupError::from)
        .context("failed to resolve listen address")?;

    info!("Infalsus Touch receiver starting on {addr}");

    let channel = DatagramChannel::bind(addr)
        .map_err(StartupError::from)
        .context("failed to open UDP channel")?;
    let sink = native_sink()
        .map_err(StartupError::from)
        .context("failed to open input backend")?;

    let synthesizer = InputSynthesizer::new(
        sink,
        SynthesizerOptions {
            clamp_absolute: config.input.clamp_absolute,
        },
    );

    let shutdown = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl+C, shutting down"),
            Err(e) => {
                error!("failed to listen for Ctrl+C signal: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    let stats = channel.run(&synthesizer, shutdown).await;

    info!(
        received = stats.received,
        emitted = stats.emitted,
        no_op = stats.no_op,
        dropped = stats.dropped,
        truncated = stats.truncated,
        recv_errors = stats.recv_errors,
        "Infalsus Touch receiver stopped"
    );
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, FromArgMatches};

    /// Parses with the clamp flag read from `var` instead of the real variable.
    fn parse_with_clamp_env(var: &'static str) -> Cli {
        let matches = Cli::command()
            .mut_arg("clamp_absolute", |arg| arg.env(var))
            .get_matches_from(["infalsus-receiver"]);
        Cli::from_arg_matches(&matches).expect("matches from Cli's own command")
    }

    #[test]
    fn test_cli_defaults_leave_config_untouched() {
        // Arrange
        let cli = Cli::parse_from(["infalsus-receiver"]);
        let mut config = AppConfig::default();

        // Act
        cli.apply_overrides(&mut config);

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_cli_port_override() {
        let cli = Cli::parse_from(["infalsus-receiver", "--port", "9999"]);
        let mut config = AppConfig::default();

        cli.apply_overrides(&mut config);

        assert_eq!(config.network.port, 9999);
        assert_eq!(config.network.bind_address, "0.0.0.0");
    }

    #[test]
    fn test_cli_bind_override() {
        let cli = Cli::parse_from(["infalsus-receiver", "--bind", "127.0.0.1"]);
        let mut config = AppConfig::default();

        cli.apply_overrides(&mut config);

        assert_eq!(config.network.socket_addr().unwrap().to_string(), "127.0.0.1:8888");
    }

    #[test]
    fn test_cli_clamp_absolute_flag_enables_clamping() {
        let cli = Cli::parse_from(["infalsus-receiver", "--clamp-absolute"]);
        let mut config = AppConfig::default();

        cli.apply_overrides(&mut config);

        assert!(config.input.clamp_absolute);
    }

    #[test]
    fn test_cli_clamp_absolute_env_accepts_numeric_values() {
        // Arrange
        std::env::set_var("INFALSUS_TEST_CLAMP_ONE", "1");
        std::env::set_var("INFALSUS_TEST_CLAMP_OFF", "off");

        // Act
        let on = parse_with_clamp_env("INFALSUS_TEST_CLAMP_ONE");
        let off = parse_with_clamp_env("INFALSUS_TEST_CLAMP_OFF");

        // Assert
        assert!(on.clamp_absolute);
        assert!(!off.clamp_absolute);
    }

    #[test]
    fn test_cli_without_clamp_flag_keeps_file_setting() {
        let cli = Cli::parse_from(["infalsus-receiver"]);
        let mut config = AppConfig::default();
        config.input.clamp_absolute = true;

        cli.apply_overrides(&mut config);

        assert!(config.input.clamp_absolute);
    }

    #[test]
    fn test_cli_log_level_override() {
        let cli = Cli::parse_from(["infalsus-receiver", "--log-level", "trace"]);
        let mut config = AppConfig::default();

        cli.apply_overrides(&mut config);

        assert_eq!(config.receiver.log_level, "trace");
    }

    #[test]
    fn test_resolve_config_with_missing_file_uses_defaults_plus_overrides() {
        let cli = Cli::parse_from([
            "infalsus-receiver",
            "--config",
            "/nonexistent/infalsus/receiver.toml",
            "--port",
            "7000",
        ]);

        let config = cli.resolve_config().unwrap();

        assert_eq!(config.network.port, 7000);
        assert_eq!(config.receiver.log_level, "info");
    }

    #[tokio::test]
    async fn test_run_with_config_error_exits_with_config_code() {
        let err = run(Err(ConfigError::NoPlatformConfigDir)).await.unwrap_err();
        assert_eq!(err.downcast_ref::<StartupError>().map(StartupError::exit_code), Some(2));
    }

    #[tokio::test]
    async fn test_run_with_invalid_bind_address_exits_with_config_code() {
        let mut config = AppConfig::default();
        config.network.bind_address = "not-an-ip".into();

        let err = run(Ok(config)).await.unwrap_err();

        assert_eq!(err.downcast_ref::<StartupError>().map(StartupError::exit_code), Some(2));
    }
}
