//! # Messenger Telemetry
//!
//! Tracing setup shared by every binary that embeds the envelope codec.
//! Library crates only emit through `tracing` macros; binaries call
//! [`init_tracing`] once at startup.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use messenger_telemetry::{init_tracing, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let _guard = init_tracing(&TelemetryConfig::from_env())?;
//!     // decode, encode, ...
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CODEC_SERVICE_NAME` | `envelope-codec` | Service name in startup logs |
//! | `CODEC_LOG_LEVEL` | `info` | Filter directive, falls back to `RUST_LOG` |
//! | `CODEC_JSON_LOGS` | `false` (`true` in containers) | JSON formatted output |
//! | `CODEC_CONSOLE_OUTPUT` | `true` | Write logs to stderr |

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::{init_tracing, TracingGuard};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Tracing already initialized: {0}")]
    AlreadyInitialized(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Convenience macro for creating a span around one codec operation.
///
/// # Example
///
/// ```rust,ignore
/// use messenger_telemetry::codec_span;
///
/// let _span = codec_span!("consume", transport = "orders").entered();
/// ```
#[macro_export]
macro_rules! codec_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}
