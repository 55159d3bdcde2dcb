//! Observability for the Ipswich Retail storefront.
//!
//! Library crates only emit `tracing` events; binaries call [`init`] once at
//! startup to decide where those events go and in what shape.
//!
//! ```rust,no_run
//! use ipswich_observability::{LogFormat, LogLevel, LoggingConfig};
//!
//! ipswich_observability::init(&LoggingConfig {
//!     level: LogLevel::Debug,
//!     format: LogFormat::Json,
//! })
//! .expect("logging already initialised");
//! ```

mod logging;

pub use logging::{init, LogFormat, LogLevel, LoggingConfig, ObservabilityError};
