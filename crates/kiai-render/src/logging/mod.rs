//! Logger initialization.
//!
//! The crate logs through the `log` facade only; this module is the single
//! place that installs `env_logger` for binaries and demos.

mod init;

pub use init::{init_logging, LoggingConfig};
