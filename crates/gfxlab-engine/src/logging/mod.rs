//! Logging utilities.
//!
//! Centralizes logger initialization for the exercise binaries. Library code
//! only talks to the `log` facade; `env_logger` is wired up here.

mod init;

pub use init::{init_logging, LoggingConfig};
