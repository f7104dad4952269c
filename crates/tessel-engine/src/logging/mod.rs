//! Logging setup.
//!
//! The crate logs through the `log` facade; `init_logging` installs
//! `env_logger` for hosts that have no logger of their own.

mod init;

pub use init::{init_logging, LoggingConfig};
