//! Logging utilities.
//!
//! Library code only uses the `log` facade. Binaries call [`init_logging`]
//! to install the `env_logger` backend.

mod init;

pub use init::{LoggingConfig, init_logging};