//! Logging utilities.
//!
//! Both demos initialize logging through [`init_logging`] before the window
//! opens. Everything else in the workspace talks to the `log` facade only.

mod init;

pub use init::{init_logging, LoggingConfig};
