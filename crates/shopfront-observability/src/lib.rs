//! Logging setup shared by the Shopfront crates and binaries.
//!
//! Library crates emit events through `tracing` macros; binaries call
//! [`init`] once at startup with a [`LogConfig`] taken from their
//! configuration file.

mod logging;

pub use logging::*;
