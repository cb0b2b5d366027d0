//! Diagnostics setup.
//!
//! Library code only emits `tracing` events; binaries decide where they go
//! by calling [`init`] once at startup.

pub mod init;

pub use init::{default_level, init};
