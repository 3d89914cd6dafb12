//! Shared utilities

pub mod config;
pub mod diagnostic;
pub mod fs;
pub mod naming;

pub use config::{CodegenConfig, Config};
pub use diagnostic::Diagnostic;
