//! CLI interface
//!
//! This module wires the process environment (arguments, `.env`, catalog
//! discovery, logging) to command construction and execution.

pub mod app;
pub mod logging;

// Re-export main types
pub use app::*;
