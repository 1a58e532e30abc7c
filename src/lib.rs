//! Dralithus - deploy applications to environments
//!
//! `drl` parses a small, fixed command line grammar, resolves environment
//! and application names through a catalog and runs the resulting command.

// Public modules
pub mod catalog;
pub mod cli;
pub mod command;
pub mod command_line;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use catalog::{Application, Catalog, Environment, StaticCatalog};
pub use command::{Command, DeployCommand, HelpCommand};
pub use command_line::CommandLine;
pub use error::{DralithusError, ExitCode, Result};

/// Current version of Dralithus
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
