//! Error types for dralithus

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for dralithus operations
pub type Result<T> = std::result::Result<T, DralithusError>;

/// Program exit codes
///
/// Every error that can reach the top level maps to exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExitCode {
    Success = 0,
    InvalidCommandLine = 1,
    EnvironmentNotFound = 2,
    ApplicationNotFound = 3,
    Configuration = 4,
}

impl ExitCode {
    /// The numeric process status
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code.code())
    }
}

/// Main error type for dralithus
#[derive(Error, Debug)]
pub enum DralithusError {
    /// Errors in the arguments given by the user
    #[error("Command line error: {0}")]
    CommandLine(#[from] CommandLineError),

    /// Catalog file discovery and validation errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl DralithusError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            DralithusError::CommandLine(e) => e.exit_code(),
            DralithusError::Config(_) => ExitCode::Configuration,
        }
    }
}

/// Syntax errors found while recognising a single option token
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
    #[error("Unknown option '{0}'")]
    Unknown(String),

    #[error("Malformed option '{0}'")]
    Malformed(String),

    #[error("Option '{0}' does not take a value")]
    UnexpectedValue(String),

    #[error("Option '{0}' requires a value")]
    MissingValue(String),

    #[error("Invalid value '{value}' for option '{token}'")]
    InvalidValue { token: String, value: String },

    #[error("Option '{token}' cannot be combined with other flags: '-{flag}' requires a value")]
    AmbiguousBundle { token: String, flag: char },
}

/// A command line that cannot be turned into a runnable command
///
/// Carries enough context (program, command, verbosity) to build the help
/// command that replaces it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}")]
pub struct CommandLineError {
    pub program: String,
    pub command: Option<String>,
    pub verbosity: u32,
    pub kind: CommandLineErrorKind,
}

/// What went wrong with the command line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandLineErrorKind {
    #[error("{0}")]
    Syntax(#[from] OptionError),

    #[error("No command specified")]
    NoCommand,

    #[error("Unknown command '{0}' specified")]
    UnknownCommand(String),

    #[error("No environments specified. Please specify at least one environment.")]
    NoEnvironments,

    #[error("No applications specified. Please specify at least one application.")]
    NoApplications,

    #[error("Help can be requested for at most one command (got: {0})")]
    TooManyHelpTopics(String),

    #[error("{0}")]
    Environment(#[from] EnvironmentError),

    #[error("{0}")]
    Application(#[from] ApplicationError),
}

impl CommandLineError {
    pub fn new(program: impl Into<String>, kind: impl Into<CommandLineErrorKind>) -> Self {
        CommandLineError {
            program: program.into(),
            command: None,
            verbosity: 0,
            kind: kind.into(),
        }
    }

    /// Set the command the error was raised for
    pub fn with_command(mut self, command: Option<String>) -> Self {
        self.command = command;
        self
    }

    /// Set the verbosity in effect when the error was raised
    pub fn with_verbosity(mut self, verbosity: u32) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn exit_code(&self) -> ExitCode {
        match self.kind {
            CommandLineErrorKind::Environment(_) => ExitCode::EnvironmentNotFound,
            CommandLineErrorKind::Application(_) => ExitCode::ApplicationNotFound,
            _ => ExitCode::InvalidCommandLine,
        }
    }
}

/// Environment lookup errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvironmentError {
    #[error("Environment not found: {0}")]
    NotFound(String),
}

/// Application lookup errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    #[error("Application '{0}' not found")]
    NotFound(String),
}

/// Catalog file discovery and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Catalog file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid catalog: {0}")]
    Invalid(String),

    #[error("Failed to read catalog file '{path}': {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to parse catalog file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Specialized result type for option recognition
pub type OptionResult<T> = std::result::Result<T, OptionError>;

/// Specialized result type for command construction
pub type CommandLineResult<T> = std::result::Result<T, CommandLineError>;

/// Specialized result type for catalog operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
