//! Command line parsing
//!
//! Splits the raw argument vector into the program name, global options, a
//! command name, command options and the remaining parameters:
//!
//! ```text
//! drl [global options] [command] [command options] [parameters...]
//! ```

pub mod option;
pub mod options;

pub use option::*;
pub use options::*;

use crate::error::{CommandLineError, CommandLineErrorKind, CommandLineResult};
use std::collections::BTreeSet;
use tracing::trace;

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    command_name: Option<String>,
    global_options: Options,
    command_options: Options,
    parameters: BTreeSet<String>,
}

impl CommandLine {
    pub fn new(
        program: impl Into<String>,
        command_name: Option<String>,
        global_options: Options,
        command_options: Options,
        parameters: BTreeSet<String>,
    ) -> Self {
        CommandLine {
            program: program.into(),
            command_name,
            global_options,
            command_options,
            parameters,
        }
    }

    /// Parse a full argument vector, program name first
    ///
    /// # Panics
    ///
    /// Panics if `args` is empty; the operating system always supplies the
    /// program name.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> CommandLineResult<CommandLine> {
        assert!(
            !args.is_empty(),
            "the argument list must start with the program name"
        );
        let program = args[0].as_ref().to_string();
        let mut index = 1;

        let global_options = Options::parse(&args[index..])
            .map_err(|e| CommandLineError::new(program.clone(), e))?;
        index += global_options.end_index();
        trace!(?global_options, "global options parsed");

        let mut command_name = None;
        let mut command_options = Options::default();

        // After a global `--` there is no command, only parameters
        if !global_options.is_terminated() {
            if let Some(name) = args.get(index) {
                command_name = Some(name.as_ref().to_string());
                index += 1;
                trace!(command = ?command_name, "command identified");

                command_options = Options::parse(&args[index..]).map_err(|e| {
                    CommandLineError::new(program.clone(), e)
                        .with_command(command_name.clone())
                        .with_verbosity(global_options.verbosity())
                })?;
                index += command_options.end_index();
                trace!(?command_options, "command options parsed");
            }
        }

        let parameters = args[index..]
            .iter()
            .map(|arg| arg.as_ref().to_string())
            .collect();

        Ok(CommandLine {
            program,
            command_name,
            global_options,
            command_options,
            parameters,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn command_name(&self) -> Option<&str> {
        self.command_name.as_deref()
    }

    pub fn global_options(&self) -> &Options {
        &self.global_options
    }

    pub fn command_options(&self) -> &Options {
        &self.command_options
    }

    pub fn parameters(&self) -> &BTreeSet<String> {
        &self.parameters
    }

    /// Help was asked for before or after the command name
    pub fn requires_help(&self) -> bool {
        self.global_options.requires_help() || self.command_options.requires_help()
    }

    /// Combined verbosity of global and command options, uncapped
    pub fn verbosity(&self) -> u32 {
        self.global_options
            .verbosity()
            .saturating_add(self.command_options.verbosity())
    }

    /// Environment names given before or after the command name
    pub fn environment_names(&self) -> BTreeSet<String> {
        self.global_options
            .environments()
            .union(self.command_options.environments())
            .cloned()
            .collect()
    }

    /// Build an error that carries this command line's context
    pub fn error(&self, kind: impl Into<CommandLineErrorKind>) -> CommandLineError {
        CommandLineError::new(self.program.clone(), kind)
            .with_command(self.command_name.clone())
            .with_verbosity(self.verbosity())
    }
}
