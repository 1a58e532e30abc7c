//! Runnable commands
//!
//! [`make`] is the only place a rejected command line turns into a help
//! command; everything below it returns `Result`s.

pub mod deploy;
pub mod help;

pub use deploy::DeployCommand;
pub use help::HelpCommand;

use crate::catalog::Catalog;
use crate::command_line::CommandLine;
use crate::error::{CommandLineErrorKind, CommandLineResult, ExitCode};
use tracing::debug;

pub const HELP: &str = "help";
pub const DEPLOY: &str = "deploy";

/// Every command the program understands
pub const COMMANDS: &[&str] = &[HELP, DEPLOY];

/// Highest verbosity a command acts on
pub const MAX_VERBOSITY: u32 = 3;

/// Check if `name` is a known command
pub fn is_command(name: &str) -> bool {
    COMMANDS.contains(&name)
}

/// A fully resolved command, ready to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help(HelpCommand),
    Deploy(DeployCommand),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Help(_) => HELP,
            Command::Deploy(_) => DEPLOY,
        }
    }

    pub fn verbosity(&self) -> u32 {
        match self {
            Command::Help(help) => help.verbosity(),
            Command::Deploy(deploy) => deploy.verbosity(),
        }
    }

    /// Run the command and report the process exit code
    pub fn execute(self) -> ExitCode {
        match self {
            Command::Help(help) => help.execute(),
            Command::Deploy(deploy) => deploy.execute(),
        }
    }
}

/// Build the command for a full argument vector, program name first
///
/// Never fails: a command line that cannot be parsed or resolved yields a
/// [`HelpCommand`] carrying the error.
pub fn make<S: AsRef<str>>(args: &[S], catalog: &dyn Catalog) -> Command {
    let result = CommandLine::parse(args).and_then(|cl| make_from_command_line(&cl, catalog));
    match result {
        Ok(command) => {
            debug!(command = command.name(), verbosity = command.verbosity(), "command resolved");
            command
        }
        Err(error) => {
            debug!(%error, exit_code = error.exit_code().code(), "command line rejected");
            Command::Help(HelpCommand::from_error(error))
        }
    }
}

/// Whether building the command for `args` looks names up in a catalog
///
/// Only a `deploy` without a help request does; help, and every rejected
/// command line, is built without one.
pub fn needs_catalog<S: AsRef<str>>(args: &[S]) -> bool {
    match CommandLine::parse(args) {
        Ok(cl) => !cl.requires_help() && cl.command_name() == Some(DEPLOY),
        Err(_) => false,
    }
}

/// Dispatch a parsed command line to the command it names
pub fn make_from_command_line(
    cl: &CommandLine,
    catalog: &dyn Catalog,
) -> CommandLineResult<Command> {
    if cl.requires_help() || cl.command_name() == Some(HELP) {
        return help::make(cl).map(Command::Help);
    }

    match cl.command_name() {
        Some(DEPLOY) => deploy::make(cl, catalog).map(Command::Deploy),
        Some(name) => Err(cl.error(CommandLineErrorKind::UnknownCommand(name.to_string()))),
        None => Err(cl.error(CommandLineErrorKind::NoCommand)),
    }
}
