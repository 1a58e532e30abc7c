//! The `help` command
//!
//! Shown when the user asks for help, and in place of any command line
//! that could not be turned into a runnable command.

use super::{is_command, DEPLOY, HELP, MAX_VERBOSITY};
use crate::command_line::{CommandLine, ENVIRONMENT_NAMES};
use crate::error::{CommandLineError, CommandLineErrorKind, CommandLineResult, ExitCode};
use clap::{Arg, ArgAction};
use colored::Colorize;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpCommand {
    program_name: String,
    command_needing_help: Option<String>,
    error: Option<CommandLineError>,
    verbosity: u32,
}

impl HelpCommand {
    /// Help requested directly by the user
    pub fn new(
        program_name: impl Into<String>,
        command_needing_help: Option<String>,
        verbosity: u32,
    ) -> Self {
        HelpCommand {
            program_name: program_name.into(),
            command_needing_help,
            error: None,
            verbosity: verbosity.min(MAX_VERBOSITY),
        }
    }

    /// Help shown because the command line was rejected
    ///
    /// Help is scoped to the failing command when it is one we know.
    pub fn from_error(error: CommandLineError) -> Self {
        let command_needing_help = error.command.clone().filter(|name| is_command(name));
        HelpCommand {
            program_name: error.program.clone(),
            command_needing_help,
            verbosity: error.verbosity.min(MAX_VERBOSITY),
            error: Some(error),
        }
    }

    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    /// The command help is about, `None` for the program as a whole
    pub fn command_needing_help(&self) -> Option<&str> {
        self.command_needing_help.as_deref()
    }

    pub fn error(&self) -> Option<&CommandLineError> {
        self.error.as_ref()
    }

    pub fn verbosity(&self) -> u32 {
        self.verbosity
    }

    pub fn exit_code(&self) -> ExitCode {
        self.error
            .as_ref()
            .map_or(ExitCode::Success, CommandLineError::exit_code)
    }

    /// Render the help text, long form when verbosity is at least 1
    pub fn render(&self) -> String {
        let mut grammar = grammar(&self.program_name);
        grammar.build();
        let long = self.verbosity >= 1;

        let target = match self.command_needing_help.as_deref() {
            Some(name) => grammar.find_subcommand_mut(name),
            None => None,
        };
        let text = match target {
            Some(sub) if long => sub.render_long_help(),
            Some(sub) => sub.render_help(),
            None if long => grammar.render_long_help(),
            None => grammar.render_help(),
        };
        text.to_string()
    }

    /// Print the error (if any) to stderr and the help text to stdout
    pub fn execute(self) -> ExitCode {
        info!(
            command = self.command_needing_help.as_deref().unwrap_or("-"),
            error = self.error.is_some(),
            "showing help"
        );
        if let Some(error) = &self.error {
            eprintln!("{} {}", "error:".red().bold(), error);
            eprintln!();
        }
        println!("{}", self.render());
        self.exit_code()
    }
}

/// Build a help command from a command line that asked for help
///
/// `drl help` is help about `help`; `drl help <command>` names the topic.
/// Parameters after a `--` are never topics. Any other command carrying
/// `-h` is its own topic.
pub fn make(cl: &CommandLine) -> CommandLineResult<HelpCommand> {
    let topic = match cl.command_name() {
        None => None,
        Some(HELP) => help_topic(cl)?,
        Some(name) => Some(name.to_string()),
    };

    if let Some(name) = &topic {
        if !is_command(name) {
            return Err(cl.error(CommandLineErrorKind::UnknownCommand(name.clone())));
        }
    }

    Ok(HelpCommand::new(cl.program(), topic, cl.verbosity()))
}

fn help_topic(cl: &CommandLine) -> CommandLineResult<Option<String>> {
    if cl.command_options().is_terminated() {
        return Ok(Some(HELP.to_string()));
    }

    let parameters = cl.parameters();
    match parameters.len() {
        0 => Ok(Some(HELP.to_string())),
        1 => Ok(parameters.iter().next().cloned()),
        _ => {
            let topics = parameters.iter().cloned().collect::<Vec<_>>().join(", ");
            Err(cl.error(CommandLineErrorKind::TooManyHelpTopics(topics)))
        }
    }
}

/// Describe the fixed command line grammar for help rendering
///
/// Only used to produce text; arguments are parsed by `command_line`.
fn grammar(program: &str) -> clap::Command {
    clap::Command::new(program.to_string())
        .about("Deploy applications to environments")
        .long_about(
            "Deploy applications to environments.\n\n\
             Options may appear before the command (global options) and after it \
             (command options); both apply. Use '--' to end option processing.",
        )
        .disable_help_flag(true)
        .disable_help_subcommand(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("help")
                .short('h')
                .long("help")
                .help("Print help")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .visible_alias("verbosity")
                .value_name("LEVEL")
                .num_args(0..=1)
                .help("Increase verbosity, or set it to LEVEL")
                .long_help(
                    "Increase verbosity by one, or by LEVEL when given (-v=2, -v 2). \
                     Repeat or bundle to add up (-vv). Levels above 3 act as 3.",
                )
                .action(ArgAction::Append)
                .global(true),
        )
        .arg(
            Arg::new("environment")
                .short('e')
                .long("environment")
                .visible_alias("env")
                .value_name("NAMES")
                .help("Comma separated environments to act on")
                .long_help(format!(
                    "Comma separated environments to act on. Recognised names: {}. \
                     'all' selects every configured environment.",
                    ENVIRONMENT_NAMES.join(", ")
                ))
                .action(ArgAction::Append)
                .global(true),
        )
        .subcommand(
            clap::Command::new(HELP)
                .about("Show help for a command")
                .arg(
                    Arg::new("command")
                        .value_name("COMMAND")
                        .help("The command to show help for")
                        .value_parser([HELP, DEPLOY]),
                ),
        )
        .subcommand(
            clap::Command::new(DEPLOY)
                .about("Deploy applications to environments")
                .long_about(
                    "Deploy one or more applications to one or more environments. \
                     At least one environment (-e) and one application are required.",
                )
                .arg(
                    Arg::new("applications")
                        .value_name("APPLICATION")
                        .help("Applications to deploy")
                        .num_args(1..)
                        .required(true),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CommandLine {
        CommandLine::parse(args).unwrap()
    }

    #[test]
    fn test_new_caps_verbosity() {
        let help = HelpCommand::new("drl", None, 7);
        assert_eq!(help.verbosity(), MAX_VERBOSITY);
        assert_eq!(help.exit_code(), ExitCode::Success);
    }

    #[test]
    fn test_from_error_keeps_context() {
        let error = CommandLineError::new("drl", CommandLineErrorKind::NoApplications)
            .with_command(Some("deploy".to_string()))
            .with_verbosity(1);
        let help = HelpCommand::from_error(error.clone());
        assert_eq!(help.program_name(), "drl");
        assert_eq!(help.command_needing_help(), Some("deploy"));
        assert_eq!(help.error(), Some(&error));
        assert_eq!(help.verbosity(), 1);
        assert_eq!(help.exit_code(), ExitCode::InvalidCommandLine);
    }

    #[test]
    fn test_from_error_drops_unknown_command() {
        let kind = CommandLineErrorKind::UnknownCommand("x".to_string());
        let error = CommandLineError::new("drl", kind).with_command(Some("x".to_string()));
        assert_eq!(HelpCommand::from_error(error).command_needing_help(), None);
    }

    #[test]
    fn test_make_global() {
        let help = make(&parse(&["drl", "--help"])).unwrap();
        assert_eq!(help.command_needing_help(), None);
        assert!(help.error().is_none());
    }

    #[test]
    fn test_make_help_about_help() {
        let help = make(&parse(&["drl", "help", "-v"])).unwrap();
        assert_eq!(help.command_needing_help(), Some("help"));
        assert_eq!(help.verbosity(), 1);
    }

    #[test]
    fn test_make_help_topic() {
        let help = make(&parse(&["drl", "help", "deploy"])).unwrap();
        assert_eq!(help.command_needing_help(), Some("deploy"));

        let help = make(&parse(&["drl", "-h", "deploy", "-e", "local"])).unwrap();
        assert_eq!(help.command_needing_help(), Some("deploy"));
    }

    #[test]
    fn test_make_ignores_parameters_after_terminator() {
        let help = make(&parse(&["drl", "help", "--", "deploy", "frobnicate"])).unwrap();
        assert_eq!(help.command_needing_help(), Some("help"));
        assert!(help.error().is_none());
    }

    #[test]
    fn test_make_too_many_topics() {
        let err = make(&parse(&["drl", "help", "deploy", "help"])).unwrap_err();
        assert_eq!(err.kind, CommandLineErrorKind::TooManyHelpTopics("deploy, help".to_string()));
        assert_eq!(err.command.as_deref(), Some("help"));
    }

    #[test]
    fn test_make_unknown_topic() {
        let err = make(&parse(&["drl", "help", "frobnicate"])).unwrap_err();
        assert_eq!(err.kind, CommandLineErrorKind::UnknownCommand("frobnicate".to_string()));

        let err = make(&parse(&["drl", "-h", "frobnicate"])).unwrap_err();
        assert_eq!(err.kind, CommandLineErrorKind::UnknownCommand("frobnicate".to_string()));
    }

    #[test]
    fn test_render_global() {
        let text = HelpCommand::new("drl", None, 0).render();
        assert!(text.contains("Usage: drl"));
        assert!(text.contains("deploy"));
        assert!(text.contains("--environment"));
    }

    #[test]
    fn test_render_deploy() {
        let text = HelpCommand::new("drl", Some("deploy".to_string()), 0).render();
        assert!(text.contains("Usage: drl deploy"));
        assert!(text.contains("APPLICATION"));
    }

    #[test]
    fn test_render_long_lists_environment_names() {
        let short = HelpCommand::new("drl", Some("deploy".to_string()), 0).render();
        let long = HelpCommand::new("drl", Some("deploy".to_string()), 1).render();
        assert!(!short.contains("Recognised"));
        assert!(long.contains("Recognised"));
    }
}
