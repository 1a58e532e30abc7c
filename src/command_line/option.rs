//! Option token recognition
//!
//! A single command line token, plus an optional lookahead token, is
//! classified into one of a closed set of options. Recognition never looks
//! more than one token ahead.

use super::Options;
use crate::error::{OptionError, OptionResult};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// The option terminator. Every token after it is a parameter.
pub const TERMINATOR: &str = "--";

/// Environment names accepted by `-e`, `--env` and `--environment`
pub const ENVIRONMENT_NAMES: &[&str] = &[
    "local",
    "dev",
    "development",
    "test",
    "stage",
    "staging",
    "prod",
    "production",
    "all",
];

/// The kind of an option, without its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Terminator,
    Help,
    Verbosity,
    Environment,
    Multi,
}

/// A recognised option together with its value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliOption {
    /// `--`
    Terminator,

    /// `-h`, `--help`
    Help { flag: String },

    /// `-v`, `--verbose`, `--verbosity`
    Verbosity { flag: String, level: u32 },

    /// `-e`, `--env`, `--environment`
    Environment { flag: String, names: BTreeSet<String> },

    /// Bundled short flags such as `-hv`, evaluated left to right
    Multi(Vec<CliOption>),
}

/// The flags the grammar knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flag {
    Help,
    Verbosity,
    Environment,
}

impl Flag {
    fn from_short(c: char) -> Option<Flag> {
        match c {
            'h' => Some(Flag::Help),
            'v' => Some(Flag::Verbosity),
            'e' => Some(Flag::Environment),
            _ => None,
        }
    }

    fn from_long(name: &str) -> Option<Flag> {
        match name {
            "help" => Some(Flag::Help),
            "verbose" | "verbosity" => Some(Flag::Verbosity),
            "env" | "environment" => Some(Flag::Environment),
            _ => None,
        }
    }
}

/// Syntactic shape of an option token
enum Token<'a> {
    Terminator,
    Long { name: &'a str, value: Option<&'a str> },
    Short { flag: char, rest: &'a str },
}

fn long_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)^--([A-Za-z][A-Za-z0-9_-]*)(?:=(.*))?$").expect("long option pattern")
    })
}

fn short_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)^-([A-Za-z])(.*)$").expect("short option pattern"))
}

impl<'a> Token<'a> {
    fn split(arg: &'a str) -> OptionResult<Token<'a>> {
        if arg == TERMINATOR {
            return Ok(Token::Terminator);
        }

        if let Some(caps) = long_pattern().captures(arg) {
            if let Some(name) = caps.get(1) {
                return Ok(Token::Long {
                    name: name.as_str(),
                    value: caps.get(2).map(|m| m.as_str()),
                });
            }
        }

        if let Some(caps) = short_pattern().captures(arg) {
            let flag = caps.get(1).and_then(|m| m.as_str().chars().next());
            if let (Some(flag), Some(rest)) = (flag, caps.get(2)) {
                return Ok(Token::Short {
                    flag,
                    rest: rest.as_str(),
                });
            }
        }

        Err(OptionError::Malformed(arg.to_string()))
    }
}

impl CliOption {
    /// Check whether a token is an option token at all
    ///
    /// Every token that starts with `-` and is longer than one character is
    /// an option token, including the terminator. Whether it is a *valid*
    /// option is decided by [`CliOption::make`]; unknown flags are errors,
    /// never parameters.
    pub fn is_option(arg: &str) -> bool {
        arg.len() > 1 && arg.starts_with('-')
    }

    /// Determine the kind of option a token represents
    pub fn kind_of(arg: &str, next_arg: Option<&str>) -> OptionResult<OptionKind> {
        Self::make(arg, next_arg).map(|(option, _)| option.kind())
    }

    /// Build an option from a token and its lookahead
    ///
    /// Returns the option and whether the lookahead was consumed as the
    /// option's value.
    pub fn make(arg: &str, next_arg: Option<&str>) -> OptionResult<(CliOption, bool)> {
        match Token::split(arg)? {
            Token::Terminator => Ok((CliOption::Terminator, false)),
            Token::Long { name, value } => {
                let flag =
                    Flag::from_long(name).ok_or_else(|| OptionError::Unknown(arg.to_string()))?;
                build(flag, name, value, arg, next_arg)
            }
            Token::Short { flag, rest } => make_short(arg, flag, rest, next_arg),
        }
    }

    pub fn kind(&self) -> OptionKind {
        match self {
            CliOption::Terminator => OptionKind::Terminator,
            CliOption::Help { .. } => OptionKind::Help,
            CliOption::Verbosity { .. } => OptionKind::Verbosity,
            CliOption::Environment { .. } => OptionKind::Environment,
            CliOption::Multi(_) => OptionKind::Multi,
        }
    }

    /// The flag as written, without dashes. Bundles have no single flag.
    pub fn flag(&self) -> Option<&str> {
        match self {
            CliOption::Terminator => Some(TERMINATOR),
            CliOption::Help { flag }
            | CliOption::Verbosity { flag, .. }
            | CliOption::Environment { flag, .. } => Some(flag),
            CliOption::Multi(_) => None,
        }
    }

    /// Fold this option's contribution into an options record
    ///
    /// Help is OR-ed, verbosity summed and environments unioned. The
    /// terminator contributes nothing.
    pub fn merge_into(self, options: &mut Options) {
        match self {
            CliOption::Terminator => {}
            CliOption::Help { .. } => options.requires_help = true,
            CliOption::Verbosity { level, .. } => {
                options.verbosity = options.verbosity.saturating_add(level)
            }
            CliOption::Environment { names, .. } => options.environments.extend(names),
            CliOption::Multi(bundle) => {
                for option in bundle {
                    option.merge_into(options);
                }
            }
        }
    }
}

fn make_short(
    arg: &str,
    c: char,
    rest: &str,
    next_arg: Option<&str>,
) -> OptionResult<(CliOption, bool)> {
    let flag = Flag::from_short(c).ok_or_else(|| OptionError::Unknown(arg.to_string()))?;
    // The short pattern only matches an ASCII letter here
    let name = &arg[1..2];

    if rest.is_empty() {
        return build(flag, name, None, arg, next_arg);
    }
    if let Some(value) = rest.strip_prefix('=') {
        return build(flag, name, Some(value), arg, next_arg);
    }
    if flag == Flag::Environment {
        return build(flag, name, Some(rest), arg, next_arg);
    }
    if rest.starts_with(|ch: char| ch.is_ascii_alphabetic()) {
        return make_bundle(arg, &arg[1..]);
    }
    build(flag, name, Some(rest), arg, next_arg)
}

fn make_bundle(arg: &str, letters: &str) -> OptionResult<(CliOption, bool)> {
    let end = letters
        .find(|ch: char| !ch.is_ascii_alphabetic())
        .unwrap_or(letters.len());
    let (flags, tail) = letters.split_at(end);

    let mut bundle = Vec::with_capacity(flags.len());
    for c in flags.chars() {
        let flag = Flag::from_short(c).ok_or_else(|| OptionError::Unknown(arg.to_string()))?;
        let option = match flag {
            Flag::Help => CliOption::Help {
                flag: c.to_string(),
            },
            Flag::Verbosity => CliOption::Verbosity {
                flag: c.to_string(),
                level: 1,
            },
            Flag::Environment => {
                return Err(OptionError::AmbiguousBundle {
                    token: arg.to_string(),
                    flag: c,
                })
            }
        };
        bundle.push(option);
    }

    if !tail.is_empty() {
        return Err(OptionError::Malformed(arg.to_string()));
    }

    Ok((CliOption::Multi(bundle), false))
}

fn build(
    flag: Flag,
    name: &str,
    value: Option<&str>,
    arg: &str,
    next_arg: Option<&str>,
) -> OptionResult<(CliOption, bool)> {
    let flag_name = name.to_string();
    match flag {
        Flag::Help => match value {
            Some(_) => Err(OptionError::UnexpectedValue(arg.to_string())),
            None => Ok((CliOption::Help { flag: flag_name }, false)),
        },
        Flag::Verbosity => match value {
            Some(value) => {
                let level = parse_level(value).ok_or_else(|| OptionError::InvalidValue {
                    token: arg.to_string(),
                    value: value.to_string(),
                })?;
                Ok((CliOption::Verbosity { flag: flag_name, level }, false))
            }
            None => match next_arg.and_then(parse_level) {
                Some(level) => Ok((CliOption::Verbosity { flag: flag_name, level }, true)),
                None => Ok((
                    CliOption::Verbosity {
                        flag: flag_name,
                        level: 1,
                    },
                    false,
                )),
            },
        },
        Flag::Environment => match value {
            Some(value) => Ok((
                CliOption::Environment {
                    flag: flag_name,
                    names: parse_environments(arg, value)?,
                },
                false,
            )),
            None => match next_arg {
                Some(next) if !next.starts_with('-') => Ok((
                    CliOption::Environment {
                        flag: flag_name,
                        names: parse_environments(arg, next)?,
                    },
                    true,
                )),
                _ => Err(OptionError::MissingValue(arg.to_string())),
            },
        },
    }
}

/// Parse an unsigned decimal level. Signs and anything non-numeric are rejected.
fn parse_level(value: &str) -> Option<u32> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

fn parse_environments(token: &str, value: &str) -> OptionResult<BTreeSet<String>> {
    value
        .split(',')
        .map(|name| {
            if ENVIRONMENT_NAMES.contains(&name) {
                Ok(name.to_string())
            } else {
                Err(OptionError::InvalidValue {
                    token: token.to_string(),
                    value: name.to_string(),
                })
            }
        })
        .collect()
}
