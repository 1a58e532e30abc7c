//! Option aggregation
//!
//! Scans a run of option tokens at the front of a slice and folds them into
//! a single record.

use super::option::CliOption;
use crate::error::OptionResult;
use std::collections::BTreeSet;
use tracing::trace;

/// The merged result of a run of options
///
/// `end_index` is the number of tokens consumed, including option values
/// taken from the following token and a terminating `--`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub(super) requires_help: bool,
    pub(super) verbosity: u32,
    pub(super) environments: BTreeSet<String>,
    pub(super) end_index: usize,
    pub(super) terminated: bool,
}

impl Options {
    /// Parse the options at the front of `tokens`
    ///
    /// Scanning stops at the first token that is not an option, which is
    /// left unconsumed, or right after an option terminator. Options must
    /// therefore be contiguous; anything after the stop point is never
    /// interpreted as an option by this call.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> OptionResult<Options> {
        let mut options = Options::default();
        let mut index = 0;

        while index < tokens.len() {
            let arg = tokens[index].as_ref();
            if !CliOption::is_option(arg) {
                trace!(index, arg, "options end at first non-option");
                break;
            }

            let next_arg = tokens.get(index + 1).map(|t| t.as_ref());
            let (option, consumed_next) = CliOption::make(arg, next_arg)?;
            index += if consumed_next { 2 } else { 1 };

            if option == CliOption::Terminator {
                trace!(index, "option terminator");
                options.terminated = true;
                break;
            }

            trace!(?option, consumed_next, "option");
            option.merge_into(&mut options);
        }

        options.end_index = index;
        Ok(options)
    }

    /// Whether `-h`/`--help` appeared at least once
    pub fn requires_help(&self) -> bool {
        self.requires_help
    }

    /// Sum of all verbosity contributions
    pub fn verbosity(&self) -> u32 {
        self.verbosity
    }

    /// Union of all environment names
    pub fn environments(&self) -> &BTreeSet<String> {
        &self.environments
    }

    pub fn end_index(&self) -> usize {
        self.end_index
    }

    /// Whether scanning stopped on `--`
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OptionError;

    fn names(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn assert_options(
        args: &[&str],
        help: bool,
        verbosity: u32,
        environments: &[&str],
        end_index: usize,
    ) {
        let options = Options::parse(args).unwrap();
        assert_eq!(options.requires_help(), help, "requires_help for {:?}", args);
        assert_eq!(options.verbosity(), verbosity, "verbosity for {:?}", args);
        assert_eq!(options.environments(), &names(environments), "environments for {:?}", args);
        assert_eq!(options.end_index(), end_index, "end_index for {:?}", args);
    }

    #[test]
    fn test_empty() {
        let options = Options::parse::<&str>(&[]).unwrap();
        assert_eq!(options, Options::default());
    }

    #[test]
    fn test_single_options() {
        assert_options(&["-h"], true, 0, &[], 1);
        assert_options(&["--help"], true, 0, &[], 1);
        assert_options(&["-v"], false, 1, &[], 1);
        assert_options(&["--verbose=2"], false, 2, &[], 1);
        assert_options(&["--verbose", "2"], false, 2, &[], 2);
        assert_options(&["--verbosity", "2"], false, 2, &[], 2);
        assert_options(&["-e=development"], false, 0, &["development"], 1);
        assert_options(&["-e", "local"], false, 0, &["local"], 2);
        assert_options(&["--env", "development,staging"], false, 0, &["development", "staging"], 2);
        assert_options(&["--environment=local,test"], false, 0, &["local", "test"], 1);
    }

    #[test]
    fn test_multi_options() {
        assert_options(&["-vh"], true, 1, &[], 1);
        assert_options(&["-hv"], true, 1, &[], 1);
        assert_options(&["-vv"], false, 2, &[], 1);
        assert_options(&["-vvhvh", "-e", "local"], true, 3, &["local"], 3);
    }

    #[test]
    fn test_verbosity_accumulation_is_associative() {
        let separate = Options::parse(&["-v", "-v"]).unwrap();
        let bundled = Options::parse(&["-vv"]).unwrap();
        let long = Options::parse(&["--verbose", "--verbose"]).unwrap();
        assert_eq!(separate.verbosity(), 2);
        assert_eq!(bundled.verbosity(), 2);
        assert_eq!(long.verbosity(), 2);
    }

    #[test]
    fn test_environment_union_is_idempotent() {
        let twice = Options::parse(&["-e=local,local"]).unwrap();
        let once = Options::parse(&["-e=local"]).unwrap();
        assert_eq!(twice, once);
    }

    #[test]
    fn test_repeated_options_merge() {
        let args = ["-e", "local", "--env=test", "-v=2", "-v", "-h", "--help"];
        assert_options(&args, true, 3, &["local", "test"], 7);
        assert_options(&["-e", "local", "-e=local,test"], false, 0, &["local", "test"], 3);
    }

    #[test]
    fn test_terminator_halts_scanning() {
        let options = Options::parse(&["-v", "--", "-h"]).unwrap();
        assert_eq!(options.verbosity(), 1);
        assert!(!options.requires_help());
        assert_eq!(options.end_index(), 2);
        assert!(options.is_terminated());
    }

    #[test]
    fn test_terminator_cases() {
        assert_options(&["-h", "--"], true, 0, &[], 2);
        assert_options(&["-v", "--", "3", "-h"], false, 1, &[], 2);
        assert_options(&["-v", "--", "3", "--", "-h"], false, 1, &[], 2);
        let args = ["-e=local,test", "--", "-e=development,staging"];
        assert_options(&args, false, 0, &["local", "test"], 2);
        assert_options(&["--", "-x"], false, 0, &[], 1);
    }

    #[test]
    fn test_stops_at_first_parameter() {
        assert_options(&["-v", "1", "parameter", "-h"], false, 1, &[], 2);
        assert_options(&["-e", "local", "extra_arg1", "extra_arg2"], false, 0, &["local"], 2);
        assert_options(&["deploy", "-v"], false, 0, &[], 0);
        assert!(!Options::parse(&["deploy", "-v"]).unwrap().is_terminated());
    }

    #[test]
    fn test_help_does_not_consume_value() {
        assert_options(&["-h", "True", "-v", "1"], true, 0, &[], 1);
    }

    #[test]
    fn test_lone_dash_is_not_an_option() {
        assert_options(&["-v", "-"], false, 1, &[], 1);
    }

    #[test]
    fn test_end_index_never_exceeds_length() {
        let inputs: [&[&str]; 6] = [
            &["-v"],
            &["-v", "2"],
            &["-e", "local"],
            &["--"],
            &["-h", "--", "x"],
            &["x", "y"],
        ];
        for args in inputs {
            let options = Options::parse(args).unwrap();
            assert!(options.end_index() <= args.len());
        }
    }

    #[test]
    fn test_errors() {
        let cases: [&[&str]; 10] = [
            &["-h=True"],
            &["--help=2"],
            &["-v=bad-value"],
            &["--verbosity=True"],
            &["-e=bad-value,local"],
            &["--environment=local,bad-value"],
            &["-h=1", "-v"],
            &["-v", "-h=1"],
            &["--environment", "--", "local,test"],
            &["-v", "-2"],
        ];
        for args in cases {
            assert!(Options::parse(args).is_err(), "{:?} should fail", args);
        }
    }

    #[test]
    fn test_unknown_flag_is_an_error() {
        assert_eq!(
            Options::parse(&["-v", "-x", "deploy"]),
            Err(OptionError::Unknown("-x".to_string()))
        );
        assert_eq!(
            Options::parse(&["--xtra"]),
            Err(OptionError::Unknown("--xtra".to_string()))
        );
    }
}
