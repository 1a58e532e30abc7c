//! Main CLI application

use crate::catalog::{Catalog, StaticCatalog};
use crate::cli::logging;
use crate::command;
use crate::command_line::CommandLine;
use crate::config::load_catalog;
use crate::error::{DralithusError, ExitCode};
use colored::Colorize;
use std::path::Path;
use tracing::{debug, error};

/// Program name used when the OS supplies none
pub const DEFAULT_PROGRAM: &str = "drl";

/// CLI application
pub struct App<C: Catalog = StaticCatalog> {
    /// Where environment and application names are resolved
    catalog: C,
}

impl App {
    /// Create a new app from the discovered catalog
    pub fn new() -> Result<Self, DralithusError> {
        Ok(App {
            catalog: load_catalog()?,
        })
    }
}

impl<C: Catalog> App<C> {
    /// Create app with a specific catalog
    pub fn with_catalog(catalog: C) -> Self {
        App { catalog }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Run the application with command line arguments, program name first
    pub fn run<S: AsRef<str>>(&self, args: &[S]) -> ExitCode {
        let command = command::make(args, &self.catalog);
        debug!(command = command.name(), "executing");
        command.execute()
    }
}

/// Verbosity asked for on the command line, also when it is rejected
pub fn requested_verbosity<S: AsRef<str>>(args: &[S]) -> u32 {
    match CommandLine::parse(args) {
        Ok(cl) => cl.verbosity(),
        Err(e) => e.verbosity,
    }
}

/// Collect the process arguments, shortening the program to its file name
fn process_args() -> Vec<String> {
    let mut args: Vec<String> = std::env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    match args.first_mut() {
        Some(program) => {
            if let Some(name) = Path::new(program.as_str()).file_name() {
                *program = name.to_string_lossy().into_owned();
            }
        }
        None => args.push(DEFAULT_PROGRAM.to_string()),
    }
    args
}

/// Run the CLI application with the process arguments
pub fn run() -> ExitCode {
    // A missing .env file is normal
    let _ = dotenvy::dotenv();

    let args = process_args();
    if let Err(e) = logging::init(requested_verbosity(&args)) {
        eprintln!("{} {:#}", "warning:".yellow().bold(), e);
    }

    if !command::needs_catalog(&args) {
        debug!("catalog not needed");
        return App::with_catalog(StaticCatalog::default()).run(&args);
    }

    match App::new() {
        Ok(app) => app.run(&args),
        Err(e) => {
            error!(error = %e, "cannot load catalog");
            eprintln!("{} {}", "error:".red().bold(), e);
            e.exit_code()
        }
    }
}
