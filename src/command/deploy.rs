//! The `deploy` command

use super::MAX_VERBOSITY;
use crate::catalog::{Application, Catalog, Environment};
use crate::command_line::CommandLine;
use crate::error::{CommandLineErrorKind, CommandLineResult, ExitCode};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Deploy a set of applications to a set of environments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployCommand {
    environments: BTreeSet<Environment>,
    applications: BTreeSet<Application>,
    verbosity: u32,
}

impl DeployCommand {
    /// # Panics
    ///
    /// Panics if either set is empty.
    pub fn new(
        environments: BTreeSet<Environment>,
        applications: BTreeSet<Application>,
        verbosity: u32,
    ) -> Self {
        assert!(!environments.is_empty(), "deploy needs at least one environment");
        assert!(!applications.is_empty(), "deploy needs at least one application");
        DeployCommand {
            environments,
            applications,
            verbosity: verbosity.min(MAX_VERBOSITY),
        }
    }

    pub fn environments(&self) -> &BTreeSet<Environment> {
        &self.environments
    }

    pub fn applications(&self) -> &BTreeSet<Application> {
        &self.applications
    }

    pub fn verbosity(&self) -> u32 {
        self.verbosity
    }

    /// One line description of what will be deployed where
    pub fn summary(&self) -> String {
        format!(
            "deploy ({}) to ({}). verbosity={}",
            join(&self.applications),
            join(&self.environments),
            self.verbosity
        )
    }

    pub fn execute(self) -> ExitCode {
        info!(
            applications = %join(&self.applications),
            environments = %join(&self.environments),
            verbosity = self.verbosity,
            "deploying"
        );
        println!("{}", self.summary());
        ExitCode::Success
    }
}

fn join<T: ToString>(items: &BTreeSet<T>) -> String {
    items.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// Resolve a `deploy` command line against the catalog
pub fn make(cl: &CommandLine, catalog: &dyn Catalog) -> CommandLineResult<DeployCommand> {
    let environments = make_environments(cl, catalog)?;
    let applications = make_applications(cl, catalog)?;
    Ok(DeployCommand::new(environments, applications, cl.verbosity()))
}

/// Resolve every environment named by global and command options
pub fn make_environments(
    cl: &CommandLine,
    catalog: &dyn Catalog,
) -> CommandLineResult<BTreeSet<Environment>> {
    let names = cl.environment_names();
    if names.is_empty() {
        return Err(cl.error(CommandLineErrorKind::NoEnvironments));
    }

    let mut environments = BTreeSet::new();
    for name in &names {
        let resolved = catalog.environment(name).map_err(|e| cl.error(e))?;
        debug!(name = %name, count = resolved.len(), "environment resolved");
        environments.extend(resolved);
    }
    Ok(environments)
}

/// Resolve one application per parameter
pub fn make_applications(
    cl: &CommandLine,
    catalog: &dyn Catalog,
) -> CommandLineResult<BTreeSet<Application>> {
    let parameters = cl.parameters();
    if parameters.is_empty() {
        return Err(cl.error(CommandLineErrorKind::NoApplications));
    }

    parameters
        .iter()
        .map(|name| catalog.application(name).map_err(|e| cl.error(e)))
        .collect()
}
