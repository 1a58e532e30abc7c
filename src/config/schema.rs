//! Catalog validation
//!
//! The option grammar only accepts a fixed set of environment names, so a
//! catalog may only use those names and must keep them unambiguous.

use crate::catalog::ALL_ENVIRONMENTS;
use crate::command_line::ENVIRONMENT_NAMES;
use crate::config::types::{ApplicationEntry, CatalogFile, EnvironmentEntry};
use crate::error::{ConfigError, ConfigResult};
use std::collections::HashSet;

/// Validate a complete catalog file
pub fn validate_catalog(file: &CatalogFile) -> ConfigResult<()> {
    let mut seen = HashSet::new();
    for env in &file.environments {
        validate_environment(env, &mut seen)?;
    }

    let mut seen = HashSet::new();
    for app in &file.applications {
        validate_application(app, &mut seen)?;
    }

    Ok(())
}

/// Validate one environment and the names it claims
fn validate_environment<'a>(
    env: &'a EnvironmentEntry,
    seen: &mut HashSet<&'a str>,
) -> ConfigResult<()> {
    for name in std::iter::once(&env.name).chain(&env.aliases) {
        if name == ALL_ENVIRONMENTS {
            return Err(ConfigError::Invalid(format!(
                "'{}' is reserved and cannot name an environment",
                ALL_ENVIRONMENTS
            )));
        }
        if !ENVIRONMENT_NAMES.contains(&name.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "Unsupported environment name '{}'. Must be one of: {}",
                name,
                ENVIRONMENT_NAMES
                    .iter()
                    .filter(|n| **n != ALL_ENVIRONMENTS)
                    .copied()
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }
        if !seen.insert(name.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "Environment name '{}' is defined more than once",
                name
            )));
        }
    }
    Ok(())
}

fn validate_application<'a>(
    app: &'a ApplicationEntry,
    seen: &mut HashSet<&'a str>,
) -> ConfigResult<()> {
    if app.name.trim().is_empty() {
        return Err(ConfigError::Invalid("Application name cannot be empty".to_string()));
    }
    if !seen.insert(app.name.as_str()) {
        return Err(ConfigError::Invalid(format!(
            "Application '{}' is defined more than once",
            app.name
        )));
    }
    Ok(())
}
