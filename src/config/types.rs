//! Catalog file types
//!
//! This module defines the data structures that represent a drl.yml catalog file.

use crate::catalog::{Application, Environment, StaticCatalog};
use serde::Deserialize;

/// Top-level catalog file structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogFile {
    /// Environments applications can be deployed to
    #[serde(default)]
    pub environments: Vec<EnvironmentEntry>,

    /// Applications that can be deployed
    #[serde(default)]
    pub applications: Vec<ApplicationEntry>,
}

/// An environment definition
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentEntry {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Alternative names accepted on the command line
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// An application definition
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplicationEntry {
    pub name: String,

    #[serde(default)]
    pub description: String,
}

impl From<EnvironmentEntry> for Environment {
    fn from(entry: EnvironmentEntry) -> Self {
        Environment::new(entry.name, entry.description).with_aliases(entry.aliases)
    }
}

impl From<ApplicationEntry> for Application {
    fn from(entry: ApplicationEntry) -> Self {
        Application::new(entry.name, entry.description)
    }
}

impl From<CatalogFile> for StaticCatalog {
    fn from(file: CatalogFile) -> Self {
        StaticCatalog::new(
            file.environments.into_iter().map(Environment::from).collect(),
            file.applications.into_iter().map(Application::from).collect(),
        )
    }
}
