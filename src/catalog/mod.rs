//! Environment and application lookup
//!
//! Commands resolve user supplied names through the [`Catalog`] trait, so
//! the source of the tables (built in, or a catalog file) stays out of the
//! command logic.

pub mod application;
pub mod environment;

pub use application::*;
pub use environment::*;

use crate::error::{ApplicationError, EnvironmentError};

/// Environment name that stands for every environment in the catalog
pub const ALL_ENVIRONMENTS: &str = "all";

/// Name lookup for environments and applications
pub trait Catalog {
    /// Resolve an environment name or alias. `all` may resolve to several.
    fn environment(&self, name: &str) -> Result<Vec<Environment>, EnvironmentError>;

    /// Resolve an application by its exact name
    fn application(&self, name: &str) -> Result<Application, ApplicationError>;
}

/// A catalog backed by in-memory tables
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    environments: Vec<Environment>,
    applications: Vec<Application>,
}

impl StaticCatalog {
    pub fn new(environments: Vec<Environment>, applications: Vec<Application>) -> Self {
        StaticCatalog {
            environments,
            applications,
        }
    }

    /// The catalog used when no catalog file is found
    pub fn builtin() -> Self {
        StaticCatalog::new(
            vec![
                Environment::new("local", "Local development environment"),
                Environment::new("development", "Development environment").with_aliases(["dev"]),
                Environment::new("test", "Test environment"),
                Environment::new("staging", "Staging environment").with_aliases(["stage"]),
                Environment::new("production", "Production environment").with_aliases(["prod"]),
            ],
            vec![
                Application::new("dralithus", "The Dralithus application deployment system"),
                Application::new("sample", "A sample application for demonstration purposes"),
            ],
        )
    }

    pub fn environments(&self) -> &[Environment] {
        &self.environments
    }

    pub fn applications(&self) -> &[Application] {
        &self.applications
    }
}

impl Catalog for StaticCatalog {
    fn environment(&self, name: &str) -> Result<Vec<Environment>, EnvironmentError> {
        if name == ALL_ENVIRONMENTS && !self.environments.is_empty() {
            return Ok(self.environments.clone());
        }
        self.environments
            .iter()
            .find(|env| env.is_named(name))
            .map(|env| vec![env.clone()])
            .ok_or_else(|| EnvironmentError::NotFound(name.to_string()))
    }

    fn application(&self, name: &str) -> Result<Application, ApplicationError> {
        self.applications
            .iter()
            .find(|app| app.name() == name)
            .cloned()
            .ok_or_else(|| ApplicationError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_environment_by_name() {
        let catalog = StaticCatalog::builtin();
        let envs = catalog.environment("local").unwrap();
        assert_eq!(envs.len(), 1);
        assert_eq!(envs[0].name(), "local");
        assert_eq!(envs[0].description(), "Local development environment");
    }

    #[test]
    fn test_builtin_environment_by_alias() {
        let catalog = StaticCatalog::builtin();
        assert_eq!(catalog.environment("dev").unwrap()[0].name(), "development");
        assert_eq!(catalog.environment("stage").unwrap()[0].name(), "staging");
        assert_eq!(catalog.environment("prod").unwrap()[0].name(), "production");
    }

    #[test]
    fn test_all_environments() {
        let catalog = StaticCatalog::builtin();
        let envs = catalog.environment(ALL_ENVIRONMENTS).unwrap();
        assert_eq!(envs.len(), 5);
    }

    #[test]
    fn test_all_in_empty_catalog_fails() {
        let catalog = StaticCatalog::default();
        assert_eq!(
            catalog.environment("all"),
            Err(EnvironmentError::NotFound("all".to_string()))
        );
    }

    #[test]
    fn test_unknown_environment() {
        let catalog = StaticCatalog::builtin();
        assert_eq!(
            catalog.environment("invalid"),
            Err(EnvironmentError::NotFound("invalid".to_string()))
        );
    }

    #[test]
    fn test_application_lookup() {
        let catalog = StaticCatalog::builtin();
        assert_eq!(catalog.application("sample").unwrap().name(), "sample");
        assert_eq!(
            catalog.application("Sample"),
            Err(ApplicationError::NotFound("Sample".to_string()))
        );
    }
}
