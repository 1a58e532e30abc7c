//! Catalog file parsing and discovery

use crate::catalog::StaticCatalog;
use crate::config::schema::validate_catalog;
use crate::config::types::CatalogFile;
use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Catalog file names to search for
const CATALOG_FILE_NAMES: &[&str] = &["drl.yml", "drl.yaml"];

/// Environment variable naming an explicit catalog file
pub const CATALOG_ENV_VAR: &str = "DRL_CONFIG";

/// Find a catalog file by searching `start_dir` and its parents
pub fn find_catalog_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current_dir = Some(start_dir);

    while let Some(dir) = current_dir {
        for file_name in CATALOG_FILE_NAMES {
            let catalog_path = dir.join(file_name);
            if catalog_path.is_file() {
                return Some(catalog_path);
            }
        }
        current_dir = dir.parent();
    }

    None
}

/// The catalog file in the user's configuration directory, if present
pub fn user_catalog_file() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("com", "milestone42", "dralithus")?;
    let path = dirs.config_dir().join(CATALOG_FILE_NAMES[0]);
    path.is_file().then_some(path)
}

/// Parse a catalog file from a path
pub fn parse_catalog_file(path: &Path) -> ConfigResult<CatalogFile> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_catalog(&contents).map_err(|e| match e {
        ConfigError::Yaml(source) => ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        },
        ConfigError::Invalid(msg) => ConfigError::Invalid(format!("{}: {}", path.display(), msg)),
        other => other,
    })
}

/// Parse and validate a catalog from a string
pub fn parse_catalog(yaml: &str) -> ConfigResult<CatalogFile> {
    let file: CatalogFile = serde_yaml::from_str(yaml)?;
    validate_catalog(&file)?;
    Ok(file)
}

/// Locate the catalog file to use, if any
///
/// `explicit` (normally the value of `DRL_CONFIG`) must exist when given.
/// Otherwise the working directory and its parents are searched, then the
/// user configuration directory.
pub fn locate_catalog_file(
    explicit: Option<PathBuf>,
    start_dir: &Path,
) -> ConfigResult<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path));
        }
        return Ok(Some(path));
    }

    Ok(find_catalog_file_from(start_dir).or_else(user_catalog_file))
}

/// Load the catalog for this invocation, falling back to the built-in one
pub fn load_catalog() -> ConfigResult<StaticCatalog> {
    let explicit = env::var_os(CATALOG_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from);
    let current_dir = env::current_dir()?;

    match locate_catalog_file(explicit, &current_dir)? {
        Some(path) => {
            info!(path = %path.display(), "loading catalog file");
            Ok(parse_catalog_file(&path)?.into())
        }
        None => {
            debug!("no catalog file found, using built-in catalog");
            Ok(StaticCatalog::builtin())
        }
    }
}
