//! Integration tests for catalog files

mod common;

use common::create_test_catalog_in_subdir;
use dralithus::catalog::{Catalog, StaticCatalog};
use dralithus::config::{find_catalog_file_from, parse_catalog, parse_catalog_file};
use dralithus::error::ConfigError;

#[test]
fn test_load_catalog_from_parent_dir() {
    let yaml = r#"
environments:
  - name: production
    description: Live
    aliases: [prod]
  - name: staging
    aliases: [stage]
applications:
  - name: api
  - name: web
    description: Web frontend
"#;
    let (_temp_dir, catalog_path, sub_dir) = create_test_catalog_in_subdir(yaml);

    let found = find_catalog_file_from(&sub_dir).unwrap();
    assert_eq!(found, catalog_path);

    let catalog: StaticCatalog = parse_catalog_file(&found).unwrap().into();
    assert_eq!(catalog.environments().len(), 2);
    assert_eq!(catalog.environment("prod").unwrap()[0].description(), "Live");
    assert_eq!(catalog.environment("all").unwrap().len(), 2);
    assert_eq!(catalog.application("web").unwrap().description(), "Web frontend");
    assert!(catalog.application("sample").is_err());
}

#[test]
fn test_rejects_ambiguous_names() {
    let yaml = r#"
environments:
  - name: development
    aliases: [dev]
  - name: dev
"#;
    assert!(matches!(parse_catalog(yaml), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_rejects_unknown_keys() {
    let yaml = r#"
environments:
  - name: local
applications:
  - name: web
    repository: git@example.com:web.git
"#;
    assert!(matches!(parse_catalog(yaml), Err(ConfigError::Yaml(_))));
}

#[test]
fn test_empty_file_is_empty_catalog() {
    let catalog: StaticCatalog = parse_catalog("{}").unwrap().into();
    assert!(catalog.environments().is_empty());
    assert!(catalog.applications().is_empty());
}
