//! End-to-end overlay resolution: manifest -> merge -> environment

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use props_core::{UnitName, merge_configuration};
use props_env::{
    Environment, FsResourceLoader, INLINED_PROPERTIES_SOURCE_NAME, ManifestResolver,
    PropertySource, apply_merged_config,
};
use tempfile::TempDir;

const MANIFEST: &str = r#"
[[units."suite::http::ClientTests".declarations]]
locations = ["client-${env}.properties"]
properties = ["retries=5", "client.name=itest"]

[[units."suite::http::ClientTests".declarations]]
level = 1
declaring-unit = "suite::Base"
locations = ["/base.properties"]
properties = ["retries=1", "base.flag=on"]

[[units."suite::Defaults".declarations]]
"#;

fn write_resource(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn setup() -> (TempDir, ManifestResolver, FsResourceLoader) {
    let temp = TempDir::new().unwrap();
    write_resource(
        temp.path(),
        "suite/http/client-dev.properties",
        "endpoint=http://localhost\ntimeout=2\n",
    );
    write_resource(temp.path(), "base.properties", "endpoint=http://prod\ntimeout=30\n");
    write_resource(temp.path(), "suite/Defaults.properties", "detected=yes\n");

    let resolver = ManifestResolver::from_toml_str(MANIFEST).unwrap();
    let loader = FsResourceLoader::new(temp.path());
    (temp, resolver, loader)
}

#[test]
fn test_resolves_and_applies_a_two_level_overlay() {
    let (_temp, resolver, loader) = setup();
    let unit = UnitName::new("suite::http::ClientTests");

    let merged = merge_configuration(&unit, &resolver, &loader).unwrap();

    // Least-derived level first, most-derived last.
    assert_eq!(
        merged.locations,
        vec![
            "base.properties".to_string(),
            "suite/http/client-${env}.properties".to_string(),
        ]
    );
    assert_eq!(
        merged.properties,
        vec![
            "retries=1".to_string(),
            "base.flag=on".to_string(),
            "retries=5".to_string(),
            "client.name=itest".to_string(),
        ]
    );

    let mut env = Environment::new();
    // Seed the placeholder used inside the derived location.
    let mut seed = PropertySource::new("seed");
    seed.insert("env", "dev");
    env.add_highest_precedence(seed);
    apply_merged_config(&mut env, &loader, &merged).unwrap();

    // Derived location overrides the base one.
    assert_eq!(env.property("endpoint"), Some("http://localhost"));
    assert_eq!(env.property("timeout"), Some("2"));
    // Inlined pairs override everything; the duplicate key keeps its last value.
    assert_eq!(env.property("retries"), Some("5"));
    assert_eq!(env.property("base.flag"), Some("on"));
    assert_eq!(env.property("client.name"), Some("itest"));

    // Inlined source on top, then the locations in application order,
    // then whatever the environment already held.
    let names: Vec<&str> = env.sources().iter().map(|s| s.name()).collect();
    assert_eq!(
        names,
        vec![
            INLINED_PROPERTIES_SOURCE_NAME,
            "suite/http/client-dev.properties",
            "base.properties",
            "seed",
        ]
    );
}

#[test]
fn test_declarationless_unit_detects_default_resource() {
    let (_temp, resolver, loader) = setup();
    let unit = UnitName::new("suite::Defaults");

    let merged = merge_configuration(&unit, &resolver, &loader).unwrap();
    assert_eq!(merged.locations, vec!["suite/Defaults.properties".to_string()]);
    assert!(merged.properties.is_empty());

    let mut env = Environment::new();
    apply_merged_config(&mut env, &loader, &merged).unwrap();
    assert_eq!(env.property("detected"), Some("yes"));
}

#[test]
fn test_unit_absent_from_manifest_is_a_no_op() {
    let (_temp, resolver, loader) = setup();
    let unit = UnitName::new("suite::Unknown");

    let merged = merge_configuration(&unit, &resolver, &loader).unwrap();
    assert!(merged.is_empty());

    let mut env = Environment::new();
    apply_merged_config(&mut env, &loader, &merged).unwrap();
    assert!(env.sources().is_empty());
}
