//! Schema documents and layered option sources
//!
//! Loads schemas and option lists from files the way a service would at
//! startup, then validates one against the other.

use std::path::PathBuf;

use familiar_options::{validate, OptionError, OptionSources, Schema, SchemaError};
use serde_json::json;
use tempfile::TempDir;

const SERVER_SCHEMA: &str = r#"
[port]
required = true
validator = "port"

[address]
required = true
default = "0.0.0.0"

[mode]
default = "fast"
validator = { one_of = ["fast", "safe"] }

[name]
validator = { pattern = "^[a-z][a-z0-9-]*$" }

[verbose]
"#;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_toml_schema_with_toml_options() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let schema = Schema::load(write(&dir, "schema.toml", SERVER_SCHEMA))?;
    let options = OptionSources::new()
        .file(write(&dir, "server.toml", "port = 4000\nname = \"edge-1\"\nunused = 1\n"))
        .load()?;

    let result = validate(&options, &schema)?;

    assert_eq!(result.get("port"), Some(&json!(4000)));
    assert_eq!(result.get("address"), Some(&json!("0.0.0.0")));
    assert_eq!(result.get("mode"), Some(&json!("fast")));
    assert_eq!(result.get("name"), Some(&json!("edge-1")));
    assert!(!result.contains_key("unused"));
    assert!(!result.contains_key("verbose"));
    Ok(())
}

#[test]
fn test_json_schema_document() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = write(
        &dir,
        "schema.json",
        r#"{"port": {"required": true, "validator": "integer"}, "token": {"default": null}}"#,
    );
    let schema = Schema::load(path)?;

    let options = OptionSources::new()
        .file(write(&dir, "options.json", r#"{"port": "80"}"#))
        .load()?;

    let err = validate(&options, &schema).unwrap_err();
    assert_eq!(err, OptionError::Invalid { keys: vec!["port".into()] });
    Ok(())
}

#[test]
fn test_invalid_values_from_files_are_aggregated() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let schema = Schema::from_toml_str(SERVER_SCHEMA)?;
    let options = OptionSources::new()
        .file(write(&dir, "server.toml", "port = 70000\nmode = \"slow\"\nname = \"Edge\"\n"))
        .load()?;

    let err = validate(&options, &schema).unwrap_err();

    assert_eq!(err.keys().to_vec(), vec!["port".to_string(), "mode".into(), "name".into()]);
    assert_eq!(err.to_string(), "options port, mode and name are invalid");
    Ok(())
}

#[test]
fn test_unsupported_schema_extension() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "schema.yaml", "port: {}");

    let err = Schema::load(path).unwrap_err();
    assert!(matches!(err, SchemaError::UnsupportedFormat(_)));
}

#[test]
fn test_malformed_schema_document() {
    let err = Schema::from_toml_str("port = 1").unwrap_err();
    assert!(matches!(err, SchemaError::InvalidDirective { .. }));

    let err = Schema::from_toml_str("[port\n").unwrap_err();
    assert!(matches!(err, SchemaError::Toml(_)));

    let err = Schema::from_json_str("[]").unwrap_err();
    assert!(matches!(err, SchemaError::InvalidSchema(_)));
}

#[test]
fn test_missing_schema_file() {
    let dir = TempDir::new().unwrap();
    let err = Schema::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, SchemaError::Io(_)));
}
