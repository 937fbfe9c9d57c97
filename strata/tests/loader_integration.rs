//! Integration tests for loading and merging configuration files.

mod common;

use std::sync::Arc;

use common::{every_format, ConfigDir};
use serde_json::{json, Value};
use strata::parser::{JsonParser, Parser};
use strata::{ConfigAccess, ConfigLoader, Error, PathSpec};

#[test]
fn test_single_json_file() {
    let dir = ConfigDir::new().with_file("a.json", r#"{"x": {"y": 1}, "z": 2}"#);

    let config = ConfigLoader::new()
        .load(dir.path_of("a.json"), PathSpec::default())
        .unwrap();

    assert_eq!(config.get("a.x.y").unwrap(), json!(1));
    assert_eq!(config.get("a.z").unwrap(), json!(2));
    assert_eq!(config.get("a.x").unwrap(), json!({"y": 1}));
}

#[test]
fn test_same_stem_shares_namespace() {
    let dir = ConfigDir::new()
        .with_file("a.json", r#"{"from_json": true, "shared": "json"}"#)
        .with_file("a.yaml", "from_yaml: true\nshared: yaml\n");

    let config = ConfigLoader::new()
        .load(dir.paths_of(&["a.json", "a.yaml"]), PathSpec::default())
        .unwrap();

    assert!(config.has("a.from_json"));
    assert!(config.has("a.from_yaml"));
    assert_eq!(config.get("a.shared").unwrap(), "yaml");

    // Reversed order flips the winner
    let config = ConfigLoader::new()
        .load(dir.paths_of(&["a.yaml", "a.json"]), PathSpec::default())
        .unwrap();
    assert_eq!(config.get("a.shared").unwrap(), "json");
}

#[test]
fn test_merge_is_key_by_key() {
    let dir = ConfigDir::new()
        .with_file("db.toml", "[primary]\nhost = \"a\"\nport = 1\n")
        .with_file("db.json", r#"{"primary": {"port": 2}, "replica": {"host": "b"}}"#);

    let config = ConfigLoader::new()
        .load(dir.paths_of(&["db.toml", "db.json"]), PathSpec::default())
        .unwrap();

    assert_eq!(
        config.all(),
        &json!({
            "db": {
                "primary": {"host": "a", "port": 2},
                "replica": {"host": "b"}
            }
        })
    );
}

#[test]
fn test_global_file_merges_at_root() {
    let dir = ConfigDir::new()
        .with_file("app.json", r#"{"debug": false, "name": "demo"}"#)
        .with_file(".env.json", r#"{"app": {"debug": true}, "stage": "dev"}"#);

    let config = ConfigLoader::new()
        .load(
            dir.path_of("app.json"),
            vec![dir.path_of(".env.json")],
        )
        .unwrap();

    assert_eq!(config.get("app.debug").unwrap(), json!(true));
    assert_eq!(config.get("app.name").unwrap(), "demo");
    assert_eq!(config.get("stage").unwrap(), "dev");
    assert!(!config.has("env"));
}

#[test]
fn test_directory_input_uses_every_format() {
    let dir = every_format();

    let config = ConfigLoader::new()
        .read(dir.path(), PathSpec::default())
        .unwrap();

    assert_eq!(config.get("toml_svc.net.port").unwrap(), json!(1));
    assert_eq!(config.get("json_svc.net.port").unwrap(), json!(2));
    assert_eq!(config.get("ini_svc.net.port").unwrap(), json!("3"));
    assert_eq!(config.get("xml_svc.net.port").unwrap(), json!("4"));
    assert_eq!(config.get("yaml_svc.net.port").unwrap(), json!(5));
    assert_eq!(config.get("yml_svc.net.port").unwrap(), json!(6));

    for stem in ["toml_svc", "json_svc", "ini_svc", "xml_svc", "yaml_svc", "yml_svc"] {
        let name = config.get(&format!("{stem}.name")).unwrap();
        assert_eq!(name, Value::String(stem.trim_end_matches("_svc").to_string()));
    }
}

#[test]
fn test_optional_directory_overrides_required() {
    let base = ConfigDir::new().with_file("app.json", r#"{"port": 1}"#);
    let overrides = ConfigDir::new().with_file("app.yaml", "port: 2\n");

    let config = ConfigLoader::new()
        .load(base.path_of("app.json"), overrides.path())
        .unwrap();
    assert_eq!(config.get("app.port").unwrap(), json!(2));
}

#[test]
fn test_missing_optional_paths_are_ignored() {
    let dir = ConfigDir::new().with_file("app.json", r#"{"port": 1}"#);

    let config = ConfigLoader::new()
        .load(
            dir.path_of("app.json"),
            dir.paths_of(&["missing.json", "also/missing.yaml"]),
        )
        .unwrap();
    assert_eq!(config.all(), &json!({"app": {"port": 1}}));
}

#[test]
fn test_broken_optional_file_still_fails() {
    let dir = ConfigDir::new()
        .with_file("app.json", r#"{"port": 1}"#)
        .with_file("local.json", "{ not json");

    let err = ConfigLoader::new()
        .load(dir.path_of("app.json"), dir.path_of("local.json"))
        .unwrap_err();
    assert!(err.is_parse_failure());
}

#[test]
fn test_missing_required_path_is_fatal() {
    let dir = ConfigDir::new();
    let err = ConfigLoader::new()
        .load(dir.path_of("app.json"), PathSpec::default())
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(matches!(err, Error::FileNotFound { ref path } if path.ends_with("app.json")));
}

#[test]
fn test_directory_with_unknown_extension_fails() {
    let dir = ConfigDir::new()
        .with_file("app.json", "{}")
        .with_file("notes.txt", "hello");

    let err = ConfigLoader::new()
        .load(dir.path(), PathSpec::default())
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedExtension { ref extension } if extension == "txt"));
}

#[test]
fn test_root_sequence_flattens_by_index() {
    let dir = ConfigDir::new().with_file(".hosts.json", r#"["a", "b"]"#);

    let config = ConfigLoader::new()
        .load(dir.path_of(".hosts.json"), PathSpec::default())
        .unwrap();
    assert_eq!(config.all(), &json!({"0": "a", "1": "b"}));
}

#[test]
fn test_custom_extension_via_factory() {
    let dir = ConfigDir::new().with_file("svc.jsonc", r#"{"port": 7}"#);

    let mut loader = ConfigLoader::new();
    loader.set_factory("jsonc", |registry| registry.get_parser("json"));

    let config = loader
        .load(dir.path_of("svc.jsonc"), PathSpec::default())
        .unwrap();
    assert_eq!(config.get("svc.port").unwrap(), json!(7));
    assert!(Arc::ptr_eq(
        &loader.get_parser("jsonc").unwrap(),
        &loader.get_parser("json").unwrap()
    ));
}

#[test]
fn test_replacing_builtin_parser() {
    struct Upper;

    impl Parser for Upper {
        fn parse(&self, path: &std::path::Path) -> strata::Result<Value> {
            let value = JsonParser.parse(path)?;
            Ok(json!({ "upper": value }))
        }
    }

    let dir = ConfigDir::new().with_file("a.json", r#"{"x": 1}"#);
    let mut loader = ConfigLoader::new();
    loader.set_parser("json", Arc::new(Upper));

    let config = loader
        .load(dir.path_of("a.json"), PathSpec::default())
        .unwrap();
    assert_eq!(config.get("a.upper.x").unwrap(), json!(1));
}

#[test]
fn test_read_only_rejects_writes_after_load() {
    let dir = ConfigDir::new().with_file("a.json", r#"{"list": ["y"]}"#);

    let mut config = ConfigLoader::new()
        .read(dir.path_of("a.json"), PathSpec::default())
        .unwrap();

    assert!(matches!(
        config.push("a.list", json!("v")),
        Err(Error::WriteNotAllowed)
    ));
    assert_eq!(config.get("a.list").unwrap(), json!(["y"]));

    let mut config = ConfigLoader::new()
        .load(dir.path_of("a.json"), PathSpec::default())
        .unwrap();
    config.prepend("a.list", json!("v")).unwrap();
    assert_eq!(config.get("a.list").unwrap(), json!(["v", "y"]));
}
