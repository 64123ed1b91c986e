//! Scenario: a service loads its configuration from a config directory
//!
//! Flow:
//! 1. Ship `default` settings with the code
//! 2. Layer environment, host, instance and `local` files on top
//! 3. Inject secrets through environment variables
//! 4. Read settings; the tree is frozen from then on

use crate::common::*;
use strata::{ConfigError, LoadOptions, WarningKind};

/// SCENARIO: defaults overridden by a production file, read as a whole
#[test]
fn scenario_production_overrides_defaults() {
    let dir = ConfigDir::new()
        .with_file("default.json", DEFAULT_JSON)
        .with_file("production.yaml", PRODUCTION_YAML);

    let config = dir.load(dir.options().with_environment("production")).unwrap();

    assert_eq!(config.get("db.host").unwrap().as_str(), Some("db.prod"));
    assert_eq!(config.get("db.port").unwrap().as_i64(), Some(5432));
    assert_eq!(config.get("db.pool.min").unwrap().as_i64(), Some(1));
    assert_eq!(config.get("db.pool.max").unwrap().as_i64(), Some(50));
    assert_eq!(config.get("features").unwrap().as_list().unwrap().len(), 2);
    assert!(config.warnings().is_empty());
}

/// SCENARIO: every discriminator in play, files applied in precedence order
#[test]
fn scenario_full_precedence_chain() {
    let files = [
        "local-production-2.yaml",
        "local.json",
        "web1.example.com.json",
        "web1-production.json",
        "web1.yaml",
        "production.toml",
        "default-2.json",
        "default.json",
    ];
    let dir = ConfigDir::new();
    for name in files {
        let stem = name.rsplit_once('.').unwrap().0;
        let body = match name.rsplit_once('.').unwrap().1 {
            "toml" => format!("winner = \"{stem}\"\n"),
            "yaml" => format!("winner: {stem}\n"),
            _ => format!(r#"{{"winner": "{stem}"}}"#),
        };
        dir.write(name, &body);
    }

    let options = dir
        .options()
        .with_environment("production")
        .with_instance("2")
        .with_hostname("web1.example.com");
    let config = dir.load(options).unwrap();

    let applied: Vec<String> = config.sources().iter().map(|s| s.file_name()).collect();
    assert_eq!(
        applied,
        vec![
            "default.json",
            "default-2.json",
            "production.toml",
            "web1.yaml",
            "web1-production.json",
            "web1.example.com.json",
            "local.json",
            "local-production-2.yaml",
        ]
    );
    assert_eq!(config.get("winner").unwrap().as_str(), Some("local-production-2"));
    assert_eq!(config.hostname(), Some("web1.example.com"));
}

/// SCENARIO: secrets and overrides come from the environment
#[test]
fn scenario_environment_sources_override_files() {
    let dir = ConfigDir::new()
        .with_file("default.json", DEFAULT_JSON)
        .with_file("local.toml", LOCAL_TOML)
        .with_file("custom-environment-variables.json", CUSTOM_ENV_VARS_JSON);

    let options = LoadOptions::from_parts(
        [
            ("STRATA_CONFIG_DIR", dir.path().to_str().unwrap()),
            ("DB_PASSWORD", "hunter2"),
            ("DB_POOL_MAX", "12"),
            ("STRATA_CONFIG", r#"{"db": {"port": 7000}}"#),
        ],
        [r#"--STRATA_CONFIG={"debug": false}"#],
    );
    let config = dir.load(options).unwrap();

    assert_eq!(config.get("db.password").unwrap().as_str(), Some("hunter2"));
    assert_eq!(config.get("db.pool.max").unwrap().as_i64(), Some(12));
    assert_eq!(config.get("db.port").unwrap().as_i64(), Some(7000));
    assert_eq!(config.get("debug").unwrap().as_bool(), Some(false));

    let names: Vec<String> = config.sources().iter().map(|s| s.file_name()).collect();
    assert_eq!(
        names,
        vec![
            "default.json",
            "local.toml",
            "custom-environment-variables.json",
            "$STRATA_CONFIG",
            "--STRATA_CONFIG argument",
        ]
    );
}

/// SCENARIO: a typo in an environment name is caught
#[test]
fn scenario_unmatched_environment_warns_then_fails_in_strict_mode() {
    let dir = ConfigDir::new()
        .with_file("default.json", DEFAULT_JSON)
        .with_file("production.yaml", PRODUCTION_YAML);

    let config = dir.load(dir.options().with_environment("prodution")).unwrap();
    assert_eq!(config.warnings().len(), 1);
    assert_eq!(config.warnings()[0].kind, WarningKind::UnmatchedEnvironment);
    assert_eq!(config.get("db.host").unwrap().as_str(), Some("localhost"));

    let err = dir
        .load(dir.options().with_environment("prodution").with_strict(true))
        .unwrap_err();
    assert!(err.to_string().starts_with("FATAL: "));
}

/// SCENARIO: a broken file stops the load
#[test]
fn scenario_malformed_file_is_fatal() {
    let dir = ConfigDir::new()
        .with_file("default.json", DEFAULT_JSON)
        .with_file("local.yaml", "db: [unclosed\n");

    let err = dir.load(dir.options()).unwrap_err();

    match err {
        ConfigError::MalformedSource { source_name, .. } => assert!(source_name.ends_with("local.yaml")),
        other => panic!("expected MalformedSource, got {other}"),
    }
}

/// SCENARIO: application code reads settings; later writes are rejected
#[test]
fn scenario_reads_freeze_the_tree() {
    let dir = ConfigDir::new().with_file("default.json", DEFAULT_JSON);
    let mut config = dir.load(dir.options()).unwrap();

    config.set("db.port", 1111).unwrap();
    assert_eq!(config.get("db.port").unwrap().as_i64(), Some(1111));

    assert!(matches!(config.set("db.port", 2222), Err(ConfigError::Immutable { .. })));
    assert!(config.root().is_frozen());

    let allowed = dir
        .load(LoadOptions::from_parts(
            [
                ("STRATA_CONFIG_DIR", dir.path().to_str().unwrap()),
                ("STRATA_ALLOW_MUTATIONS", "true"),
            ],
            Vec::<String>::new(),
        ))
        .unwrap();
    allowed.get("db").unwrap();
    assert!(!allowed.root().is_frozen());
}

/// SCENARIO: a library registers its defaults after the app has started
#[test]
fn scenario_module_defaults_after_startup() {
    let dir = ConfigDir::new().with_file("default.json", r#"{"cache": {"ttl": 5}}"#);
    let mut config = dir.load(dir.options()).unwrap();
    config.get("cache.ttl").unwrap();

    let defaults = strata::Node::new().with("ttl", 60).with("size", 100);
    config.set_module_defaults("cache", &defaults).unwrap();

    assert_eq!(config.get("cache.ttl").unwrap().as_i64(), Some(5));
    assert_eq!(config.get("cache.size").unwrap().as_i64(), Some(100));
    assert_eq!(config.sources()[0].name, strata::MODULE_DEFAULTS);
}
