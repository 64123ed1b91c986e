//! Test fixtures - reusable source documents for tests.

/// Baseline database settings
pub const DEFAULT_JSON: &str = r#"{
  "db": { "host": "localhost", "port": 5432, "pool": { "min": 1, "max": 5 } },
  "features": ["search"],
  "debug": false
}"#;

/// Production overrides in YAML
pub const PRODUCTION_YAML: &str = r#"db:
  host: db.prod
  pool:
    max: 50
features:
  - search
  - billing
"#;

/// Developer-local overrides in TOML
pub const LOCAL_TOML: &str = r#"debug = true

[db]
port = 6543
"#;

/// Maps config paths to environment variables
pub const CUSTOM_ENV_VARS_JSON: &str = r#"{
  "db": {
    "password": "DB_PASSWORD",
    "pool": { "max": { "__name": "DB_POOL_MAX", "__format": "json" } }
  }
}"#;
