//! Facade contracts (FACADE-001 through FACADE-005)
//!
//! These contracts pin down how the assembled configuration behaves for
//! readers: precedence, isolation from sources, freezing and export.

use crate::common::*;
use strata::{defer, Config, ConfigSource, LoadOptions, Node, Value};

fn sources(layers: &[(&str, Node)]) -> Vec<ConfigSource> {
    layers
        .iter()
        .map(|(name, node)| ConfigSource::new(*name, node.clone()))
        .collect()
}

/// CONTRACT FACADE-001: Later sources win, key by key
mod precedence {
    use super::*;

    #[test]
    fn contract_later_source_wins_for_leaves_only() {
        let config = Config::from_sources(
            sources(&[
                ("default.json", Node::new().with("a", Node::new().with("x", 1).with("y", 1))),
                ("local.json", Node::new().with("a", Node::new().with("y", 2))),
            ]),
            LoadOptions::new(),
        )
        .unwrap();

        assert_eq!(config.get("a.x").unwrap().as_i64(), Some(1));
        assert_eq!(config.get("a.y").unwrap().as_i64(), Some(2));
    }

    #[test]
    fn contract_lists_are_replaced_not_concatenated() {
        let config = Config::from_sources(
            sources(&[
                ("default.json", Node::new().with("l", vec![Value::from(1), Value::from(2)])),
                ("local.json", Node::new().with("l", vec![Value::from(3)])),
            ]),
            LoadOptions::new(),
        )
        .unwrap();

        assert_eq!(config.to_object_at("l").unwrap(), serde_json::json!([3]));
    }
}

/// CONTRACT FACADE-002: The merged tree never aliases a source
mod isolation {
    use super::*;

    #[test]
    fn contract_mutating_a_source_does_not_change_config() {
        let layer = Node::new().with("db", Node::new().with("host", "a"));
        let config = Config::from_sources(sources(&[("default.json", layer.clone())]), LoadOptions::new()).unwrap();

        let db = layer.get("db").unwrap();
        db.as_node().unwrap().set("host", "b").unwrap();

        assert_eq!(config.get("db.host").unwrap().as_str(), Some("a"));
    }
}

/// CONTRACT FACADE-003: First successful read freezes; `has` never does
mod freezing {
    use super::*;

    #[test]
    fn contract_has_does_not_freeze() {
        let dir = ConfigDir::new().with_file("default.json", DEFAULT_JSON);
        let config = dir.load(dir.options()).unwrap();

        assert!(config.has("db.pool.max"));
        assert!(!config.root().is_frozen());

        config.get("debug").unwrap();
        assert!(config.root().is_frozen());
    }

    #[test]
    fn contract_frozen_lists_reject_writes() {
        let dir = ConfigDir::new().with_file("default.json", DEFAULT_JSON);
        let config = dir.load(dir.options()).unwrap();

        let features = config.get("features").unwrap();
        let list = features.as_list().unwrap();
        assert!(list.is_frozen());
        assert!(list.push("extra").is_err());
    }
}

/// CONTRACT FACADE-004: Module defaults never replace configured values
mod module_defaults {
    use super::*;

    #[test]
    fn contract_existing_values_win() {
        let dir = ConfigDir::new().with_file("default.json", DEFAULT_JSON);
        let mut config = dir.load(dir.options()).unwrap();

        config
            .set_module_defaults("db", &Node::new().with("host", "other").with("timeout", 30))
            .unwrap();

        assert_eq!(config.get("db.host").unwrap().as_str(), Some("localhost"));
        assert_eq!(config.get("db.timeout").unwrap().as_i64(), Some(30));
    }
}

/// CONTRACT FACADE-005: Export never contains deferred placeholders
mod export {
    use super::*;

    #[test]
    fn contract_deferred_values_are_resolved_before_export() {
        let layer = Node::new()
            .with("base", "http://svc")
            .with(
                "url",
                defer(|root, _| {
                    let base = root.get("base").and_then(|v| v.as_str().map(str::to_string));
                    Value::from(format!("{}/api", base.unwrap_or_default()))
                }),
            );
        let config = Config::from_sources(sources(&[("default.json", layer)]), LoadOptions::new()).unwrap();

        assert_eq!(
            config.to_object(),
            serde_json::json!({"base": "http://svc", "url": "http://svc/api"})
        );
    }
}
