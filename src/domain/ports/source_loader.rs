//! Source loader port - abstracts discovery and parsing of configuration sources.

use crate::config::LoadOptions;
use crate::domain::entities::ConfigSource;
use crate::domain::value_objects::ConfigWarning;
use crate::error::ConfigResult;

/// Parsed sources in application order, plus anything worth warning about.
#[derive(Debug, Clone, Default)]
pub struct LoadedSources {
    pub sources: Vec<ConfigSource>,
    pub warnings: Vec<ConfigWarning>,
}

/// Loader trait for configuration sources.
///
/// Abstracts where sources come from (config directories, environment
/// variables, command-line overrides) so the facade can be assembled from
/// anything that yields parsed nodes.
pub trait SourceLoader {
    /// Load every applicable source, lowest precedence first.
    ///
    /// A source that exists but cannot be parsed is an error; optional
    /// overrides that fail to parse are reported as warnings instead.
    fn load_sources(&self, options: &LoadOptions) -> ConfigResult<LoadedSources>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Node, WarningKind};
    use crate::error::ConfigError;
    use std::collections::HashMap;

    /// Mock implementation for testing
    struct MockSourceLoader {
        by_environment: HashMap<String, Vec<ConfigSource>>,
    }

    impl MockSourceLoader {
        fn new() -> Self {
            Self {
                by_environment: HashMap::new(),
            }
        }

        fn with_source(mut self, env: &str, source: ConfigSource) -> Self {
            self.by_environment
                .entry(env.to_string())
                .or_default()
                .push(source);
            self
        }
    }

    impl SourceLoader for MockSourceLoader {
        fn load_sources(&self, options: &LoadOptions) -> ConfigResult<LoadedSources> {
            let mut loaded = LoadedSources::default();
            for env in options.environments() {
                match self.by_environment.get(env) {
                    Some(sources) => loaded.sources.extend(sources.iter().cloned()),
                    None if env == "broken" => {
                        return Err(ConfigError::malformed("broken.json", "unexpected end of input"))
                    }
                    None => loaded.warnings.push(ConfigWarning::new(
                        WarningKind::NoConfigFiles,
                        format!("nothing for {env}"),
                    )),
                }
            }
            Ok(loaded)
        }
    }

    #[test]
    fn mock_loader_returns_sources_in_environment_order() {
        let loader = MockSourceLoader::new()
            .with_source("base", ConfigSource::new("base.json", Node::new().with("a", 1)))
            .with_source("qa", ConfigSource::new("qa.json", Node::new().with("a", 2)));

        let loaded = loader
            .load_sources(&LoadOptions::new().with_environments(["base", "qa"]))
            .unwrap();

        let names: Vec<_> = loaded.sources.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["base.json", "qa.json"]);
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn mock_loader_reports_missing_as_warning() {
        let loader = MockSourceLoader::new();
        let loaded = loader.load_sources(&LoadOptions::new()).unwrap();
        assert!(loaded.sources.is_empty());
        assert_eq!(loaded.warnings[0].kind, WarningKind::NoConfigFiles);
    }

    #[test]
    fn mock_loader_propagates_parse_failures() {
        let loader = MockSourceLoader::new();
        let result = loader.load_sources(&LoadOptions::new().with_environment("broken"));
        assert!(matches!(result, Err(ConfigError::MalformedSource { .. })));
    }
}
