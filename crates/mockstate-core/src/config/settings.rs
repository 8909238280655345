//! Runtime settings for the override layer.

use crate::config::error::ConfigError;
use crate::config::parser::load_config;
use crate::registry::{RouteEntry, RouteRegistry};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default plugin identifier
pub const DEFAULT_SLUG: &str = "mock-state";
/// Default REST URL prefix
pub const DEFAULT_REST_PREFIX: &str = "wp-json";
/// Override map expiry: one day
pub const DEFAULT_TTL_SECS: u64 = 24 * 60 * 60;

/// Settings shared by every request.
///
/// Missing fields fall back to [`Settings::default`], so an empty settings file
/// yields the built-in payments registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Plugin identifier: storage key, nonce action and trigger parameter prefix
    pub slug: String,
    /// Substring that marks a request URI as a REST call
    pub rest_prefix: String,
    /// Directory containing one sub-directory of fixtures per route key
    pub fixtures_dir: PathBuf,
    /// Lifetime of the persisted override map, refreshed on every write
    pub ttl_secs: u64,
    /// Routes eligible for override, matched in order
    pub routes: Vec<RouteEntry>,
}

impl Settings {
    /// Load settings from a YAML, JSON or JSONC file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        load_config(path)
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Name of the query parameter carrying the route key of a state change.
    pub fn action_param(&self) -> String {
        format!("{}-action", self.slug)
    }

    /// Name of the query parameter carrying the requested fixture name.
    pub fn override_param(&self) -> String {
        format!("{}-override", self.slug)
    }

    pub fn registry(&self) -> RouteRegistry {
        RouteRegistry::new(self.routes.clone())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            slug: DEFAULT_SLUG.to_string(),
            rest_prefix: DEFAULT_REST_PREFIX.to_string(),
            fixtures_dir: PathBuf::from("data"),
            ttl_secs: DEFAULT_TTL_SECS,
            routes: RouteRegistry::payments().entries().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parser::{parse_json, parse_yaml};
    use rstest::rstest;

    #[rstest]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.slug, "mock-state");
        assert_eq!(settings.rest_prefix, "wp-json");
        assert_eq!(settings.ttl(), Duration::from_secs(86_400));
        assert_eq!(settings.action_param(), "mock-state-action");
        assert_eq!(settings.override_param(), "mock-state-override");
        assert_eq!(
            settings.registry().keys().collect::<Vec<_>>(),
            vec!["deposits", "recent-deposits", "disputes"]
        );
    }

    #[rstest]
    fn test_empty_document_uses_defaults() {
        let settings: Settings = parse_json("{}").expect("Should parse");
        assert_eq!(settings, Settings::default());
    }

    #[rstest]
    fn test_yaml_overrides_keep_route_order() {
        let content = r#"
slug: dev-state
fixtures_dir: /srv/fixtures
ttl_secs: 600
routes:
  - key: orders
    path: shop/orders
  - key: customers
    path: shop/customers
"#;
        let settings: Settings = parse_yaml(content).expect("Should parse");
        assert_eq!(settings.slug, "dev-state");
        assert_eq!(settings.rest_prefix, "wp-json");
        assert_eq!(settings.fixtures_dir, PathBuf::from("/srv/fixtures"));
        assert_eq!(settings.ttl(), Duration::from_secs(600));
        assert_eq!(
            settings.registry().keys().collect::<Vec<_>>(),
            vec!["orders", "customers"]
        );
    }

    #[rstest]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mockstate.jsonc");
        std::fs::write(&path, "{ /* local */ \"rest_prefix\": \"api\" }").unwrap();

        let settings = Settings::load(&path).expect("Should load");
        assert_eq!(settings.rest_prefix, "api");
        assert_eq!(settings.slug, DEFAULT_SLUG);
    }

    #[rstest]
    fn test_example_settings_match_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../mockstate.example.yaml");
        assert_eq!(Settings::load(path).expect("Should load"), Settings::default());
    }
}
