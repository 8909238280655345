//! Fixture lookup.
//!
//! A fixture is a canned response body identified by `(route_key, name)`.
//! [`FixtureStore`] abstracts where fixtures live: [`DirFixtureStore`] reads
//! `<root>/<route_key>/<name>.json` files, [`MemoryFixtureStore`] keeps an
//! embedded bundle.

use serde_json::Value;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Extension of fixture files
pub const FIXTURE_EXTENSION: &str = "json";

/// Read-only source of fixtures.
pub trait FixtureStore {
    /// Names of the fixtures available for a route.
    ///
    /// Recomputed on every call; the order is whatever the backing store yields.
    fn list(&self, route_key: &str) -> Vec<String>;

    /// Parsed content of a fixture, or `None` when it is missing or malformed.
    fn load(&self, route_key: &str, name: &str) -> Option<Value>;
}

/// Fixtures stored as JSON files, one directory per route key.
#[derive(Debug, Clone)]
pub struct DirFixtureStore {
    root: PathBuf,
}

impl DirFixtureStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn route_dir(&self, route_key: &str) -> PathBuf {
        self.root.join(route_key)
    }
}

impl FixtureStore for DirFixtureStore {
    fn list(&self, route_key: &str) -> Vec<String> {
        if !is_plain_name(route_key) {
            return Vec::new();
        }

        let dir = self.route_dir(route_key);
        let pattern = format!(
            "{}/*.{}",
            glob::Pattern::escape(&dir.to_string_lossy()),
            FIXTURE_EXTENSION
        );

        let paths = match glob::glob(&pattern) {
            Ok(paths) => paths,
            Err(e) => {
                warn!(route = route_key, error = %e, "invalid fixture pattern");
                return Vec::new();
            }
        };

        let suffix = format!(".{FIXTURE_EXTENSION}");
        paths
            .filter_map(Result::ok)
            .filter(|path| path.is_file())
            .filter_map(|path| {
                let file_name = path.file_name()?.to_str()?;
                let name = file_name.strip_suffix(&suffix)?;
                (!name.is_empty()).then(|| name.to_owned())
            })
            .collect()
    }

    fn load(&self, route_key: &str, name: &str) -> Option<Value> {
        if !is_plain_name(route_key) || !is_plain_name(name) {
            return None;
        }

        let path = self
            .route_dir(route_key)
            .join(format!("{name}.{FIXTURE_EXTENSION}"));

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(route = route_key, fixture = name, "fixture file not found");
                return None;
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read fixture");
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "malformed fixture");
                None
            }
        }
    }
}

/// Fixtures kept in memory, listed in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryFixtureStore {
    routes: HashMap<String, Vec<(String, Value)>>,
}

impl MemoryFixtureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MemoryFixtureStore::insert`].
    pub fn with_fixture(
        mut self,
        route_key: impl Into<String>,
        name: impl Into<String>,
        data: Value,
    ) -> Self {
        self.insert(route_key, name, data);
        self
    }

    /// Add a fixture, replacing any existing one with the same name.
    pub fn insert(&mut self, route_key: impl Into<String>, name: impl Into<String>, data: Value) {
        let name = name.into();
        let fixtures = self.routes.entry(route_key.into()).or_default();
        match fixtures.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = data,
            None => fixtures.push((name, data)),
        }
    }

    /// Remove a fixture. Returns `true` when it existed.
    pub fn remove(&mut self, route_key: &str, name: &str) -> bool {
        let Some(fixtures) = self.routes.get_mut(route_key) else {
            return false;
        };
        let before = fixtures.len();
        fixtures.retain(|(existing, _)| existing != name);
        fixtures.len() != before
    }
}

impl FixtureStore for MemoryFixtureStore {
    fn list(&self, route_key: &str) -> Vec<String> {
        self.routes
            .get(route_key)
            .map(|fixtures| fixtures.iter().map(|(name, _)| name.clone()).collect())
            .unwrap_or_default()
    }

    fn load(&self, route_key: &str, name: &str) -> Option<Value> {
        self.routes
            .get(route_key)?
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, data)| data.clone())
    }
}

/// Single path component that cannot escape its directory.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}
