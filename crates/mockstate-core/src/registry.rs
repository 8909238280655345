//! Static registry of routes whose responses may be overridden.

use serde::{Deserialize, Serialize};

/// One overridable route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Short identifier, used as storage key and fixture directory name
    pub key: String,
    /// Fragment expected somewhere in the request path and query
    pub path: String,
}

impl RouteEntry {
    pub fn new(key: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
        }
    }
}

/// Ordered mapping of route key to path fragment.
///
/// Duplicate keys or overlapping fragments are not rejected; the first entry
/// that matches wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteRegistry {
    entries: Vec<RouteEntry>,
}

impl RouteRegistry {
    pub fn new(entries: Vec<RouteEntry>) -> Self {
        Self { entries }
    }

    /// Routes of the payments overview pages.
    pub fn payments() -> Self {
        Self::new(vec![
            RouteEntry::new("deposits", "payments/deposits/overview-all"),
            RouteEntry::new(
                "recent-deposits",
                "payments/deposits?page=1&pagesize=3&sort=date&direction=desc",
            ),
            RouteEntry::new("disputes", "payments/disputes?"),
        ])
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Key of the first route whose fragment occurs in `url`.
    pub fn find_match(&self, url: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| url.contains(e.path.as_str()))
            .map(|e| e.key.as_str())
    }
}

/// Whether `url` looks like a REST API call.
pub fn is_rest_request(url: &str, rest_prefix: &str) -> bool {
    !url.is_empty() && url.contains(rest_prefix)
}
