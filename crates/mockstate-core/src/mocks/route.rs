//! Selected fixture of a single route.

use crate::fixtures::FixtureStore;
use serde_json::Value;
use std::fmt;

/// One overridable route and its currently selected fixture.
///
/// Built fresh for every request from the persisted override map and
/// discarded afterwards.
pub struct MockableRoute<'a> {
    key: String,
    /// Selected fixture name, empty when the route passes through
    state: String,
    fixtures: &'a dyn FixtureStore,
}

impl<'a> MockableRoute<'a> {
    pub fn new(
        key: impl Into<String>,
        state: Option<String>,
        fixtures: &'a dyn FixtureStore,
    ) -> Self {
        Self {
            key: key.into(),
            state: state.unwrap_or_default(),
            fixtures,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Fixture names available for this route, re-read from the store on each call.
    pub fn list_available_states(&self) -> Vec<String> {
        self.fixtures.list(&self.key)
    }

    pub fn get_current_state(&self) -> Option<&str> {
        (!self.state.is_empty()).then_some(self.state.as_str())
    }

    /// Store the selection verbatim. Validation is up to the caller.
    pub fn set_current_state(&mut self, value: Option<&str>) {
        self.state = value.unwrap_or_default().to_owned();
    }

    /// Content of the selected fixture.
    ///
    /// `None` when nothing is selected, the fixture is gone or unparsable, or it
    /// holds a JSON `null`.
    pub fn get_fixture_data(&self) -> Option<Value> {
        let state = self.get_current_state()?;
        self.fixtures
            .load(&self.key, state)
            .filter(|data| !data.is_null())
    }
}

impl fmt::Debug for MockableRoute<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockableRoute")
            .field("key", &self.key)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
