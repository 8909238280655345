//! Controller matching REST requests to overridable routes.
//!
//! This module provides `OverrideController`, which resolves the route a request
//! targets, substitutes the selected fixture into its response, and validates and
//! persists fixture selections.

use crate::config::settings::Settings;
use crate::fixtures::FixtureStore;
use crate::mocks::route::MockableRoute;
use crate::registry::{is_rest_request, RouteRegistry};
use crate::storage::{read_override_map, write_override_map, OverrideMap, StateStore};
use crate::types::{Request, Response};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Snapshot of one route for rendering a selection menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteStatus {
    pub key: String,
    pub current_state: Option<String>,
    pub available_states: Vec<String>,
}

/// Per-request override controller.
///
/// Create one per request: route states are read from the [`StateStore`] on
/// first use and never outlive the controller.
pub struct OverrideController<'a> {
    settings: &'a Settings,
    registry: RouteRegistry,
    store: &'a dyn StateStore,
    fixtures: &'a dyn FixtureStore,
    /// Lazily loaded route states
    routes: Option<Vec<MockableRoute<'a>>>,
}

impl<'a> OverrideController<'a> {
    pub fn new(
        settings: &'a Settings,
        store: &'a dyn StateStore,
        fixtures: &'a dyn FixtureStore,
    ) -> Self {
        Self {
            settings,
            registry: settings.registry(),
            store,
            fixtures,
            routes: None,
        }
    }

    pub fn settings(&self) -> &'a Settings {
        self.settings
    }

    pub fn registry(&self) -> &RouteRegistry {
        &self.registry
    }

    /// Key of the configured route `url` targets.
    ///
    /// `None` both for non-REST requests and for REST requests matching no route.
    pub fn resolve_route_key(&self, url: &str) -> Option<&str> {
        if !is_rest_request(url, &self.settings.rest_prefix) {
            return None;
        }
        self.registry.find_match(url)
    }

    /// Response filter: replace the body with the selected fixture, if any.
    ///
    /// Status and headers of an existing response are kept. Without a response a
    /// default one wrapping the fixture is built. Every failure passes the
    /// original response through.
    pub fn maybe_override_response(
        &mut self,
        request: &Request,
        response: Option<Response>,
    ) -> Option<Response> {
        let Some(key) = self.resolve_route_key(&request.url).map(str::to_owned) else {
            return response;
        };

        let Some(data) = self.find_override(&key).and_then(MockableRoute::get_fixture_data) else {
            debug!(route = %key, "no fixture selected, passing response through");
            return response;
        };

        debug!(route = %key, url = %request.url, "overriding response with fixture");
        match response {
            Some(mut response) => {
                response.set_data(data);
                Some(response)
            }
            None => Some(Response::new(data)),
        }
    }

    /// Select `requested` as the fixture of `route_key`, or clear it when empty.
    ///
    /// Unknown routes and fixtures not currently available are ignored. On
    /// success the selections of all routes are persisted, replacing the
    /// previous map. Returns whether the selection was applied and saved.
    pub fn update_state(&mut self, route_key: &str, requested: &str) -> bool {
        let settings = self.settings;
        let store = self.store;
        let routes = self.routes();

        let Some(route) = routes.iter_mut().find(|r| r.key() == route_key) else {
            debug!(route = route_key, "ignoring state change for unknown route");
            return false;
        };

        if !requested.is_empty()
            && !route
                .list_available_states()
                .iter()
                .any(|state| state == requested)
        {
            debug!(
                route = route_key,
                fixture = requested,
                "ignoring state change to unavailable fixture"
            );
            return false;
        }

        route.set_current_state(Some(requested));

        let map: OverrideMap = routes
            .iter()
            .filter_map(|r| {
                r.get_current_state()
                    .map(|state| (r.key().to_owned(), state.to_owned()))
            })
            .collect();

        match write_override_map(store, &settings.slug, &map, settings.ttl()) {
            Ok(()) => {
                info!(route = route_key, fixture = requested, "mock state updated");
                true
            }
            Err(e) => {
                warn!(route = route_key, error = %e, "failed to persist mock state");
                false
            }
        }
    }

    /// Currently selected fixture of `route_key`.
    pub fn current_state(&mut self, route_key: &str) -> Option<String> {
        self.find_override(route_key)
            .and_then(MockableRoute::get_current_state)
            .map(str::to_owned)
    }

    /// Key, selection and available fixtures of every route, in registry order.
    pub fn route_statuses(&mut self) -> Vec<RouteStatus> {
        self.routes()
            .iter()
            .map(|route| RouteStatus {
                key: route.key().to_owned(),
                current_state: route.get_current_state().map(str::to_owned),
                available_states: route.list_available_states(),
            })
            .collect()
    }

    fn find_override(&mut self, route_key: &str) -> Option<&MockableRoute<'a>> {
        self.routes().iter().find(|r| r.key() == route_key)
    }

    fn routes(&mut self) -> &mut Vec<MockableRoute<'a>> {
        let Self {
            settings,
            registry,
            store,
            fixtures,
            routes,
        } = self;

        routes.get_or_insert_with(|| {
            let overrides = read_override_map(*store, &settings.slug);
            registry
                .keys()
                .map(|key| MockableRoute::new(key, overrides.get(key).cloned(), *fixtures))
                .collect()
        })
    }
}
