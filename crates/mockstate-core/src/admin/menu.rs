//! Data for the admin selection menu.

use crate::admin::action::{action_url, Actor};
use crate::admin::nonce::NonceProvider;
use crate::mocks::controller::OverrideController;
use serde::Serialize;

/// Selectable entry of a route's submenu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub id: String,
    pub title: String,
    pub active: bool,
    /// State-change link, nonce included
    pub href: String,
}

/// Submenu of one route: a reset item followed by one item per fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuGroup {
    pub id: String,
    pub key: String,
    pub title: String,
    /// Whether a fixture is selected for the route
    pub active: bool,
    pub items: Vec<MenuItem>,
}

/// `has-data` becomes `Has Data`.
pub fn title_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut word_start = true;
    for c in name.chars().map(|c| if c == '-' { ' ' } else { c }) {
        if word_start {
            result.extend(c.to_uppercase());
        } else {
            result.push(c);
        }
        word_start = c.is_whitespace();
    }
    result
}

/// Menu groups for every route, empty for actors who cannot manage the site.
pub fn build_menu(
    controller: &mut OverrideController<'_>,
    actor: &Actor,
    current_url: &str,
    nonces: &dyn NonceProvider,
) -> Vec<MenuGroup> {
    if !actor.can_manage {
        return Vec::new();
    }

    let settings = controller.settings();
    controller
        .route_statuses()
        .into_iter()
        .map(|status| {
            let group_id = format!("{}/{}", settings.slug, status.key);
            let active_state = status.current_state.as_deref();

            let reset = MenuItem {
                id: format!("{group_id}/reset"),
                title: "Reset".to_string(),
                active: active_state.is_none(),
                href: action_url(current_url, settings, &status.key, "", nonces),
            };
            let fixtures = status.available_states.iter().map(|state| MenuItem {
                id: format!("{group_id}/{state}"),
                title: title_case(state),
                active: active_state == Some(state.as_str()),
                href: action_url(current_url, settings, &status.key, state, nonces),
            });

            MenuGroup {
                title: title_case(&status.key),
                active: active_state.is_some(),
                items: std::iter::once(reset).chain(fixtures).collect(),
                id: group_id,
                key: status.key.clone(),
            }
        })
        .collect()
}
