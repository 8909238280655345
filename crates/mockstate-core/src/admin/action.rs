//! State-change trigger reached through a nonce-protected GET link.

use crate::admin::nonce::NonceProvider;
use crate::admin::query::{add_query_args, query_params, remove_query_args};
use crate::config::settings::Settings;
use crate::mocks::controller::OverrideController;
use tracing::{debug, warn};

/// Query parameter carrying the CSRF token
pub const NONCE_PARAM: &str = "_wpnonce";

/// Message shown when a state-change link carries a bad token
pub const INVALID_NONCE_MESSAGE: &str = "Invalid nonce. Go back, refresh, and try again!";

/// Identity of the user following a state-change link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Actor {
    pub logged_in: bool,
    /// Holds the site-management capability
    pub can_manage: bool,
}

impl Actor {
    pub fn administrator() -> Self {
        Self {
            logged_in: true,
            can_manage: true,
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authorized(&self) -> bool {
        self.logged_in && self.can_manage
    }
}

/// What the host should do after [`handle_action`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Not a state change, or not one this actor may perform; continue normally.
    Ignored,
    /// Token missing or invalid: show `message` as plain text and stop.
    InvalidNonce { message: String },
    /// State change handled: redirect to `location`.
    Redirect { location: String },
}

/// Lowercase and keep only `a-z`, `0-9`, `_` and `-`.
pub fn sanitize_key(raw: &str) -> String {
    raw.chars()
        .map(|c| c.to_ascii_lowercase())
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
        .collect()
}

/// Handle a possible state-change request for `current_url`.
///
/// Unauthorized actors and URLs without the action parameter are ignored.
/// Otherwise the token is checked, the selection updated (invalid selections
/// are dropped silently) and the caller sent back to the same URL without the
/// trigger parameters.
pub fn handle_action(
    current_url: &str,
    actor: &Actor,
    nonces: &dyn NonceProvider,
    controller: &mut OverrideController<'_>,
) -> ActionOutcome {
    if !actor.is_authorized() {
        return ActionOutcome::Ignored;
    }

    let settings = controller.settings();
    let action_param = settings.action_param();
    let override_param = settings.override_param();

    let params = query_params(current_url);
    let Some(action) = params.get(&action_param) else {
        return ActionOutcome::Ignored;
    };

    let token_valid = params
        .get(NONCE_PARAM)
        .is_some_and(|token| nonces.verify(token, &settings.slug));
    if !token_valid {
        warn!(url = current_url, "rejected state change with invalid nonce");
        return ActionOutcome::InvalidNonce {
            message: INVALID_NONCE_MESSAGE.to_string(),
        };
    }

    let location = remove_query_args(
        current_url,
        &[action_param.as_str(), override_param.as_str(), NONCE_PARAM],
    );

    let route_key = sanitize_key(action);
    let requested = params
        .get(&override_param)
        .map(|value| sanitize_key(value))
        .unwrap_or_default();

    if !controller.update_state(&route_key, &requested) {
        debug!(route = %route_key, fixture = %requested, "state change not applied");
    }

    ActionOutcome::Redirect { location }
}

/// Link selecting `state` for `route_key` (empty `state` resets the route).
pub fn action_url(
    current_url: &str,
    settings: &Settings,
    route_key: &str,
    state: &str,
    nonces: &dyn NonceProvider,
) -> String {
    let action_param = settings.action_param();
    let override_param = settings.override_param();
    let token = nonces.create(&settings.slug);

    add_query_args(
        current_url,
        &[
            (action_param.as_str(), route_key),
            (override_param.as_str(), state),
            (NONCE_PARAM, token.as_str()),
        ],
    )
}
