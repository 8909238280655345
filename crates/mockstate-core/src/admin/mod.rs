//! Admin surface: the state-change trigger and the data behind the selection menu.

pub mod action;
pub mod menu;
pub mod nonce;
pub mod query;

pub use action::{action_url, handle_action, sanitize_key, ActionOutcome, Actor};
pub use menu::{build_menu, title_case, MenuGroup, MenuItem};
pub use nonce::{NonceProvider, Sha256Nonce};
