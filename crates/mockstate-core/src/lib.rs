//! Core library for Mockstate.
//!
//! Overrides selected REST responses with canned JSON fixtures. An admin picks
//! a fixture per route, the choice is persisted with an expiry, and every
//! matching response is replaced with the fixture's content until cleared.

pub mod admin;
pub mod config;
pub mod fixtures;
pub mod mocks;
pub mod registry;
pub mod storage;
pub mod types;

pub use config::settings::Settings;
pub use fixtures::{DirFixtureStore, FixtureStore, MemoryFixtureStore};
pub use mocks::controller::{OverrideController, RouteStatus};
pub use mocks::route::MockableRoute;
pub use registry::{RouteEntry, RouteRegistry};
pub use storage::{FileStore, MemoryStore, StateStore, StoreError};
pub use types::{Request, Response};
