//! Override resolution.
//!
//! This module provides the per-request override machinery:
//! - [`MockableRoute`](route::MockableRoute): the selected fixture of one route and access to its fixtures
//! - [`OverrideController`](controller::OverrideController): matches requests to routes, substitutes
//!   fixture content into responses and persists state changes

pub mod controller;
pub mod route;
