//! Route definitions and the matcher compiled from them.
//!
//! A route tree is declared as nested [`RouteDefinition`]s and compiled once
//! into a [`RouteMatcher`]. The matcher resolves paths to outlets and
//! generates paths from outlet names; it is never re-derived per call.

mod matcher;
mod route;

pub use matcher::*;
pub use route::*;
