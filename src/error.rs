//! Error types.

use thiserror::Error;

/// Errors the router can surface.
///
/// Everything in here is either a construction-time failure or a programmer
/// error during path generation. A path that simply doesn't match any route is
/// **not** an error; [`RouteMatcher::resolve`](crate::route_definition::RouteMatcher::resolve)
/// reports that as [`None`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RouterError {
    /// Two routes in the same tree use the same outlet name.
    ///
    /// Outlet names are the handles for path generation and must be unique
    /// across the entire tree.
    #[error(r#"duplicate outlet name: "{0}""#)]
    DuplicateOutlet(String),

    /// Two routes compile to the same segment pattern.
    #[error(r#"conflicting routes for path pattern: "{0}""#)]
    AmbiguousPattern(String),

    /// A path was requested for an outlet name no route declares.
    #[error(r#"no route for outlet "{0}""#)]
    UnknownOutlet(String),

    /// A path was requested for an outlet whose pattern contains a parameter
    /// the caller didn't supply a value for.
    #[error(r#"no value for parameter "{parameter}" of outlet "{outlet}""#)]
    MissingParameter {
        /// The outlet the path was requested for.
        outlet: String,
        /// The parameter without a value.
        parameter: String,
    },

    /// No router is registered under the requested key.
    ///
    /// Surfaces when a [`Link`](crate::link::Link) is constructed, before any
    /// click can occur.
    #[error(r#"no router found for key "{0}""#)]
    RouterNotFound(String),
}
