//! # waypoint-router
//!
//! A declarative route matching and navigation engine for client-side apps.
//!
//! A route tree is declared as nested
//! [`RouteDefinition`](route_definition::RouteDefinition)s and compiled once;
//! a [`Router`](router::Router) pairs the compiled tree with a
//! [`HistoryProvider`](history::HistoryProvider) and mediates between
//! navigation requests and history mutation. [`Link`](link::Link)s resolve
//! their router through a keyed [`RouterRegistry`](registry::RouterRegistry)
//! and implement the activation protocol deciding whether a click is handled
//! programmatically or left to the browser.
//!
//! ```rust
//! use waypoint_router::prelude::*;
//!
//! let router = Router::new(
//!     &[
//!         RouteDefinition::new("foo", "foo"),
//!         RouteDefinition::new("foo/{foo}", "foo2"),
//!     ],
//!     RouterConfig::default().history(HistoryMode::Memory),
//! )
//! .unwrap();
//!
//! router.set_path("foo/bar");
//! let current = router.current().unwrap();
//! assert_eq!(current.outlet, "foo2");
//! assert_eq!(current.params["foo"], "bar");
//! ```
//!
//! Everything is synchronous and single-threaded: history subscribers and
//! router observers run, in subscription order, before the navigation call
//! that triggered them returns.

#![deny(missing_docs)]

pub mod error;
pub mod event;
pub mod history;
pub mod link;
pub mod navigation;
pub mod registry;
pub mod route_definition;
pub mod router;

mod router_cfg;
pub use router_cfg::{HistoryMode, RouterConfig};

/// A collection of useful items most applications need.
pub mod prelude {
    pub use crate::error::RouterError;
    pub use crate::event::ClickEvent;
    pub use crate::history::{HistoryProvider, MemoryHistory};
    pub use crate::link::{Activation, AnchorDescription, Link, LinkProps};
    pub use crate::navigation::NavigationTarget;
    pub use crate::registry::{RouterRegistry, DEFAULT_ROUTER_KEY};
    pub use crate::route_definition::{MatchResult, RouteDefinition, RouteMatcher};
    pub use crate::router::{Router, RouterSubscription};
    pub use crate::router_cfg::{HistoryMode, RouterConfig};

    #[cfg(feature = "web")]
    pub use crate::history::{BrowserPathHistory, FragmentHistory};
}
