//! Keyed lookup of router instances.
//!
//! Navigation elements don't hold direct references to their router. They
//! resolve it through a [`RouterRegistry`], a mapping from string keys to
//! router factories that is passed in explicitly wherever a router consumer
//! is constructed. Absence of a key is a checked, hard failure, not a silent
//! no-op.

use std::collections::BTreeMap;

use log::error;

use crate::error::RouterError;
use crate::router::Router;

/// The key consumers look a router up under when none is specified.
pub const DEFAULT_ROUTER_KEY: &str = "router";

/// A factory producing a router handle for a key.
pub type RouterFactory = Box<dyn Fn() -> Router>;

/// A keyed registry of router factories.
#[derive(Default)]
pub struct RouterRegistry {
    injectors: BTreeMap<String, RouterFactory>,
}

impl RouterRegistry {
    /// Create an empty [`RouterRegistry`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a router factory under `key`.
    ///
    /// A factory already registered under the same key is replaced.
    pub fn define_injector(
        &mut self,
        key: impl Into<String>,
        factory: impl Fn() -> Router + 'static,
    ) {
        self.injectors.insert(key.into(), Box::new(factory));
    }

    /// Register an existing router handle under `key`.
    ///
    /// Convenience over [`define_injector`](Self::define_injector) for the
    /// common case of a single, already-constructed router.
    pub fn define_router(&mut self, key: impl Into<String>, router: Router) {
        self.define_injector(key, move || router.clone());
    }

    /// Resolve the router registered under `key`.
    ///
    /// # Errors
    /// [`RouterError::RouterNotFound`] if no factory is registered under
    /// `key`.
    pub fn router(&self, key: &str) -> Result<Router, RouterError> {
        match self.injectors.get(key) {
            Some(factory) => Ok(factory()),
            None => {
                error!(r#"no router found for key "{key}""#);
                Err(RouterError::RouterNotFound(key.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route_definition::RouteDefinition;
    use crate::router_cfg::RouterConfig;

    fn test_router() -> Router {
        Router::new(
            &[RouteDefinition::new("foo", "foo")],
            RouterConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn resolves_registered_router() {
        let mut registry = RouterRegistry::new();
        registry.define_router(DEFAULT_ROUTER_KEY, test_router());

        let router = registry.router(DEFAULT_ROUTER_KEY).unwrap();
        assert!(router.resolve("foo").is_some());
    }

    #[test]
    fn missing_key_is_a_hard_failure() {
        let registry = RouterRegistry::new();

        assert_eq!(
            registry.router("fake-key").err(),
            Some(RouterError::RouterNotFound(String::from("fake-key")))
        );
    }

    #[test]
    fn later_definition_replaces_earlier() {
        let mut registry = RouterRegistry::new();
        registry.define_injector("router", || {
            unreachable!("replaced injector must not be called")
        });
        registry.define_router("router", test_router());

        assert!(registry.router("router").is_ok());
    }
}
