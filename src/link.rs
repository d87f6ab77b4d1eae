//! Clickable navigation elements.
//!
//! A [`Link`] renders as an anchor-like element description and carries the
//! activation protocol deciding, per click, whether navigation is handled by
//! the router or left to the browser.

use std::collections::BTreeMap;

use log::trace;

use crate::error::RouterError;
use crate::event::ClickEvent;
use crate::registry::{RouterRegistry, DEFAULT_ROUTER_KEY};
use crate::router::Router;

/// How a click on a [`Link`] was handled.
///
/// Both outcomes are normal; [`Passthrough`](Activation::Passthrough) is not
/// a failure path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    /// The default action was prevented and the router performed the
    /// navigation.
    Intercepted,
    /// The event was left to native browser navigation. The router was not
    /// involved.
    Passthrough,
}

/// A caller-supplied click handler, invoked before the link's own
/// interception.
pub type ClickHandler = Box<dyn Fn(&mut dyn ClickEvent)>;

/// Properties for constructing a [`Link`].
pub struct LinkProps {
    to: String,
    is_outlet: bool,
    params: BTreeMap<String, String>,
    target: Option<String>,
    on_click: Option<ClickHandler>,
    router_key: String,
}

impl LinkProps {
    /// Link to the route with the provided outlet name.
    pub fn outlet(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            is_outlet: true,
            params: BTreeMap::new(),
            target: None,
            on_click: None,
            router_key: DEFAULT_ROUTER_KEY.to_string(),
        }
    }

    /// Link to a literal href instead of an outlet.
    pub fn href(to: impl Into<String>) -> Self {
        Self {
            is_outlet: false,
            ..Self::outlet(to)
        }
    }

    /// Provide a value for one parameter of the target outlet's pattern.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Set the `target` attribute of the rendered anchor.
    ///
    /// A non-empty target (e.g. `_blank`) makes every click pass through to
    /// the browser.
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Install a caller click handler.
    ///
    /// The handler runs after the link's environmental checks and before its
    /// own interception. If it prevents the event's default action, the link
    /// treats the click as handled and passes through.
    pub fn on_click(mut self, handler: impl Fn(&mut dyn ClickEvent) + 'static) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    /// Look the router up under this key instead of
    /// [`DEFAULT_ROUTER_KEY`](crate::registry::DEFAULT_ROUTER_KEY).
    pub fn router_key(mut self, key: impl Into<String>) -> Self {
        self.router_key = key.into();
        self
    }
}

/// An anchor-like element description, ready for composition into a larger
/// render tree. This is the entire surface handed to the rendering
/// collaborator; the link never mutates the DOM itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnchorDescription {
    /// The element tag, always `"a"`.
    pub tag: &'static str,
    /// The concrete href. Always a plain path, never a raw outlet name, so
    /// passthrough navigation (e.g. open in new tab) resolves without the
    /// router.
    pub href: String,
    /// The `target` attribute, if any.
    pub target: Option<String>,
}

/// A clickable navigation element.
///
/// The router is resolved from the registry and the href is generated when
/// the link is constructed. Both failure modes ([`RouterError::RouterNotFound`],
/// generation errors) therefore surface before any click can occur; no
/// partial link is ever produced.
pub struct Link {
    href: String,
    target: Option<String>,
    on_click: Option<ClickHandler>,
    router: Router,
}

impl Link {
    /// Construct a [`Link`], resolving its router through `registry`.
    ///
    /// # Errors
    /// - [`RouterError::RouterNotFound`] if no router is registered under the
    ///   props' router key.
    /// - [`RouterError::UnknownOutlet`] / [`RouterError::MissingParameter`]
    ///   if the props name an outlet and the href cannot be generated.
    pub fn new(props: LinkProps, registry: &RouterRegistry) -> Result<Self, RouterError> {
        let router = registry.router(&props.router_key)?;

        let href = if props.is_outlet {
            router.href(&props.to, &props.params)?
        } else {
            props.to
        };

        Ok(Self {
            href,
            target: props.target,
            on_click: props.on_click,
            router,
        })
    }

    /// The concrete href of the rendered anchor.
    #[must_use]
    pub fn href(&self) -> &str {
        &self.href
    }

    /// Describe the rendered element.
    #[must_use]
    pub fn describe(&self) -> AnchorDescription {
        AnchorDescription {
            tag: "a",
            href: self.href.clone(),
            target: self.target.clone(),
        }
    }

    /// Decide how to handle a click, short-circuiting on the first
    /// disqualifying condition:
    ///
    /// 1. A non-empty `target` attribute: passthrough.
    /// 2. Not a plain primary-button activation (other button, or ctrl/meta
    ///    held): passthrough.
    /// 3. The caller's click handler prevented the default action:
    ///    passthrough. The caller's decision is authoritative.
    /// 4. Otherwise the default action is prevented and the router navigates
    ///    to the href: intercepted.
    pub fn handle_click(&self, event: &mut dyn ClickEvent) -> Activation {
        if self.target.as_deref().is_some_and(|t| !t.is_empty()) {
            trace!("link has a target attribute, passing through");
            return Activation::Passthrough;
        }

        if event.button() != Some(0) || event.ctrl_key() || event.meta_key() {
            trace!("not a plain primary-button activation, passing through");
            return Activation::Passthrough;
        }

        if let Some(handler) = &self.on_click {
            handler(event);
            if event.default_prevented() {
                trace!("caller click handler prevented default, passing through");
                return Activation::Passthrough;
            }
        }

        event.prevent_default();
        self.router.set_path(&self.href);
        Activation::Intercepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route_definition::RouteDefinition;
    use crate::router_cfg::RouterConfig;

    fn test_registry() -> RouterRegistry {
        let router = Router::new(
            &[
                RouteDefinition::new("foo", "foo"),
                RouteDefinition::new("foo/{foo}", "foo2"),
            ],
            RouterConfig::default(),
        )
        .unwrap();

        let mut registry = RouterRegistry::new();
        registry.define_router(DEFAULT_ROUTER_KEY, router);
        registry
    }

    #[test]
    fn href_for_basic_outlet() {
        let registry = test_registry();

        let link = Link::new(LinkProps::outlet("foo"), &registry).unwrap();

        assert_eq!(
            link.describe(),
            AnchorDescription {
                tag: "a",
                href: String::from("foo"),
                target: None,
            }
        );
    }

    #[test]
    fn href_for_outlet_with_params() {
        let registry = test_registry();

        let link = Link::new(LinkProps::outlet("foo2").param("foo", "foo"), &registry).unwrap();

        assert_eq!(link.href(), "foo/foo");
    }

    #[test]
    fn href_for_literal_target() {
        let registry = test_registry();

        let link = Link::new(LinkProps::href("#foo/static"), &registry).unwrap();

        assert_eq!(link.href(), "#foo/static");
    }

    #[test]
    fn missing_router_key_fails_at_construction() {
        let registry = test_registry();

        let result = Link::new(LinkProps::href("#foo/static").router_key("fake-key"), &registry);

        assert_eq!(
            result.err(),
            Some(RouterError::RouterNotFound(String::from("fake-key")))
        );
    }

    #[test]
    fn missing_parameter_fails_at_construction() {
        let registry = test_registry();

        let result = Link::new(LinkProps::outlet("foo2"), &registry);

        assert_eq!(
            result.err(),
            Some(RouterError::MissingParameter {
                outlet: String::from("foo2"),
                parameter: String::from("foo"),
            })
        );
    }
}
