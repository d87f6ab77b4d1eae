//! The router core.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use log::{debug, warn};

use crate::error::RouterError;
use crate::history::{HistoryProvider, MemoryHistory};
use crate::navigation::NavigationTarget;
use crate::route_definition::{MatchResult, RouteDefinition, RouteMatcher};
use crate::router_cfg::{HistoryMode, RouterConfig};

#[cfg(feature = "web")]
use crate::history::{BrowserPathHistory, FragmentHistory};

/// An observer invoked with the new resolution whenever the active outlet or
/// its parameters change.
pub type RouterObserver = Rc<dyn Fn(Option<&MatchResult>)>;

/// The resolution of the current path.
struct ActiveRoute {
    path: String,
    resolved: Option<MatchResult>,
}

#[derive(Default)]
struct Observers {
    next_id: usize,
    entries: Vec<(usize, RouterObserver)>,
}

/// A handle for a registered observer.
///
/// Dropping the handle does *not* cancel the subscription; call
/// [`cancel`](RouterSubscription::cancel) to stop receiving notifications.
pub struct RouterSubscription {
    id: usize,
    router: Weak<RouterInner>,
}

impl RouterSubscription {
    /// Stop receiving notifications.
    pub fn cancel(self) {
        if let Some(inner) = self.router.upgrade() {
            inner
                .observers
                .borrow_mut()
                .entries
                .retain(|(id, _)| *id != self.id);
        }
    }
}

struct RouterInner {
    matcher: RouteMatcher,
    history: RefCell<Box<dyn HistoryProvider>>,
    active: RefCell<ActiveRoute>,
    observers: RefCell<Observers>,
    /// Whether the router is currently mutating the history provider.
    navigating: Cell<bool>,
    /// Whether an observer notification is waiting for the provider
    /// mutation to finish.
    pending: Cell<bool>,
}

/// The navigation engine.
///
/// Owns a [`HistoryProvider`] and the route tree compiled into a
/// [`RouteMatcher`]. Created once per application (or per test) and shared as
/// a cheap clonable handle.
///
/// All operations are synchronous: when [`set_path`](Router::set_path)
/// returns, the history has transitioned and every affected observer has run.
#[derive(Clone)]
pub struct Router {
    inner: Rc<RouterInner>,
}

impl Router {
    /// Create a new [`Router`] for the provided route tree.
    ///
    /// The initial path is read from the selected history provider and
    /// resolved immediately.
    ///
    /// # Errors
    /// Compilation errors of the route tree, see
    /// [`RouteMatcher::new`](crate::route_definition::RouteMatcher::new).
    pub fn new(routes: &[RouteDefinition], config: RouterConfig) -> Result<Self, RouterError> {
        let matcher = RouteMatcher::new(routes)?;

        let history: Box<dyn HistoryProvider> = match config.history {
            HistoryMode::Memory => {
                if let Some(base) = &config.base {
                    warn!(r#"base path "{base}" is ignored by the in-memory history"#);
                }
                Box::new(MemoryHistory::default())
            }
            #[cfg(feature = "web")]
            HistoryMode::BrowserPath => match config.base {
                Some(base) => Box::new(BrowserPathHistory::with_prefix(base)),
                None => Box::new(BrowserPathHistory::new()),
            },
            #[cfg(feature = "web")]
            HistoryMode::Fragment => {
                if let Some(base) = &config.base {
                    warn!(r#"base path "{base}" is ignored by the fragment history"#);
                }
                Box::new(FragmentHistory::new())
            }
            HistoryMode::Custom(provider) => provider,
        };

        let path = history.current();
        let resolved = matcher.resolve(&path);

        let inner = Rc::new(RouterInner {
            matcher,
            history: RefCell::new(history),
            active: RefCell::new(ActiveRoute { path, resolved }),
            observers: RefCell::new(Observers::default()),
            navigating: Cell::new(false),
            pending: Cell::new(false),
        });

        // re-resolve on every history transition, router-initiated or not
        let weak = Rc::downgrade(&inner);
        inner
            .history
            .borrow_mut()
            .subscribe(Rc::new(move |path: &str| {
                if let Some(inner) = weak.upgrade() {
                    RouterInner::sync(&inner, path);
                }
            }));

        Ok(Self { inner })
    }

    /// Navigate to `path` by pushing a new history entry.
    pub fn set_path(&self, path: &str) {
        debug!(r#"navigating to "{path}""#);
        self.mutate_history(|history| history.set(path, false));
    }

    /// Navigate to `path`, replacing the current history entry.
    pub fn replace_path(&self, path: &str) {
        debug!(r#"navigating (replace) to "{path}""#);
        self.mutate_history(|history| history.set(path, true));
    }

    /// Navigate to a [`NavigationTarget`].
    ///
    /// # Errors
    /// Path generation errors for outlet targets, see
    /// [`RouteMatcher::generate`](crate::route_definition::RouteMatcher::generate).
    pub fn navigate(&self, target: &NavigationTarget) -> Result<(), RouterError> {
        match target {
            NavigationTarget::Path(path) => self.set_path(path),
            NavigationTarget::Outlet { name, params } => {
                let path = self.inner.matcher.generate(name, params)?;
                self.set_path(&path);
            }
        }

        Ok(())
    }

    /// The resolution of the current path, [`None`] when no route matches.
    #[must_use]
    pub fn current(&self) -> Option<MatchResult> {
        self.inner.active.borrow().resolved.clone()
    }

    /// The current path, as stored by the history provider.
    #[must_use]
    pub fn current_path(&self) -> String {
        self.inner.active.borrow().path.clone()
    }

    /// Resolve an arbitrary path against the compiled route tree.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<MatchResult> {
        self.inner.matcher.resolve(path)
    }

    /// Generate the path for an outlet name, see
    /// [`RouteMatcher::generate`](crate::route_definition::RouteMatcher::generate).
    ///
    /// # Errors
    /// [`RouterError::UnknownOutlet`] and [`RouterError::MissingParameter`].
    pub fn href(
        &self,
        outlet: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<String, RouterError> {
        self.inner.matcher.generate(outlet, params)
    }

    /// Register an observer for outlet changes.
    ///
    /// The observer fires whenever the resolved outlet or its parameters
    /// change. A navigation that resolves to the same outlet with identical
    /// parameters does not fire it, even though the path string may differ.
    ///
    /// Observers run synchronously inside the navigation call that triggered
    /// the change, in subscription order. They are free to query the router,
    /// including history state such as [`can_go_back`](Router::can_go_back),
    /// but must not start a new navigation from within the callback.
    pub fn on_change(&self, observer: impl Fn(Option<&MatchResult>) + 'static) -> RouterSubscription {
        let mut observers = self.inner.observers.borrow_mut();
        let id = observers.next_id;
        observers.next_id += 1;
        observers.entries.push((id, Rc::new(observer)));

        RouterSubscription {
            id,
            router: Rc::downgrade(&self.inner),
        }
    }

    /// Whether there is a previous history entry to go back to.
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.inner.history.borrow().can_go_back()
    }

    /// Whether there is a later history entry to go forward to.
    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        self.inner.history.borrow().can_go_forward()
    }

    /// Go back one history entry.
    pub fn go_back(&self) {
        self.mutate_history(|history| history.go_back());
    }

    /// Go forward one history entry.
    pub fn go_forward(&self) {
        self.mutate_history(|history| history.go_forward());
    }

    /// Run a mutation on the history provider.
    ///
    /// The provider's own listeners fire inside the mutation, while it is
    /// mutably borrowed. Observer dispatch triggered by those listeners is
    /// therefore deferred until the borrow has ended, so observers are free
    /// to query the router, including history state.
    fn mutate_history(&self, mutation: impl FnOnce(&mut dyn HistoryProvider)) {
        self.inner.navigating.set(true);
        mutation(&mut **self.inner.history.borrow_mut());
        self.inner.navigating.set(false);

        if self.inner.pending.replace(false) {
            RouterInner::dispatch(&self.inner);
        }
    }
}

impl RouterInner {
    /// Re-resolve after a history transition and notify observers when the
    /// outlet or its parameters changed.
    ///
    /// Runs inside the history provider's notification, which may happen
    /// while the provider is mutably borrowed (router-initiated navigation).
    /// Observer dispatch is deferred in that case; foreign transitions (e.g.
    /// a popstate event) dispatch immediately.
    fn sync(inner: &Rc<RouterInner>, path: &str) {
        let resolved = inner.matcher.resolve(path);

        let changed = {
            let mut active = inner.active.borrow_mut();
            let changed = active.resolved != resolved;
            active.path = path.to_string();
            active.resolved = resolved;
            changed
        };

        if changed {
            if inner.navigating.get() {
                inner.pending.set(true);
            } else {
                Self::dispatch(inner);
            }
        }
    }

    /// Invoke every observer with the current resolution.
    ///
    /// No borrow is held while the observers run.
    fn dispatch(inner: &Rc<RouterInner>) {
        let resolved = inner.active.borrow().resolved.clone();
        let snapshot: Vec<_> = inner
            .observers
            .borrow()
            .entries
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect();
        for observer in snapshot {
            observer(resolved.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    fn test_router() -> Router {
        Router::new(
            &[
                RouteDefinition::new("foo", "foo"),
                RouteDefinition::new("foo/{foo}", "foo2"),
            ],
            RouterConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn starts_unresolved_on_initial_path() {
        let router = test_router();

        assert_eq!(router.current_path(), "/");
        assert_eq!(router.current(), None);
    }

    #[test]
    fn set_path_updates_current() {
        let router = test_router();

        router.set_path("foo");

        assert_eq!(router.current_path(), "foo");
        assert_eq!(router.current().unwrap().outlet, "foo");
    }

    #[test]
    fn construction_fails_on_duplicate_outlet() {
        let result = Router::new(
            &[
                RouteDefinition::new("foo", "foo"),
                RouteDefinition::new("bar", "foo"),
            ],
            RouterConfig::default(),
        );

        assert!(matches!(result.err(), Some(RouterError::DuplicateOutlet(_))));
    }

    #[test]
    fn observer_fires_on_outlet_change() {
        let router = test_router();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let _sub = {
            let seen = seen.clone();
            router.on_change(move |result| {
                seen.borrow_mut().push(result.map(|r| r.outlet.clone()));
            })
        };

        router.set_path("foo");
        router.set_path("foo/bar");

        assert_eq!(
            *seen.borrow(),
            vec![Some(String::from("foo")), Some(String::from("foo2"))]
        );
    }

    #[test]
    fn observer_skips_identical_resolution() {
        let router = test_router();
        let count = Rc::new(RefCell::new(0));

        let _sub = {
            let count = count.clone();
            router.on_change(move |_| *count.borrow_mut() += 1)
        };

        router.set_path("foo");
        // same outlet, same (absent) parameters; path string differs
        router.set_path("/foo/");

        assert_eq!(*count.borrow(), 1);
        assert_eq!(router.current_path(), "/foo/");
    }

    #[test]
    fn observer_fires_on_parameter_change() {
        let router = test_router();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let _sub = {
            let seen = seen.clone();
            router.on_change(move |result| {
                seen.borrow_mut()
                    .push(result.and_then(|r| r.params.get("foo").cloned()));
            })
        };

        router.set_path("foo/1");
        router.set_path("foo/2");

        assert_eq!(
            *seen.borrow(),
            vec![Some(String::from("1")), Some(String::from("2"))]
        );
    }

    #[test]
    fn observer_sees_no_match_as_none() {
        let router = test_router();
        let seen = Rc::new(RefCell::new(Vec::new()));

        router.set_path("foo");

        let _sub = {
            let seen = seen.clone();
            router.on_change(move |result| {
                seen.borrow_mut().push(result.is_some());
            })
        };

        router.set_path("unknown");

        assert_eq!(*seen.borrow(), vec![false]);
        assert_eq!(router.current(), None);
    }

    #[test]
    fn observer_can_query_history_state() {
        let router = test_router();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let _sub = {
            let seen = seen.clone();
            let router = router.clone();
            router.clone().on_change(move |_| {
                seen.borrow_mut()
                    .push((router.can_go_back(), router.can_go_forward()));
            })
        };

        router.set_path("foo");
        router.set_path("foo/bar");
        router.go_back();

        assert_eq!(
            *seen.borrow(),
            vec![(true, false), (true, false), (true, true)]
        );
    }

    #[test]
    fn cancelled_subscription_stops_notifications() {
        let router = test_router();
        let count = Rc::new(RefCell::new(0));

        let sub = {
            let count = count.clone();
            router.on_change(move |_| *count.borrow_mut() += 1)
        };

        router.set_path("foo");
        sub.cancel();
        router.set_path("foo/bar");

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn navigate_to_outlet_target() {
        let router = test_router();
        let params = [(String::from("foo"), String::from("bar"))]
            .into_iter()
            .collect();

        router
            .navigate(&NavigationTarget::outlet("foo2", params))
            .unwrap();

        assert_eq!(router.current_path(), "foo/bar");
    }

    #[test]
    fn navigate_fails_fast_on_missing_parameter() {
        let router = test_router();

        let result = router.navigate(&NavigationTarget::outlet("foo2", BTreeMap::new()));

        assert_eq!(
            result,
            Err(RouterError::MissingParameter {
                outlet: String::from("foo2"),
                parameter: String::from("foo"),
            })
        );
        // the failed navigation must not have moved the history
        assert_eq!(router.current_path(), "/");
    }

    #[test]
    fn replace_path_keeps_history_flat() {
        let router = test_router();

        router.set_path("foo");
        router.replace_path("foo/bar");

        assert_eq!(router.current().unwrap().outlet, "foo2");
        router.go_back();
        assert_eq!(router.current_path(), "/");
    }

    #[test]
    fn back_and_forward_re_resolve() {
        let router = test_router();

        router.set_path("foo");
        router.set_path("foo/bar");

        router.go_back();
        assert_eq!(router.current().unwrap().outlet, "foo");
        assert!(router.can_go_forward());

        router.go_forward();
        assert_eq!(router.current().unwrap().outlet, "foo2");
    }

    #[test]
    fn custom_history_provider() {
        let mut history = MemoryHistory::new("foo");
        history.set("foo/preset", true);

        let router = Router::new(
            &[RouteDefinition::new("foo/{foo}", "foo2")],
            RouterConfig::default().history(HistoryMode::Custom(Box::new(history))),
        )
        .unwrap();

        assert_eq!(router.current().unwrap().outlet, "foo2");
    }
}
