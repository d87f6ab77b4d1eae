use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::JsValue;
use web_sys::{History, Window};

use super::{HistoryCallback, HistoryListener, HistoryProvider, Listeners};

/// A [`HistoryProvider`] that uses the [History API] to store the current
/// path in the browser URL.
///
/// [History API]: https://developer.mozilla.org/en-US/docs/Web/API/History_API
///
/// # Prefix
/// Supports a base-path prefix for apps not mounted at the root of their
/// domain. The prefix is stripped from the path on read and prepended again
/// on navigation. It is up to the application to ensure the app isn't mounted
/// where the prefix is absent.
pub struct BrowserPathHistory {
    history: History,
    prefix: Option<String>,
    window: Window,
    listeners: Rc<RefCell<Listeners>>,
    _popstate: EventListener,
}

impl BrowserPathHistory {
    /// Create a new [`BrowserPathHistory`] without a prefix.
    #[must_use]
    pub fn new() -> Self {
        Self::create(None)
    }

    /// Create a new [`BrowserPathHistory`] with a base-path prefix.
    #[must_use]
    pub fn with_prefix(prefix: String) -> Self {
        Self::create(Some(prefix))
    }

    fn create(prefix: Option<String>) -> Self {
        let window = web_sys::window().expect("access to the window");
        let history = window.history().expect("access to the history API");

        let listeners = Rc::new(RefCell::new(Listeners::default()));
        let popstate = {
            let listeners = listeners.clone();
            let prefix = prefix.clone();
            let inner_window = window.clone();
            EventListener::new(&window, "popstate", move |_| {
                let path = read_path(&inner_window, prefix.as_deref());
                listeners.borrow().notify(&path);
            })
        };

        Self {
            history,
            prefix,
            window,
            listeners,
            _popstate: popstate,
        }
    }

    fn apply_prefix(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        match &self.prefix {
            Some(prefix) => format!("{prefix}/{path}"),
            None => format!("/{path}"),
        }
    }
}

impl Default for BrowserPathHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryProvider for BrowserPathHistory {
    fn current(&self) -> String {
        read_path(&self.window, self.prefix.as_deref())
    }

    fn set(&mut self, path: &str, replace: bool) {
        let url = self.apply_prefix(path);

        let result = if replace {
            self.history
                .replace_state_with_url(&JsValue::NULL, "", Some(&url))
        } else {
            self.history
                .push_state_with_url(&JsValue::NULL, "", Some(&url))
        };

        if result.is_ok() {
            self.listeners.borrow().notify(path);
        }
    }

    fn subscribe(&mut self, listener: HistoryCallback) -> HistoryListener {
        self.listeners.borrow_mut().subscribe(listener)
    }

    fn unsubscribe(&mut self, listener: HistoryListener) {
        self.listeners.borrow_mut().unsubscribe(listener);
    }

    fn go_back(&mut self) {
        // listeners are notified through the popstate event
        self.history.back().ok();
    }

    fn go_forward(&mut self) {
        self.history.forward().ok();
    }
}

/// Read the current path from the location, with the prefix removed.
fn read_path(window: &Window, prefix: Option<&str>) -> String {
    let mut path = window
        .location()
        .pathname()
        .expect("location can provide a path");

    if let Some(prefix) = prefix {
        if path.starts_with(prefix) {
            path = path.split_at(prefix.len()).1.to_string();
        }
    }

    if !path.starts_with('/') {
        path = format!("/{path}");
    }

    path
}
