use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::JsValue;
use web_sys::{History, Window};

use super::{HistoryCallback, HistoryListener, HistoryProvider, Listeners};

/// A [`HistoryProvider`] that stores the current path in the URL fragment
/// (the part after `#`).
///
/// Useful when the server cannot be configured to serve the app for
/// arbitrary paths: the fragment never reaches the server.
///
/// Router-initiated navigation goes through the [History API], so no
/// `hashchange` event fires for it; the event only reports foreign changes
/// such as back/forward navigation or manual edits of the URL.
///
/// [History API]: https://developer.mozilla.org/en-US/docs/Web/API/History_API
pub struct FragmentHistory {
    history: History,
    window: Window,
    listeners: Rc<RefCell<Listeners>>,
    _hashchange: EventListener,
}

impl FragmentHistory {
    /// Create a new [`FragmentHistory`].
    #[must_use]
    pub fn new() -> Self {
        let window = web_sys::window().expect("access to the window");
        let history = window.history().expect("access to the history API");

        let listeners = Rc::new(RefCell::new(Listeners::default()));
        let hashchange = {
            let listeners = listeners.clone();
            let inner_window = window.clone();
            EventListener::new(&window, "hashchange", move |_| {
                let path = read_fragment(&inner_window);
                listeners.borrow().notify(&path);
            })
        };

        Self {
            history,
            window,
            listeners,
            _hashchange: hashchange,
        }
    }
}

impl Default for FragmentHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryProvider for FragmentHistory {
    fn current(&self) -> String {
        read_fragment(&self.window)
    }

    fn set(&mut self, path: &str, replace: bool) {
        let url = format!("#{}", path.trim_start_matches('#'));

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
        // listeners are notified through the hashchange event
        self.history.back().ok();
    }

    fn go_forward(&mut self) {
        self.history.forward().ok();
    }
}

/// Read the current path from the fragment, without the leading `#`.
fn read_fragment(window: &Window) -> String {
    let hash = window
        .location()
        .hash()
        .expect("location can provide a fragment");

    hash.trim_start_matches('#').to_string()
}
