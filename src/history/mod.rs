//! History integration.
//!
//! The router stores the current location in a [`HistoryProvider`]. The
//! provider abstracts *where* the location lives: an in-memory list
//! ([`MemoryHistory`]), the browser URL path ([`BrowserPathHistory`], feature
//! `web`) or the URL fragment ([`FragmentHistory`], feature `web`).
//!
//! Every provider guarantees that [`set`](HistoryProvider::set) synchronously
//! notifies all currently subscribed listeners with the new path exactly
//! once, in subscription order, before it returns. Dependent state can rely
//! on that ordering; there is no batching and no async scheduling.

use std::rc::Rc;

mod memory;
pub use memory::*;

#[cfg(feature = "web")]
mod browser_path;
#[cfg(feature = "web")]
pub use browser_path::*;

#[cfg(feature = "web")]
mod fragment;
#[cfg(feature = "web")]
pub use fragment::*;

/// A callback invoked with the new path whenever the location changes.
pub type HistoryCallback = Rc<dyn Fn(&str)>;

/// A handle identifying a single history subscription.
///
/// Pass it back to [`HistoryProvider::unsubscribe`] to cancel the
/// subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryListener(usize);

/// An integration with some kind of navigation history.
///
/// Implementations may deviate from the browser-like back/forward model, but
/// the synchronous notification guarantee described on the
/// [module level](self) is not negotiable.
pub trait HistoryProvider {
    /// Get the current path.
    #[must_use]
    fn current(&self) -> String;

    /// Transition to `path`.
    ///
    /// With `replace` unset this pushes a new entry, discarding any forward
    /// history. With `replace` set the current entry is overwritten in place.
    ///
    /// Notifies all subscribed listeners before returning.
    fn set(&mut self, path: &str, replace: bool);

    /// Subscribe to path changes.
    fn subscribe(&mut self, listener: HistoryCallback) -> HistoryListener;

    /// Cancel a subscription. Unknown handles are ignored.
    fn unsubscribe(&mut self, listener: HistoryListener);

    /// Whether there is a previous entry to go back to.
    ///
    /// Providers that cannot know should return [`true`].
    #[must_use]
    fn can_go_back(&self) -> bool {
        true
    }

    /// Whether there is a later entry to go forward to.
    ///
    /// Providers that cannot know should return [`true`].
    #[must_use]
    fn can_go_forward(&self) -> bool {
        true
    }

    /// Go back one entry. Does nothing when there is no previous entry.
    fn go_back(&mut self);

    /// Go forward one entry. Does nothing when there is no later entry.
    fn go_forward(&mut self);
}

/// Subscription bookkeeping shared by the provider implementations.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: usize,
    entries: Vec<(usize, HistoryCallback)>,
}

impl Listeners {
    pub(crate) fn subscribe(&mut self, listener: HistoryCallback) -> HistoryListener {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, listener));
        HistoryListener(id)
    }

    pub(crate) fn unsubscribe(&mut self, listener: HistoryListener) {
        self.entries.retain(|(id, _)| *id != listener.0);
    }

    /// Invoke every listener with `path`, in subscription order.
    ///
    /// The callback list is snapshotted first, so listeners registered during
    /// notification are picked up on the next change only.
    pub(crate) fn notify(&self, path: &str) {
        let snapshot: Vec<_> = self.entries.iter().map(|(_, l)| l.clone()).collect();
        for listener in snapshot {
            listener(path);
        }
    }
}
