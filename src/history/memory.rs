use super::{HistoryCallback, HistoryListener, HistoryProvider, Listeners};

/// A [`HistoryProvider`] that stores all information in memory.
///
/// Visited paths are kept as an ordered list with a cursor. Pushing a new
/// path discards everything after the cursor, mirroring how a browser drops
/// the forward history on navigation.
///
/// No external I/O is involved; behavior is fully deterministic, which makes
/// this the provider of choice for non-interactive test environments.
pub struct MemoryHistory {
    entries: Vec<String>,
    cursor: usize,
    listeners: Listeners,
}

impl MemoryHistory {
    /// Create a new [`MemoryHistory`] starting at `initial`.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            cursor: 0,
            listeners: Listeners::default(),
        }
    }

    /// The number of entries currently held, including forward entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history holds no entries besides the initial one.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.len() == 1
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl HistoryProvider for MemoryHistory {
    fn current(&self) -> String {
        self.entries[self.cursor].clone()
    }

    fn set(&mut self, path: &str, replace: bool) {
        if replace {
            self.entries[self.cursor] = path.to_string();
        } else {
            self.entries.truncate(self.cursor + 1);
            self.entries.push(path.to_string());
            self.cursor += 1;
        }

        self.listeners.notify(path);
    }

    fn subscribe(&mut self, listener: HistoryCallback) -> HistoryListener {
        self.listeners.subscribe(listener)
    }

    fn unsubscribe(&mut self, listener: HistoryListener) {
        self.listeners.unsubscribe(listener);
    }

    fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    fn go_back(&mut self) {
        if self.can_go_back() {
            self.cursor -= 1;
            self.listeners.notify(&self.entries[self.cursor].clone());
        }
    }

    fn go_forward(&mut self) {
        if self.can_go_forward() {
            self.cursor += 1;
            self.listeners.notify(&self.entries[self.cursor].clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn starts_at_initial_path() {
        let history = MemoryHistory::default();

        assert_eq!(history.current(), "/");
        assert!(!history.can_go_back());
        assert!(!history.can_go_forward());
    }

    #[test]
    fn push_grows_by_one() {
        let mut history = MemoryHistory::default();

        history.set("foo", false);

        assert_eq!(history.current(), "foo");
        assert_eq!(history.len(), 2);
        assert!(history.can_go_back());
    }

    #[test]
    fn replace_overwrites_in_place() {
        let mut history = MemoryHistory::default();
        history.set("foo", false);

        history.set("bar", true);

        assert_eq!(history.current(), "bar");
        assert_eq!(history.len(), 2);

        history.go_back();
        assert_eq!(history.current(), "/");
    }

    #[test]
    fn push_discards_forward_entries() {
        let mut history = MemoryHistory::default();
        history.set("foo", false);
        history.set("bar", false);
        history.go_back();

        assert!(history.can_go_forward());
        history.set("baz", false);

        assert!(!history.can_go_forward());
        assert_eq!(history.current(), "baz");
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn back_and_forward_move_the_cursor() {
        let mut history = MemoryHistory::default();
        history.set("foo", false);

        history.go_back();
        assert_eq!(history.current(), "/");

        history.go_forward();
        assert_eq!(history.current(), "foo");
    }

    #[test]
    fn back_at_start_does_nothing() {
        let mut history = MemoryHistory::default();

        history.go_back();

        assert_eq!(history.current(), "/");
    }

    #[test]
    fn set_notifies_synchronously_in_subscription_order() {
        let mut history = MemoryHistory::default();
        let seen = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second"] {
            let seen = seen.clone();
            history.subscribe(Rc::new(move |path: &str| {
                seen.borrow_mut().push(format!("{tag}:{path}"));
            }));
        }

        history.set("foo", false);

        assert_eq!(*seen.borrow(), vec!["first:foo", "second:foo"]);
    }

    #[test]
    fn unsubscribed_listener_is_not_notified() {
        let mut history = MemoryHistory::default();
        let count = Rc::new(RefCell::new(0));

        let handle = {
            let count = count.clone();
            history.subscribe(Rc::new(move |_: &str| {
                *count.borrow_mut() += 1;
            }))
        };

        history.set("foo", false);
        history.unsubscribe(handle);
        history.set("bar", false);

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn navigation_notifies() {
        let mut history = MemoryHistory::default();
        history.set("foo", false);

        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = seen.clone();
            history.subscribe(Rc::new(move |path: &str| {
                seen.borrow_mut().push(path.to_string());
            }));
        }

        history.go_back();
        history.go_forward();

        assert_eq!(*seen.borrow(), vec!["/", "foo"]);
    }
}
