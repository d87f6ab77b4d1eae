//! The narrow event surface the link activation protocol consumes.

/// The capability set the activation protocol needs from a click event.
///
/// Any concrete event type participates by satisfying this interface; it
/// deliberately exposes nothing beyond what the interception decision needs.
/// With the `web` feature enabled, [`web_sys::MouseEvent`] implements it
/// directly.
pub trait ClickEvent {
    /// Prevent the default action associated with the event.
    fn prevent_default(&mut self);

    /// Whether the default action has been prevented.
    fn default_prevented(&self) -> bool;

    /// The pointer button that triggered the event.
    ///
    /// `Some(0)` is the primary button. [`None`] means the button is unknown,
    /// which is treated as non-primary.
    #[must_use]
    fn button(&self) -> Option<i16>;

    /// Whether the ctrl key was held during the event.
    #[must_use]
    fn ctrl_key(&self) -> bool;

    /// Whether the meta key was held during the event.
    #[must_use]
    fn meta_key(&self) -> bool;
}

#[cfg(feature = "web")]
impl ClickEvent for web_sys::MouseEvent {
    fn prevent_default(&mut self) {
        web_sys::Event::prevent_default(self);
    }

    fn default_prevented(&self) -> bool {
        web_sys::Event::default_prevented(self)
    }

    fn button(&self) -> Option<i16> {
        Some(web_sys::MouseEvent::button(self))
    }

    fn ctrl_key(&self) -> bool {
        web_sys::MouseEvent::ctrl_key(self)
    }

    fn meta_key(&self) -> bool {
        web_sys::MouseEvent::meta_key(self)
    }
}
