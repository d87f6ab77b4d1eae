use crate::history::HistoryProvider;

/// Selects the [`HistoryProvider`] backing a router.
pub enum HistoryMode {
    /// Fully in-memory history. The default outside the web.
    Memory,
    /// Browser URL path via the History API. The default on the web.
    #[cfg(feature = "web")]
    BrowserPath,
    /// URL fragment (`#`) based history.
    #[cfg(feature = "web")]
    Fragment,
    /// A caller-provided implementation.
    Custom(Box<dyn HistoryProvider>),
}

impl Default for HistoryMode {
    fn default() -> Self {
        #[cfg(feature = "web")]
        return Self::BrowserPath;
        #[cfg(not(feature = "web"))]
        Self::Memory
    }
}

/// Configuration options for a [`Router`](crate::router::Router).
///
/// Follows the builder pattern:
///
/// ```rust
/// # use waypoint_router::{HistoryMode, RouterConfig};
/// let cfg = RouterConfig::default().history(HistoryMode::Memory);
/// ```
#[derive(Default)]
pub struct RouterConfig {
    pub(crate) history: HistoryMode,
    pub(crate) base: Option<String>,
}

impl RouterConfig {
    /// Select the history implementation.
    ///
    /// Defaults to [`HistoryMode::Memory`], or the browser path on the web.
    pub fn history(mut self, history: HistoryMode) -> Self {
        self.history = history;
        self
    }

    /// Set a base path the app is mounted under.
    ///
    /// Only meaningful for the browser-backed history implementations, which
    /// strip it from the path on read and prepend it again on navigation.
    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }
}
