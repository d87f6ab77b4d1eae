//! Types relating to navigation.

use std::collections::BTreeMap;

/// A target for the router to navigate to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationTarget {
    /// Navigate to the specified path.
    Path(String),
    /// Navigate to the route with the corresponding outlet name.
    ///
    /// The concrete path is generated from the outlet's pattern and the
    /// provided parameters.
    Outlet {
        /// The outlet name of the target route.
        name: String,
        /// Values for the parameters of the target route's pattern.
        params: BTreeMap<String, String>,
    },
}

impl NavigationTarget {
    /// Create an outlet target.
    pub fn outlet(name: impl Into<String>, params: BTreeMap<String, String>) -> Self {
        Self::Outlet {
            name: name.into(),
            params,
        }
    }
}

impl From<&str> for NavigationTarget {
    fn from(path: &str) -> Self {
        Self::Path(path.to_string())
    }
}

impl From<String> for NavigationTarget {
    fn from(path: String) -> Self {
        Self::Path(path)
    }
}
