/// A single route in a declarative route tree.
///
/// A route pairs a path pattern with an outlet name and may carry nested
/// child routes. Patterns are `/`-separated segments; a segment of the form
/// `{name}` matches any non-empty value and captures it as the parameter
/// `name`, all other segments must match literally.
///
/// Child patterns are relative to their parent. The following tree matches
/// `blog` and `blog/{id}`:
///
/// ```rust
/// # use waypoint_router::route_definition::RouteDefinition;
/// RouteDefinition::new("blog", "blog-list")
///     .child(RouteDefinition::new("{id}", "blog-post"));
/// ```
///
/// Outlet names must be unique across the entire tree. Violations are
/// reported when the tree is compiled, see
/// [`RouteMatcher::new`](crate::route_definition::RouteMatcher::new).
#[derive(Clone, Debug)]
pub struct RouteDefinition {
    pub(crate) path: String,
    pub(crate) outlet: String,
    pub(crate) children: Vec<RouteDefinition>,
}

impl RouteDefinition {
    /// Create a new [`RouteDefinition`] with the provided path pattern and
    /// outlet name.
    pub fn new(path: impl Into<String>, outlet: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            outlet: outlet.into(),
            children: Vec::new(),
        }
    }

    /// Add a nested child route.
    ///
    /// Children are matched in the order they were added.
    pub fn child(mut self, child: RouteDefinition) -> Self {
        self.children.push(child);
        self
    }

    /// The path pattern of this route.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The outlet name of this route.
    #[must_use]
    pub fn outlet(&self) -> &str {
        &self.outlet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new() {
        let r = RouteDefinition::new("foo/{foo}", "foo2");

        assert_eq!(r.path(), "foo/{foo}");
        assert_eq!(r.outlet(), "foo2");
        assert!(r.children.is_empty());
    }

    #[test]
    fn child_order_is_preserved() {
        let r = RouteDefinition::new("foo", "foo")
            .child(RouteDefinition::new("bar", "bar"))
            .child(RouteDefinition::new("{id}", "id"));

        let outlets: Vec<_> = r.children.iter().map(|c| c.outlet()).collect();
        assert_eq!(outlets, vec!["bar", "id"]);
    }
}
