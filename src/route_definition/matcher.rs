use std::collections::BTreeMap;

use log::error;
use urlencoding::{decode, encode};

use crate::error::RouterError;

use super::RouteDefinition;

/// A single segment of a compiled path pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum PatternSegment {
    /// The segment must match this value exactly.
    Fixed(String),
    /// The segment matches any non-empty value and captures it under the
    /// contained parameter name.
    Parameter(String),
}

/// The outcome of a successful path resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchResult {
    /// The outlet name of the matched route.
    pub outlet: String,
    /// The parameters extracted from the path.
    pub params: BTreeMap<String, String>,
}

/// A node of the compiled route trie.
#[derive(Debug, Default)]
struct MatcherNode {
    fixed: BTreeMap<String, MatcherNode>,
    /// Parameter branches in registration order. The first registered branch
    /// wins when several could match.
    parameters: Vec<(String, MatcherNode)>,
    outlet: Option<String>,
}

/// A route tree compiled for lookup in both directions.
///
/// Created once from a list of [`RouteDefinition`]s and immutable afterwards.
/// [`resolve`](RouteMatcher::resolve) maps a path to an outlet plus extracted
/// parameters, [`generate`](RouteMatcher::generate) maps an outlet name plus
/// parameter values back to a path.
#[derive(Debug)]
pub struct RouteMatcher {
    root: MatcherNode,
    targets: BTreeMap<String, Vec<PatternSegment>>,
}

impl RouteMatcher {
    /// Compile the provided route tree.
    ///
    /// # Errors
    /// - [`RouterError::DuplicateOutlet`] if two routes use the same outlet
    ///   name.
    /// - [`RouterError::AmbiguousPattern`] if two routes compile to the same
    ///   segment pattern.
    pub fn new(routes: &[RouteDefinition]) -> Result<Self, RouterError> {
        let mut matcher = Self {
            root: MatcherNode::default(),
            targets: BTreeMap::new(),
        };

        for route in routes {
            matcher.register(route, &[])?;
        }

        Ok(matcher)
    }

    fn register(
        &mut self,
        route: &RouteDefinition,
        ancestors: &[PatternSegment],
    ) -> Result<(), RouterError> {
        let mut segments = ancestors.to_vec();
        segments.extend(parse_pattern(&route.path));

        if self.targets.contains_key(&route.outlet) {
            error!(r#"duplicate outlet name: "{}""#, route.outlet);
            return Err(RouterError::DuplicateOutlet(route.outlet.clone()));
        }

        insert(&mut self.root, &segments, &route.outlet)?;
        self.targets.insert(route.outlet.clone(), segments.clone());

        for child in &route.children {
            self.register(child, &segments)?;
        }

        Ok(())
    }

    /// Resolve a path to the outlet of the matching route and the parameters
    /// extracted along the way.
    ///
    /// At every depth, fixed segments are tried before parameterized ones.
    /// Among several parameterized branches the first registered wins.
    ///
    /// A path no route matches yields [`None`]. That is an expected outcome,
    /// not a failure; callers typically render a not-found state.
    ///
    /// The path is normalized before matching: a leading `#`, leading and
    /// trailing `/` and a query suffix are ignored, and segment values are
    /// percent-decoded.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<MatchResult> {
        let segments = split_path(path);
        let mut params = Vec::new();
        let outlet = resolve_segment(&self.root, &segments, &mut params)?;

        Some(MatchResult {
            outlet: outlet.to_string(),
            params: params.into_iter().collect(),
        })
    }

    /// Generate the path for the route with the provided outlet name.
    ///
    /// Parameter values are percent-encoded. Entries in `params` the pattern
    /// doesn't reference are ignored. The generated path carries no leading
    /// slash.
    ///
    /// # Errors
    /// - [`RouterError::UnknownOutlet`] if no route uses the outlet name.
    /// - [`RouterError::MissingParameter`] if the pattern contains a
    ///   parameter absent from `params`.
    pub fn generate(
        &self,
        outlet: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<String, RouterError> {
        let segments = self.targets.get(outlet).ok_or_else(|| {
            error!(r#"no route for outlet "{outlet}""#);
            RouterError::UnknownOutlet(outlet.to_string())
        })?;

        let mut path = Vec::with_capacity(segments.len());
        for segment in segments {
            match segment {
                PatternSegment::Fixed(value) => path.push(value.clone()),
                PatternSegment::Parameter(name) => match params.get(name) {
                    Some(value) => path.push(encode(value).into_owned()),
                    None => {
                        error!(r#"no value for parameter "{name}" of outlet "{outlet}""#);
                        return Err(RouterError::MissingParameter {
                            outlet: outlet.to_string(),
                            parameter: name.clone(),
                        });
                    }
                },
            }
        }

        Ok(path.join("/"))
    }
}

/// Insert a compiled pattern into the trie, claiming its terminal node for
/// `outlet`.
fn insert(
    root: &mut MatcherNode,
    segments: &[PatternSegment],
    outlet: &str,
) -> Result<(), RouterError> {
    let mut node = root;

    for segment in segments {
        node = match segment {
            PatternSegment::Fixed(value) => node.fixed.entry(value.clone()).or_default(),
            PatternSegment::Parameter(name) => {
                // reuse an existing branch with the same name, otherwise
                // append to keep registration order
                let position = node.parameters.iter().position(|(n, _)| n == name);
                let index = match position {
                    Some(index) => index,
                    None => {
                        node.parameters.push((name.clone(), MatcherNode::default()));
                        node.parameters.len() - 1
                    }
                };
                &mut node.parameters[index].1
            }
        };
    }

    if node.outlet.is_some() {
        let pattern = format_pattern(segments);
        error!(r#"conflicting routes for path pattern: "{pattern}""#);
        return Err(RouterError::AmbiguousPattern(pattern));
    }
    node.outlet = Some(outlet.to_string());

    Ok(())
}

/// Find the outlet of the route matching `path`, collecting parameter values
/// into `params`.
///
/// Backtracks over parameter branches: values collected in a branch that
/// turns out not to match the rest of the path are discarded again.
fn resolve_segment<'a>(
    node: &'a MatcherNode,
    path: &[String],
    params: &mut Vec<(String, String)>,
) -> Option<&'a str> {
    let (value, rest) = match path.split_first() {
        Some(split) => split,
        None => return node.outlet.as_deref(),
    };

    if let Some(child) = node.fixed.get(value) {
        if let Some(outlet) = resolve_segment(child, rest, params) {
            return Some(outlet);
        }
    }

    for (name, child) in &node.parameters {
        let depth = params.len();
        params.push((name.clone(), value.clone()));
        if let Some(outlet) = resolve_segment(child, rest, params) {
            return Some(outlet);
        }
        params.truncate(depth);
    }

    None
}

/// Split a path pattern into compiled segments.
fn parse_pattern(pattern: &str) -> Vec<PatternSegment> {
    pattern
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| {
            if s.len() > 2 && s.starts_with('{') && s.ends_with('}') {
                PatternSegment::Parameter(s[1..s.len() - 1].to_string())
            } else {
                PatternSegment::Fixed(s.to_string())
            }
        })
        .collect()
}

/// Split a concrete path into decoded segment values.
fn split_path(path: &str) -> Vec<String> {
    let path = path.strip_prefix('#').unwrap_or(path);
    let path = path.split('?').next().unwrap_or_default();

    path.split('/')
        .filter(|s| !s.is_empty())
        .map(|s| match decode(s) {
            Ok(value) => value.into_owned(),
            Err(_) => {
                error!(r#"failed to decode path segment: "{s}""#);
                s.to_string()
            }
        })
        .collect()
}

/// Render a compiled pattern back into its textual form.
fn format_pattern(segments: &[PatternSegment]) -> String {
    segments
        .iter()
        .map(|segment| match segment {
            PatternSegment::Fixed(value) => value.clone(),
            PatternSegment::Parameter(name) => format!("{{{name}}}"),
        })
        .collect::<Vec<_>>()
        .join("/")
}
