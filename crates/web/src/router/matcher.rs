//! Path matching strategies.
//!
//! Matching is case-sensitive and runs against the normalized request path:
//! a single trailing `/` is stripped unless the path is the root.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How a route path is compared with a request path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Matcher {
    /// The request path equals the route path.
    #[default]
    Exact,
    /// The request path begins with the route path.
    StartsWith,
    /// The request path ends with the route path.
    EndsWith,
    /// The route path is a substring of the request path.
    Contains,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown matcher: {name}, expected one of exact, startswith, endswith, contains")]
pub struct UnknownMatcher {
    name: String,
}

impl UnknownMatcher {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Matcher {
    pub fn matches(&self, route_path: &str, path: &str) -> bool {
        let path = normalize_path(path);
        match self {
            Matcher::Exact => path == route_path,
            Matcher::StartsWith => path.starts_with(route_path),
            Matcher::EndsWith => path.ends_with(route_path),
            Matcher::Contains => path.contains(route_path),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Matcher::Exact => "exact",
            Matcher::StartsWith => "startswith",
            Matcher::EndsWith => "endswith",
            Matcher::Contains => "contains",
        }
    }
}

impl FromStr for Matcher {
    type Err = UnknownMatcher;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const MATCHERS: [Matcher; 4] = [Matcher::Exact, Matcher::StartsWith, Matcher::EndsWith, Matcher::Contains];

        MATCHERS
            .into_iter()
            .find(|matcher| matcher.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownMatcher { name: s.to_string() })
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strips one trailing `/`, keeping the root path `/` as is.
pub fn normalize_path(path: &str) -> &str {
    match path.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("/a/"), "/a");
        assert_eq!(normalize_path("/a//"), "/a/");
        assert_eq!(normalize_path("/a"), "/a");
        assert_eq!(normalize_path(""), "");
    }

    #[test]
    fn test_exact() {
        assert!(Matcher::Exact.matches("/a", "/a"));
        assert!(Matcher::Exact.matches("/a", "/a/"));
        assert!(!Matcher::Exact.matches("/a", "/ab"));
        assert!(!Matcher::Exact.matches("/a", "/A"));
        assert!(Matcher::Exact.matches("/", "/"));
    }

    #[test]
    fn test_starts_with() {
        assert!(Matcher::StartsWith.matches("/api", "/api/users"));
        assert!(Matcher::StartsWith.matches("/api", "/apis"));
        assert!(Matcher::StartsWith.matches("/api", "/api/"));
        assert!(!Matcher::StartsWith.matches("/api", "/v1/api"));
    }

    #[test]
    fn test_ends_with() {
        assert!(Matcher::EndsWith.matches("/edit", "/users/1/edit"));
        assert!(Matcher::EndsWith.matches("/edit", "/users/1/edit/"));
        assert!(!Matcher::EndsWith.matches("/edit", "/users/1/edit/x"));
    }

    #[test]
    fn test_contains() {
        assert!(Matcher::Contains.matches("/admin", "/v1/admin/users"));
        assert!(Matcher::Contains.matches("/admin", "/admin"));
        assert!(!Matcher::Contains.matches("/admin", "/v1/users"));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("exact".parse::<Matcher>(), Ok(Matcher::Exact));
        assert_eq!("StartsWith".parse::<Matcher>(), Ok(Matcher::StartsWith));
        assert_eq!("ENDSWITH".parse::<Matcher>(), Ok(Matcher::EndsWith));
        assert_eq!("contains".parse::<Matcher>(), Ok(Matcher::Contains));

        let err = "regex".parse::<Matcher>().unwrap_err();
        assert_eq!(err.name(), "regex");
    }

    #[test]
    fn test_display_round_trips() {
        for matcher in [Matcher::Exact, Matcher::StartsWith, Matcher::EndsWith, Matcher::Contains] {
            assert_eq!(matcher.to_string().parse::<Matcher>(), Ok(matcher));
        }
    }
}
