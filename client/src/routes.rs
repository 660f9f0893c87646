//! Static route table.
//!
//! The table is plain data so `app::App` can build its `<Route>` list from it
//! and tests can check path resolution without a browser. It never changes
//! at runtime.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

/// A view reachable by URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AppRoute {
    /// `/`: sign-in form.
    Connection,
    /// `/canvas`: the pixel board.
    Canvas,
    /// `/register`: account creation.
    Register,
}

impl AppRoute {
    /// Every route, in declaration order.
    pub const ALL: [Self; 3] = [Self::Connection, Self::Canvas, Self::Register];

    /// Router static segment for this route.
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Connection => "",
            Self::Canvas => "canvas",
            Self::Register => "register",
        }
    }

    /// Absolute path used for links and navigation.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Connection => "/",
            Self::Canvas => "/canvas",
            Self::Register => "/register",
        }
    }

    /// Document title shown while the route is active.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Connection => "Place · Connect",
            Self::Canvas => "Place · Canvas",
            Self::Register => "Place · Register",
        }
    }

    /// Match a location to at most one route.
    ///
    /// Query string and fragment are ignored, an empty location is the root,
    /// and a single trailing slash is tolerated on non-root paths (the server
    /// redirects those to the bare path). Matching is exact and
    /// case-sensitive; anything else is `None` and renders the not-found
    /// fallback.
    #[must_use]
    pub fn resolve(location: &str) -> Option<Self> {
        let path = location.split(['?', '#']).next().unwrap_or_default();
        let path = match path {
            "" => "/",
            "/" => path,
            _ => path.strip_suffix('/').unwrap_or(path),
        };
        Self::ALL.into_iter().find(|route| route.path() == path)
    }
}
