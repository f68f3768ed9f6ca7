//! Route labels for request spans and metrics.

const KNOWN_ROUTES: [&str; 6] = [
    "/",
    "/healthcheck",
    "/api/public/subscribe",
    "/api/public/login",
    "/api/public/invite",
    "/api-doc/openapi.json",
];

/// Collapse a request path to a bounded label set.
pub(super) fn route_label(path: &str) -> &'static str {
    let trimmed = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };

    if let Some(route) = KNOWN_ROUTES.iter().copied().find(|route| *route == trimmed) {
        return route;
    }

    if trimmed == "/docs" || trimmed.starts_with("/docs/") {
        return "/docs";
    }

    "other"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_routes_keep_their_path() {
        assert_eq!(route_label("/api/public/invite"), "/api/public/invite");
        assert_eq!(route_label("/api/public/login/"), "/api/public/login");
        assert_eq!(route_label("/"), "/");
    }

    #[test]
    fn swagger_assets_share_a_label() {
        assert_eq!(route_label("/docs/index.css"), "/docs");
    }

    #[test]
    fn unknown_paths_are_collapsed() {
        assert_eq!(route_label("/wp-admin/setup.php"), "other");
    }
}
