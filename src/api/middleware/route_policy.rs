//! Per-route response policy.
//!
//! Every route carries a [`RoutePolicy`] deciding its `Cache-Control` header,
//! whether requests are access-logged, and whether it is flagged for rate
//! limiting. The rate limit flag only selects the [`RateLimitSettings`]
//! reported in the access log; no limiter enforces them.

use axum::{
    extract::{Request, State},
    http::{HeaderValue, Method, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Response settings for one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePolicy {
    pub logging: bool,
    pub rate_limit: bool,
    pub cache_control: &'static str,
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self {
            logging: true,
            rate_limit: true,
            cache_control: "no-cache",
        }
    }
}

impl RoutePolicy {
    /// Settings reported for this route, or `None` if it is not rate limited.
    pub fn rate_limit_settings(&self) -> Option<RateLimitSettings> {
        self.rate_limit.then(RateLimitSettings::default)
    }
}

/// Request budget advertised for rate-limited routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitSettings {
    pub window: Duration,
    pub limit: u32,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(60),
            limit: 100,
        }
    }
}

struct RegisteredRoute {
    method: Method,
    pattern: String,
    policy: RoutePolicy,
}

/// Route table mapping `(method, path pattern)` to a [`RoutePolicy`].
///
/// Patterns use the router's syntax: `{name}` segments match any single
/// non-empty segment. Exact matches win over patterns; among patterns the
/// first registered wins. Unknown routes get [`RoutePolicy::default`].
pub struct RouteRegistry {
    routes: Vec<RegisteredRoute>,
}

impl RouteRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Registers or replaces the policy for a route.
    pub fn register(&mut self, method: Method, pattern: &str, policy: RoutePolicy) {
        if let Some(existing) = self
            .routes
            .iter_mut()
            .find(|r| r.method == method && r.pattern == pattern)
        {
            existing.policy = policy;
            return;
        }

        self.routes.push(RegisteredRoute {
            method,
            pattern: pattern.to_string(),
            policy,
        });
    }

    /// Returns the policy for a request.
    pub fn policy_for(&self, method: &Method, path: &str) -> RoutePolicy {
        let exact = self
            .routes
            .iter()
            .find(|r| r.method == *method && r.pattern == path);

        exact
            .or_else(|| {
                self.routes
                    .iter()
                    .find(|r| r.method == *method && path_matches(&r.pattern, path))
            })
            .map(|r| r.policy.clone())
            .unwrap_or_default()
    }
}

impl Default for RouteRegistry {
    /// The service's route table.
    fn default() -> Self {
        let mut registry = Self::new();

        registry.register(
            Method::GET,
            "/",
            RoutePolicy {
                logging: true,
                rate_limit: false,
                cache_control: "public, max-age=300",
            },
        );
        registry.register(
            Method::GET,
            "/health",
            RoutePolicy {
                logging: false,
                rate_limit: false,
                cache_control: "no-cache",
            },
        );
        registry.register(Method::POST, "/api/v1/short-urls", RoutePolicy::default());
        registry.register(
            Method::GET,
            "/api/v1/short-urls/{id}",
            RoutePolicy {
                cache_control: "public, max-age=3600",
                ..RoutePolicy::default()
            },
        );
        registry.register(Method::GET, "/{short_url}", RoutePolicy::default());

        registry
    }
}

fn path_matches(pattern: &str, path: &str) -> bool {
    let pattern_segments: Vec<&str> = pattern.split('/').collect();
    let path_segments: Vec<&str> = path.split('/').collect();

    if pattern_segments.len() != path_segments.len() {
        return false;
    }

    pattern_segments
        .iter()
        .zip(&path_segments)
        .all(|(pattern_seg, path_seg)| {
            if pattern_seg.starts_with('{') && pattern_seg.ends_with('}') {
                !path_seg.is_empty()
            } else {
                pattern_seg == path_seg
            }
        })
}

/// Applies the matching [`RoutePolicy`] to a request.
///
/// Sets the policy's `Cache-Control` value on the response and access-logs
/// the request, with its rate limit settings, when the policy asks for it.
pub async fn layer(
    State(registry): State<Arc<RouteRegistry>>,
    req: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let policy = registry.policy_for(&method, &path);

    let mut response = next.run(req).await;

    response.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(policy.cache_control),
    );

    if policy.logging {
        let rate_limit = policy.rate_limit_settings();
        tracing::info!(
            method = %method,
            path = %path,
            status = response.status().as_u16(),
            ms = start.elapsed().as_millis() as u64,
            rate_limit = ?rate_limit.map(|s| s.limit),
            rate_window_secs = ?rate_limit.map(|s| s.window.as_secs()),
            "access"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let registry = RouteRegistry::default();

        let policy = registry.policy_for(&Method::GET, "/health");
        assert_eq!(policy.cache_control, "no-cache");
        assert!(!policy.logging);
        assert!(!policy.rate_limit);

        let policy = registry.policy_for(&Method::GET, "/");
        assert_eq!(policy.cache_control, "public, max-age=300");
    }

    #[test]
    fn test_pattern_match() {
        let registry = RouteRegistry::default();

        let policy = registry.policy_for(&Method::GET, "/api/v1/short-urls/wLkJasyJ");
        assert_eq!(policy.cache_control, "public, max-age=3600");

        let policy = registry.policy_for(&Method::GET, "/wLkJasyJ");
        assert_eq!(policy.cache_control, "no-cache");
        assert!(policy.rate_limit);
    }

    #[test]
    fn test_method_must_match() {
        let registry = RouteRegistry::default();

        // POST /health is not registered, falls back to the default policy
        let policy = registry.policy_for(&Method::POST, "/health");
        assert_eq!(policy, RoutePolicy::default());
    }

    #[test]
    fn test_unknown_route_gets_default() {
        let registry = RouteRegistry::default();

        let policy = registry.policy_for(&Method::GET, "/a/b/c/d");
        assert_eq!(policy, RoutePolicy::default());
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut registry = RouteRegistry::new();
        registry.register(Method::GET, "/x", RoutePolicy::default());
        registry.register(
            Method::GET,
            "/x",
            RoutePolicy {
                cache_control: "private",
                ..RoutePolicy::default()
            },
        );

        assert_eq!(registry.policy_for(&Method::GET, "/x").cache_control, "private");
        assert_eq!(registry.routes.len(), 1);
    }

    #[test]
    fn test_rate_limit_settings() {
        let registry = RouteRegistry::default();

        assert_eq!(
            registry
                .policy_for(&Method::POST, "/api/v1/short-urls")
                .rate_limit_settings(),
            Some(RateLimitSettings {
                window: Duration::from_secs(60),
                limit: 100,
            })
        );
        assert_eq!(
            registry
                .policy_for(&Method::GET, "/health")
                .rate_limit_settings(),
            None
        );
        assert_eq!(
            registry.policy_for(&Method::GET, "/").rate_limit_settings(),
            None
        );
    }

    #[test]
    fn test_path_matches() {
        assert!(path_matches("/{code}", "/abc"));
        assert!(path_matches("/api/v1/short-urls/{id}", "/api/v1/short-urls/abc"));
        assert!(!path_matches("/{code}", "/"));
        assert!(!path_matches("/{code}", "/a/b"));
        assert!(!path_matches("/api/v1/short-urls/{id}", "/api/v2/short-urls/abc"));
    }
}
