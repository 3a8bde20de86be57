use std::collections::HashMap;

use mercato_core::{ConfigError, MercatoConfig};

/// Public path segment and the service behind it.
pub const SEGMENTS: [(&str, &str); 10] = [
    ("auth", "auth"),
    ("shops", "shop"),
    ("products", "product"),
    ("carts", "cart"),
    ("promotions", "promotion"),
    ("orders", "order"),
    ("payments", "payment"),
    ("reviews", "review"),
    ("notifications", "notification"),
    ("files", "storage"),
];

const API_PREFIX: &str = "/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upstream {
    pub service: String,
    pub base_url: String,
}

/// A resolved request: where it goes and the path to send there.
#[derive(Debug, PartialEq, Eq)]
pub struct Route<'a> {
    pub upstream: &'a Upstream,
    pub path: &'a str,
}

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    upstreams: HashMap<String, Upstream>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_upstream(
        mut self,
        segment: impl Into<String>,
        service: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url: String = base_url.into();
        self.upstreams.insert(
            segment.into(),
            Upstream {
                service: service.into(),
                base_url: base_url.trim_end_matches('/').to_string(),
            },
        );
        self
    }

    /// Every known segment, each service at `services.<name>.url`.
    pub fn from_config(config: &MercatoConfig) -> Result<Self, ConfigError> {
        let mut table = Self::new();
        for (segment, service) in SEGMENTS {
            let url: String = config.get(&format!("services.{service}.url"))?;
            table = table.with_upstream(segment, service, url);
        }
        Ok(table)
    }

    /// Every known segment routed to one base URL.
    pub fn single(base_url: &str) -> Self {
        SEGMENTS.into_iter().fold(Self::new(), |table, (segment, service)| {
            table.with_upstream(segment, service, base_url)
        })
    }

    /// `/api/orders/5?x=1` style paths only. Dot segments are refused so a
    /// request cannot climb out of its service prefix.
    pub fn resolve<'a>(&'a self, path: &'a str) -> Option<Route<'a>> {
        let upstream_path = path.strip_prefix(API_PREFIX)?;
        let segment = upstream_path.strip_prefix('/')?.split('/').next()?;
        if upstream_path.split('/').any(is_dot_segment) {
            return None;
        }
        let upstream = self.upstreams.get(segment)?;
        Some(Route {
            upstream,
            path: upstream_path,
        })
    }
}

fn is_dot_segment(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::new()
            .with_upstream("orders", "order", "http://orders:8086/")
            .with_upstream("files", "storage", "http://storage:8090")
    }

    #[test]
    fn strips_the_api_prefix() {
        let table = table();
        let route = table.resolve("/api/orders/5/cancel").unwrap();
        assert_eq!(route.upstream.service, "order");
        assert_eq!(route.upstream.base_url, "http://orders:8086");
        assert_eq!(route.path, "/orders/5/cancel");

        assert_eq!(table.resolve("/api/orders").unwrap().path, "/orders");
        assert_eq!(table.resolve("/api/files/abc").unwrap().upstream.service, "storage");
    }

    #[test]
    fn unknown_or_partial_segments_do_not_match() {
        let table = table();
        assert!(table.resolve("/api/ordersx").is_none());
        assert!(table.resolve("/api/internal/orders/1").is_none());
        assert!(table.resolve("/orders/1").is_none());
        assert!(table.resolve("/apiorders").is_none());
        assert!(table.resolve("/api").is_none());
    }

    #[test]
    fn dot_segments_are_refused() {
        let table = table();
        assert!(table.resolve("/api/orders/../internal/orders/1").is_none());
        assert!(table.resolve("/api/orders/%2E%2e/internal").is_none());
        assert!(table.resolve("/api/orders/./1").is_none());
        assert!(table.resolve("/api/orders/1..2").is_some());
    }

    #[test]
    fn every_service_is_configured() {
        let mut config = MercatoConfig::empty();
        for (_, service) in SEGMENTS {
            config.set(&format!("services.{service}.url"), format!("http://{service}"));
        }
        let table = RouteTable::from_config(&config).unwrap();
        assert_eq!(table.resolve("/api/files/x").unwrap().upstream.base_url, "http://storage");
        assert_eq!(table.resolve("/api/carts/me").unwrap().upstream.base_url, "http://cart");

        let partial = MercatoConfig::empty().with("services.auth.url", "http://auth");
        assert!(RouteTable::from_config(&partial).is_err());
    }
}
