use std::time::{Duration, Instant};

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::header::{CONNECTION, CONTENT_LENGTH, HOST};
use axum::http::{HeaderMap, HeaderName};
use axum::response::Response;
use mercato_core::{ConfigError, HttpError, MercatoConfig};
use tracing::{debug, warn};

use crate::state::GatewayState;

const DEFAULT_BODY_LIMIT: usize = 16 * 1024 * 1024;
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Meaningful for a single connection only, never forwarded.
const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

#[derive(Clone, Debug)]
pub struct Proxy {
    http: reqwest::Client,
    body_limit: usize,
}

impl Proxy {
    pub fn new(timeout: Duration, body_limit: usize) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap_or_default();
        Self { http, body_limit }
    }

    /// `http.client.timeout` (ms) and `gateway.body.limit` (bytes).
    pub fn from_config(config: &MercatoConfig) -> Result<Self, ConfigError> {
        let timeout = config.get_or("http.client.timeout", DEFAULT_TIMEOUT_MS);
        let body_limit = config.get_or("gateway.body.limit", DEFAULT_BODY_LIMIT);
        Ok(Self::new(Duration::from_millis(timeout), body_limit))
    }
}

/// Copy end-to-end headers, dropping hop-by-hop ones and any header the
/// `Connection` header names.
fn end_to_end(headers: &HeaderMap, also_skip: &[HeaderName]) -> HeaderMap {
    let listed: Vec<String> = headers
        .get_all(CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(|name| name.trim().to_ascii_lowercase())
        .collect();

    let mut out = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let lower = name.as_str();
        if HOP_BY_HOP.contains(&lower)
            || also_skip.contains(name)
            || listed.iter().any(|l| l == lower)
        {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}

/// Fallback handler: forward the request to the service owning its path.
pub async fn forward(State(state): State<GatewayState>, req: Request) -> Result<Response, HttpError> {
    let (parts, body) = req.into_parts();
    let path = parts.uri.path();
    let route = state
        .routes
        .resolve(path)
        .ok_or_else(|| HttpError::NotFound(format!("No route for {path}")))?;

    let mut url = format!("{}{}", route.upstream.base_url, route.path);
    if let Some(query) = parts.uri.query() {
        url.push('?');
        url.push_str(query);
    }

    let body = to_bytes(body, state.proxy.body_limit).await.map_err(|e| {
        debug!(error = %e, "Request body rejected");
        HttpError::PayloadTooLarge(format!(
            "Request body exceeds {} bytes",
            state.proxy.body_limit
        ))
    })?;

    let service = route.upstream.service.as_str();
    let started = Instant::now();
    let upstream = state
        .proxy
        .http
        .request(parts.method.clone(), &url)
        .headers(end_to_end(&parts.headers, &[HOST, CONTENT_LENGTH]))
        .body(body)
        .send()
        .await
        .map_err(|e| {
            warn!(service, %url, error = %e, "Upstream unreachable");
            HttpError::BadGateway(format!("{service} service unavailable"))
        })?;

    let status = upstream.status();
    let headers = end_to_end(upstream.headers(), &[]);
    let bytes = upstream.bytes().await.map_err(|e| {
        warn!(service, %url, error = %e, "Upstream response interrupted");
        HttpError::BadGateway(format!("{service} service unavailable"))
    })?;
    debug!(
        service,
        method = %parts.method,
        path = route.path,
        %status,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Proxied"
    );

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn hop_by_hop_and_connection_listed_headers_are_dropped() {
        let mut headers = HeaderMap::new();
        headers.insert("connection", HeaderValue::from_static("keep-alive, x-trace-hop"));
        headers.insert("keep-alive", HeaderValue::from_static("timeout=5"));
        headers.insert("transfer-encoding", HeaderValue::from_static("chunked"));
        headers.insert("x-trace-hop", HeaderValue::from_static("1"));
        headers.insert("host", HeaderValue::from_static("gateway"));
        headers.insert("authorization", HeaderValue::from_static("Bearer t"));
        headers.append("accept", HeaderValue::from_static("text/html"));
        headers.append("accept", HeaderValue::from_static("application/json"));

        let out = end_to_end(&headers, &[HOST]);
        assert_eq!(out.len(), 3);
        assert_eq!(out.get_all("accept").iter().count(), 2);
        assert_eq!(out["authorization"], "Bearer t");
        assert!(out.get("x-trace-hop").is_none());
        assert!(out.get("host").is_none());
    }
}
