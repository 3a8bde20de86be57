use std::time::Duration;

use axum::http::StatusCode;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{ConfigError, MercatoConfig};
use crate::error::HttpError;

const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// JSON-over-HTTP client bound to one upstream Mercato service.
///
/// Typed clients (`ProductClient`, `CartClient`, ...) wrap one of these and
/// describe each remote call as a method. Failures are mapped uniformly:
///
/// - connection errors, timeouts and upstream 5xx become
///   `HttpError::ServiceUnavailable("<service> service unavailable")`
/// - upstream 4xx are relayed with the same status and the upstream message
#[derive(Clone, Debug)]
pub struct ServiceClient {
    http: reqwest::Client,
    base_url: String,
    service: &'static str,
}

impl ServiceClient {
    pub fn new(service: &'static str, base_url: impl Into<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service,
        }
    }

    /// Build a client from `services.<service>.url` and `http.client.timeout` (ms).
    pub fn from_config(service: &'static str, config: &MercatoConfig) -> Result<Self, ConfigError> {
        let base_url: String = config.get(&format!("services.{service}.url"))?;
        let timeout = config.get_or("http.client.timeout", DEFAULT_TIMEOUT_MS);
        Ok(Self::new(service, base_url, Duration::from_millis(timeout)))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn service(&self) -> &'static str {
        self.service
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, HttpError> {
        let resp = self.send(self.http.get(self.url(path))).await?;
        self.decode(resp).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let resp = self.send(self.http.get(self.url(path)).query(query)).await?;
        self.decode(resp).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self.send(self.http.post(self.url(path)).json(body)).await?;
        self.decode(resp).await
    }

    /// POST where the response body is irrelevant.
    pub async fn post_discard<B>(&self, path: &str, body: &B) -> Result<(), HttpError>
    where
        B: Serialize + ?Sized,
    {
        self.send(self.http.post(self.url(path)).json(body)).await?;
        Ok(())
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self.send(self.http.put(self.url(path)).json(body)).await?;
        self.decode(resp).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), HttpError> {
        self.send(self.http.delete(self.url(path))).await?;
        Ok(())
    }

    fn unavailable(&self) -> HttpError {
        HttpError::ServiceUnavailable(format!("{} service unavailable", self.service))
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, HttpError> {
        let resp = request.send().await.map_err(|e| {
            warn!(service = self.service, error = %e, "Upstream call failed");
            self.unavailable()
        })?;

        let status = StatusCode::from_u16(resp.status().as_u16())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        debug!(service = self.service, url = %resp.url(), %status, "Upstream responded");

        if status.is_success() {
            return Ok(resp);
        }

        if status.is_server_error() {
            warn!(service = self.service, %status, "Upstream returned a server error");
            return Err(self.unavailable());
        }

        let message = match resp.json::<serde_json::Value>().await {
            Ok(body) => body
                .get("error")
                .and_then(|v| v.as_str())
                .map(String::from)
                .unwrap_or_else(|| format!("{} service returned {status}", self.service)),
            Err(_) => format!("{} service returned {status}", self.service),
        };
        Err(HttpError::from_status(status, message))
    }

    async fn decode<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T, HttpError> {
        resp.json::<T>().await.map_err(|e| {
            warn!(service = self.service, error = %e, "Invalid upstream response");
            HttpError::BadGateway(format!("Invalid response from {} service", self.service))
        })
    }
}
