use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{Instrument, Span, debug};

use common::TraceId;
use common::logger::{request_span, warn_if_slow};
use session::SessionStore;

use crate::auth::{RequestAuthorizer, ResponseGuard};
use crate::config::PortalConfig;
use crate::error::{PortalError, PortalResult};
use crate::sequence::RequestSlots;

/// HTTP client for the portal backend.
///
/// Every call passes through the [`RequestAuthorizer`] on the way out and the
/// [`ResponseGuard`] on the way back, so call sites never handle credentials.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<SessionStore>,
    authorizer: RequestAuthorizer,
    guard: ResponseGuard,
    slow_request: Duration,
}

impl ApiClient {
    pub fn new(cfg: &PortalConfig, session: Arc<SessionStore>) -> PortalResult<Self> {
        let http = Client::builder()
            .timeout(cfg.request_timeout)
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base_url: cfg.api_base_url.trim_end_matches('/').to_string(),
            authorizer: RequestAuthorizer::new(session.clone()),
            guard: ResponseGuard::new(session.clone()),
            session,
            slow_request: cfg.slow_request,
        })
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> PortalResult<T> {
        self.send(Method::GET, path, &[], None).await
    }

    /// GET with URL-encoded query parameters.
    pub async fn get_with<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> PortalResult<T> {
        self.send(Method::GET, path, query, None).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> PortalResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.send(Method::POST, path, &[], Some(body)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> PortalResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.put_with(path, &[], body).await
    }

    pub async fn put_with<B, T>(&self, path: &str, query: &[(&str, &str)], body: &B) -> PortalResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.send(Method::PUT, path, query, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> PortalResult<T> {
        self.send(Method::DELETE, path, &[], None).await
    }

    /// GET whose result is only delivered if no newer request was issued for
    /// the same `slot` in the meantime. Stale completions yield `Ok(None)`,
    /// failures included.
    pub async fn get_latest<K, T>(
        &self,
        slots: &RequestSlots<K>,
        slot: K,
        path: &str,
    ) -> PortalResult<Option<T>>
    where
        K: Eq + Hash + Clone + std::fmt::Debug,
        T: DeserializeOwned,
    {
        let ticket = slots.issue(slot);
        let result = self.get(path).await;
        match slots.settle(&ticket, result) {
            Some(result) => result.map(Some),
            None => Ok(None),
        }
    }

    /// Sends one request through the authorizer and response guard.
    ///
    /// Non-success statuses become [`PortalError::Status`] after the guard has
    /// run; the error itself is never swallowed.
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<Value>,
    ) -> PortalResult<T> {
        let trace_id = TraceId::default();
        let span = request_span(method.as_str(), path, &trace_id);

        async move {
            let mut builder = self.http.request(method, self.url(path));
            if !query.is_empty() {
                builder = builder.query(query);
            }
            if let Some(body) = &body {
                builder = builder.json(body);
            }
            let mut req = builder.build()?;

            let authorized = self.authorizer.authorize(&mut req);
            debug!(authorized, "sending request");

            // The guard matches on what was sent, not on how the caller spelled it.
            let sent_path = req.url().path().to_string();

            let resp = warn_if_slow("api_request", self.slow_request, self.http.execute(req)).await?;

            let status = resp.status();
            Span::current().record("status", status.as_u16());

            if !status.is_success() {
                let message = error_message(resp).await;
                self.guard.inspect(&sent_path, status).await;
                return Err(PortalError::Status {
                    status,
                    path: path.to_string(),
                    message,
                });
            }

            decode(resp).await
        }
        .instrument(span)
        .await
    }
}

/// Empty bodies decode as JSON `null`.
async fn decode<T: DeserializeOwned>(resp: Response) -> PortalResult<T> {
    let bytes = resp.bytes().await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_value(Value::Null)?);
    }
    Ok(serde_json::from_slice(&bytes)?)
}

/// Extracts the backend's `{"error": "..."}` message, falling back to the raw
/// body and then to the status reason.
async fn error_message(resp: Response) -> String {
    let status = resp.status();
    let text = resp.text().await.unwrap_or_default();

    if let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(&text) {
        for key in ["error", "message", "msg"] {
            if let Some(Value::String(m)) = obj.get(key) {
                return m.clone();
            }
        }
    }

    let text = text.trim();
    if !text.is_empty() {
        return text.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use session::storage::MemoryStorage;

    fn client(base: &str) -> ApiClient {
        let cfg = PortalConfig::default().with_api_base_url(base);
        let store = Arc::new(SessionStore::new(Arc::new(MemoryStorage::new())));
        ApiClient::new(&cfg, store).unwrap()
    }

    #[test]
    fn url_joins_base_and_path() {
        let c = client("http://localhost:5000/api/");
        assert_eq!(c.url("/Patient?id=1"), "http://localhost:5000/api/Patient?id=1");
        assert_eq!(c.url("admin/users"), "http://localhost:5000/api/admin/users");
    }
}
