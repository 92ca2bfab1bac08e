//! JSON-over-HTTP plumbing shared by every API module.

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{instrument, Level};

use crate::{
    config::{Config, Endpoints},
    error::{ApiError, Result},
    session::SessionStore,
    storage::Storage,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

#[cfg(test)]
impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Moves an [`HttpRequest`] to the server and back.
///
/// Implementations return [`ApiError::Network`] when no response arrived;
/// any response, whatever its status, is `Ok`.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// `fetch` through gloo-net.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let network = |e: gloo_net::Error| ApiError::Network(e.to_string());

        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = match request.body {
            Some(body) => builder.body(body).map_err(network)?.send().await,
            None => builder.send().await,
        }
        .map_err(network)?;

        let status = response.status();
        let body = response.text().await.map_err(network)?;

        Ok(HttpResponse { status, body })
    }
}

/// Counts requests in flight and reports when the count leaves or returns
/// to zero.
#[derive(Clone, Default)]
pub struct LoadingIndicator {
    in_flight: Rc<Cell<usize>>,
    listener: Rc<RefCell<Option<Rc<dyn Fn(bool)>>>>,
}

impl fmt::Debug for LoadingIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadingIndicator")
            .field("in_flight", &self.in_flight.get())
            .finish()
    }
}

impl LoadingIndicator {
    pub fn on_change(&self, listener: impl Fn(bool) + 'static) {
        *self.listener.borrow_mut() = Some(Rc::new(listener));
    }

    #[cfg(test)]
    pub fn is_loading(&self) -> bool {
        self.in_flight.get() > 0
    }

    #[must_use]
    pub fn begin(&self) -> LoadingGuard {
        let before = self.in_flight.get();
        self.in_flight.set(before + 1);
        if before == 0 {
            self.notify(true);
        }
        LoadingGuard {
            indicator: self.clone(),
        }
    }

    fn end(&self) {
        let after = self.in_flight.get().saturating_sub(1);
        self.in_flight.set(after);
        if after == 0 {
            self.notify(false);
        }
    }

    fn notify(&self, loading: bool) {
        // the listener may re-enter, so release the borrow before calling it
        let listener = self.listener.borrow().clone();
        if let Some(listener) = listener {
            listener(loading);
        }
    }
}

/// Keeps the [`LoadingIndicator`] busy until dropped.
#[derive(Debug)]
pub struct LoadingGuard {
    indicator: LoadingIndicator,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.indicator.end();
    }
}

/// A client to the banking API.
///
/// Cheap to clone; clones share the transport, the session store and the
/// loading indicator.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Rc<str>,
    endpoints: Rc<Endpoints>,
    transport: Rc<dyn Transport>,
    sessions: SessionStore,
    loading: LoadingIndicator,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("sessions", &self.sessions)
            .field("loading", &self.loading)
            .finish()
    }
}

impl ApiClient {
    pub fn new(config: &Config, transport: Rc<dyn Transport>, storage: Rc<dyn Storage>) -> Self {
        Self {
            base_url: config.api_base_url.as_str().into(),
            endpoints: Rc::new(config.endpoints.clone()),
            transport,
            sessions: SessionStore::new(storage),
            loading: LoadingIndicator::default(),
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn loading(&self) -> &LoadingIndicator {
        &self.loading
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    /// Send a request and decode the JSON answer.
    ///
    /// # Errors
    ///
    /// [`ApiError::Network`] if the server could not be reached,
    /// [`ApiError::Status`] for a non-2xx answer and [`ApiError::Json`] if the
    /// answer is not the expected JSON.
    #[instrument(skip(self, body), err(level = "debug"))]
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<T> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(token) = self.sessions.token() {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }

        let request = HttpRequest {
            method,
            url: self.url(path),
            headers,
            body,
        };

        let _busy = self.loading.begin();
        let response = self.transport.send(request).await?;

        if !response.ok() {
            let error = ApiError::from_status(response.status, &response.body);
            tracing::event!(Level::WARN, status = response.status, %error, "request rejected");
            return Err(error);
        }

        tracing::event!(Level::DEBUG, status = response.status, "response received");
        decode(&response.body)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::Get, path, None).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_string(body)?;
        self.request(Method::Post, path, Some(body)).await
    }
}

/// Decode a 2xx body; an empty body is read as `{}`.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    let body = body.trim();
    let body = if body.is_empty() { "{}" } else { body };
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use serde_json::{json, Value};

    use super::*;
    use crate::{
        session::Session,
        testing::{mock_client, MockTransport},
    };

    #[tokio::test]
    async fn adds_json_and_bearer_headers() {
        let (client, transport, _) = mock_client();
        transport.respond(Method::Get, "/ping", 200, "{}");

        let _: Value = client.get("/ping").await.unwrap();
        let anonymous = transport.last_request().unwrap();
        assert_eq!(anonymous.header("content-type"), Some("application/json"));
        assert_eq!(anonymous.header("authorization"), None);

        client.sessions().save(&Session {
            token: "jwt".to_string(),
            user_id: "u-1".to_string(),
        });
        transport.respond(Method::Get, "/ping", 200, "{}");

        let _: Value = client.get("/ping").await.unwrap();
        let signed_in = transport.last_request().unwrap();
        assert_eq!(signed_in.header("authorization"), Some("Bearer jwt"));
        assert_eq!(signed_in.url, "http://bank.test/api/ping");
    }

    #[tokio::test]
    async fn empty_body_is_an_empty_object() {
        let (client, transport, _) = mock_client();
        transport.respond(Method::Post, "/bank-account/create", 201, "");

        let value: Value = client.post("/bank-account/create", &json!({})).await.unwrap();
        assert_eq!(value, json!({}));
    }

    #[tokio::test]
    async fn error_status_uses_server_message() {
        let (client, transport, _) = mock_client();
        transport.respond(Method::Post, "/transactions/transfer", 400, r#"{"message":"Insufficient funds"}"#);
        transport.respond(Method::Get, "/user/get-profile/u-1", 500, "oops");

        let error = client
            .post::<_, Value>("/transactions/transfer", &json!({"amount": 1}))
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "Insufficient funds");

        let error = client.get::<Value>("/user/get-profile/u-1").await.unwrap_err();
        assert_eq!(error.to_string(), "Request failed with status 500");
        assert_eq!(error.status(), Some(500));
    }

    #[tokio::test]
    async fn unexpected_json_is_a_json_error() {
        let (client, transport, _) = mock_client();
        transport.respond(Method::Get, "/numbers", 200, "[1, 2");

        let error = client.get::<Vec<u32>>("/numbers").await.unwrap_err();
        assert!(matches!(error, ApiError::Json(_)));
    }

    #[tokio::test]
    async fn absolute_urls_are_used_verbatim() {
        let (client, transport, _) = mock_client();
        transport.respond(Method::Get, "https://other.test/health", 200, "{}");

        let _: Value = client.get("https://other.test/health").await.unwrap();
        assert_eq!(transport.last_request().unwrap().url, "https://other.test/health");
    }

    #[tokio::test]
    async fn loading_indicator_wraps_every_call() {
        let (client, transport, _) = mock_client();
        let changes = Rc::new(RefCell::new(Vec::new()));
        {
            let changes = changes.clone();
            client.loading().on_change(move |busy| changes.borrow_mut().push(busy));
        }

        transport.respond(Method::Get, "/ok", 200, "{}");
        let _: Value = client.get("/ok").await.unwrap();
        transport.go_offline();
        let _ = client.get::<Value>("/ok").await.unwrap_err();

        assert_eq!(*changes.borrow(), vec![true, false, true, false]);
        assert!(!client.loading().is_loading());
    }

    #[test]
    fn nested_loading_reports_edges_only() {
        let indicator = LoadingIndicator::default();
        let changes = Rc::new(RefCell::new(Vec::new()));
        {
            let changes = changes.clone();
            indicator.on_change(move |busy| changes.borrow_mut().push(busy));
        }

        let outer = indicator.begin();
        let inner = indicator.begin();
        drop(inner);
        assert!(indicator.is_loading());
        drop(outer);

        assert_eq!(*changes.borrow(), vec![true, false]);
    }

    #[tokio::test]
    async fn unreachable_server_is_a_network_error() {
        let transport = Rc::new(MockTransport::default());
        transport.go_offline();
        let client = ApiClient::new(
            &crate::testing::config(),
            transport,
            Rc::new(crate::storage::MemoryStorage::default()),
        );

        let error = client.get::<Value>("/anything").await.unwrap_err();
        assert!(error.is_network());
    }
}
