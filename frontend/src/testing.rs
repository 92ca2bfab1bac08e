//! In-memory doubles for the browser-only pieces.

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    rc::Rc,
};

use async_trait::async_trait;

use crate::{
    config::Config,
    error::{ApiError, Result},
    http::{ApiClient, HttpRequest, HttpResponse, Method, Transport},
    storage::MemoryStorage,
};

pub const BASE_URL: &str = "http://bank.test/api";

pub fn config() -> Config {
    Config {
        api_base_url: BASE_URL.to_string(),
        ..Config::default()
    }
}

struct Route {
    method: Method,
    path: String,
    response: HttpResponse,
}

/// Answers requests from a queue of canned responses.
///
/// Each canned response is used once, in the order it was added for its
/// method and path. Unmatched requests get a 404.
#[derive(Default)]
pub struct MockTransport {
    routes: RefCell<VecDeque<Route>>,
    requests: RefCell<Vec<HttpRequest>>,
    offline: Cell<bool>,
    slow: Cell<bool>,
}

impl MockTransport {
    pub fn respond(&self, method: Method, path: &str, status: u16, body: &str) {
        self.routes.borrow_mut().push_back(Route {
            method,
            path: path.to_string(),
            response: HttpResponse {
                status,
                body: body.to_string(),
            },
        });
    }

    pub fn go_offline(&self) {
        self.offline.set(true);
    }

    /// Let other tasks run before each response is delivered.
    pub fn go_slow(&self) {
        self.slow.set(true);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }

    /// The paths (with query) requested so far, relative to [`BASE_URL`].
    pub fn paths(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|request| relative(&request.url).to_string())
            .collect()
    }
}

fn relative(url: &str) -> &str {
    url.strip_prefix(BASE_URL).unwrap_or(url)
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.borrow_mut().push(request.clone());
        if self.slow.get() {
            tokio::task::yield_now().await;
        }

        if self.offline.get() {
            return Err(ApiError::Network("Failed to fetch".to_string()));
        }

        let path = relative(&request.url);
        let mut routes = self.routes.borrow_mut();
        let position = routes
            .iter()
            .position(|route| route.method == request.method && route.path == path);

        Ok(match position.and_then(|index| routes.remove(index)) {
            Some(route) => route.response,
            None => HttpResponse {
                status: 404,
                body: format!(r#"{{"message":"no route for {path}"}}"#),
            },
        })
    }
}

pub fn mock_client() -> (ApiClient, Rc<MockTransport>, MemoryStorage) {
    let transport = Rc::new(MockTransport::default());
    let storage = MemoryStorage::default();
    let client = ApiClient::new(&config(), transport.clone(), Rc::new(storage.clone()));
    (client, transport, storage)
}
