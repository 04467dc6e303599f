//! JSON API client with auth interceptors.
//!
//! Outgoing requests get the JSON content type and, when the session holds a
//! token, an `Authorization: Bearer` header. Incoming 401 responses clear the
//! token and send the user back to the login route; the caller receives
//! [`AuthError::Unauthorized`] and is not expected to show it inline.
//!
//! The wire itself is a [`Transport`], so the client can be exercised without
//! a network.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use super::session::{SessionStore, TOKEN_KEY};
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::router::{Navigator, Route};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// A request before it reaches the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the client's base URL, starting with `/`.
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>, body: &impl Serialize) -> Result<Self, AuthError> {
        let mut request = Self::new(Method::Post, path);
        request.body = Some(serde_json::to_value(body)?);
        Ok(request)
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    /// Set a header, replacing any existing value (names compare case-insensitively).
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
        {
            Some((_, v)) => *v = value,
            None => self.headers.push((name.to_owned(), value)),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: serde_json::Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, AuthError> {
        Ok(serde_json::from_value(self.body.clone())?)
    }
}

/// Moves a request to a server and back.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        url: String,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, AuthError>> + Send;
}

/// API client over a transport and a session store.
pub struct ApiClient<T, S> {
    base_url: String,
    timeout: Duration,
    transport: T,
    session: S,
    navigator: Option<Arc<dyn Navigator + Send + Sync>>,
}

impl<T: Transport, S: SessionStore> ApiClient<T, S> {
    pub fn new(config: &AuthConfig, transport: T, session: S) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            timeout: config.timeout(),
            transport,
            session,
            navigator: None,
        }
    }

    /// Where to send the user when the server answers 401.
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator + Send + Sync>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    /// Send a request through both interceptors.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, AuthError> {
        let request = self.prepare(request);
        let url = format!("{}{}", self.base_url, request.path);

        let response = tokio::time::timeout(self.timeout, self.transport.send(url, request))
            .await
            .map_err(|_| AuthError::Timeout(self.timeout))??;

        self.inspect(response)
    }

    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, AuthError> {
        self.send(ApiRequest::get(path)).await?.json()
    }

    pub async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, AuthError> {
        self.send(ApiRequest::post(path, body)?).await?.json()
    }

    fn prepare(&self, mut request: ApiRequest) -> ApiRequest {
        request.set_header("Content-Type", "application/json");
        if let Some(token) = self.session.token() {
            request.set_header("Authorization", format!("Bearer {}", token));
        }
        request
    }

    fn inspect(&self, response: ApiResponse) -> Result<ApiResponse, AuthError> {
        if response.status == 401 {
            log::warn!("401 from server: clearing session and redirecting to login");
            self.session.remove(TOKEN_KEY);
            if let Some(navigator) = &self.navigator {
                navigator.navigate(Route::Login);
            }
            return Err(AuthError::Unauthorized);
        }
        if !response.is_success() {
            return Err(AuthError::Status(response.status));
        }
        Ok(response)
    }
}
