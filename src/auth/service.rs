//! The authentication sink and its mock implementation.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::form::{RegistrationRequest, Role};

/// Token every mock login and registration hands out.
pub const MOCK_TOKEN: &str = "mock-jwt-token";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// The asynchronous calls the login, registration and OTP screens depend on.
pub trait AuthSink {
    fn login(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<AuthResponse, AuthError>> + Send;

    fn register(
        &self,
        request: &RegistrationRequest,
    ) -> impl Future<Output = Result<AuthResponse, AuthError>> + Send;

    /// Resolves `true` only for the accepted code.
    fn verify_otp(&self, code: &str) -> impl Future<Output = Result<bool, AuthError>> + Send;
}

/// An [`AuthSink`] that answers locally after a fixed delay.
#[derive(Debug)]
pub struct MockAuthService {
    latency: Duration,
    otp_code: String,
    fail_next: AtomicBool,
    login_calls: AtomicUsize,
    register_calls: AtomicUsize,
    verify_calls: AtomicUsize,
    last_registration: Mutex<Option<RegistrationRequest>>,
}

impl MockAuthService {
    pub fn new() -> Self {
        Self::from_config(&AuthConfig::default())
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            latency: config.latency(),
            otp_code: config.otp_code.clone(),
            fail_next: AtomicBool::new(false),
            login_calls: AtomicUsize::new(0),
            register_calls: AtomicUsize::new(0),
            verify_calls: AtomicUsize::new(0),
            last_registration: Mutex::new(None),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make the next call (of any kind) fail with a network error.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn register_calls(&self) -> usize {
        self.register_calls.load(Ordering::SeqCst)
    }

    pub fn verify_calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }

    /// The most recent request passed to `register`.
    pub fn last_registration(&self) -> Option<RegistrationRequest> {
        self.registrations().clone()
    }

    fn registrations(&self) -> MutexGuard<'_, Option<RegistrationRequest>> {
        self.last_registration
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn settle(&self) -> Result<(), AuthError> {
        tokio::time::sleep(self.latency).await;
        if self.fail_next.swap(false, Ordering::SeqCst) {
            log::warn!("mock auth: simulated network failure");
            return Err(AuthError::Network("simulated network failure".into()));
        }
        Ok(())
    }
}

impl Default for MockAuthService {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthSink for MockAuthService {
    async fn login(&self, email: &str, _password: &str) -> Result<AuthResponse, AuthError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.settle().await?;
        Ok(AuthResponse {
            token: MOCK_TOKEN.into(),
            user: User {
                id: "1".into(),
                username: "DemoUser".into(),
                email: email.to_owned(),
                role: Role::User,
                phone_number: None,
                location: None,
            },
        })
    }

    async fn register(&self, request: &RegistrationRequest) -> Result<AuthResponse, AuthError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        *self.registrations() = Some(request.clone());
        self.settle().await?;
        Ok(AuthResponse {
            token: MOCK_TOKEN.into(),
            user: User {
                id: "2".into(),
                username: request.fields.username.clone(),
                email: request.fields.email.clone(),
                role: request.role,
                phone_number: None,
                location: None,
            },
        })
    }

    async fn verify_otp(&self, code: &str) -> Result<bool, AuthError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        self.settle().await?;
        Ok(code == self.otp_code)
    }
}
