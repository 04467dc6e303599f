//! Authentication: the sink the screens submit to, the session store, and
//! the API client that guards authorized requests.

pub mod client;
pub mod service;
pub mod session;

pub use client::{ApiClient, ApiRequest, ApiResponse, Method, Transport};
pub use service::{AuthResponse, AuthSink, MockAuthService, User, MOCK_TOKEN};
pub use session::{MemorySession, SessionStore, TOKEN_KEY};
