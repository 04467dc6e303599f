//! Login screen controller.

use crate::auth::{AuthResponse, AuthSink, SessionStore, TOKEN_KEY};
use crate::error::{AuthError, LoginError};
use crate::router::{Navigator, Route};

/// Credentials captured by [`LoginForm::begin_submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    error: Option<String>,
    in_flight: bool,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Check both fields are present and mark the form in flight.
    pub fn begin_submit(&mut self) -> Result<Credentials, LoginError> {
        if self.in_flight {
            return Err(LoginError::InFlight);
        }
        self.error = None;
        if self.email.is_empty() || self.password.is_empty() {
            let err = LoginError::MissingCredentials;
            self.error = Some(err.to_string());
            return Err(err);
        }
        self.in_flight = true;
        Ok(Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }

    /// Settle a login. On success the token is stored and the onboarding
    /// route is returned.
    pub fn finish_submit(
        &mut self,
        result: Result<AuthResponse, AuthError>,
        session: &dyn SessionStore,
    ) -> Result<Route, LoginError> {
        if !self.in_flight {
            return Err(LoginError::NotInFlight);
        }
        self.in_flight = false;
        match result {
            Ok(response) => {
                session.set(TOKEN_KEY, &response.token);
                log::info!("signed in as {}", response.user.username);
                Ok(Route::GetStarted)
            }
            Err(e) => {
                log::warn!("login failed: {}", e);
                let err = LoginError::Sink(e);
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub async fn submit<S: AuthSink>(
        &mut self,
        sink: &S,
        session: &dyn SessionStore,
        navigator: &dyn Navigator,
    ) -> Result<(), LoginError> {
        let credentials = self.begin_submit()?;
        let result = sink.login(&credentials.email, &credentials.password).await;
        let route = self.finish_submit(result, session)?;
        navigator.navigate(route);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemorySession;

    #[test]
    fn test_missing_password() {
        let mut form = LoginForm {
            email: "sita@example.com".into(),
            ..Default::default()
        };
        assert!(matches!(form.begin_submit(), Err(LoginError::MissingCredentials)));
        assert_eq!(form.error(), Some("Please enter both email and password."));
        assert!(!form.is_in_flight());
    }

    #[test]
    fn test_in_flight_rejects_second_submit() {
        let mut form = LoginForm {
            email: "a@b.c".into(),
            password: "x".into(),
            ..Default::default()
        };
        form.begin_submit().unwrap();
        assert!(matches!(form.begin_submit(), Err(LoginError::InFlight)));
    }

    #[test]
    fn test_failure_surfaces_sink_message() {
        let mut form = LoginForm {
            email: "a@b.c".into(),
            password: "x".into(),
            ..Default::default()
        };
        let session = MemorySession::new();
        form.begin_submit().unwrap();
        form.finish_submit(Err(AuthError::Status(503)), &session)
            .unwrap_err();

        assert_eq!(form.error(), Some("Request failed with status 503"));
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_finish_without_begin_is_rejected() {
        let mut form = LoginForm::new();
        let session = MemorySession::new();

        let err = form
            .finish_submit(Err(AuthError::Status(503)), &session)
            .unwrap_err();
        assert!(matches!(err, LoginError::NotInFlight));
        assert_eq!(form.error(), None);
        assert_eq!(session.token(), None);
    }
}
