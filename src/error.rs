//! Error types for GAUHATT.
//!
//! This module provides error types for the authentication sink, the
//! registration/login/OTP flows, and frame output. The `Display` text of the
//! form-level errors is the message shown to the user.

use std::fmt;
use std::time::Duration;

use crate::form::{Action, FieldErrors, FormState};

/// Errors produced by an [`AuthSink`](crate::auth::AuthSink) or the API client.
#[derive(Debug)]
pub enum AuthError {
    /// The request never produced a response.
    Network(String),
    /// No response arrived within the configured timeout.
    Timeout(Duration),
    /// The server answered 401; the session token has been cleared.
    Unauthorized,
    /// The server answered with a non-success status.
    Status(u16),
    /// The response body could not be decoded.
    Decode(serde_json::Error),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Network(msg) => write!(f, "Network error: {}", msg),
            AuthError::Timeout(after) => {
                write!(f, "Request timed out after {}ms", after.as_millis())
            }
            AuthError::Unauthorized => write!(f, "Session expired. Please log in again."),
            AuthError::Status(status) => write!(f, "Request failed with status {}", status),
            AuthError::Decode(e) => write!(f, "Invalid response body: {}", e),
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuthError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(e: serde_json::Error) -> Self {
        AuthError::Decode(e)
    }
}

/// Errors from the registration state machine.
#[derive(Debug)]
pub enum RegistrationError {
    /// The action is not defined for the current state.
    NotAllowed { from: FormState, action: Action },
    /// A submission is still waiting on the sink.
    InFlight,
    /// A sink result arrived with no submission waiting for it.
    NotInFlight,
    /// The form was already submitted successfully.
    Completed,
    /// The applicable rule set rejected one or more fields.
    Invalid(FieldErrors),
    /// The sink settled with an error.
    Sink(AuthError),
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationError::NotAllowed { from, action } => {
                write!(f, "Cannot {} from the {} step", action, from)
            }
            RegistrationError::InFlight => write!(f, "A registration request is already in progress."),
            RegistrationError::NotInFlight => write!(f, "No registration request is in progress."),
            RegistrationError::Completed => write!(f, "This registration has already been submitted."),
            RegistrationError::Invalid(errors) => {
                write!(f, "{} field(s) failed validation", errors.len())
            }
            RegistrationError::Sink(_) => write!(f, "{}", crate::form::REGISTRATION_FAILED),
        }
    }
}

impl std::error::Error for RegistrationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegistrationError::Sink(e) => Some(e),
            _ => None,
        }
    }
}

/// Errors from the login screen.
#[derive(Debug)]
pub enum LoginError {
    /// Email or password was left empty.
    MissingCredentials,
    /// A login request is still waiting on the sink.
    InFlight,
    /// A sink result arrived with no login waiting for it.
    NotInFlight,
    /// The sink settled with an error.
    Sink(AuthError),
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginError::MissingCredentials => write!(f, "Please enter both email and password."),
            LoginError::InFlight => write!(f, "A sign-in request is already in progress."),
            LoginError::NotInFlight => write!(f, "No sign-in request is in progress."),
            LoginError::Sink(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for LoginError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoginError::Sink(e) => Some(e),
            _ => None,
        }
    }
}

/// Errors from the OTP verification screen.
#[derive(Debug)]
pub enum OtpError {
    /// Fewer than six digits were entered.
    Incomplete,
    /// The sink rejected the code.
    Invalid,
    /// A verification request is still waiting on the sink.
    InFlight,
    /// A sink result arrived with no verification waiting for it.
    NotInFlight,
    /// The sink settled with an error.
    Sink(AuthError),
}

impl fmt::Display for OtpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OtpError::Incomplete => write!(f, "Please enter complete 6-digit code"),
            OtpError::Invalid => write!(f, "Invalid OTP code. Try 123456."),
            OtpError::InFlight => write!(f, "A verification request is already in progress."),
            OtpError::NotInFlight => write!(f, "No verification request is in progress."),
            OtpError::Sink(_) => write!(f, "Verification failed. Please try again."),
        }
    }
}

impl std::error::Error for OtpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OtpError::Sink(e) => Some(e),
            _ => None,
        }
    }
}

/// Errors that can occur when writing rendered frames.
#[derive(Debug)]
pub enum RenderError {
    /// Failed to encode the frame image.
    Image(image::ImageError),
    /// Failed to write the frame to disk.
    Io(std::io::Error),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Image(e) => write!(f, "Failed to encode frame: {}", e),
            RenderError::Io(e) => write!(f, "Failed to write frame: {}", e),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Image(e) => Some(e),
            RenderError::Io(e) => Some(e),
        }
    }
}

impl From<image::ImageError> for RenderError {
    fn from(e: image::ImageError) -> Self {
        RenderError::Image(e)
    }
}

impl From<std::io::Error> for RenderError {
    fn from(e: std::io::Error) -> Self {
        RenderError::Io(e)
    }
}
