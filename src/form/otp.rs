//! OTP verification screen controller.
//!
//! Six single-digit cells with a focus cursor that follows typing and
//! backspacing.

use crate::auth::AuthSink;
use crate::error::{AuthError, OtpError};
use crate::router::{Navigator, Route};

pub const OTP_LEN: usize = 6;

/// Shown when the route carries no email.
pub const DEFAULT_EMAIL: &str = "user@example.com";

#[derive(Debug, Clone)]
pub struct OtpForm {
    email: String,
    cells: [Option<char>; OTP_LEN],
    focus: usize,
    error: Option<String>,
    in_flight: bool,
}

impl OtpForm {
    /// Form for the email a route carried, if any.
    pub fn new(email: Option<String>) -> Self {
        Self {
            email: email.unwrap_or_else(|| DEFAULT_EMAIL.to_owned()),
            cells: [None; OTP_LEN],
            focus: 0,
            error: None,
            in_flight: false,
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn cells(&self) -> &[Option<char>; OTP_LEN] {
        &self.cells
    }

    /// Index of the cell that should hold keyboard focus.
    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn set_focus(&mut self, index: usize) {
        self.focus = index.min(OTP_LEN - 1);
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Digits entered so far, in order, skipping empty cells.
    pub fn code(&self) -> String {
        self.cells.iter().flatten().collect()
    }

    /// Put `ch` in cell `index`. Non-digits are ignored.
    pub fn input(&mut self, index: usize, ch: char) {
        if index >= OTP_LEN || !ch.is_ascii_digit() {
            return;
        }
        self.cells[index] = Some(ch);
        self.focus = (index + 1).min(OTP_LEN - 1);
    }

    /// Clear cell `index`; if it was already empty, move focus back one cell.
    pub fn backspace(&mut self, index: usize) {
        if index >= OTP_LEN {
            return;
        }
        if self.cells[index].is_none() && index > 0 {
            self.focus = index - 1;
        }
        self.cells[index] = None;
    }

    /// Clear every cell for a fresh code.
    pub fn resend(&mut self) {
        self.cells = [None; OTP_LEN];
        self.focus = 0;
    }

    /// Check the code is complete and mark the form in flight.
    pub fn begin_verify(&mut self) -> Result<String, OtpError> {
        if self.in_flight {
            return Err(OtpError::InFlight);
        }
        let code = self.code();
        if code.len() != OTP_LEN {
            self.error = Some(OtpError::Incomplete.to_string());
            return Err(OtpError::Incomplete);
        }
        self.error = None;
        self.in_flight = true;
        Ok(code)
    }

    /// Settle a verification. An accepted code leads to the login route.
    pub fn finish_verify(&mut self, result: Result<bool, AuthError>) -> Result<Route, OtpError> {
        if !self.in_flight {
            return Err(OtpError::NotInFlight);
        }
        self.in_flight = false;
        let err = match result {
            Ok(true) => {
                log::info!("verified {}", self.email);
                return Ok(Route::Login);
            }
            Ok(false) => OtpError::Invalid,
            Err(e) => {
                log::warn!("otp verification failed: {}", e);
                OtpError::Sink(e)
            }
        };
        self.error = Some(err.to_string());
        Err(err)
    }

    pub async fn verify<S: AuthSink>(
        &mut self,
        sink: &S,
        navigator: &dyn Navigator,
    ) -> Result<(), OtpError> {
        let code = self.begin_verify()?;
        let result = sink.verify_otp(&code).await;
        let route = self.finish_verify(result)?;
        navigator.navigate(route);
        Ok(())
    }
}

impl Default for OtpForm {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(code: &str) -> OtpForm {
        let mut form = OtpForm::default();
        for (i, ch) in code.chars().enumerate() {
            form.input(i, ch);
        }
        form
    }

    #[test]
    fn test_default_email() {
        assert_eq!(OtpForm::new(None).email(), DEFAULT_EMAIL);
        assert_eq!(OtpForm::new(Some("sita@example.com".into())).email(), "sita@example.com");
    }

    #[test]
    fn test_input_advances_focus() {
        let mut form = OtpForm::default();
        form.input(0, '1');
        assert_eq!(form.focus(), 1);
        form.input(5, '9');
        assert_eq!(form.focus(), 5);
    }

    #[test]
    fn test_last_cell_keeps_focus() {
        let mut form = OtpForm::default();
        form.set_focus(2);
        form.input(5, '9');
        assert_eq!(form.focus(), 5);

        form.input(5, '8');
        assert_eq!(form.focus(), 5);
        assert_eq!(form.cells()[5], Some('8'));
    }

    #[test]
    fn test_non_digits_ignored() {
        let mut form = OtpForm::default();
        form.input(0, 'a');
        form.input(0, '-');
        assert_eq!(form.cells()[0], None);
        assert_eq!(form.focus(), 0);
    }

    #[test]
    fn test_backspace() {
        let mut form = typed("12");
        form.backspace(1);
        assert_eq!(form.code(), "1");
        assert_eq!(form.focus(), 2);

        form.backspace(1);
        assert_eq!(form.focus(), 0);

        form.backspace(0);
        assert_eq!(form.focus(), 0);
        assert_eq!(form.code(), "");
    }

    #[test]
    fn test_resend_clears() {
        let mut form = typed("123456");
        form.resend();
        assert_eq!(form.code(), "");
        assert_eq!(form.focus(), 0);
    }

    #[test]
    fn test_incomplete_code() {
        let mut form = typed("12345");
        assert!(matches!(form.begin_verify(), Err(OtpError::Incomplete)));
        assert_eq!(form.error(), Some("Please enter complete 6-digit code"));
        assert!(!form.is_in_flight());
    }

    #[test]
    fn test_finish_outcomes() {
        let mut form = typed("000000");
        form.begin_verify().unwrap();
        form.finish_verify(Ok(false)).unwrap_err();
        assert_eq!(form.error(), Some("Invalid OTP code. Try 123456."));

        form.begin_verify().unwrap();
        form.finish_verify(Err(AuthError::Network("x".into()))).unwrap_err();
        assert_eq!(form.error(), Some("Verification failed. Please try again."));

        form.begin_verify().unwrap();
        assert_eq!(form.finish_verify(Ok(true)).unwrap(), Route::Login);
        assert_eq!(form.error(), None);
    }

    #[test]
    fn test_finish_without_begin_is_rejected() {
        let mut form = typed("123456");
        assert!(matches!(form.finish_verify(Ok(true)), Err(OtpError::NotInFlight)));
        assert_eq!(form.error(), None);
        assert!(!form.is_in_flight());
    }
}
