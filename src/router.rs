//! Application routes and the navigation capability.
//!
//! Controllers never switch screens themselves: they hand a [`Route`] to a
//! [`Navigator`]. The desktop app implements it by swapping the active
//! screen; tests use [`History`] to see where a flow ended up.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// A screen in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Landing,
    /// `/get-started`, the onboarding carousel.
    GetStarted,
    /// `/login`
    Login,
    /// `/register`
    Register,
    /// `/otp-verify`, carrying the email the code was sent to.
    OtpVerify { email: Option<String> },
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::GetStarted => "/get-started",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::OtpVerify { .. } => "/otp-verify",
        }
    }

    /// Resolve a path. Route state (the OTP email) is not part of the path.
    pub fn from_path(path: &str) -> Option<Route> {
        match path {
            "/" | "" => Some(Route::Landing),
            "/get-started" => Some(Route::GetStarted),
            "/login" => Some(Route::Login),
            "/register" => Some(Route::Register),
            "/otp-verify" => Some(Route::OtpVerify { email: None }),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Something that can move the application to another route.
pub trait Navigator {
    fn navigate(&self, route: Route);
}

impl<T: Navigator + ?Sized> Navigator for Arc<T> {
    fn navigate(&self, route: Route) {
        (**self).navigate(route)
    }
}

/// An in-memory navigation stack.
#[derive(Debug)]
pub struct History {
    stack: Mutex<Vec<Route>>,
}

impl History {
    /// A history positioned at `initial`.
    pub fn new(initial: Route) -> Self {
        Self {
            stack: Mutex::new(vec![initial]),
        }
    }

    pub fn current(&self) -> Route {
        // The stack is never empty: back() keeps the first entry
        self.lock().last().cloned().unwrap_or(Route::Landing)
    }

    /// Pop the current route. The first entry is never popped.
    pub fn back(&self) -> Option<Route> {
        let mut stack = self.lock();
        if stack.len() > 1 {
            stack.pop();
            stack.last().cloned()
        } else {
            None
        }
    }

    pub fn entries(&self) -> Vec<Route> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Route>> {
        self.stack.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Route::Landing)
    }
}

impl Navigator for History {
    fn navigate(&self, route: Route) {
        log::debug!("navigate to {}", route);
        self.lock().push(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_round_trip() {
        for route in [Route::Landing, Route::GetStarted, Route::Login, Route::Register] {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(
            Route::from_path("/otp-verify"),
            Some(Route::OtpVerify { email: None })
        );
        assert_eq!(Route::from_path("/nowhere"), None);
    }

    #[test]
    fn test_history_push_and_back() {
        let history = History::default();
        history.navigate(Route::Register);
        history.navigate(Route::OtpVerify {
            email: Some("sita@example.com".into()),
        });
        assert_eq!(history.len(), 3);
        assert_eq!(history.back(), Some(Route::Register));
        assert_eq!(history.back(), Some(Route::Landing));
        assert_eq!(history.back(), None);
        assert_eq!(history.current(), Route::Landing);
    }

    #[test]
    fn test_shared_navigator() {
        let history = Arc::new(History::default());
        let nav: Arc<dyn Navigator + Send + Sync> = history.clone();
        nav.navigate(Route::Login);
        assert_eq!(history.current(), Route::Login);
    }
}
