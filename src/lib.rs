//! # GAUHATT
//!
//! Client core for the GAUHATT farm-to-table app: the drifting leaf
//! background every page mounts, and the signup/login flow behind the auth
//! screens.
//!
//! ## Quick Start
//!
//! ```ignore
//! use gauhatt::prelude::*;
//!
//! let mut host = Host::new(1280, 720);
//! let background = ParticleBackground::mount(&mut host, FieldConfig::default());
//!
//! let mut surface = RasterSurface::new(1280, 720);
//! host.pointer_moved(Vec2::new(640.0, 360.0));
//! host.frame(&mut surface);
//! surface.save("frame.png")?;
//!
//! background.unmount(&mut host);
//! ```
//!
//! ## Core Concepts
//!
//! ### Particle field
//!
//! A [`ParticleField`] holds `floor(w * h / 25000)` leaves. Each frame it
//! clears its [`Surface`](surface::Surface), moves every leaf, bounces it off
//! the edges, and grows and brightens the ones near the pointer. Leaves close
//! enough get a faint line to the pointer. Everything is parameterized by
//! [`FieldConfig`].
//!
//! The pointer is a [`PointerHandle`](input::PointerHandle): one atomic cell
//! any thread can write and the field reads once per frame.
//!
//! ### Host
//!
//! [`Host`] stands in for the window: it dispatches resize, pointer and frame
//! events to whatever is mounted. [`ParticleBackground`] mounts a field on a
//! host and unmounts cleanly.
//!
//! ### Forms
//!
//! [`RegistrationForm`] is an explicit state machine over
//! [`FormState`] (`UserStep1 | FarmerStep1 | FarmerStep2`). [`LoginForm`] and
//! [`OtpForm`] cover the other two auth screens. All three submit to an
//! [`AuthSink`]; [`MockAuthService`] answers after a simulated delay.
//!
//! ### Navigation and session
//!
//! Controllers report where to go next as a [`Route`] handed to a
//! [`Navigator`]. The login flow writes its token to a
//! [`SessionStore`](auth::SessionStore), and [`ApiClient`](auth::ApiClient)
//! clears it again when the server answers 401.
//!
//! ## Feature flags
//!
//! - `egui` - [`PainterSurface`](surface::PainterSurface) for drawing the
//!   field inside an egui UI

pub mod auth;
pub mod config;
pub mod error;
pub mod field;
pub mod form;
pub mod host;
pub mod input;
pub mod onboarding;
pub mod router;
pub mod surface;
pub mod time;

pub use auth::{AuthSink, MockAuthService};
pub use config::{AuthConfig, Config, FieldConfig};
pub use field::{ParticleBackground, ParticleField};
pub use form::{FormState, LoginForm, OtpForm, RegistrationForm, Role};
pub use glam::Vec2;
pub use host::Host;
pub use router::{Navigator, Route};

/// Prelude module for convenient imports.
///
/// ```ignore
/// use gauhatt::prelude::*;
/// ```
pub mod prelude {
    pub use crate::auth::{AuthSink, MemorySession, MockAuthService, SessionStore};
    pub use crate::config::{AuthConfig, Config, FieldConfig};
    pub use crate::error::{AuthError, LoginError, OtpError, RegistrationError, RenderError};
    pub use crate::field::{ParticleBackground, ParticleField};
    pub use crate::form::{Field, FormState, LoginForm, OtpForm, RegistrationForm, Role};
    pub use crate::host::Host;
    pub use crate::input::PointerHandle;
    pub use crate::onboarding::IntroFlow;
    pub use crate::router::{History, Navigator, Route};
    pub use crate::surface::{DisplayList, RasterSurface, Surface};
    pub use crate::Vec2;
}
