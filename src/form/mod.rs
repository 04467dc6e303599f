//! Form controllers: registration, login and OTP verification.
//!
//! Controllers own their field values and error messages and never touch a
//! UI. Each async operation is also available as a `begin_*` / `finish_*`
//! pair so a UI thread can hand the sink call to a runtime and settle the
//! form when the result comes back.

pub mod fields;
pub mod login;
pub mod otp;
pub mod registration;
pub mod rules;

pub use fields::{Attachment, AttachmentSlot, CropType, District, Field, FieldErrors, FormFields};
pub use login::{Credentials, LoginForm};
pub use otp::{OtpForm, DEFAULT_EMAIL, OTP_LEN};
pub use registration::{
    Action, FormState, RegistrationForm, RegistrationRequest, Role, REGISTRATION_FAILED,
};
pub use rules::RuleSet;
