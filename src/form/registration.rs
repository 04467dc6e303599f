//! The registration state machine.
//!
//! ```text
//!             select_role(Farmer)
//!   UserStep1 ------------------> FarmerStep1 --advance()--> FarmerStep2
//!       ^      select_role(User)      ^                          |
//!       +-----------------------------+-------- retreat() -------+
//! ```
//!
//! `submit` is legal from `UserStep1` (account rules) and `FarmerStep2`
//! (farm rules). It is split in two halves so a UI can run the sink on
//! another task: [`begin_submit`](RegistrationForm::begin_submit) validates
//! and marks the form in flight, [`finish_submit`](RegistrationForm::finish_submit)
//! settles it. [`submit`](RegistrationForm::submit) chains both around the
//! sink call.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::fields::{Attachment, AttachmentSlot, CropType, Field, FieldErrors, FormFields};
use super::rules::RuleSet;
use crate::auth::{AuthResponse, AuthSink};
use crate::error::{AuthError, RegistrationError};
use crate::router::{Navigator, Route};

/// Banner shown when the sink fails.
pub const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Farmer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "User"),
            Role::Farmer => write!(f, "Farmer"),
        }
    }
}

/// Where the form is. Role and step are one value, so impossible
/// combinations (a user on step 2) cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormState {
    UserStep1,
    FarmerStep1,
    FarmerStep2,
}

impl FormState {
    /// First step for `role`.
    pub fn initial(role: Role) -> Self {
        match role {
            Role::User => FormState::UserStep1,
            Role::Farmer => FormState::FarmerStep1,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            FormState::UserStep1 => Role::User,
            FormState::FarmerStep1 | FormState::FarmerStep2 => Role::Farmer,
        }
    }

    /// 1 or 2.
    pub fn step(&self) -> u8 {
        match self {
            FormState::FarmerStep2 => 2,
            _ => 1,
        }
    }

    /// Fields visible in this state.
    pub fn fields(&self) -> &'static [Field] {
        match self {
            FormState::FarmerStep2 => &Field::FARM,
            _ => &Field::ACCOUNT,
        }
    }

    /// Rule set `submit` applies here, if submitting is allowed at all.
    pub fn submit_rules(&self) -> Option<RuleSet> {
        match self {
            FormState::UserStep1 => Some(RuleSet::Account),
            FormState::FarmerStep1 => None,
            FormState::FarmerStep2 => Some(RuleSet::Farm),
        }
    }
}

impl fmt::Display for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormState::UserStep1 => write!(f, "user account"),
            FormState::FarmerStep1 => write!(f, "farmer account"),
            FormState::FarmerStep2 => write!(f, "farm details"),
        }
    }
}

/// A transition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SelectRole,
    Advance,
    Retreat,
    Submit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::SelectRole => write!(f, "change role"),
            Action::Advance => write!(f, "advance"),
            Action::Retreat => write!(f, "go back"),
            Action::Submit => write!(f, "submit"),
        }
    }
}

/// Everything sent to the sink on submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    #[serde(flatten)]
    pub fields: FormFields,
    pub crop_types: Vec<CropType>,
    pub farm_photo: Option<Attachment>,
    pub identity_proof: Option<Attachment>,
    pub role: Role,
}

/// Registration form state and its transitions.
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    state: FormState,
    fields: FormFields,
    crop_types: Vec<CropType>,
    farm_photo: Option<Attachment>,
    identity_proof: Option<Attachment>,
    errors: FieldErrors,
    in_flight: bool,
    completed: bool,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationForm {
    /// Empty form for a standard user.
    pub fn new() -> Self {
        Self {
            state: FormState::UserStep1,
            fields: FormFields::default(),
            crop_types: Vec::new(),
            farm_photo: None,
            identity_proof: None,
            errors: FieldErrors::new(),
            in_flight: false,
            completed: false,
        }
    }

    // ========== Accessors ==========

    #[inline]
    pub fn state(&self) -> FormState {
        self.state
    }

    #[inline]
    pub fn role(&self) -> Role {
        self.state.role()
    }

    #[inline]
    pub fn step(&self) -> u8 {
        self.state.step()
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn value(&self, field: Field) -> &str {
        self.fields.get(field)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&'static str> {
        self.errors.get(field)
    }

    pub fn crop_types(&self) -> &[CropType] {
        &self.crop_types
    }

    pub fn has_crop(&self, crop: CropType) -> bool {
        self.crop_types.contains(&crop)
    }

    pub fn attachment(&self, slot: AttachmentSlot) -> Option<&Attachment> {
        match slot {
            AttachmentSlot::FarmPhoto => self.farm_photo.as_ref(),
            AttachmentSlot::IdentityProof => self.identity_proof.as_ref(),
        }
    }

    #[inline]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    // ========== Editing ==========

    /// Update a field value and drop its error message.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.fields.set(field, value);
        self.errors.remove(field);
    }

    /// Add the crop if absent, remove it if present.
    pub fn toggle_crop(&mut self, crop: CropType) {
        match self.crop_types.iter().position(|c| *c == crop) {
            Some(index) => {
                self.crop_types.remove(index);
            }
            None => self.crop_types.push(crop),
        }
    }

    pub fn attach(&mut self, slot: AttachmentSlot, attachment: Option<Attachment>) {
        match slot {
            AttachmentSlot::FarmPhoto => self.farm_photo = attachment,
            AttachmentSlot::IdentityProof => self.identity_proof = attachment,
        }
    }

    // ========== Transitions ==========

    /// Switch role, returning to step 1 with no errors. Field values are kept.
    pub fn select_role(&mut self, role: Role) -> Result<(), RegistrationError> {
        self.ensure_idle()?;
        self.state = FormState::initial(role);
        self.errors.clear();
        Ok(())
    }

    /// Validate the account step and move to farm details.
    pub fn advance(&mut self) -> Result<(), RegistrationError> {
        self.ensure_idle()?;
        if self.state != FormState::FarmerStep1 {
            return Err(self.not_allowed(Action::Advance));
        }

        self.errors = RuleSet::Account.check(&self.fields);
        if !self.errors.is_empty() {
            return Err(RegistrationError::Invalid(self.errors.clone()));
        }
        self.state = FormState::FarmerStep2;
        Ok(())
    }

    /// Back to the account step without validating. Farm-step messages are
    /// dropped since their inputs are no longer shown.
    pub fn retreat(&mut self) -> Result<(), RegistrationError> {
        self.ensure_idle()?;
        if self.state != FormState::FarmerStep2 {
            return Err(self.not_allowed(Action::Retreat));
        }
        self.errors.clear_fields(&Field::FARM);
        self.state = FormState::FarmerStep1;
        Ok(())
    }

    /// Validate for submission and mark the form in flight.
    ///
    /// On success the returned request must be passed to the sink and the
    /// outcome handed to [`finish_submit`](Self::finish_submit).
    pub fn begin_submit(&mut self) -> Result<RegistrationRequest, RegistrationError> {
        self.ensure_idle()?;
        let rules = self
            .state
            .submit_rules()
            .ok_or_else(|| self.not_allowed(Action::Submit))?;

        self.errors = rules.check(&self.fields);
        if !self.errors.is_empty() {
            return Err(RegistrationError::Invalid(self.errors.clone()));
        }

        self.in_flight = true;
        Ok(RegistrationRequest {
            fields: self.fields.clone(),
            crop_types: self.crop_types.clone(),
            farm_photo: self.farm_photo.clone(),
            identity_proof: self.identity_proof.clone(),
            role: self.role(),
        })
    }

    /// Settle a submission started by [`begin_submit`](Self::begin_submit).
    ///
    /// Success completes the form and yields the OTP route for the submitted
    /// email. Failure sets the form banner; step and fields stay as they were.
    pub fn finish_submit(
        &mut self,
        result: Result<AuthResponse, AuthError>,
    ) -> Result<Route, RegistrationError> {
        if !self.in_flight {
            return Err(RegistrationError::NotInFlight);
        }
        self.in_flight = false;
        match result {
            Ok(response) => {
                log::info!(
                    "registered {} as {} (id {})",
                    response.user.email,
                    self.role(),
                    response.user.id
                );
                self.completed = true;
                Ok(Route::OtpVerify {
                    email: Some(self.fields.email.clone()),
                })
            }
            Err(e) => {
                log::warn!("registration failed: {}", e);
                self.errors.set_form(REGISTRATION_FAILED);
                Err(RegistrationError::Sink(e))
            }
        }
    }

    /// Validate, call the sink, and navigate to OTP verification on success.
    pub async fn submit<S: AuthSink>(
        &mut self,
        sink: &S,
        navigator: &dyn Navigator,
    ) -> Result<(), RegistrationError> {
        let request = self.begin_submit()?;
        let result = sink.register(&request).await;
        let route = self.finish_submit(result)?;
        navigator.navigate(route);
        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), RegistrationError> {
        if self.completed {
            return Err(RegistrationError::Completed);
        }
        if self.in_flight {
            return Err(RegistrationError::InFlight);
        }
        Ok(())
    }

    fn not_allowed(&self, action: Action) -> RegistrationError {
        RegistrationError::NotAllowed {
            from: self.state,
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::rules::{EMAIL_INVALID, PASSWORD_WEAK, PHONE_INVALID};

    fn fill_account(form: &mut RegistrationForm) {
        form.set_field(Field::Username, "sita");
        form.set_field(Field::Email, "sita@example.com");
        form.set_field(Field::Password, "Passw0rd!");
        form.set_field(Field::ConfirmPassword, "Passw0rd!");
    }

    fn fill_farm(form: &mut RegistrationForm) {
        form.set_field(Field::FarmName, "Green Acres");
        form.set_field(Field::Location, "Chitwan");
        form.set_field(Field::FarmAddress, "Ward 4, Bharatpur");
        form.set_field(Field::PhoneNumber, "9812345678");
    }

    fn ok_response() -> AuthResponse {
        AuthResponse {
            token: "t".into(),
            user: crate::auth::User {
                id: "2".into(),
                username: "sita".into(),
                email: "sita@example.com".into(),
                role: Role::User,
                phone_number: None,
                location: None,
            },
        }
    }

    #[test]
    fn test_initial_state() {
        let form = RegistrationForm::new();
        assert_eq!(form.state(), FormState::UserStep1);
        assert_eq!(form.role(), Role::User);
        assert_eq!(form.step(), 1);
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_advance_then_retreat_keeps_values() {
        let mut form = RegistrationForm::new();
        form.select_role(Role::Farmer).unwrap();
        fill_account(&mut form);

        form.advance().unwrap();
        assert_eq!(form.state(), FormState::FarmerStep2);

        form.set_field(Field::FarmName, "Green Acres");
        form.retreat().unwrap();
        assert_eq!(form.state(), FormState::FarmerStep1);
        assert_eq!(form.value(Field::Username), "sita");
        assert_eq!(form.value(Field::FarmName), "Green Acres");
    }

    #[test]
    fn test_advance_rejects_bad_account() {
        let mut form = RegistrationForm::new();
        form.select_role(Role::Farmer).unwrap();
        form.set_field(Field::Username, "sita");
        form.set_field(Field::Email, "bad-email");
        form.set_field(Field::Password, "abc123");
        form.set_field(Field::ConfirmPassword, "abc123");

        let err = form.advance().unwrap_err();
        assert!(matches!(err, RegistrationError::Invalid(_)));
        assert_eq!(form.state(), FormState::FarmerStep1);
        assert_eq!(form.error(Field::Email), Some(EMAIL_INVALID));
        assert_eq!(form.error(Field::Password), Some(PASSWORD_WEAK));
        assert_eq!(form.errors().len(), 2);
    }

    #[test]
    fn test_transitions_outside_their_state() {
        let mut form = RegistrationForm::new();
        assert!(matches!(
            form.advance(),
            Err(RegistrationError::NotAllowed { from: FormState::UserStep1, action: Action::Advance })
        ));
        assert!(matches!(form.retreat(), Err(RegistrationError::NotAllowed { .. })));

        form.select_role(Role::Farmer).unwrap();
        assert!(matches!(
            form.begin_submit(),
            Err(RegistrationError::NotAllowed { from: FormState::FarmerStep1, action: Action::Submit })
        ));
    }

    #[test]
    fn test_select_role_is_idempotent() {
        let mut form = RegistrationForm::new();
        form.begin_submit().unwrap_err();
        assert!(!form.errors().is_empty());

        form.select_role(Role::User).unwrap();
        let once = (form.state(), form.errors().clone());
        form.select_role(Role::User).unwrap();
        assert_eq!((form.state(), form.errors().clone()), once);
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_select_role_resets_step() {
        let mut form = RegistrationForm::new();
        form.select_role(Role::Farmer).unwrap();
        fill_account(&mut form);
        form.advance().unwrap();

        form.select_role(Role::Farmer).unwrap();
        assert_eq!(form.state(), FormState::FarmerStep1);
    }

    #[test]
    fn test_editing_clears_field_error() {
        let mut form = RegistrationForm::new();
        form.begin_submit().unwrap_err();
        assert!(form.error(Field::Email).is_some());

        form.set_field(Field::Email, "s");
        assert_eq!(form.error(Field::Email), None);
        assert!(form.error(Field::Username).is_some());
    }

    #[test]
    fn test_farmer_submit_uses_farm_rules_only() {
        let mut form = RegistrationForm::new();
        form.select_role(Role::Farmer).unwrap();
        fill_account(&mut form);
        form.advance().unwrap();

        // Break an account field after advancing: the farm rules do not look at it
        form.set_field(Field::Email, "nope");
        fill_farm(&mut form);
        form.set_field(Field::PhoneNumber, "12345");

        form.begin_submit().unwrap_err();
        assert_eq!(form.error(Field::PhoneNumber), Some(PHONE_INVALID));
        assert_eq!(form.error(Field::Email), None);

        form.set_field(Field::PhoneNumber, "9812345678");
        let request = form.begin_submit().unwrap();
        assert_eq!(request.role, Role::Farmer);
        assert_eq!(request.fields.farm_name, "Green Acres");
    }

    #[test]
    fn test_in_flight_guard() {
        let mut form = RegistrationForm::new();
        fill_account(&mut form);
        form.begin_submit().unwrap();

        assert!(form.is_in_flight());
        assert!(matches!(form.begin_submit(), Err(RegistrationError::InFlight)));
        assert!(matches!(form.select_role(Role::Farmer), Err(RegistrationError::InFlight)));
    }

    #[test]
    fn test_sink_failure_sets_banner_only() {
        let mut form = RegistrationForm::new();
        form.select_role(Role::Farmer).unwrap();
        fill_account(&mut form);
        form.advance().unwrap();
        fill_farm(&mut form);
        form.begin_submit().unwrap();

        let err = form
            .finish_submit(Err(AuthError::Network("down".into())))
            .unwrap_err();
        assert_eq!(err.to_string(), REGISTRATION_FAILED);
        assert_eq!(form.errors().form(), Some(REGISTRATION_FAILED));
        assert_eq!(form.state(), FormState::FarmerStep2);
        assert_eq!(form.value(Field::FarmName), "Green Acres");
        assert!(!form.is_in_flight());

        // Retry clears the banner
        form.begin_submit().unwrap();
        assert_eq!(form.errors().form(), None);
    }

    #[test]
    fn test_success_completes_form() {
        let mut form = RegistrationForm::new();
        fill_account(&mut form);
        form.begin_submit().unwrap();

        let route = form.finish_submit(Ok(ok_response())).unwrap();
        assert_eq!(
            route,
            Route::OtpVerify {
                email: Some("sita@example.com".into())
            }
        );
        assert!(form.is_completed());
        assert!(matches!(form.begin_submit(), Err(RegistrationError::Completed)));
    }

    #[test]
    fn test_finish_without_begin_is_rejected() {
        let mut form = RegistrationForm::new();
        let err = form.finish_submit(Ok(ok_response())).unwrap_err();

        assert!(matches!(err, RegistrationError::NotInFlight));
        assert!(!form.is_completed());
        assert_eq!(form.state(), FormState::UserStep1);
        assert!(form.errors().is_empty());

        // A settled submission cannot be settled twice
        fill_account(&mut form);
        form.begin_submit().unwrap();
        form.finish_submit(Err(AuthError::Network("down".into()))).unwrap_err();
        assert!(matches!(
            form.finish_submit(Ok(ok_response())),
            Err(RegistrationError::NotInFlight)
        ));
        assert!(!form.is_completed());
    }

    #[test]
    fn test_crop_toggle_and_request_json() {
        let mut form = RegistrationForm::new();
        form.toggle_crop(CropType::Fruits);
        form.toggle_crop(CropType::Grain);
        form.toggle_crop(CropType::Fruits);
        assert_eq!(form.crop_types(), &[CropType::Grain]);

        form.attach(AttachmentSlot::FarmPhoto, Some(Attachment::from_path("farm.png")));
        fill_account(&mut form);
        let request = form.begin_submit().unwrap();

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["username"], "sita");
        assert_eq!(json["role"], "USER");
        assert_eq!(json["cropTypes"], serde_json::json!(["Grain"]));
        assert_eq!(json["farmPhoto"]["fileName"], "farm.png");
        assert!(json["identityProof"].is_null());
    }
}
