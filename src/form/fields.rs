//! Registration field values, tags, attachments and the error map.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// A text field on the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Username,
    Email,
    Password,
    ConfirmPassword,
    FarmName,
    Location,
    FarmAddress,
    PhoneNumber,
}

impl Field {
    /// Fields on the account step.
    pub const ACCOUNT: [Field; 4] = [
        Field::Username,
        Field::Email,
        Field::Password,
        Field::ConfirmPassword,
    ];

    /// Fields on the farm details step.
    pub const FARM: [Field; 4] = [
        Field::FarmName,
        Field::Location,
        Field::FarmAddress,
        Field::PhoneNumber,
    ];

    /// Wire name of the field.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
            Field::FarmName => "farmName",
            Field::Location => "location",
            Field::FarmAddress => "farmAddress",
            Field::PhoneNumber => "phoneNumber",
        }
    }

    /// Placeholder shown in an empty input.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Username => "Username",
            Field::Email => "Email address",
            Field::Password => "Password",
            Field::ConfirmPassword => "Confirm Password",
            Field::FarmName => "Farm Name",
            Field::Location => "Select District",
            Field::FarmAddress => "Complete farm address",
            Field::PhoneNumber => "Phone Number (10 digits)",
        }
    }

    /// Whether the input should mask its contents.
    pub fn is_secret(&self) -> bool {
        matches!(self, Field::Password | Field::ConfirmPassword)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every text value the registration form collects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFields {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub farm_name: String,
    pub location: String,
    pub farm_address: String,
    pub phone_number: String,
}

impl FormFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Username => &self.username,
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
            Field::FarmName => &self.farm_name,
            Field::Location => &self.location,
            Field::FarmAddress => &self.farm_address,
            Field::PhoneNumber => &self.phone_number,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Username => &mut self.username,
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
            Field::FarmName => &mut self.farm_name,
            Field::Location => &mut self.location,
            Field::FarmAddress => &mut self.farm_address,
            Field::PhoneNumber => &mut self.phone_number,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.get_mut(field) = value.into();
    }
}

/// What a farm grows. Selection is optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum CropType {
    Vegetables,
    Grain,
    Fruits,
    Pulses,
}

impl CropType {
    pub const ALL: [CropType; 4] = [
        CropType::Vegetables,
        CropType::Grain,
        CropType::Fruits,
        CropType::Pulses,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CropType::Vegetables => "Vegetables",
            CropType::Grain => "Grain",
            CropType::Fruits => "Fruits",
            CropType::Pulses => "Pulses",
        }
    }
}

/// Districts offered for the farm location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum District {
    Morang,
    Sunsari,
    Jhapa,
    Kathmandu,
    Lalitpur,
    Bhaktapur,
    Chitwan,
}

impl District {
    pub const ALL: [District; 7] = [
        District::Morang,
        District::Sunsari,
        District::Jhapa,
        District::Kathmandu,
        District::Lalitpur,
        District::Bhaktapur,
        District::Chitwan,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            District::Morang => "Morang",
            District::Sunsari => "Sunsari",
            District::Jhapa => "Jhapa",
            District::Kathmandu => "Kathmandu",
            District::Lalitpur => "Lalitpur",
            District::Bhaktapur => "Bhaktapur",
            District::Chitwan => "Chitwan",
        }
    }

    pub fn from_name(name: &str) -> Option<District> {
        District::ALL.into_iter().find(|d| d.name() == name)
    }
}

/// Upload slots on the farm details step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentSlot {
    FarmPhoto,
    IdentityProof,
}

impl AttachmentSlot {
    pub const ALL: [AttachmentSlot; 2] = [AttachmentSlot::FarmPhoto, AttachmentSlot::IdentityProof];

    pub fn label(&self) -> &'static str {
        match self {
            AttachmentSlot::FarmPhoto => "Farm Photo",
            AttachmentSlot::IdentityProof => "Identity Proof",
        }
    }
}

/// A file picked for an attachment slot. Only the name goes over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub file_name: String,
    #[serde(skip)]
    pub path: PathBuf,
}

impl Attachment {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { file_name, path }
    }
}

/// Per-field validation messages plus one optional form-level banner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    fields: BTreeMap<Field, &'static str>,
    form: Option<String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.fields.get(&field).copied()
    }

    pub fn insert(&mut self, field: Field, message: &'static str) {
        self.fields.insert(field, message);
    }

    pub fn remove(&mut self, field: Field) -> Option<&'static str> {
        self.fields.remove(&field)
    }

    /// Drop the messages for `fields`, leaving the rest.
    pub fn clear_fields(&mut self, fields: &[Field]) {
        self.fields.retain(|f, _| !fields.contains(f));
    }

    pub fn form(&self) -> Option<&str> {
        self.form.as_deref()
    }

    pub fn set_form(&mut self, message: impl Into<String>) {
        self.form = Some(message.into());
    }

    pub fn clear(&mut self) {
        self.fields.clear();
        self.form = None;
    }

    /// Number of messages, counting the form banner.
    pub fn len(&self) -> usize {
        self.fields.len() + usize::from(self.form.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.form.is_none()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.fields.iter().map(|(f, m)| (*f, *m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_serialize_camel_case() {
        let mut fields = FormFields::default();
        fields.set(Field::ConfirmPassword, "x!");
        fields.set(Field::PhoneNumber, "9800000000");
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json["confirmPassword"], "x!");
        assert_eq!(json["phoneNumber"], "9800000000");
        assert_eq!(json["farmName"], "");
    }

    #[test]
    fn test_get_set_cover_every_field() {
        let mut fields = FormFields::default();
        for field in Field::ACCOUNT.into_iter().chain(Field::FARM) {
            fields.set(field, field.name());
        }
        for field in Field::ACCOUNT.into_iter().chain(Field::FARM) {
            assert_eq!(fields.get(field), field.name());
        }
    }

    #[test]
    fn test_district_lookup() {
        assert_eq!(District::from_name("Jhapa"), Some(District::Jhapa));
        assert_eq!(District::from_name("jhapa"), None);
        assert_eq!(District::ALL.len(), 7);
    }

    #[test]
    fn test_attachment_from_path() {
        let a = Attachment::from_path("/tmp/photos/farm.jpg");
        assert_eq!(a.file_name, "farm.jpg");
        assert_eq!(serde_json::to_value(&a).unwrap(), serde_json::json!({ "fileName": "farm.jpg" }));
    }

    #[test]
    fn test_errors_len_counts_banner() {
        let mut errors = FieldErrors::new();
        errors.insert(Field::Email, "Invalid email address");
        errors.set_form("Registration failed. Please try again.");
        assert_eq!(errors.len(), 2);

        errors.clear_fields(&Field::ACCOUNT);
        assert_eq!(errors.len(), 1);
        errors.clear();
        assert!(errors.is_empty());
    }
}
