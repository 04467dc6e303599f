//! Field rule sets for the two registration steps.
//!
//! A rule set checks every field it owns on each call and reports all
//! failures together.

use super::fields::{Field, FieldErrors, FormFields};

pub const USERNAME_REQUIRED: &str = "Username is required";
pub const EMAIL_INVALID: &str = "Invalid email address";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const PASSWORD_WEAK: &str = "Password must be 6+ chars with 1 special character";
pub const PASSWORDS_DIFFER: &str = "Passwords do not match";
pub const FARM_NAME_REQUIRED: &str = "Farm Name is required";
pub const LOCATION_REQUIRED: &str = "Location is required";
pub const ADDRESS_REQUIRED: &str = "Address is required";
pub const PHONE_INVALID: &str = "Phone number must be 10 digits";

/// Characters a password must include at least one of.
const PASSWORD_SPECIALS: &[char] = &['!', '@', '#', '$', '%', '^', '&', '*'];
const PASSWORD_MIN_LEN: usize = 6;
const PHONE_LEN: usize = 10;

/// Which group of fields to check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSet {
    /// Username, email, password and confirmation.
    Account,
    /// Farm name, location, address and phone.
    Farm,
}

impl RuleSet {
    pub fn fields(&self) -> &'static [Field] {
        match self {
            RuleSet::Account => &Field::ACCOUNT,
            RuleSet::Farm => &Field::FARM,
        }
    }

    /// Run every rule in the set.
    pub fn check(&self, fields: &FormFields) -> FieldErrors {
        let mut errors = FieldErrors::new();
        match self {
            RuleSet::Account => {
                if fields.username.trim().is_empty() {
                    errors.insert(Field::Username, USERNAME_REQUIRED);
                }
                if !is_valid_email(&fields.email) {
                    errors.insert(Field::Email, EMAIL_INVALID);
                }
                if fields.password.is_empty() {
                    errors.insert(Field::Password, PASSWORD_REQUIRED);
                } else if !is_valid_password(&fields.password) {
                    errors.insert(Field::Password, PASSWORD_WEAK);
                }
                if fields.password != fields.confirm_password {
                    errors.insert(Field::ConfirmPassword, PASSWORDS_DIFFER);
                }
            }
            RuleSet::Farm => {
                if fields.farm_name.trim().is_empty() {
                    errors.insert(Field::FarmName, FARM_NAME_REQUIRED);
                }
                if fields.location.is_empty() {
                    errors.insert(Field::Location, LOCATION_REQUIRED);
                }
                if fields.farm_address.trim().is_empty() {
                    errors.insert(Field::FarmAddress, ADDRESS_REQUIRED);
                }
                if !is_valid_phone(&fields.phone_number) {
                    errors.insert(Field::PhoneNumber, PHONE_INVALID);
                }
            }
        }
        errors
    }
}

/// `local@domain.tld` where no part is empty or contains whitespace or `@`.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let clean = |s: &str| !s.is_empty() && !s.contains(|c: char| c.is_whitespace() || c == '@');
    if !clean(local) || !clean(domain) {
        return false;
    }
    // Needs a dot with something on both sides
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// At least six characters from letters, digits and `!@#$%^&*`, with at
/// least one of the specials.
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= PASSWORD_MIN_LEN
        && password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(&c))
        && password.contains(PASSWORD_SPECIALS)
}

/// Exactly ten ASCII digits.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == PHONE_LEN && phone.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(username: &str, email: &str, password: &str, confirm: &str) -> FormFields {
        FormFields {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_email() {
        assert!(is_valid_email("sita@example.com"));
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("a@b.c.d"));
        assert!(!is_valid_email("bad-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("@b.c"));
        assert!(!is_valid_email("a@@b.c"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_password() {
        assert!(is_valid_password("Passw0rd!"));
        assert!(is_valid_password("abcde&"));
        assert!(!is_valid_password("abc123"));
        assert!(!is_valid_password("ab!1"));
        assert!(!is_valid_password("pass word!"));
        assert!(!is_valid_password("pässwd!"));
    }

    #[test]
    fn test_phone() {
        assert!(is_valid_phone("9800000000"));
        assert!(!is_valid_phone("980000000"));
        assert!(!is_valid_phone("98000000000"));
        assert!(!is_valid_phone("98000-0000"));
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn test_account_rules_are_exhaustive() {
        let errors = RuleSet::Account.check(&account("", "bad-email", "abc123", "abc123"));
        assert_eq!(errors.get(Field::Username), Some(USERNAME_REQUIRED));
        assert_eq!(errors.get(Field::Email), Some(EMAIL_INVALID));
        assert_eq!(errors.get(Field::Password), Some(PASSWORD_WEAK));
        assert_eq!(errors.get(Field::ConfirmPassword), None);
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_empty_password_and_mismatch() {
        let errors = RuleSet::Account.check(&account("sita", "sita@example.com", "", "x"));
        assert_eq!(errors.get(Field::Password), Some(PASSWORD_REQUIRED));
        assert_eq!(errors.get(Field::ConfirmPassword), Some(PASSWORDS_DIFFER));
    }

    #[test]
    fn test_whitespace_username_is_empty() {
        let errors = RuleSet::Account.check(&account("   ", "sita@example.com", "Passw0rd!", "Passw0rd!"));
        assert_eq!(errors.iter().collect::<Vec<_>>(), vec![(Field::Username, USERNAME_REQUIRED)]);
    }

    #[test]
    fn test_farm_rules() {
        let empty = RuleSet::Farm.check(&FormFields::default());
        assert_eq!(empty.len(), 4);
        assert_eq!(empty.get(Field::Location), Some(LOCATION_REQUIRED));

        let fields = FormFields {
            farm_name: "Green Acres".into(),
            location: "Chitwan".into(),
            farm_address: "Ward 4, Bharatpur".into(),
            phone_number: "9812345678".into(),
            ..Default::default()
        };
        assert!(RuleSet::Farm.check(&fields).is_empty());
    }

    #[test]
    fn test_farm_rules_ignore_account_fields() {
        let fields = FormFields {
            farm_name: "F".into(),
            location: "Jhapa".into(),
            farm_address: "A".into(),
            phone_number: "0123456789".into(),
            ..Default::default()
        };
        // Account fields are empty but the farm set never looks at them
        assert!(RuleSet::Farm.check(&fields).is_empty());
    }
}
