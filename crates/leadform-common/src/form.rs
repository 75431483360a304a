use serde::{Deserialize, Serialize};

/// One of the four controls on the lead form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Phone,
    Consent,
}

impl Field {
    /// Every field, in the order they are validated and reported.
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Phone, Field::Consent];
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::Email => write!(f, "email"),
            Field::Phone => write!(f, "phone"),
            Field::Consent => write!(f, "consent"),
        }
    }
}

/// Outcome of validating a single field value.
///
/// Built fresh on every call; a success always carries an empty message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValidationResult {
    pub valid: bool,
    pub message: String,
}

impl FieldValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

/// Live values of the form controls, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    /// Masked phone text as shown in the control.
    pub phone: String,
    pub consent: bool,
}

/// Normalized read of the form taken once per submit attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub phone_raw: String,
    pub accepted_policy: bool,
}
