//! Per-field validation rules for the lead form.
//!
//! Every rule is pure and total: it reads a raw control value and returns a fresh
//! [`FieldValidationResult`]. Messages are the Portuguese strings shown on the page.

use std::sync::LazyLock;

use regex::Regex;

use leadform_common::{Field, FieldValidationResult, FormValues};

use crate::phone::{MAX_LOCAL_DIGITS, PhoneMask, digits_only};

// Compile regexes once using LazyLock
// Both cases are spelled out: `(?i)` would fold `ſ` and the Kelvin sign onto ASCII letters.
static NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-ZáàâãéèêíïóôõöúçñÁÀÂÃÉÈÊÍÏÓÔÕÖÚÇÑ\s\x{FEFF}]+$").unwrap()
});

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Minimum trimmed length of the name field, in characters.
pub const MIN_NAME_CHARS: usize = 3;

pub const NAME_TOO_SHORT: &str = "Nome deve ter pelo menos 3 caracteres";
pub const NAME_INVALID_CHARS: &str = "Nome deve conter apenas letras";
pub const EMAIL_REQUIRED: &str = "E-mail é obrigatório";
pub const EMAIL_INVALID: &str = "E-mail inválido";
pub const PHONE_INCOMPLETE: &str = "Telefone incompleto";
pub const PHONE_TOO_LONG: &str = "Telefone com muitos dígitos";
pub const CONSENT_REQUIRED: &str = "Você deve aceitar a política de privacidade";

/// Strip surrounding whitespace, including the U+FEFF byte-order mark pasted text can carry.
pub fn trim_input(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/// Validates form fields against a configured country code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValidator {
    mask: PhoneMask,
}

impl FieldValidator {
    pub fn new(mask: PhoneMask) -> Self {
        Self { mask }
    }

    pub fn mask(&self) -> &PhoneMask {
        &self.mask
    }

    pub fn validate_name(&self, value: &str) -> FieldValidationResult {
        let trimmed = trim_input(value);

        if trimmed.chars().count() < MIN_NAME_CHARS {
            return FieldValidationResult::invalid(NAME_TOO_SHORT);
        }

        if !NAME_REGEX.is_match(trimmed) {
            return FieldValidationResult::invalid(NAME_INVALID_CHARS);
        }

        FieldValidationResult::ok()
    }

    pub fn validate_email(&self, value: &str) -> FieldValidationResult {
        let normalized = trim_input(value).to_lowercase();

        if normalized.is_empty() {
            return FieldValidationResult::invalid(EMAIL_REQUIRED);
        }

        if !EMAIL_REGEX.is_match(&normalized) {
            return FieldValidationResult::invalid(EMAIL_INVALID);
        }

        FieldValidationResult::ok()
    }

    /// Accepts country code + 10 (landline) or + 11 (mobile) digits.
    pub fn validate_phone(&self, value: &str) -> FieldValidationResult {
        let digits = digits_only(value);
        let country_code = self.mask.country_code();
        let max_digits = country_code.len() + MAX_LOCAL_DIGITS;

        if digits.len() < max_digits - 1 {
            return FieldValidationResult::invalid(PHONE_INCOMPLETE);
        }

        if digits.len() > max_digits {
            return FieldValidationResult::invalid(PHONE_TOO_LONG);
        }

        if !digits.starts_with(country_code) {
            return FieldValidationResult::invalid(format!(
                "Telefone deve começar com {}",
                self.mask.prefix()
            ));
        }

        FieldValidationResult::ok()
    }

    pub fn validate_consent(&self, accepted: bool) -> FieldValidationResult {
        if !accepted {
            return FieldValidationResult::invalid(CONSENT_REQUIRED);
        }
        FieldValidationResult::ok()
    }

    /// Validate the current value of `field`.
    pub fn validate_field(&self, field: Field, values: &FormValues) -> FieldValidationResult {
        match field {
            Field::Name => self.validate_name(&values.name),
            Field::Email => self.validate_email(&values.email),
            Field::Phone => self.validate_phone(&values.phone),
            Field::Consent => self.validate_consent(values.consent),
        }
    }

    /// Validate every field, without stopping at the first failure.
    pub fn validate_all(&self, values: &FormValues) -> Vec<(Field, FieldValidationResult)> {
        Field::ALL
            .iter()
            .map(|&field| (field, self.validate_field(field, values)))
            .collect()
    }
}

pub fn validate_name(value: &str) -> FieldValidationResult {
    FieldValidator::default().validate_name(value)
}

pub fn validate_email(value: &str) -> FieldValidationResult {
    FieldValidator::default().validate_email(value)
}

pub fn validate_phone(value: &str) -> FieldValidationResult {
    FieldValidator::default().validate_phone(value)
}

pub fn validate_consent(accepted: bool) -> FieldValidationResult {
    FieldValidator::default().validate_consent(accepted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_values() -> FormValues {
        FormValues {
            name: "Ana Souza".into(),
            email: "ana@example.com".into(),
            phone: "+55 (11) 98765-4321".into(),
            consent: true,
        }
    }

    // =========================================
    // Name
    // =========================================

    #[test]
    fn test_validate_name_accepts_letters() {
        assert!(validate_name("Ana").valid);
        assert!(validate_name("  João da Silva  ").valid);
        assert!(validate_name("MARIA CONCEIÇÃO").valid);
    }

    #[test]
    fn test_validate_name_too_short() {
        let result = validate_name("An");
        assert!(!result.valid);
        assert_eq!(result.message, NAME_TOO_SHORT);
        // Surrounding whitespace does not count towards the length.
        assert!(!validate_name("  An  ").valid);
    }

    #[test]
    fn test_validate_name_counts_characters_not_bytes() {
        assert!(validate_name("Zoé").valid);
        assert_eq!(validate_name("Ló").message, NAME_TOO_SHORT);
    }

    #[test]
    fn test_validate_name_rejects_digits_and_symbols() {
        let result = validate_name("Ana123");
        assert!(!result.valid);
        assert_eq!(result.message, NAME_INVALID_CHARS);
        assert!(!validate_name("Ana-Maria").valid);
        assert!(!validate_name("Ana!").valid);
    }

    #[test]
    fn test_validate_name_does_not_fold_lookalike_letters() {
        let long_s = validate_name("Joſé");
        assert!(!long_s.valid);
        assert_eq!(long_s.message, NAME_INVALID_CHARS);
        assert!(!validate_name("\u{212A}ai").valid);
        assert!(validate_name("MARIA CONCEIÇÃO").valid);
        assert!(validate_name("josé ÁLVARES").valid);
    }

    #[test]
    fn test_inputs_trim_byte_order_marks() {
        assert_eq!(trim_input("\u{FEFF} Ana\u{FEFF}\n"), "Ana");
        assert!(validate_name("\u{FEFF}Ana\u{FEFF}").valid);
        assert!(validate_email("\u{FEFF}ana@example.com").valid);
        assert_eq!(validate_name("\u{FEFF}An\u{FEFF}").message, NAME_TOO_SHORT);
    }

    // =========================================
    // Email
    // =========================================

    #[test]
    fn test_validate_email_accepts_common_shapes() {
        assert!(validate_email("user@example.com").valid);
        assert!(validate_email("  User.Name+tag@Sub.Example.com.br ").valid);
    }

    #[test]
    fn test_validate_email_empty_is_required() {
        let result = validate_email("");
        assert!(!result.valid);
        assert!(result.message.contains("obrigatório"));
        assert_eq!(validate_email("   ").message, EMAIL_REQUIRED);
    }

    #[test]
    fn test_validate_email_rejects_malformed() {
        for bad in ["user@@x", "user@example", "user example@x.com", "@x.com", "user@.", "user@x."] {
            let result = validate_email(bad);
            assert!(!result.valid, "{:?} should be invalid", bad);
            assert_eq!(result.message, EMAIL_INVALID);
        }
    }

    // =========================================
    // Phone
    // =========================================

    #[test]
    fn test_validate_phone_accepts_mobile_and_landline() {
        assert!(validate_phone("5511987654321").valid);
        assert!(validate_phone("+55 (11) 98765-4321").valid);
        assert!(validate_phone("+55 (21) 3456-7890").valid);
        assert!(validate_phone("551198765432").valid);
    }

    #[test]
    fn test_validate_phone_incomplete() {
        let result = validate_phone("+55 (11) 9876-543");
        assert!(!result.valid);
        assert_eq!(result.message, PHONE_INCOMPLETE);
        assert_eq!(validate_phone("").message, PHONE_INCOMPLETE);
    }

    #[test]
    fn test_validate_phone_too_many_digits() {
        let result = validate_phone("55119876543210");
        assert!(!result.valid);
        assert_eq!(result.message, PHONE_TOO_LONG);
    }

    #[test]
    fn test_validate_phone_wrong_country_code() {
        let result = validate_phone("4411987654321");
        assert!(!result.valid);
        assert_eq!(result.message, "Telefone deve começar com +55");
    }

    #[test]
    fn test_validate_phone_with_custom_country_code() {
        let validator = FieldValidator::new(PhoneMask::new("351"));
        assert!(validator.validate_phone("35121987654321").valid);
        assert!(validator.validate_phone("3512198765432").valid);
        assert_eq!(
            validator.validate_phone("55119876543210").message,
            "Telefone deve começar com +351"
        );
    }

    // =========================================
    // Consent and dispatch
    // =========================================

    #[test]
    fn test_validate_consent() {
        assert!(validate_consent(true).valid);
        let result = validate_consent(false);
        assert!(!result.valid);
        assert_eq!(result.message, CONSENT_REQUIRED);
    }

    #[test]
    fn test_validate_field_dispatches_by_field() {
        let validator = FieldValidator::default();
        let mut values = valid_values();
        values.email = "nope".into();

        assert!(validator.validate_field(Field::Name, &values).valid);
        assert_eq!(
            validator.validate_field(Field::Email, &values).message,
            EMAIL_INVALID
        );
    }

    #[test]
    fn test_validate_all_reports_every_failure() {
        let validator = FieldValidator::default();
        let values = FormValues {
            name: "A1".into(),
            email: String::new(),
            phone: "+55 ".into(),
            consent: false,
        };

        let results = validator.validate_all(&values);
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|(_, r)| !r.valid));
        let fields: Vec<_> = results.iter().map(|(f, _)| *f).collect();
        assert_eq!(fields, Field::ALL.to_vec());
    }

    #[test]
    fn test_validate_all_passes_valid_form() {
        let validator = FieldValidator::default();
        let results = validator.validate_all(&valid_values());
        assert!(results.iter().all(|(_, r)| r.valid && r.message.is_empty()));
    }
}
