//! Progressive phone-number mask.
//!
//! The mask renders `+CC (AA) PPPP-SSSS` for legacy ten-digit numbers and
//! `+CC (AA) PPPPP-SSSS` for eleven-digit mobile numbers, growing one digit at a
//! time so the text never jumps while the user types.

/// Country code assumed when none is configured.
pub const DEFAULT_COUNTRY_CODE: &str = "55";

/// Local digits (area code + subscriber number) kept after the country code.
pub const MAX_LOCAL_DIGITS: usize = 11;

const AREA_CODE_DIGITS: usize = 2;
const LEGACY_LOCAL_DIGITS: usize = 10;

/// Strip every character that is not an ASCII digit.
pub fn digits_only(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Mask `input` using the default country code.
pub fn apply_mask(input: &str) -> String {
    PhoneMask::default().apply(input)
}

/// Mask settings for a single country code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneMask {
    country_code: String,
}

impl Default for PhoneMask {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTRY_CODE)
    }
}

impl PhoneMask {
    /// Create a mask for `country_code`; non-digit characters are dropped.
    pub fn new(country_code: &str) -> Self {
        Self {
            country_code: digits_only(country_code),
        }
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// The `+CC` marker every masked value starts with.
    pub fn prefix(&self) -> String {
        format!("+{}", self.country_code)
    }

    /// Value the phone control is seeded with before the user types.
    pub fn initial_value(&self) -> String {
        format!("{} ", self.prefix())
    }

    /// Normalize `input` to digits and render the progressive mask.
    pub fn apply(&self, input: &str) -> String {
        let mut digits = digits_only(input);
        if !digits.starts_with(&self.country_code) {
            digits.insert_str(0, &self.country_code);
        }

        let local: String = digits[self.country_code.len()..]
            .chars()
            .take(MAX_LOCAL_DIGITS)
            .collect();

        let mut formatted = self.prefix();
        if local.is_empty() {
            return formatted;
        }

        formatted.push_str(" (");
        formatted.push_str(&local[..local.len().min(AREA_CODE_DIGITS)]);
        if local.len() <= AREA_CODE_DIGITS {
            return formatted;
        }

        formatted.push_str(") ");
        let subscriber = &local[AREA_CODE_DIGITS..];
        match local.len() {
            n if n <= 6 => formatted.push_str(subscriber),
            n if n <= LEGACY_LOCAL_DIGITS => {
                formatted.push_str(&subscriber[..4]);
                formatted.push('-');
                formatted.push_str(&subscriber[4..]);
            }
            _ => {
                formatted.push_str(&subscriber[..5]);
                formatted.push('-');
                formatted.push_str(&subscriber[5..]);
            }
        }
        formatted
    }

    /// Whether a backspace at `cursor` would eat into the protected `+CC ` prefix.
    pub fn blocks_backspace(&self, cursor: usize) -> bool {
        cursor <= self.initial_value().len()
    }

    /// Caret position after re-masking, shifted by the length the mask added or removed.
    pub fn cursor_after_mask(&self, cursor: usize, old_len: usize, new_len: usize) -> usize {
        if new_len >= old_len {
            cursor + (new_len - old_len)
        } else {
            cursor.saturating_sub(old_len - new_len)
        }
    }
}
