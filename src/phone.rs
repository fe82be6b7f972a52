//! Phone number validation and normalization.
//!
//! The backend keys accounts on a bare 10-digit subscriber number, but
//! operators type whatever their address book shows: `+91 98765 43210`,
//! `0091-9876543210`, `09876543210`. Everything funnels through
//! [`normalize`] before a number is sent anywhere, so all of those reach
//! the wire as `9876543210`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;

/// Subscriber numbers are exactly this many digits on the wire.
pub const SUBSCRIBER_DIGITS: usize = 10;

/// Default acceptance pattern, matched against the digit-only form.
/// Permits an optional `91` country prefix (with up to two leading zeros)
/// ahead of a 10-digit subscriber number starting 6-9.
static DEFAULT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?:\+|0{0,2})91[\-\s]?)?[6-9]\d{9}$").expect("regex: default phone pattern")
});

/// Validation rules, built from `[phone]` config by
/// [`ConsoleConfig::phone_rules`](crate::config::ConsoleConfig::phone_rules).
#[derive(Debug, Clone)]
pub struct PhoneRules {
    /// Minimum digits after stripping formatting.
    pub min_digits: usize,
    /// Optional acceptance pattern; `None` disables the pattern check.
    pub pattern: Option<Regex>,
}

impl Default for PhoneRules {
    fn default() -> Self {
        Self {
            min_digits: SUBSCRIBER_DIGITS,
            pattern: Some(DEFAULT_PATTERN.clone()),
        }
    }
}

impl PhoneRules {
    /// Check a raw phone input against these rules.
    ///
    /// The digit count gate runs first so an obviously short entry reports
    /// as invalid rather than as a pattern mismatch.
    pub fn validate(&self, raw: &str) -> Result<(), ValidationError> {
        let digits = digits_of(raw);
        if digits.len() < self.min_digits {
            return Err(ValidationError::InvalidPhone);
        }
        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(&digits) {
                return Err(ValidationError::PhonePatternMismatch);
            }
        }
        Ok(())
    }
}

/// Strip every non-digit character.
pub fn digits_of(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Canonical wire form of a phone input.
///
/// Strips formatting, then drops any country prefix by keeping the last
/// [`SUBSCRIBER_DIGITS`] digits. Inputs at or under the subscriber length
/// pass through digit-stripped but otherwise unchanged.
pub fn normalize(raw: &str) -> String {
    let digits = digits_of(raw);
    if digits.len() > SUBSCRIBER_DIGITS {
        let cut = digits.len() - SUBSCRIBER_DIGITS;
        digits[cut..].to_string()
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_country_code_and_formatting() {
        assert_eq!(normalize("+91 98765 43210"), "9876543210");
        assert_eq!(normalize("0091-98765-43210"), "9876543210");
        assert_eq!(normalize("919876543210"), "9876543210");
        assert_eq!(normalize("09876543210"), "9876543210");
    }

    #[test]
    fn normalize_leaves_short_inputs_alone() {
        assert_eq!(normalize("9876543210"), "9876543210");
        assert_eq!(normalize("98765"), "98765");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn validate_rejects_short_numbers() {
        let rules = PhoneRules::default();
        assert_eq!(rules.validate("98765"), Err(ValidationError::InvalidPhone));
        assert_eq!(rules.validate(""), Err(ValidationError::InvalidPhone));
    }

    #[test]
    fn validate_accepts_formatted_input() {
        let rules = PhoneRules::default();
        assert_eq!(rules.validate("+91 98765 43210"), Ok(()));
        assert_eq!(rules.validate("9876543210"), Ok(()));
        assert_eq!(rules.validate("00919876543210"), Ok(()));
    }

    #[test]
    fn validate_flags_pattern_mismatch_separately() {
        let rules = PhoneRules::default();
        // 10 digits but starts with 1 — long enough, wrong shape.
        assert_eq!(
            rules.validate("1234567890"),
            Err(ValidationError::PhonePatternMismatch)
        );
    }

    #[test]
    fn validate_without_pattern_only_counts_digits() {
        let rules = PhoneRules {
            min_digits: 10,
            pattern: None,
        };
        assert_eq!(rules.validate("1234567890"), Ok(()));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Whatever formatting or country prefix surrounds it, a 10-digit
            /// subscriber number always survives normalization intact.
            #[test]
            fn normalize_keeps_last_ten_digits(
                prefix in proptest::string::string_regex("[0-9]{0,4}").unwrap(),
                subscriber in proptest::string::string_regex("[0-9]{10}").unwrap(),
                sep in proptest::string::string_regex("[ \\-+().]{0,3}").unwrap(),
            ) {
                let mixed = format!("{sep}{prefix}{sep}{subscriber}{sep}");
                prop_assert_eq!(normalize(&mixed), subscriber);
            }

            /// Normalizing twice is the same as normalizing once.
            #[test]
            fn normalize_is_idempotent(raw in ".{0,24}") {
                let once = normalize(&raw);
                prop_assert_eq!(normalize(&once), once.clone());
            }

            /// The output is never longer than the wire length and contains
            /// only ASCII digits.
            #[test]
            fn normalize_output_shape(raw in ".{0,40}") {
                let out = normalize(&raw);
                prop_assert!(out.len() <= SUBSCRIBER_DIGITS);
                prop_assert!(out.chars().all(|c| c.is_ascii_digit()));
            }
        }
    }
}
