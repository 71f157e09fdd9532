//! String content validators
//!
//! Presence, digit-only and pattern checks over a raw field value.

use crate::foundation::ValidationError;

// ============================================================================
// NOT EMPTY
// ============================================================================

crate::validator! {
    /// Validates that a string has at least one character.
    pub NotEmpty for str;
    rule(input) { !input.is_empty() }
    error(input) { ValidationError::new("required", "value must not be empty") }
    fn not_empty();
}

// ============================================================================
// DIGITS
// ============================================================================

crate::validator! {
    /// Validates that a string is a non-empty run of ASCII digits.
    ///
    /// Gates numeric attribute parsing: `min="3"` is a bound, `min="3.5"` or
    /// `min="-1"` is treated as absent.
    pub Digits for str;
    rule(input) { !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit()) }
    error(input) { ValidationError::new("digits", "value must contain only digits") }
    fn digits();
}

// ============================================================================
// PATTERN
// ============================================================================

crate::validator! {
    /// Validates that a string matches a regular expression.
    ///
    /// The pattern is used as written; no `^`/`$` anchoring is added.
    pub Pattern { regex: regex::Regex } for str;
    rule(self, input) { self.regex.is_match(input) }
    error(self, input) {
        ValidationError::new("regExp", "value does not match the requested format")
            .with_param("pattern", self.regex.as_str().to_string())
    }
    new(pattern: &str) -> regex::Error {
        Ok(Self {
            regex: regex::Regex::new(pattern)?,
        })
    }
    fn matches_pattern(pattern: &str) -> regex::Error;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Validate;

    #[test]
    fn test_not_empty() {
        assert!(not_empty().is_valid("a"));
        assert!(not_empty().is_valid(" "));
        assert!(!not_empty().is_valid(""));
    }

    #[test]
    fn test_digits() {
        let validator = digits();
        assert!(validator.is_valid("0"));
        assert!(validator.is_valid("0123456789"));
        assert!(!validator.is_valid(""));
        assert!(!validator.is_valid("-1"));
        assert!(!validator.is_valid("3.5"));
        assert!(!validator.is_valid("١٢")); // non-ASCII digits
    }

    #[test]
    fn test_pattern_is_not_anchored() {
        let validator = matches_pattern(r"\d{3}").unwrap();
        assert!(validator.is_valid("abc123def"));
        assert!(!validator.is_valid("12"));

        let anchored = matches_pattern(r"^\d{3}$").unwrap();
        assert!(anchored.is_valid("123"));
        assert!(!anchored.is_valid("abc123def"));
    }

    #[test]
    fn test_malformed_pattern_is_rejected_at_construction() {
        assert!(matches_pattern("([a-z").is_err());
    }

    #[test]
    fn test_pattern_error_carries_pattern() {
        let validator = matches_pattern("^x$").unwrap();
        let err = validator.validate("y").unwrap_err();
        assert_eq!(err.code, "regExp");
        assert_eq!(err.param("pattern"), Some("^x$"));
    }
}
