//! Field-level validation shared by the Vocab, Fixit and Audit paths.
//!
//! Lengths are measured in Unicode scalar values, not bytes.

use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

use crate::domain::DomainError;

/// Validation failures for a single field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldValidationError {
    /// The value is longer than the field allows.
    #[error("{field} must be shorter than {max} characters")]
    TooLong { field: &'static str, max: usize },
    /// The value looks like markup or a script fragment.
    #[error("{field} contains invalid characters")]
    InvalidCharacters { field: &'static str },
    /// A required value was empty.
    #[error("{field} field is required")]
    Required { field: &'static str },
    /// The value is not a two-letter lowercase language code.
    #[error("{field} must consist of two lowercase letters")]
    InvalidLanguageCode { field: &'static str },
    /// A numeric value fell below its floor.
    #[error("{field} must be at least {min}")]
    BelowMinimum { field: &'static str, min: i32 },
}

impl From<FieldValidationError> for DomainError {
    fn from(value: FieldValidationError) -> Self {
        DomainError::invalid_request(value.to_string())
    }
}

static LANGUAGE_CODE_RE: OnceLock<Regex> = OnceLock::new();

fn language_code_regex() -> &'static Regex {
    LANGUAGE_CODE_RE.get_or_init(|| {
        Regex::new("^[a-z]{2}$")
            .unwrap_or_else(|error| panic!("language code regex failed to compile: {error}"))
    })
}

/// Check a free-text field against its maximum length and the markup filter.
///
/// # Examples
/// ```
/// use verdure_admin::domain::validation::{validate_field_content, FieldValidationError};
///
/// assert!(validate_field_content("perro", "learning_lang", 40).is_ok());
/// assert_eq!(
///     validate_field_content("<a href=\"/\">", "hint", 255),
///     Err(FieldValidationError::InvalidCharacters { field: "hint" }),
/// );
/// ```
pub fn validate_field_content(
    value: &str,
    field: &'static str,
    max: usize,
) -> Result<(), FieldValidationError> {
    if value.chars().count() > max {
        return Err(FieldValidationError::TooLong { field, max });
    }

    let has_angle = value.contains(['<', '>']);
    let has_quote_or_slash = value.contains(['"', '/']);
    if has_angle && has_quote_or_slash {
        warn!(field, "rejected field content with markup characters");
        return Err(FieldValidationError::InvalidCharacters { field });
    }

    Ok(())
}

/// Reject empty values for required fields.
pub fn require_non_empty(value: &str, field: &'static str) -> Result<(), FieldValidationError> {
    if value.is_empty() {
        return Err(FieldValidationError::Required { field });
    }
    Ok(())
}

/// Accept exactly two lowercase ASCII letters.
pub fn validate_language_code(
    value: &str,
    field: &'static str,
) -> Result<(), FieldValidationError> {
    if language_code_regex().is_match(value) {
        Ok(())
    } else {
        Err(FieldValidationError::InvalidLanguageCode { field })
    }
}

/// Enforce a lower bound on an integer field.
pub fn validate_minimum(
    value: i32,
    field: &'static str,
    min: i32,
) -> Result<(), FieldValidationError> {
    if value < min {
        return Err(FieldValidationError::BelowMinimum { field, min });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", 0)]
    #[case("abc", 3)]
    #[case("ñandú", 5)]
    fn values_at_the_limit_pass(#[case] value: &str, #[case] max: usize) {
        assert!(validate_field_content(value, "hint", max).is_ok());
    }

    #[rstest]
    fn length_counts_characters_not_bytes() {
        let value = "é".repeat(40);
        assert!(validate_field_content(&value, "learning_lang", 40).is_ok());
        let value = "é".repeat(41);
        assert_eq!(
            validate_field_content(&value, "learning_lang", 40),
            Err(FieldValidationError::TooLong {
                field: "learning_lang",
                max: 40
            })
        );
    }

    #[rstest]
    fn too_long_message_names_field_and_limit() {
        let value = "x".repeat(1001);
        let err = validate_field_content(&value, "comments", 1000).expect_err("too long");
        assert_eq!(err.to_string(), "comments must be shorter than 1000 characters");
    }

    #[rstest]
    #[case("<script>alert(\"x\")</script>")]
    #[case("<a href=/evil>")]
    fn markup_is_rejected(#[case] value: &str) {
        let err = validate_field_content(value, "hint", 255).expect_err("markup");
        assert_eq!(err.to_string(), "hint contains invalid characters");
    }

    #[rstest]
    #[case("a < b")]
    #[case("either/or")]
    #[case("say \"hola\"")]
    fn lone_special_characters_are_allowed(#[case] value: &str) {
        assert!(validate_field_content(value, "hint", 255).is_ok());
    }

    #[rstest]
    #[case("es", true)]
    #[case("en", true)]
    #[case("ES", false)]
    #[case("esp", false)]
    #[case("e", false)]
    #[case("", false)]
    fn language_codes_are_two_lowercase_letters(#[case] code: &str, #[case] valid: bool) {
        assert_eq!(
            validate_language_code(code, "learning_lang_code").is_ok(),
            valid
        );
    }

    #[rstest]
    fn required_fields_reject_empty_values() {
        let err = require_non_empty("", "learning_lang").expect_err("required");
        assert_eq!(err.to_string(), "learning_lang field is required");
    }

    #[rstest]
    fn converts_to_invalid_request() {
        let err: DomainError = FieldValidationError::Required { field: "learning_lang" }.into();
        assert_eq!(err.code(), crate::domain::ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "learning_lang field is required");
    }

    #[rstest]
    fn minimum_is_inclusive() {
        assert!(validate_minimum(1, "num_learning_words", 1).is_ok());
        assert!(validate_minimum(0, "num_learning_words", 1).is_err());
    }
}
