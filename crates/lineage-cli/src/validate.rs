//! Request-layer input validation.
//!
//! The core assumes well-formed identifiers and dates; this module is the
//! boundary that guarantees it. Every failure here carries the
//! `VALIDATION_ERROR` code, distinct from the core's domain rejections.

use chrono::NaiveDate;

use crate::output::CliError;

pub const MAX_NAME_LEN: usize = 200;

const VALIDATION_ERROR: &str = "VALIDATION_ERROR";

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: &'static str,
    pub value: String,
    pub reason: String,
    pub suggestion: String,
}

impl ValidationError {
    fn new(
        field: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            field,
            value: value.into(),
            reason: reason.into(),
            suggestion: suggestion.into(),
        }
    }

    pub fn to_cli_error(&self) -> CliError {
        CliError::with_details(
            format!("invalid {} '{}': {}", self.field, self.value, self.reason),
            self.suggestion.clone(),
            VALIDATION_ERROR,
        )
    }
}

/// Person ids are UUIDs assigned at intake.
pub fn validate_person_id(field: &'static str, s: &str) -> Result<(), ValidationError> {
    if s.trim().is_empty() {
        return Err(ValidationError::new(
            field,
            s,
            "must not be empty",
            "pass the id printed by `lin person add`",
        ));
    }
    if uuid::Uuid::parse_str(s.trim()).is_err() {
        return Err(ValidationError::new(
            field,
            s,
            "must be a valid UUID",
            "copy the id from `lin person list`",
        ));
    }
    Ok(())
}

pub fn validate_name(s: &str) -> Result<(), ValidationError> {
    if s.trim().is_empty() {
        return Err(ValidationError::new(
            "name",
            s,
            "must not be empty",
            "provide a non-empty --name",
        ));
    }
    if s.trim() != s {
        return Err(ValidationError::new(
            "name",
            s,
            "must not start or end with whitespace",
            "trim leading/trailing whitespace from --name",
        ));
    }
    if s.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::new(
            "name",
            s,
            format!("must be <= {MAX_NAME_LEN} characters"),
            "shorten the name",
        ));
    }
    if s.chars().any(char::is_control) {
        return Err(ValidationError::new(
            "name",
            s,
            "must not contain control characters",
            "remove control characters from the name",
        ));
    }
    Ok(())
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_birth_date(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        ValidationError::new(
            "date",
            s,
            "must be a calendar date in YYYY-MM-DD form",
            "use a date like 1960-01-31",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_ids_accepted() {
        assert!(validate_person_id("parent_id", "0b8f8e7a-1111-4222-8333-444455556666").is_ok());
    }

    #[test]
    fn non_uuid_ids_rejected() {
        assert!(validate_person_id("parent_id", "").is_err());
        assert!(validate_person_id("parent_id", "person-42").is_err());
        assert!(validate_person_id("parent_id", "not a uuid").is_err());
    }

    #[test]
    fn validation_errors_carry_the_validation_code() {
        let err = validate_person_id("root_id", "nope").expect_err("invalid");
        assert_eq!(err.to_cli_error().code, "VALIDATION_ERROR");
    }

    #[test]
    fn names_must_be_non_empty_and_trimmed() {
        assert!(validate_name("Ada Lovelace").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(" Ada").is_err());
        assert!(validate_name("Ada\u{7}").is_err());
    }

    #[test]
    fn dates_parse_strictly() {
        assert!(parse_birth_date("1960-01-31").is_ok());
        assert!(parse_birth_date("31/01/1960").is_err());
        assert!(parse_birth_date("1960-02-30").is_err());
        assert!(parse_birth_date("soon").is_err());
    }
}
