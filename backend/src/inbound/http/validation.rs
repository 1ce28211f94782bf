//! Transport-level validation for user requests.
//!
//! These checks cover syntax only (required fields, email shape, UUID
//! format). Business invariants are enforced again by the domain service.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::{DomainError, UserId};

/// Message returned when a path identifier is not a UUID.
pub const INVALID_USER_ID_MESSAGE: &str = "invalid user id";

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = concat!(
            r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+",
            r"@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?",
            r"(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
        );
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Whether `email` looks like `local@host.domain`.
///
/// # Panics
/// Only if the built-in pattern fails to compile, which the tests rule out.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Reject a blank `field`.
pub(crate) fn require(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::invalid_request(format!("{field}: cannot be blank")));
    }
    Ok(())
}

/// Reject an email that is blank or syntactically invalid.
pub(crate) fn require_email(field: &'static str, value: &str) -> Result<(), DomainError> {
    require(field, value)?;
    if !is_valid_email(value) {
        return Err(DomainError::invalid_request(format!(
            "{field}: must be a valid email address"
        )));
    }
    Ok(())
}

/// Parse a path segment into a [`UserId`].
pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, DomainError> {
    UserId::parse(raw).map_err(|_| DomainError::invalid_request(INVALID_USER_ID_MESSAGE))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    #[case("alice@example.com")]
    #[case("first.last+tag@mail.example.co.uk")]
    #[case("o'neil@example.org")]
    fn accepts_ordinary_addresses(#[case] email: &str) {
        assert!(is_valid_email(email));
    }

    #[rstest]
    #[case("alice")]
    #[case("alice@")]
    #[case("@example.com")]
    #[case("alice@localhost")]
    #[case("alice@-example.com")]
    #[case("alice smith@example.com")]
    #[case("alice@example..com")]
    fn rejects_malformed_addresses(#[case] email: &str) {
        assert!(!is_valid_email(email));
    }

    #[rstest]
    #[case("", "email: cannot be blank")]
    #[case("   ", "email: cannot be blank")]
    #[case("nope", "email: must be a valid email address")]
    fn require_email_reports_first_failure(#[case] value: &str, #[case] expected: &str) {
        let err = require_email("email", value).expect_err("invalid email");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), expected);
    }

    #[rstest]
    fn require_accepts_text() {
        assert!(require("name", "Alice").is_ok());
    }

    #[rstest]
    #[case("not-a-uuid")]
    #[case("")]
    #[case(" 0190b6a4-5f3c-7d2e-9a41-8c1f2e3d4b5a")]
    fn parse_user_id_rejects_non_uuids(#[case] raw: &str) {
        let err = parse_user_id(raw).expect_err("invalid id");

        assert_eq!(err.message(), INVALID_USER_ID_MESSAGE);
    }

    #[rstest]
    fn parse_user_id_accepts_uuids() {
        let id = parse_user_id("0190b6a4-5f3c-7d2e-9a41-8c1f2e3d4b5a").expect("valid id");

        assert_eq!(id.to_string(), "0190b6a4-5f3c-7d2e-9a41-8c1f2e3d4b5a");
    }
}
