// Validation utilities module
// Shape checks for names, emails and passwords, plus validator crate adapters

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    static ref NAME_RE: Regex = Regex::new(r"^[a-zA-Z]+$").unwrap();
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+$").unwrap();
}

/// Returns true if the name consists of ASCII letters only
/// Spaces, digits, punctuation and the empty string are rejected
pub fn valid_name(name: &str) -> bool {
    NAME_RE.is_match(name)
}

/// Returns true if the password contains at least one alphanumeric character
/// Length is checked separately by callers
pub fn valid_password(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_alphanumeric())
}

/// Returns true if the email has a `local@domain.tld` shape
pub fn valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Validates a category or recipe name for `#[validate(custom = ...)]`
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if valid_name(name) {
        Ok(())
    } else {
        let mut err = ValidationError::new("invalid_name");
        err.message = Some("Name may only contain letters".into());
        Err(err)
    }
}

/// Validates an email address for `#[validate(custom = ...)]`
pub fn validate_email_shape(email: &str) -> Result<(), ValidationError> {
    if valid_email(email) {
        Ok(())
    } else {
        let mut err = ValidationError::new("invalid_email");
        err.message = Some("Please enter correct email".into());
        Err(err)
    }
}

/// Validates password characters for `#[validate(custom = ...)]`
pub fn validate_password_chars(password: &str) -> Result<(), ValidationError> {
    if valid_password(password) {
        Ok(())
    } else {
        let mut err = ValidationError::new("invalid_password");
        err.message = Some("Please enter correct password".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_valid_name_accepts_letters() {
        assert!(valid_name("salad"));
        assert!(valid_name("Biryani"));
    }

    #[test]
    fn test_valid_name_rejects_spaces_digits_and_symbols() {
        assert!(!valid_name(""));
        assert!(!valid_name("boiled rice"));
        assert!(!valid_name("salad2"));
        assert!(!valid_name("salad!"));
        assert!(!valid_name("café"));
    }

    #[test]
    fn test_valid_password() {
        assert!(valid_password("test1234"));
        assert!(valid_password("!!a!!"));
        assert!(!valid_password("!@#$%^"));
        assert!(!valid_password(""));
    }

    #[test]
    fn test_valid_email() {
        assert!(valid_email("u@test.com"));
        assert!(valid_email("first.last+tag@mail-host.co.ug"));
        assert!(!valid_email("u@test"));
        assert!(!valid_email("utest.com"));
        assert!(!valid_email("u @test.com"));
        assert!(!valid_email(""));
    }

    #[test]
    fn test_validator_adapters_carry_messages() {
        let err = validate_email_shape("nope").unwrap_err();
        assert_eq!(err.code, "invalid_email");
        assert!(validate_name("salad").is_ok());
        assert!(validate_password_chars("$$$").is_err());
    }

    proptest! {
        #[test]
        fn prop_letter_only_names_are_valid(name in "[a-zA-Z]{1,40}") {
            prop_assert!(valid_name(&name));
        }

        #[test]
        fn prop_names_with_a_digit_are_invalid(
            prefix in "[a-zA-Z]{0,10}",
            digit in "[0-9]",
            suffix in "[a-zA-Z]{0,10}"
        ) {
            let name = format!("{}{}{}", prefix, digit, suffix);
            prop_assert!(!valid_name(&name));
        }

        #[test]
        fn prop_generated_emails_are_valid(
            email in "[a-z]{3,10}@[a-z]{3,10}\\.(com|org|net)"
        ) {
            prop_assert!(valid_email(&email));
        }
    }
}
