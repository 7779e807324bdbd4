//! Field rules for user input, mirroring the column sizes of the user table.

use crate::error::AppError;
use crate::model::UserInput;
use regex::Regex;
use std::sync::OnceLock;

pub const NAME_MAX_LENGTH: usize = 80;
pub const EMAIL_MAX_LENGTH: usize = 120;

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"))
}

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a create/overwrite body. Uniqueness is left to the database constraints.
    pub fn validate_user(input: &UserInput) -> Result<(), AppError> {
        validate_text("firstName", &input.first_name, NAME_MAX_LENGTH)?;
        validate_text("lastName", &input.last_name, NAME_MAX_LENGTH)?;
        validate_text("email", &input.email, EMAIL_MAX_LENGTH)?;
        if !email_pattern().is_match(&input.email) {
            return Err(AppError::Validation("email must be a valid email".into()));
        }
        if input.phone_num < 0 {
            return Err(AppError::Validation("phoneNum must be at least 0".into()));
        }
        Ok(())
    }
}

fn validate_text(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> UserInput {
        UserInput {
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            phone_num: 5550100,
            email: "grace@navy.mil".into(),
        }
    }

    #[test]
    fn accepts_well_formed_user() {
        RequestValidator::validate_user(&input()).unwrap();
    }

    #[test]
    fn rejects_blank_and_oversized_names() {
        let mut blank = input();
        blank.first_name = "  ".into();
        assert!(matches!(RequestValidator::validate_user(&blank), Err(AppError::Validation(m)) if m.contains("firstName")));

        let mut long = input();
        long.last_name = "x".repeat(NAME_MAX_LENGTH + 1);
        assert!(matches!(RequestValidator::validate_user(&long), Err(AppError::Validation(m)) if m.contains("lastName")));
    }

    #[test]
    fn rejects_bad_email_and_negative_phone() {
        let mut bad = input();
        bad.email = "not-an-email".into();
        assert!(RequestValidator::validate_user(&bad).is_err());

        let mut long = input();
        long.email = format!("{}@example.com", "a".repeat(EMAIL_MAX_LENGTH));
        assert!(RequestValidator::validate_user(&long).is_err());

        let mut negative = input();
        negative.phone_num = -3;
        assert!(RequestValidator::validate_user(&negative).is_err());
    }
}
