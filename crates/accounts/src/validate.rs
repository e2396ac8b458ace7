//! Field-level validation for account inputs.

use crate::error::{FieldErrors, ServiceError, ServiceResult};
use crate::input::{AccountPatch, NewAccount};

const MIN_PASSWORD_LEN: usize = 8;

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn check_name(field: &'static str, value: &str, errors: &mut FieldErrors) {
    if value.trim().is_empty() {
        errors.push(field, "must not be blank");
    }
}

fn check_email(email: &str, errors: &mut FieldErrors) {
    let trimmed = email.trim();
    if trimmed.is_empty() || !trimmed.contains('@') {
        errors.push("email", "invalid email format");
    }
}

fn check_password(password: &str, errors: &mut FieldErrors) {
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push("password", "must be at least 8 characters");
    }
}

pub(crate) fn validate_new_account(input: &NewAccount) -> ServiceResult<()> {
    let mut errors = FieldErrors::new();

    check_name("first_name", &input.first_name, &mut errors);
    check_name("last_name", &input.last_name, &mut errors);
    check_email(&input.email, &mut errors);
    check_password(&input.password, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::Validation(errors))
    }
}

pub(crate) fn validate_patch(patch: &AccountPatch) -> ServiceResult<()> {
    let mut errors = FieldErrors::new();

    if let Some(first_name) = &patch.first_name {
        check_name("first_name", first_name, &mut errors);
    }
    if let Some(last_name) = &patch.last_name {
        check_name("last_name", last_name, &mut errors);
    }
    if let Some(email) = &patch.email {
        check_email(email, &mut errors);
    }
    // An empty password means "keep the current credential", not a length
    // violation.
    if let Some(password) = &patch.password {
        if !password.is_empty() {
            check_password(password, &mut errors);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::Validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_account() -> NewAccount {
        NewAccount {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            phone: "555-0100".to_string(),
            email: "ada@example.com".to_string(),
            password: "correct horse".to_string(),
        }
    }

    #[test]
    fn valid_input_passes() {
        assert!(validate_new_account(&new_account()).is_ok());
    }

    #[test]
    fn blank_names_and_bad_email_are_field_scoped() {
        let mut input = new_account();
        input.first_name = "  ".to_string();
        input.email = "nope".to_string();

        let Err(ServiceError::Validation(errors)) = validate_new_account(&input) else {
            panic!("expected validation error");
        };
        assert!(errors.get("first_name").is_some());
        assert!(errors.get("email").is_some());
        assert!(errors.get("last_name").is_none());
    }

    #[test]
    fn short_password_is_rejected_on_create() {
        let mut input = new_account();
        input.password = "short".to_string();

        let Err(ServiceError::Validation(errors)) = validate_new_account(&input) else {
            panic!("expected validation error");
        };
        assert!(errors.get("password").is_some());
    }

    #[test]
    fn empty_patch_password_is_not_a_violation() {
        let patch = AccountPatch {
            password: Some(String::new()),
            ..Default::default()
        };
        assert!(validate_patch(&patch).is_ok());
    }

    #[test]
    fn email_is_normalized() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }
}
