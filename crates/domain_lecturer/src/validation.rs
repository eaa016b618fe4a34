//! Lecturer validation rules
//!
//! # Validation Rules
//!
//! - Name must be present (after trimming) and at most 200 characters
//! - Email must be a valid address
//! - Contact number, when given, may contain digits, spaces, dashes,
//!   parentheses and a single leading `+`, with 7 to 15 digits in total

use validator::Validate;

use crate::error::LecturerError;
use crate::lecturer::LecturerDetails;

const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;

/// Result of lecturer validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the details are valid
    pub is_valid: bool,
    /// List of validation errors
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.is_valid = false;
    }

    /// Converts a failed result into a domain error
    pub fn into_result(self) -> Result<(), LecturerError> {
        if self.is_valid {
            Ok(())
        } else {
            Err(LecturerError::Validation(self.errors))
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

/// Validator for lecturer details
pub struct LecturerValidator;

impl LecturerValidator {
    /// Validates lecturer details
    ///
    /// Field rules come from the `validator` derive on [`LecturerDetails`];
    /// the contact number rule is checked here.
    pub fn validate(details: &LecturerDetails) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if let Err(errors) = details.validate() {
            Self::collect(&errors, &mut result);
        }
        // Whitespace passes the length check.
        if !details.name.is_empty() && details.name.trim().is_empty() {
            result.add_error("name: Name is required");
        }

        if let Some(number) = &details.contact_number {
            if !is_valid_contact_number(number) {
                result.add_error(format!("contact_number: Invalid phone number: {}", number));
            }
        }

        result
    }

    fn collect(errors: &validator::ValidationErrors, result: &mut ValidationResult) {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        for (field, field_errors) in fields {
            for error in field_errors {
                result.add_error(Self::describe(&field, error));
            }
        }
    }

    fn describe(field: &str, error: &validator::ValidationError) -> String {
        match &error.message {
            Some(message) => format!("{}: {}", field, message),
            None => format!("{}: {}", field, error.code),
        }
    }
}

fn is_valid_contact_number(number: &str) -> bool {
    let body = number.strip_prefix('+').unwrap_or(number);
    if !body
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')'))
    {
        return false;
    }
    let digits = body.chars().filter(|c| c.is_ascii_digit()).count();
    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
}
