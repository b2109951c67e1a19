//! DTOs for the contact submission endpoint.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Acknowledgment text for accepted submissions.
pub const RECEIVED_MESSAGE: &str = "Your message has been received. We'll get back to you soon!";

/// A contact form submission.
///
/// Missing fields deserialize to empty strings so they surface as field
/// violations in a 400, not as a body parse failure.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    /// Sender's name (required, at most 100 characters).
    #[serde(default)]
    #[validate(custom(function = "validate_name"))]
    pub name: String,

    /// Reply address (must be a valid email, at most 255 characters).
    #[serde(default)]
    #[validate(custom(function = "validate_email_field"))]
    pub email: String,

    /// Message body (between 10 and 1000 characters).
    #[serde(default)]
    #[validate(custom(function = "validate_message"))]
    pub message: String,
}

// Each field needs a distinct message per violated bound, which the
// declarative rules cannot express on a single field. The email format
// check is also hand-rolled: the derive `email` rule caps the local part
// at 64 characters, rejecting well-formed addresses the 255-character
// budget allows.

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::new("length").with_message("Name is required".into()));
    }
    if name.chars().count() > 100 {
        return Err(ValidationError::new("length")
            .with_message("Name must be less than 100 characters".into()));
    }
    Ok(())
}

fn validate_email_field(email: &str) -> Result<(), ValidationError> {
    if !is_well_formed_email(email) {
        return Err(ValidationError::new("email").with_message("Invalid email address".into()));
    }
    if email.chars().count() > 255 {
        return Err(ValidationError::new("length")
            .with_message("Email must be less than 255 characters".into()));
    }
    Ok(())
}

/// `local@domain` with a non-empty local part and a dotted domain. No
/// local-part length cap; only the field's overall 255-character budget
/// bounds it.
fn is_well_formed_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}

fn validate_message(message: &str) -> Result<(), ValidationError> {
    let length = message.chars().count();
    if length < 10 {
        return Err(ValidationError::new("length")
            .with_message("Message must be at least 10 characters".into()));
    }
    if length > 1000 {
        return Err(ValidationError::new("length")
            .with_message("Message must be less than 1000 characters".into()));
    }
    Ok(())
}

/// Response for accepted submissions.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}
