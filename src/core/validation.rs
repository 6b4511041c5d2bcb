//! Validation module for the signup email address
//!
//! Accepts the shape `local@domain.tld`: a non-empty local part and a
//! non-empty remainder, neither containing whitespace or `@`, where the
//! remainder has a dot with at least one character on each side.

/// Validation error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailError {
    #[error("Email address cannot be empty")]
    Empty,

    #[error("Email address cannot contain whitespace")]
    ContainsWhitespace,

    #[error("Email address must contain '@'")]
    MissingAt,

    #[error("Email address must contain exactly one '@'")]
    MultipleAt,

    #[error("Email address is missing the part before '@'")]
    EmptyLocalPart,

    #[error("Email address is missing the domain")]
    EmptyDomain,

    #[error("Email domain must contain a dot-separated suffix")]
    MissingDomainSuffix,
}

impl EmailError {
    /// Message suitable for showing next to the form
    pub fn user_message(&self) -> &'static str {
        "Please enter a valid email address"
    }
}

/// Validate an email address exactly as typed (no trimming)
pub fn validate_email(email: &str) -> Result<(), EmailError> {
    if email.is_empty() {
        return Err(EmailError::Empty);
    }
    if email.chars().any(char::is_whitespace) {
        return Err(EmailError::ContainsWhitespace);
    }

    let (local, domain) = email.split_once('@').ok_or(EmailError::MissingAt)?;
    if domain.contains('@') {
        return Err(EmailError::MultipleAt);
    }
    if local.is_empty() {
        return Err(EmailError::EmptyLocalPart);
    }
    if domain.is_empty() {
        return Err(EmailError::EmptyDomain);
    }

    // Some dot must have a character before it and after it
    let has_suffix = domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());
    if !has_suffix {
        return Err(EmailError::MissingDomainSuffix);
    }

    Ok(())
}

/// Check if an email address is valid
#[cfg(test)]
pub fn is_valid_email(email: &str) -> bool {
    validate_email(email).is_ok()
}
