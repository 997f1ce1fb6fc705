//! Shared validation rules.
//!
//! Request DTOs derive [`validator::Validate`]; [`DomainValidate`] turns any
//! rule violation into the single domain error clients expect for that
//! resource.

use hogwarts_core::SchoolError;
use validator::{Validate, ValidationError};

/// Rejects strings without at least one non-whitespace character.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must contain characters".into());
        return Err(err);
    }
    Ok(())
}

/// A validated DTO that maps every rule violation to one [`SchoolError`].
pub trait DomainValidate: Validate {
    /// Error reported when any field rule fails.
    const REJECTION: SchoolError;

    fn check(&self) -> Result<(), SchoolError> {
        self.validate().map_err(|_| Self::REJECTION)
    }
}
