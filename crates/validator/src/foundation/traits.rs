//! Core traits for the validation system

use crate::foundation::ValidationError;

/// The trait every predicate implements.
///
/// # Examples
///
/// ```rust,ignore
/// use formguard_validator::foundation::{Validate, ValidationError};
///
/// struct Lowercase;
///
/// impl Validate for Lowercase {
///     type Input = str;
///
///     fn validate(&self, input: &str) -> Result<(), ValidationError> {
///         if input.chars().all(|c| !c.is_uppercase()) {
///             Ok(())
///         } else {
///             Err(ValidationError::new("lowercase", "must be lowercase"))
///         }
///     }
/// }
/// ```
pub trait Validate {
    /// The type of input being validated.
    ///
    /// Use `?Sized` to allow validation of unsized types like `str`.
    type Input: ?Sized;

    /// Validates the input value.
    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError>;

    /// Boolean form of [`Validate::validate`].
    fn is_valid(&self, input: &Self::Input) -> bool {
        self.validate(input).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysValid;

    impl Validate for AlwaysValid {
        type Input = str;

        fn validate(&self, _input: &Self::Input) -> Result<(), ValidationError> {
            Ok(())
        }
    }

    #[test]
    fn test_validator_trait() {
        assert!(AlwaysValid.validate("test").is_ok());
        assert!(AlwaysValid.is_valid(""));
    }
}
