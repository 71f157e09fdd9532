//! Error types for validation failures
//!
//! All string fields use `Cow<'static, str>` so that static codes cost no
//! allocation; resolved messages are usually owned.

use std::borrow::Cow;
use std::fmt;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A failed check: which rule failed, the message to display, and the
/// parameters that were substituted into it.
///
/// # Examples
///
/// ```rust,ignore
/// use formguard_validator::foundation::ValidationError;
///
/// let error = ValidationError::new("minlength", "Please enter at least 5 characters.")
///     .with_field("username")
///     .with_param("0", "5");
/// assert_eq!(error.param("0"), Some("5"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Machine-readable code; for field verdicts this is the catalog key
    /// (`"required"`, `"email"`, `"rangelength"`, ...).
    pub code: Cow<'static, str>,

    /// Human-readable message, already resolved.
    pub message: Cow<'static, str>,

    /// Name of the field that failed, if any.
    pub field: Option<Cow<'static, str>>,

    /// Ordered template parameters. Field verdicts use ordinal keys (`"0"`, `"1"`).
    pub params: Vec<(Cow<'static, str>, Cow<'static, str>)>,
}

impl ValidationError {
    /// Creates a new validation error with a code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
            params: Vec::new(),
        }
    }

    /// Sets the field name for this error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Adds a parameter to the error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "[{}] {}: {}", field, self.code, self.message)?;
        } else {
            write!(f, "{}: {}", self.code, self.message)?;
        }

        if !self.params.is_empty() {
            write!(f, " (params: [")?;
            for (i, (k, v)) in self.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{k}={v}")?;
            }
            write!(f, "])")?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// ERROR COLLECTION
// ============================================================================

/// A collection of validation errors, one per failing field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Creates a new empty error collection.
    #[must_use]
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Adds an error to the collection.
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns all errors.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Returns the first error reported for `field`.
    #[must_use]
    pub fn for_field(&self, field: &str) -> Option<&ValidationError> {
        self.errors
            .iter()
            .find(|e| e.field.as_deref() == Some(field))
    }

    /// Converts to a Result.
    #[must_use = "result must be used"]
    pub fn into_result<T>(self, ok_value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(ok_value)
        } else {
            Err(self)
        }
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_with_field_and_params() {
        let error = ValidationError::new("range", "Please enter a value between 3 and 7.")
            .with_field("age")
            .with_param("0", "3")
            .with_param("1", "7");

        assert_eq!(error.field.as_deref(), Some("age"));
        assert_eq!(error.param("0"), Some("3"));
        assert_eq!(error.param("1"), Some("7"));
        assert_eq!(error.param("2"), None);
    }

    #[test]
    fn test_display() {
        let error = ValidationError::new("minlength", "Too short").with_param("0", "5");
        assert_eq!(error.to_string(), "minlength: Too short (params: [0=5])");

        let error = ValidationError::new("required", "Required").with_field("email");
        assert_eq!(error.to_string(), "[email] required: Required");
    }

    #[test]
    fn test_error_collection() {
        let errors: ValidationErrors = vec![
            ValidationError::new("required", "Required").with_field("name"),
            ValidationError::new("email", "Bad email").with_field("email"),
        ]
        .into_iter()
        .collect();

        assert_eq!(errors.len(), 2);
        assert!(errors.has_errors());
        assert_eq!(errors.for_field("email").map(|e| e.code.as_ref()), Some("email"));
        assert!(errors.for_field("phone").is_none());
        assert!(errors.into_result(()).is_err());
    }

    #[test]
    fn test_zero_alloc_static_strings() {
        let error = ValidationError::new("required", "This field is required.");
        assert!(matches!(error.code, Cow::Borrowed(_)));
        assert!(matches!(error.message, Cow::Borrowed(_)));
    }
}
