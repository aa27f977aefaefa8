//! Field validation rules
//!
//! Each structure that crosses the library boundary implements [`Validate`] by
//! running its fields through the rule checks below. The first violation wins.

use crate::error::PplxError;

/// A single failed rule, naming the offending field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub rule: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rule: rule.into(),
        }
    }

    /// Report as a caller-side option failure
    pub fn into_invalid_option(self) -> PplxError {
        PplxError::InvalidOption {
            field: self.field,
            rule: self.rule,
        }
    }

    /// Report as a malformed upstream payload
    pub fn into_invalid_response(self) -> PplxError {
        PplxError::InvalidResponse {
            field: self.field,
            rule: self.rule,
        }
    }
}

/// Structural validation of a value
pub trait Validate {
    /// Returns the first violated rule, if any
    fn validate(&self) -> Result<(), Violation>;
}

/// Numeric constraint attached to a field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// `min <= value <= max`
    Between { min: f64, max: f64 },
    /// `value > min`
    Above(f64),
}

impl Bound {
    pub fn contains(&self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        match *self {
            Bound::Between { min, max } => (min..=max).contains(&value),
            Bound::Above(min) => value > min,
        }
    }

    fn describe(&self) -> String {
        match *self {
            Bound::Between { min, max } => format!("must be between {} and {}", min, max),
            Bound::Above(min) => format!("must be greater than {}", min),
        }
    }
}

/// A plain numeric field must satisfy `bound`
pub fn bounded(field: &str, value: f64, bound: Bound) -> Result<(), Violation> {
    if bound.contains(value) {
        Ok(())
    } else {
        Err(Violation::new(
            field,
            format!("{} (got {})", bound.describe(), value),
        ))
    }
}

/// A nullable numeric field must satisfy `bound` when set; `None` always passes
pub fn nullable(field: &str, value: Option<f64>, bound: Bound) -> Result<(), Violation> {
    match value {
        Some(v) => bounded(field, v, bound),
        None => Ok(()),
    }
}

/// A text field must be present; only the empty string counts as missing
pub fn required_text(field: &str, value: &str) -> Result<(), Violation> {
    if value.is_empty() {
        Err(Violation::new(field, "is required"))
    } else {
        Ok(())
    }
}

/// An optional field must have been supplied
pub fn required<T>(field: &str, value: &Option<T>) -> Result<(), Violation> {
    match value {
        Some(_) => Ok(()),
        None => Err(Violation::new(field, "is required")),
    }
}

/// A sequence field must contain at least one element
pub fn required_items<T>(field: &str, items: &[T]) -> Result<(), Violation> {
    if items.is_empty() {
        Err(Violation::new(field, "is required and cannot be empty"))
    } else {
        Ok(())
    }
}
