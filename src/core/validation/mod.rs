//! Declarative payload validation
//!
//! A [`PayloadValidator`] lists, per field, the validators to run against a
//! JSON payload. Every failing field is reported in a single
//! [`ValidationError`]; validation of a field stops at its first failure.
//!
//! ```rust,ignore
//! let rules = PayloadValidator::new()
//!     .field("floor", vec![Box::new(required()), Box::new(integer())])
//!     .field("numberOfBeds", vec![Box::new(required()), Box::new(positive())]);
//! rules.validate(&serde_json::to_value(&input)?)?;
//! ```

pub mod validators;

use crate::core::error::ValidationError;
use serde_json::Value;
use validators::Validator;

/// Ordered list of field rules
#[derive(Default)]
pub struct PayloadValidator {
    rules: Vec<(&'static str, Vec<Validator>)>,
}

impl PayloadValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the validators for one field
    pub fn field(mut self, name: &'static str, validators: Vec<Validator>) -> Self {
        self.rules.push((name, validators));
        self
    }

    /// Run every rule against the payload
    ///
    /// A field missing from the payload is checked as `null`.
    pub fn validate(&self, payload: &Value) -> Result<(), ValidationError> {
        let mut errors = ValidationError::new();

        for (field, validators) in &self.rules {
            let value = payload.get(field).unwrap_or(&Value::Null);
            if let Some(message) = validators.iter().find_map(|v| v(field, value).err()) {
                errors.push(*field, message);
            }
        }

        errors.into_result()
    }
}
