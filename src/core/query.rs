//! Filter builder shared by every store backend
//!
//! A [`Filter`] is a conjunction of [`Condition`]s. Backends either evaluate it
//! in process ([`Filter::matches`]) or translate it into their native query
//! language (see `storage::mongo`).
//!
//! # Example
//! ```rust,ignore
//! let filter = Filter::new()
//!     .equals("hotelCategory", "***")
//!     .contains_ignore_case("hotelName", "ocean");
//! ```

use crate::core::document::Document;
use crate::core::field::FieldValue;
use regex::RegexBuilder;

/// A single criterion on one document field
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Field equals the value exactly
    Equals { field: String, value: FieldValue },

    /// String field contains the needle, ignoring case. The needle is literal text.
    ///
    /// Case is compared with Unicode simple case folding, the same rule as
    /// MongoDB's `$regex` with the `i` option, so both backends agree.
    ContainsIgnoreCase { field: String, needle: String },
}

impl Condition {
    /// Name of the field this condition applies to
    pub fn field(&self) -> &str {
        match self {
            Condition::Equals { field, .. } => field,
            Condition::ContainsIgnoreCase { field, .. } => field,
        }
    }

    /// Evaluate the condition against a document
    pub fn matches<T: Document>(&self, document: &T) -> bool {
        match self {
            Condition::Equals { field, value } => {
                document.field_value(field).as_ref() == Some(value)
            }
            Condition::ContainsIgnoreCase { field, needle } => document
                .field_value(field)
                .as_ref()
                .and_then(FieldValue::as_string)
                .is_some_and(|haystack| contains_ignore_case(haystack, needle)),
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    match RegexBuilder::new(&regex::escape(needle))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern.is_match(haystack),
        // only a needle past the regex size limit ends up here
        Err(_) => haystack.to_lowercase().contains(&needle.to_lowercase()),
    }
}

/// Conjunction of conditions; an empty filter matches every document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an exact equality condition
    pub fn equals(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.conditions.push(Condition::Equals {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Add a case-insensitive substring condition
    pub fn contains_ignore_case(
        mut self,
        field: impl Into<String>,
        needle: impl Into<String>,
    ) -> Self {
        self.conditions.push(Condition::ContainsIgnoreCase {
            field: field.into(),
            needle: needle.into(),
        });
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Check whether a document satisfies every condition
    pub fn matches<T: Document>(&self, document: &T) -> bool {
        self.conditions.iter().all(|c| c.matches(document))
    }
}
