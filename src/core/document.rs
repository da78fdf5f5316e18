//! Document trait defining how domain types are stored in a collection

use crate::core::field::FieldValue;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Base trait for every document persisted by a [`DocumentStore`].
///
/// A document lives in one collection and is keyed by an integer code the
/// store assigns on insertion (auto-increment). The code is immutable once
/// assigned.
///
/// [`DocumentStore`]: crate::core::store::DocumentStore
pub trait Document: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection name (e.g., "hotels", "rooms")
    fn collection() -> &'static str;

    /// Name of the serialized field holding the code (e.g., "hotelCode")
    fn code_field() -> &'static str;

    /// Human readable entity name used in error messages
    fn entity_name() -> &'static str;

    /// Store-assigned code, `0` until the document has been inserted
    fn code(&self) -> i64;

    /// Called by the store when inserting
    fn assign_code(&mut self, code: i64);

    /// Get the value of a specific field by its serialized name
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Whether the store has already assigned a code
    fn is_persisted(&self) -> bool {
        self.code() > 0
    }
}
