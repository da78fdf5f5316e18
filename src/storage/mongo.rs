//! MongoDB storage backend using the official MongoDB async driver.
//!
//! Provides `MongoStore<T>`, a [`DocumentStore`] backed by a MongoDB
//! database via `mongodb::Database`.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag.
//!
//! # Storage model
//!
//! Each `MongoStore<T>` operates on the collection named by
//! `T::collection()` ("hotels", "rooms", "customers"). The document code
//! (e.g. `hotelCode`) is stored as `_id`, so default ordering by `_id` is
//! insertion order.
//!
//! Codes are auto-incremented through a `counters` collection holding one
//! `{ _id: <collection>, seq: <last code> }` document per collection.
//!
//! # Serialization strategy
//!
//! Documents are serialized via `serde_json::Value` as an intermediate format,
//! then converted to BSON. Integers are stored as `Int64`.

use crate::core::{Condition, Document, DocumentStore, FieldValue, Filter};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Database;
use mongodb::bson::{Bson, Document as BsonDocument, doc};
use mongodb::options::ReturnDocument;
use std::marker::PhantomData;

/// Collection holding the auto-increment sequences
pub const COUNTERS_COLLECTION: &str = "counters";

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a serde_json::Value (expected to be an Object) into a BSON Document,
/// renaming the code field to `_id`.
fn json_to_document(json: serde_json::Value, code_field: &str) -> Result<BsonDocument> {
    let bson_val = mongodb::bson::to_bson(&json)
        .map_err(|e| anyhow!("Failed to convert JSON to BSON: {}", e))?;

    let mut doc = match bson_val {
        Bson::Document(d) => d,
        _ => return Err(anyhow!("Expected BSON document, got non-object")),
    };

    if let Some(code) = doc.remove(code_field) {
        doc.insert("_id", code);
    }

    Ok(doc)
}

/// Convert a BSON Document back into a serde_json::Value,
/// renaming `_id` back to the code field.
fn document_to_json(mut doc: BsonDocument, code_field: &str) -> serde_json::Value {
    if let Some(code) = doc.remove("_id") {
        doc.insert(code_field, code);
    }

    Bson::Document(doc).into_relaxed_extjson()
}

fn field_value_bson(value: &FieldValue) -> Bson {
    match value {
        FieldValue::String(s) => Bson::String(s.clone()),
        FieldValue::Integer(i) => Bson::Int64(*i),
        FieldValue::Null => Bson::Null,
    }
}

/// Translate a [`Filter`] into a MongoDB query document
///
/// Substring conditions become anchored-free `$regex` queries with the `i`
/// option; the needle is escaped so it is matched literally.
pub fn filter_to_query(filter: &Filter, code_field: &str) -> BsonDocument {
    let mut clauses: Vec<BsonDocument> = filter
        .conditions()
        .iter()
        .map(|condition| {
            let field = if condition.field() == code_field {
                "_id"
            } else {
                condition.field()
            };
            match condition {
                Condition::Equals { value, .. } => doc! { field: field_value_bson(value) },
                Condition::ContainsIgnoreCase { needle, .. } => doc! {
                    field: { "$regex": regex::escape(needle), "$options": "i" }
                },
            }
        })
        .collect();

    match clauses.len() {
        0 => doc! {},
        1 => clauses.remove(0),
        _ => doc! { "$and": clauses },
    }
}

// ---------------------------------------------------------------------------
// MongoStore<T>
// ---------------------------------------------------------------------------

/// Document store backed by MongoDB.
///
/// # Example
///
/// ```rust,ignore
/// use mongodb::Client;
/// use hotel_booking::storage::MongoStore;
///
/// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
/// let db = client.database("hotel_booking");
/// let hotels = MongoStore::<Hotel>::new(db);
/// let hotel = hotels.insert(hotel).await?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoStore<T> {
    database: Database,
    _marker: PhantomData<T>,
}

impl<T> MongoStore<T> {
    /// Create a new `MongoStore` with the given database handle.
    pub fn new(database: Database) -> Self {
        Self {
            database,
            _marker: PhantomData,
        }
    }

    /// Get a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }
}

impl<T: Document> MongoStore<T> {
    fn collection(&self) -> mongodb::Collection<BsonDocument> {
        self.database.collection(T::collection())
    }

    fn to_document(document: &T) -> Result<BsonDocument> {
        let json = serde_json::to_value(document)
            .map_err(|e| anyhow!("Failed to serialize {}: {}", T::entity_name(), e))?;
        json_to_document(json, T::code_field())
    }

    fn from_document(doc: BsonDocument) -> Result<T> {
        let json = document_to_json(doc, T::code_field());
        serde_json::from_value(json).map_err(|e| {
            anyhow!(
                "Failed to deserialize {} from document: {}",
                T::entity_name(),
                e
            )
        })
    }

    /// Atomically bump and return the sequence for this collection
    async fn next_code(&self) -> Result<i64> {
        let counter = self
            .database
            .collection::<BsonDocument>(COUNTERS_COLLECTION)
            .find_one_and_update(
                doc! { "_id": T::collection() },
                doc! { "$inc": { "seq": 1_i64 } },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| anyhow!("Failed to increment {} counter: {}", T::collection(), e))?
            .ok_or_else(|| anyhow!("Counter for {} missing after upsert", T::collection()))?;

        match counter.get("seq") {
            Some(Bson::Int64(seq)) => Ok(*seq),
            Some(Bson::Int32(seq)) => Ok(i64::from(*seq)),
            other => Err(anyhow!("Unexpected counter value: {:?}", other)),
        }
    }

    async fn collect(&self, cursor: mongodb::Cursor<BsonDocument>) -> Result<Vec<T>> {
        let docs: Vec<BsonDocument> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect {}: {}", T::collection(), e))?;

        docs.into_iter().map(Self::from_document).collect()
    }
}

#[async_trait]
impl<T: Document> DocumentStore<T> for MongoStore<T> {
    async fn insert(&self, mut document: T) -> Result<T> {
        let code = self.next_code().await?;
        document.assign_code(code);

        self.collection()
            .insert_one(Self::to_document(&document)?)
            .await
            .map_err(|e| anyhow!("Failed to insert {}: {}", T::entity_name(), e))?;

        Ok(document)
    }

    async fn find(&self, code: i64) -> Result<Option<T>> {
        let doc = self
            .collection()
            .find_one(doc! { "_id": code })
            .await
            .map_err(|e| anyhow!("Failed to get {}: {}", T::entity_name(), e))?;

        doc.map(Self::from_document).transpose()
    }

    async fn find_by(&self, filter: &Filter) -> Result<Vec<T>> {
        let cursor = self
            .collection()
            .find(filter_to_query(filter, T::code_field()))
            .sort(doc! { "_id": 1 })
            .await
            .map_err(|e| anyhow!("Failed to query {}: {}", T::collection(), e))?;

        self.collect(cursor).await
    }

    async fn find_page(&self, filter: &Filter, skip: u64, limit: u64) -> Result<Vec<T>> {
        let cursor = self
            .collection()
            .find(filter_to_query(filter, T::code_field()))
            .sort(doc! { "_id": 1 })
            .skip(skip)
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .await
            .map_err(|e| anyhow!("Failed to page {}: {}", T::collection(), e))?;

        self.collect(cursor).await
    }

    async fn count(&self, filter: &Filter) -> Result<u64> {
        self.collection()
            .count_documents(filter_to_query(filter, T::code_field()))
            .await
            .map_err(|e| anyhow!("Failed to count {}: {}", T::collection(), e))
    }

    /// Returns `None` if no document has the code.
    async fn replace(&self, document: T) -> Result<Option<T>> {
        let result = self
            .collection()
            .replace_one(
                doc! { "_id": document.code() },
                Self::to_document(&document)?,
            )
            .await
            .map_err(|e| anyhow!("Failed to replace {}: {}", T::entity_name(), e))?;

        if result.matched_count == 0 {
            return Ok(None);
        }

        Ok(Some(document))
    }

    async fn delete(&self, code: i64) -> Result<bool> {
        let result = self
            .collection()
            .delete_one(doc! { "_id": code })
            .await
            .map_err(|e| anyhow!("Failed to delete {}: {}", T::entity_name(), e))?;

        Ok(result.deleted_count > 0)
    }

    async fn delete_by(&self, filter: &Filter) -> Result<u64> {
        let result = self
            .collection()
            .delete_many(filter_to_query(filter, T::code_field()))
            .await
            .map_err(|e| anyhow!("Failed to delete {}: {}", T::collection(), e))?;

        Ok(result.deleted_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_to_document_renames_code() {
        let json = serde_json::json!({"hotelCode": 3, "hotelName": "Ocean View"});
        let doc = json_to_document(json, "hotelCode").unwrap();

        assert_eq!(doc.get("_id"), Some(&Bson::Int64(3)));
        assert!(doc.get("hotelCode").is_none());
    }

    #[test]
    fn test_document_to_json_restores_code() {
        let doc = doc! { "_id": 3_i64, "hotelName": "Ocean View" };
        let json = document_to_json(doc, "hotelCode");

        assert_eq!(json["hotelCode"], 3);
        assert_eq!(json["hotelName"], "Ocean View");
    }

    #[test]
    fn test_empty_filter_query() {
        assert_eq!(filter_to_query(&Filter::new(), "hotelCode"), doc! {});
    }

    #[test]
    fn test_single_condition_query() {
        let filter = Filter::new().equals("hotelCategory", "***");
        assert_eq!(
            filter_to_query(&filter, "hotelCode"),
            doc! { "hotelCategory": "***" }
        );
    }

    #[test]
    fn test_code_field_maps_to_id() {
        let filter = Filter::new().equals("roomCode", 4_i64);
        assert_eq!(
            filter_to_query(&filter, "roomCode"),
            doc! { "_id": 4_i64 }
        );
    }

    #[test]
    fn test_contains_is_escaped_case_insensitive_regex() {
        let filter = Filter::new()
            .contains_ignore_case("hotelName", "a.b")
            .equals("floor", 2_i64);
        assert_eq!(
            filter_to_query(&filter, "hotelCode"),
            doc! { "$and": [
                { "hotelName": { "$regex": "a\\.b", "$options": "i" } },
                { "floor": 2_i64 },
            ] }
        );
    }
}
