//! In-memory implementation of DocumentStore for testing and development

use crate::core::{Document, DocumentStore, Filter};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

struct Collection<T> {
    documents: BTreeMap<i64, T>,
    last_code: i64,
}

/// In-memory document store
///
/// Documents are kept in a `BTreeMap` keyed by code, so iteration order is
/// insertion order. Codes are never reused, even after deletion. Clones share
/// the same underlying collection.
pub struct InMemoryStore<T> {
    collection: Arc<RwLock<Collection<T>>>,
}

impl<T> InMemoryStore<T> {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self {
            collection: Arc::new(RwLock::new(Collection {
                documents: BTreeMap::new(),
                last_code: 0,
            })),
        }
    }
}

impl<T> Clone for InMemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            collection: Arc::clone(&self.collection),
        }
    }
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Document> DocumentStore<T> for InMemoryStore<T> {
    async fn insert(&self, mut document: T) -> Result<T> {
        let mut collection = self
            .collection
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        collection.last_code += 1;
        let code = collection.last_code;
        document.assign_code(code);
        collection.documents.insert(code, document.clone());

        Ok(document)
    }

    async fn find(&self, code: i64) -> Result<Option<T>> {
        let collection = self
            .collection
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(collection.documents.get(&code).cloned())
    }

    async fn find_by(&self, filter: &Filter) -> Result<Vec<T>> {
        let collection = self
            .collection
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(collection
            .documents
            .values()
            .filter(|d| filter.matches(*d))
            .cloned()
            .collect())
    }

    async fn find_page(&self, filter: &Filter, skip: u64, limit: u64) -> Result<Vec<T>> {
        let collection = self
            .collection
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(collection
            .documents
            .values()
            .filter(|d| filter.matches(*d))
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &Filter) -> Result<u64> {
        let collection = self
            .collection
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(collection
            .documents
            .values()
            .filter(|d| filter.matches(*d))
            .count() as u64)
    }

    async fn replace(&self, document: T) -> Result<Option<T>> {
        let mut collection = self
            .collection
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        match collection.documents.get_mut(&document.code()) {
            Some(slot) => {
                *slot = document.clone();
                Ok(Some(document))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, code: i64) -> Result<bool> {
        let mut collection = self
            .collection
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(collection.documents.remove(&code).is_some())
    }

    async fn delete_by(&self, filter: &Filter) -> Result<u64> {
        let mut collection = self
            .collection
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let before = collection.documents.len();
        collection.documents.retain(|_, d| !filter.matches(&*d));

        Ok((before - collection.documents.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FieldValue;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Note {
        code: i64,
        text: String,
    }

    impl Note {
        fn new(text: &str) -> Self {
            Self {
                code: 0,
                text: text.to_string(),
            }
        }
    }

    impl Document for Note {
        fn collection() -> &'static str {
            "notes"
        }

        fn code_field() -> &'static str {
            "code"
        }

        fn entity_name() -> &'static str {
            "Note"
        }

        fn code(&self) -> i64 {
            self.code
        }

        fn assign_code(&mut self, code: i64) {
            self.code = code;
        }

        fn field_value(&self, field: &str) -> Option<FieldValue> {
            match field {
                "code" => Some(FieldValue::Integer(self.code)),
                "text" => Some(FieldValue::String(self.text.clone())),
                _ => None,
            }
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_codes() {
        let store = InMemoryStore::new();

        let first = store.insert(Note::new("a")).await.unwrap();
        let second = store.insert(Note::new("b")).await.unwrap();

        assert_eq!(first.code, 1);
        assert_eq!(second.code, 2);
    }

    #[tokio::test]
    async fn test_codes_are_not_reused_after_delete() {
        let store = InMemoryStore::new();

        let first = store.insert(Note::new("a")).await.unwrap();
        assert!(store.delete(first.code).await.unwrap());
        let second = store.insert(Note::new("b")).await.unwrap();

        assert_eq!(second.code, 2);
        assert!(store.find(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_page_keeps_insertion_order() {
        let store = InMemoryStore::new();
        for i in 0..5 {
            store.insert(Note::new(&format!("note {}", i))).await.unwrap();
        }

        let page = store.find_page(&Filter::new(), 2, 2).await.unwrap();
        let texts: Vec<_> = page.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, vec!["note 2", "note 3"]);
    }

    #[tokio::test]
    async fn test_count_and_find_by_apply_filter() {
        let store = InMemoryStore::new();
        store.insert(Note::new("Alpha")).await.unwrap();
        store.insert(Note::new("beta")).await.unwrap();
        store.insert(Note::new("ALPHABET")).await.unwrap();

        let filter = Filter::new().contains_ignore_case("text", "alpha");
        assert_eq!(store.count(&filter).await.unwrap(), 2);
        assert_eq!(store.find_by(&filter).await.unwrap().len(), 2);
        assert_eq!(
            store.find_one_by(&filter).await.unwrap().unwrap().text,
            "Alpha"
        );
    }

    #[tokio::test]
    async fn test_replace_missing_document_is_none() {
        let store: InMemoryStore<Note> = InMemoryStore::new();
        let mut ghost = Note::new("ghost");
        ghost.code = 9;

        assert_eq!(store.replace(ghost).await.unwrap(), None);
        assert_eq!(store.count(&Filter::new()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_replace_existing_document() {
        let store = InMemoryStore::new();
        let mut note = store.insert(Note::new("draft")).await.unwrap();

        note.text = "final".to_string();
        store.replace(note.clone()).await.unwrap();

        assert_eq!(store.find(note.code).await.unwrap(), Some(note));
    }

    #[tokio::test]
    async fn test_delete_by_filter() {
        let store = InMemoryStore::new();
        store.insert(Note::new("keep")).await.unwrap();
        store.insert(Note::new("drop")).await.unwrap();
        store.insert(Note::new("drop")).await.unwrap();

        let removed = store
            .delete_by(&Filter::new().equals("text", "drop"))
            .await
            .unwrap();

        assert_eq!(removed, 2);
        assert_eq!(store.count(&Filter::new()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = InMemoryStore::new();
        let clone = store.clone();

        store.insert(Note::new("shared")).await.unwrap();

        assert_eq!(clone.count(&Filter::new()).await.unwrap(), 1);
    }
}
