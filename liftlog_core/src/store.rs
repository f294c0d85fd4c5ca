//! Document store contract.
//!
//! The tracker reads and writes through this trait only. Documents are JSON
//! objects addressed by collection and id; queries do not promise any order.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// A stored document's fields
pub type Document = Map<String, Value>;

/// Collections the tracker uses
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Collection {
    Workouts,
    Plans,
    Profiles,
}

impl Collection {
    pub fn name(self) -> &'static str {
        match self {
            Collection::Workouts => "workouts",
            Collection::Plans => "plans",
            Collection::Profiles => "profiles",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A document together with its id
#[derive(Clone, Debug, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub fields: Document,
}

impl StoredDocument {
    /// Decode the fields into a typed record
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(Value::Object(self.fields.clone()))?)
    }
}

/// Key-addressed document storage
pub trait DocumentStore {
    fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>>;

    /// Write a document; with `merge` the fields are overlaid on the existing
    /// document instead of replacing it
    fn put(&mut self, collection: Collection, id: &str, fields: Document, merge: bool)
        -> Result<()>;

    /// Store a new document and return its id
    fn insert(&mut self, collection: Collection, fields: Document) -> Result<String>;

    /// All documents whose top-level `field` equals `value`
    fn query_equal(
        &self,
        collection: Collection,
        field: &str,
        value: &Value,
    ) -> Result<Vec<StoredDocument>>;

    fn delete(&mut self, collection: Collection, id: &str) -> Result<()>;
}

/// Serialize a record into document fields
pub fn to_document<T: Serialize>(record: &T) -> Result<Document> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        other => Err(Error::Store(format!(
            "Expected a JSON object document, got {}",
            other
        ))),
    }
}

/// Overlay `fields` onto `existing` (top-level keys only)
pub(crate) fn merge_fields(existing: &mut Document, fields: Document) {
    for (key, value) in fields {
        existing.insert(key, value);
    }
}

/// In-process store with sequential ids
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    documents: BTreeMap<(Collection, String), Document>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection
    pub fn len(&self, collection: Collection) -> usize {
        self.documents
            .keys()
            .filter(|(c, _)| *c == collection)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentStore for MemoryStore {
    fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>> {
        Ok(self.documents.get(&(collection, id.to_string())).cloned())
    }

    fn put(
        &mut self,
        collection: Collection,
        id: &str,
        fields: Document,
        merge: bool,
    ) -> Result<()> {
        let key = (collection, id.to_string());
        match self.documents.get_mut(&key) {
            Some(existing) if merge => merge_fields(existing, fields),
            _ => {
                self.documents.insert(key, fields);
            }
        }
        Ok(())
    }

    fn insert(&mut self, collection: Collection, fields: Document) -> Result<String> {
        self.next_id += 1;
        let id = format!("{}-{}", collection.name(), self.next_id);
        self.documents.insert((collection, id.clone()), fields);
        Ok(id)
    }

    fn query_equal(
        &self,
        collection: Collection,
        field: &str,
        value: &Value,
    ) -> Result<Vec<StoredDocument>> {
        Ok(self
            .documents
            .iter()
            .filter(|((c, _), doc)| *c == collection && doc.get(field) == Some(value))
            .map(|((_, id), doc)| StoredDocument {
                id: id.clone(),
                fields: doc.clone(),
            })
            .collect())
    }

    fn delete(&mut self, collection: Collection, id: &str) -> Result<()> {
        self.documents.remove(&(collection, id.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_insert_get_delete() {
        let mut store = MemoryStore::new();
        let id = store
            .insert(Collection::Workouts, doc(json!({"user_id": "u1", "sets": 3})))
            .unwrap();

        let fetched = store.get(Collection::Workouts, &id).unwrap().unwrap();
        assert_eq!(fetched["sets"], 3);
        assert!(store.get(Collection::Plans, &id).unwrap().is_none());

        store.delete(Collection::Workouts, &id).unwrap();
        assert!(store.get(Collection::Workouts, &id).unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_put_merge_overlays_fields() {
        let mut store = MemoryStore::new();
        store
            .put(Collection::Profiles, "u1", doc(json!({"weight": 80, "streak": 2})), false)
            .unwrap();
        store
            .put(Collection::Profiles, "u1", doc(json!({"streak": 3})), true)
            .unwrap();

        let merged = store.get(Collection::Profiles, "u1").unwrap().unwrap();
        assert_eq!(merged["weight"], 80);
        assert_eq!(merged["streak"], 3);

        store
            .put(Collection::Profiles, "u1", doc(json!({"streak": 4})), false)
            .unwrap();
        let replaced = store.get(Collection::Profiles, "u1").unwrap().unwrap();
        assert!(replaced.get("weight").is_none());
    }

    #[test]
    fn test_query_equal_filters_by_field() {
        let mut store = MemoryStore::new();
        store
            .insert(Collection::Workouts, doc(json!({"user_id": "u1"})))
            .unwrap();
        store
            .insert(Collection::Workouts, doc(json!({"user_id": "u2"})))
            .unwrap();
        store
            .insert(Collection::Plans, doc(json!({"user_id": "u1"})))
            .unwrap();

        let found = store
            .query_equal(Collection::Workouts, "user_id", &json!("u1"))
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(store.len(Collection::Workouts), 2);
    }

    #[test]
    fn test_to_document_rejects_non_objects() {
        assert!(to_document(&42).is_err());
        assert!(to_document(&json!({"a": 1})).is_ok());
    }
}
