//! JSON file document store with file locking.
//!
//! Each document lives in `<root>/<collection>/<id>.json`. Reads take a
//! shared lock; writes go to a locked temp file in the same directory which
//! is synced and renamed over the target.

use crate::store::{merge_fields, Collection, Document, DocumentStore, StoredDocument};
use crate::{Error, Result};
use fs2::FileExt;
use serde_json::Value;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use uuid::Uuid;

/// File-backed [`DocumentStore`]
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `root` (directories are created lazily)
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_dir(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.name())
    }

    fn document_path(&self, collection: Collection, id: &str) -> Result<PathBuf> {
        validate_id(id)?;
        Ok(self.collection_dir(collection).join(format!("{}.json", id)))
    }

    /// Read one document file under a shared lock
    fn read_document(path: &Path) -> Result<Document> {
        let file = File::open(path)?;
        file.lock_shared()?;

        let mut contents = String::new();
        let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
        file.unlock()?;
        read?;

        match serde_json::from_str::<Value>(&contents)? {
            Value::Object(map) => Ok(map),
            _ => Err(Error::Store(format!("{:?} is not a JSON object", path))),
        }
    }

    /// Atomically replace a document file
    fn write_document(path: &Path, fields: &Document) -> Result<()> {
        let parent = path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "document path missing parent")
        })?;
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            serde_json::to_writer(&mut writer, fields)?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;
        temp.persist(path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }
}

/// Ids become file names, so they must not escape the collection directory
fn validate_id(id: &str) -> Result<()> {
    let bad = id.is_empty()
        || id == "."
        || id == ".."
        || id.contains(['/', '\\'])
        || id.chars().any(char::is_control);
    if bad {
        return Err(Error::Store(format!("Invalid document id: {:?}", id)));
    }
    Ok(())
}

impl DocumentStore for JsonFileStore {
    fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>> {
        let path = self.document_path(collection, id)?;
        if !path.exists() {
            return Ok(None);
        }

        match Self::read_document(&path) {
            Ok(doc) => {
                tracing::debug!("Loaded {}/{}", collection, id);
                Ok(Some(doc))
            }
            Err(e) => {
                tracing::warn!("Failed to read {:?}: {}. Treating as missing.", path, e);
                Ok(None)
            }
        }
    }

    fn put(
        &mut self,
        collection: Collection,
        id: &str,
        fields: Document,
        merge: bool,
    ) -> Result<()> {
        let path = self.document_path(collection, id)?;

        let document = if merge && path.exists() {
            match Self::read_document(&path) {
                Ok(mut existing) => {
                    merge_fields(&mut existing, fields);
                    existing
                }
                Err(e) => {
                    tracing::warn!("Failed to read {:?}: {}. Replacing it.", path, e);
                    fields
                }
            }
        } else {
            fields
        };

        Self::write_document(&path, &document)?;
        tracing::debug!("Saved {}/{} (merge: {})", collection, id, merge);
        Ok(())
    }

    fn insert(&mut self, collection: Collection, fields: Document) -> Result<String> {
        let id = Uuid::new_v4().simple().to_string();
        let path = self.document_path(collection, &id)?;
        Self::write_document(&path, &fields)?;
        tracing::debug!("Inserted {}/{}", collection, id);
        Ok(id)
    }

    fn query_equal(
        &self,
        collection: Collection,
        field: &str,
        value: &Value,
    ) -> Result<Vec<StoredDocument>> {
        let dir = self.collection_dir(collection);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut found = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            match Self::read_document(&path) {
                Ok(fields) if fields.get(field) == Some(value) => found.push(StoredDocument {
                    id: id.to_string(),
                    fields,
                }),
                Ok(_) => {}
                Err(e) => {
                    // Keep going, one bad file shouldn't hide the rest
                    tracing::warn!("Skipping unreadable document {:?}: {}", path, e);
                }
            }
        }

        tracing::debug!(
            "Query {}.{} matched {} documents",
            collection,
            field,
            found.len()
        );
        Ok(found)
    }

    fn delete(&mut self, collection: Collection, id: &str) -> Result<()> {
        let path = self.document_path(collection, id)?;
        if path.exists() {
            std::fs::remove_file(&path)?;
            tracing::debug!("Deleted {}/{}", collection, id);
        }
        Ok(())
    }
}
