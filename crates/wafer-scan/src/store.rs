use std::{
    fs::{self, File, OpenOptions},
    io::{BufRead, BufReader, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::record::{GenerationRecord, RecordId};

/// An error type for record stores.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("Record store I/O failed. {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be encoded or decoded.
    #[error("Record serialization failed. {0}")]
    Serialization(#[from] serde_json::Error),

    /// The store refused the insert.
    #[error("Record store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence collaborator for generation records.
///
/// The store assigns the identifier; the generator never retries.
pub trait RecordStore {
    /// Insert one record and return the identifier the store assigned to it.
    fn insert(&mut self, record: &GenerationRecord) -> Result<RecordId, StoreError>;
}

/// A record together with its store-assigned identifier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Identifier assigned on insert.
    pub id: RecordId,
    /// The inserted record.
    #[serde(flatten)]
    pub record: GenerationRecord,
}

/// Keeps records in memory for the lifetime of the store.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: Vec<StoredRecord>,
}

impl MemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records inserted so far, in insertion order.
    pub fn records(&self) -> &[StoredRecord] {
        &self.records
    }

    /// Number of records inserted so far.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no record has been inserted yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for MemoryRecordStore {
    fn insert(&mut self, record: &GenerationRecord) -> Result<RecordId, StoreError> {
        let id = RecordId::new(Uuid::new_v4().to_string());
        self.records.push(StoredRecord {
            id: id.clone(),
            record: record.clone(),
        });
        Ok(id)
    }
}

/// Appends records to a file, one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesRecordStore {
    path: PathBuf,
}

impl JsonLinesRecordStore {
    /// Open a store at `path`, creating parent directories as needed.
    ///
    /// The file itself is created on the first insert.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read back every stored record.
    pub fn read_all(&self) -> Result<Vec<StoredRecord>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(&line)?);
        }
        Ok(records)
    }
}

impl RecordStore for JsonLinesRecordStore {
    fn insert(&mut self, record: &GenerationRecord) -> Result<RecordId, StoreError> {
        let stored = StoredRecord {
            id: RecordId::new(Uuid::new_v4().simple().to_string()),
            record: record.clone(),
        };

        let mut line = serde_json::to_string(&stored)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;

        log::debug!("appended record {} to {}", stored.id, self.path.display());

        Ok(stored.id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn record(name: &str) -> GenerationRecord {
        GenerationRecord {
            original_name: name.to_string(),
            saved_name: format!("{}.png", Uuid::new_v4()),
            generated_time: Utc::now(),
        }
    }

    #[test]
    fn memory_store_assigns_distinct_ids() -> Result<(), StoreError> {
        let mut store = MemoryRecordStore::new();
        assert!(store.is_empty());

        let a = store.insert(&record("scan0000"))?;
        let b = store.insert(&record("scan0001"))?;

        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[1].id, b);
        assert_eq!(store.records()[1].record.original_name, "scan0001");
        Ok(())
    }

    #[test]
    fn json_lines_store_appends() -> Result<(), StoreError> {
        let tmp_dir = tempfile::tempdir()?;
        let path = tmp_dir.path().join("db").join("images.jsonl");

        let mut store = JsonLinesRecordStore::open(&path)?;
        assert!(store.read_all()?.is_empty());

        let first = record("scan0000");
        let id = store.insert(&first)?;
        store.insert(&record("scan0001"))?;

        let stored = store.read_all()?;
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].id, id);
        assert_eq!(stored[0].record, first);
        assert_eq!(stored[1].record.original_name, "scan0001");

        // reopening keeps the previous lines
        let mut reopened = JsonLinesRecordStore::open(&path)?;
        reopened.insert(&record("scan0002"))?;
        assert_eq!(reopened.read_all()?.len(), 3);
        Ok(())
    }
}
