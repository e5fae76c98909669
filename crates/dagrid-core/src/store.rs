use std::collections::BTreeMap;

use crate::error::DagridError;
use crate::model::DevelopmentRecord;

/// Persistence for finished records, keyed on application number.
pub trait RecordStore {
    fn contains(&self, application_number: &str) -> bool;

    /// Insert unless a record with the same application number exists.
    /// Returns whether the record was inserted.
    fn insert_if_absent(&mut self, record: DevelopmentRecord) -> Result<bool, DagridError>;
}

/// In-memory store ordered by application number.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: BTreeMap<String, DevelopmentRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &DevelopmentRecord> {
        self.records.values()
    }
}

impl RecordStore for MemoryStore {
    fn contains(&self, application_number: &str) -> bool {
        self.records.contains_key(application_number)
    }

    fn insert_if_absent(&mut self, record: DevelopmentRecord) -> Result<bool, DagridError> {
        if record.application_number.is_empty() {
            return Err(DagridError::Store {
                application_number: record.application_number,
                reason: "empty application number".into(),
            });
        }
        if self.contains(&record.application_number) {
            return Ok(false);
        }
        self.records
            .insert(record.application_number.clone(), record);
        Ok(true)
    }
}
