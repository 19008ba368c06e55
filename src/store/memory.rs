use std::collections::BTreeMap;

use crate::errors::{DeskError, Result};
use crate::store::RecordStore;
use crate::types::{Record, RecordId};

/// in-memory record store with sequential id assignment
#[derive(Debug, Clone)]
pub struct MemoryStore<T: Record> {
    entity: &'static str,
    records: BTreeMap<RecordId, T>,
    next_id: RecordId,
}

impl<T: Record + Clone> MemoryStore<T> {
    /// create an empty store; `entity` names the record type in errors
    pub fn new(entity: &'static str) -> Self {
        Self {
            entity,
            records: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// seed a store from existing records, keeping their ids
    pub fn with_records(entity: &'static str, records: Vec<T>) -> Self {
        let mut store = Self::new(entity);
        for record in records {
            store.next_id = store.next_id.max(record.id() + 1);
            store.records.insert(record.id(), record);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn not_found(&self, id: RecordId) -> DeskError {
        DeskError::RecordNotFound {
            entity: self.entity,
            id,
        }
    }
}

impl<T: Record + Clone> RecordStore<T> for MemoryStore<T> {
    fn get(&self, id: RecordId) -> Result<T> {
        self.records.get(&id).cloned().ok_or(self.not_found(id))
    }

    fn list(&self) -> Vec<T> {
        self.records.values().cloned().collect()
    }

    fn create(&mut self, mut record: T) -> Result<T> {
        record.assign_id(self.next_id);
        self.next_id += 1;
        self.records.insert(record.id(), record.clone());
        Ok(record)
    }

    fn update(&mut self, record: T) -> Result<T> {
        let id = record.id();
        if !self.records.contains_key(&id) {
            return Err(self.not_found(id));
        }
        self.records.insert(id, record.clone());
        Ok(record)
    }

    fn delete(&mut self, id: RecordId) -> Result<T> {
        self.records.remove(&id).ok_or_else(|| DeskError::RecordNotFound {
            entity: self.entity,
            id,
        })
    }
}
