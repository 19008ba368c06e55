pub mod memory;

pub use memory::MemoryStore;

use crate::errors::Result;
use crate::types::{Record, RecordId};

/// CRUD access to one record type by integer identifier
///
/// stores are owned values injected into the desk; there is no shared
/// module-level state
pub trait RecordStore<T: Record> {
    /// fetch one record
    fn get(&self, id: RecordId) -> Result<T>;

    /// all records in id order
    fn list(&self) -> Vec<T>;

    /// persist a new record, assigning the next sequential id
    fn create(&mut self, record: T) -> Result<T>;

    /// replace an existing record
    fn update(&mut self, record: T) -> Result<T>;

    /// remove a record, returning it
    fn delete(&mut self, id: RecordId) -> Result<T>;
}
