use crate::error::StoreError;
use crate::models::RatingRecord;
use std::sync::Mutex;

/// Append-only, process-lifetime list of ratings in arrival order
#[derive(Debug, Default)]
pub struct RatingStore {
    records: Mutex<Vec<RatingRecord>>,
}

impl RatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rating and return the new record count
    pub fn append(&self, record: RatingRecord) -> Result<usize, StoreError> {
        let mut records = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        records.push(record);
        Ok(records.len())
    }

    /// Copy of every stored rating, oldest first
    pub fn snapshot(&self) -> Result<Vec<RatingRecord>, StoreError> {
        let records = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(records.clone())
    }
}
