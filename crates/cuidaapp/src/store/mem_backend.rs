use super::backend::StorageBackend;
use super::Bucket;
use crate::error::{CuidaError, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the service layer is
/// single-threaded. This keeps the `StorageBackend` trait on `&self` for all
/// methods without paying for a lock.
pub struct MemBackend {
    buckets: RefCell<HashMap<Bucket, String>>,
    simulate_write_error: RefCell<bool>,
    available: RefCell<bool>,
}

impl Default for MemBackend {
    fn default() -> Self {
        Self {
            buckets: RefCell::new(HashMap::new()),
            simulate_write_error: RefCell::new(false),
            available: RefCell::new(true),
        }
    }
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Simulate an environment without persistent storage.
    pub fn set_available(&self, available: bool) {
        *self.available.borrow_mut() = available;
    }
}

impl StorageBackend for MemBackend {
    fn read(&self, bucket: Bucket) -> Result<Option<String>> {
        Ok(self.buckets.borrow().get(&bucket).cloned())
    }

    fn write(&self, bucket: Bucket, raw: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(CuidaError::Store("Simulated write error".to_string()));
        }
        self.buckets.borrow_mut().insert(bucket, raw.to_string());
        Ok(())
    }

    fn remove(&self, bucket: Bucket) -> Result<()> {
        self.buckets.borrow_mut().remove(&bucket);
        Ok(())
    }

    fn location(&self, bucket: Bucket) -> PathBuf {
        PathBuf::from(format!("memory://{}", bucket.key()))
    }

    fn available(&self) -> bool {
        *self.available.borrow()
    }
}
