use std::collections::HashMap;
use std::sync::Mutex;

use super::{CartStore, StoreError};

/// Process-local store, the equivalent of browser local storage for tests and demos.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<HashMap<String, String>>,
}

#[allow(dead_code)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let data = self.data.lock().map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(data.get(key).cloned())
    }

    fn set(&self, key: &str, blob: &str) -> Result<(), StoreError> {
        let mut data = self.data.lock().map_err(|e| StoreError::Unavailable(e.to_string()))?;
        data.insert(key.to_string(), blob.to_string());
        Ok(())
    }
}
