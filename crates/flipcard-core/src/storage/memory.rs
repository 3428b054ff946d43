use alloc::{collections::BTreeMap, string::String, vec::Vec};

use super::DocumentStore;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MemoryStoreError {
    NotFound,
    WriteRejected,
}

/// RAM-backed store used for bring-up without an SD card and in tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    files: BTreeMap<String, Vec<u8>>,
    fail_writes: bool,
}

impl MemoryStore {
    pub const fn new() -> Self {
        Self {
            files: BTreeMap::new(),
            fail_writes: false,
        }
    }

    pub fn with_file(mut self, path: &str, bytes: &[u8]) -> Self {
        self.insert(path, bytes);
        self
    }

    pub fn insert(&mut self, path: &str, bytes: &[u8]) {
        self.files.insert(String::from(path), bytes.to_vec());
    }

    pub fn remove(&mut self, path: &str) -> Option<Vec<u8>> {
        self.files.remove(path)
    }

    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    /// Make every subsequent write fail, simulating a write-protected card.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl DocumentStore for MemoryStore {
    type Error = MemoryStoreError;

    fn read(&mut self, path: &str) -> Result<Vec<u8>, Self::Error> {
        self.files
            .get(path)
            .cloned()
            .ok_or(MemoryStoreError::NotFound)
    }

    fn write(&mut self, path: &str, bytes: &[u8]) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(MemoryStoreError::WriteRejected);
        }
        self.insert(path, bytes);
        Ok(())
    }
}
