//! In-process backend for tests and ephemeral sessions.

use super::{BackendError, BackendResult, StoreBackend};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Map-backed store with write fault injection.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    blobs: RefCell<HashMap<String, String>>,
    fail_writes: Cell<bool>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write/remove fail until reset.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Places a raw blob under `key`, bypassing encoding.
    pub fn seed_raw(&self, key: &str, payload: impl Into<String>) {
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), payload.into());
    }

    /// Current raw blob under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.blobs.borrow().get(key).cloned()
    }

    fn check_writable(&self, key: &str) -> BackendResult<()> {
        if self.fail_writes.get() {
            return Err(BackendError::Rejected(format!(
                "writes disabled for `{key}`"
            )));
        }
        Ok(())
    }
}

impl StoreBackend for MemoryBackend {
    fn read(&self, key: &str) -> BackendResult<Option<String>> {
        Ok(self.raw(key))
    }

    fn write(&self, key: &str, payload: &str) -> BackendResult<()> {
        self.check_writable(key)?;
        self.seed_raw(key, payload);
        Ok(())
    }

    fn remove(&self, key: &str) -> BackendResult<()> {
        self.check_writable(key)?;
        self.blobs.borrow_mut().remove(key);
        Ok(())
    }
}
