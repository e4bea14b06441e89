use super::backend::StorageBackend;
use crate::error::{HabitzError, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

/// In-memory backend for tests and for sessions without a usable data directory.
///
/// Uses a `Mutex` rather than `RefCell` because the write queue calls into the
/// backend from its own thread.
#[derive(Default)]
pub struct MemBackend {
    entries: Mutex<HashMap<String, String>>,
    simulate_write_error: AtomicBool,
    simulate_read_error: AtomicBool,
    writes: AtomicUsize,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every `set`/`remove` fail until switched off again.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }

    /// Makes every `get` fail until switched off again.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.store(simulate, Ordering::SeqCst);
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl StorageBackend for MemBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if self.simulate_read_error.load(Ordering::SeqCst) {
            return Err(HabitzError::Store("Simulated read error".to_string()));
        }
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(HabitzError::Store("Simulated write error".to_string()));
        }
        self.entries().insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(HabitzError::Store("Simulated write error".to_string()));
        }
        self.entries().remove(key);
        Ok(())
    }

    fn location(&self, key: &str) -> PathBuf {
        PathBuf::from(format!("memory://{}", key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_set_remove() {
        let backend = MemBackend::new();
        assert_eq!(backend.get("k").unwrap(), None);

        backend.set("k", "v1").unwrap();
        backend.set("k", "v2").unwrap();
        assert_eq!(backend.get("k").unwrap(), Some("v2".to_string()));
        assert_eq!(backend.write_count(), 2);

        backend.remove("k").unwrap();
        assert_eq!(backend.get("k").unwrap(), None);
        backend.remove("k").unwrap();
    }

    #[test]
    fn simulated_failures() {
        let backend = MemBackend::new();
        backend.set("k", "v").unwrap();

        backend.set_simulate_write_error(true);
        assert!(backend.set("k", "other").is_err());
        assert!(backend.remove("k").is_err());
        backend.set_simulate_write_error(false);
        assert_eq!(backend.get("k").unwrap(), Some("v".to_string()));

        backend.set_simulate_read_error(true);
        assert!(backend.get("k").is_err());
    }

    #[test]
    fn virtual_location() {
        let backend = MemBackend::new();
        assert_eq!(
            backend.location("habitz-state"),
            PathBuf::from("memory://habitz-state")
        );
    }
}
