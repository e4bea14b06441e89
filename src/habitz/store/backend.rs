use crate::error::Result;
use std::path::PathBuf;
use std::sync::Arc;

/// Raw key-value storage over string keys and values.
///
/// This trait handles the "where" of storage (filesystem vs memory) while
/// [`super::snapshot::Persistence`] handles the "what" (snapshot encoding, soft
/// failure, write ordering). No transactional guarantees are assumed beyond a single
/// `set` replacing the previous value as a whole.
///
/// Backends are shared with the background write queue, hence `Send + Sync`.
pub trait StorageBackend: Send + Sync {
    /// Returns `Ok(None)` when the key was never written or has been removed.
    /// Returns `Err` only on real I/O failures.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    /// MUST be atomic (e.g. write to tmp then rename) so readers never see a partial value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Where the value for `key` lives. A real path for file backends, a virtual one otherwise.
    fn location(&self, key: &str) -> PathBuf;
}

impl<B: StorageBackend + ?Sized> StorageBackend for Arc<B> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn location(&self, key: &str) -> PathBuf {
        (**self).location(key)
    }
}

impl<B: StorageBackend + ?Sized> StorageBackend for Box<B> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn location(&self, key: &str) -> PathBuf {
        (**self).location(key)
    }
}
