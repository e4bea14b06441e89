//! # Storage Layer
//!
//! Habit state is persisted as one JSON blob in a single slot of a key-value store.
//!
//! ## Layers
//!
//! - [`backend::StorageBackend`]: raw `get`/`set`/`remove` over string keys.
//!   - [`fs_backend::FsBackend`]: one file per key under the data directory (production)
//!   - [`mem_backend::MemBackend`]: in-memory map (tests, and runs without a data directory)
//! - [`writer::SnapshotWriter`]: single-slot ordered write queue in front of the backend
//! - [`snapshot::Persistence`]: encodes/decodes [`snapshot::PersistedSnapshot`], soft-fails
//!   reads, and routes writes through the queue
//!
//! ## Storage Format
//!
//! For `FsBackend`:
//! ```text
//! <data dir>/
//! ├── habitz-state.json   # {"habits": [...], "date": "Mon Jun 10 2024"}
//! ├── config.json         # HabitzConfig
//! └── habitz_rCURRENT.log # rotating diagnostics
//! ```
//!
//! There is no delta format: every write replaces the whole blob.

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod snapshot;
pub mod writer;

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures;
