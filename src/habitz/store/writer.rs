//! Single-slot, ordered write queue for the persisted snapshot.
//!
//! Every mutation hands a full replacement value to [`SnapshotWriter::schedule`] and
//! returns immediately. One worker thread applies them to the backend in the order
//! they were scheduled. Only the latest pending operation is kept: if a newer value
//! arrives before the worker picked up the previous one, the previous one is dropped,
//! since it would be overwritten anyway. The backend therefore always ends up holding
//! the value of the most recent mutation, never a stale one that finished late.

use super::backend::StorageBackend;
use crate::error::{HabitzError, Result};
use log::{debug, warn};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::JoinHandle;

/// A full replacement of the slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    Set(String),
    Remove,
}

impl WriteOp {
    fn kind(&self) -> &'static str {
        match self {
            WriteOp::Set(_) => "set",
            WriteOp::Remove => "remove",
        }
    }
}

/// A write that did not make it to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteFailure {
    pub seq: u64,
    pub op: &'static str,
    pub message: String,
}

#[derive(Default)]
struct SlotState {
    pending: Option<(u64, WriteOp)>,
    issued: u64,
    completed: u64,
    superseded: u64,
    failures: Vec<WriteFailure>,
    shutdown: bool,
}

struct Shared {
    state: Mutex<SlotState>,
    cv: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn wait<'a>(&self, guard: MutexGuard<'a, SlotState>) -> MutexGuard<'a, SlotState> {
        self.cv.wait(guard).unwrap_or_else(|e| e.into_inner())
    }
}

pub struct SnapshotWriter {
    shared: Arc<Shared>,
    worker: Option<JoinHandle<()>>,
}

impl SnapshotWriter {
    /// Spawns the worker that owns all writes to `key` on `backend`.
    pub fn spawn<B>(backend: Arc<B>, key: impl Into<String>) -> Result<Self>
    where
        B: StorageBackend + ?Sized + 'static,
    {
        let key = key.into();
        let shared = Arc::new(Shared {
            state: Mutex::new(SlotState::default()),
            cv: Condvar::new(),
        });

        let worker_shared = shared.clone();
        let worker = std::thread::Builder::new()
            .name("habitz-writer".to_owned())
            .spawn(move || run_worker(worker_shared, backend, key))
            .map_err(HabitzError::Io)?;

        Ok(Self {
            shared,
            worker: Some(worker),
        })
    }

    /// Queues `op`, superseding any operation that has not started yet.
    /// Returns the sequence number assigned to it.
    pub fn schedule(&self, op: WriteOp) -> u64 {
        let mut state = self.shared.lock();
        state.issued += 1;
        let seq = state.issued;
        if let Some((stale, _)) = state.pending.replace((seq, op)) {
            state.superseded += 1;
            debug!(
                "event=snapshot_write status=superseded stale_seq={} seq={}",
                stale, seq
            );
        }
        self.shared.cv.notify_all();
        seq
    }

    /// Blocks until every operation scheduled so far has completed or failed.
    pub fn flush(&self) {
        let mut state = self.shared.lock();
        while state.completed < state.issued {
            state = self.shared.wait(state);
        }
    }

    /// Drains the failures collected since the last call.
    pub fn take_failures(&self) -> Vec<WriteFailure> {
        std::mem::take(&mut self.shared.lock().failures)
    }

    /// Records a failure that happened before an operation could be queued.
    pub fn record_failure(&self, op: &'static str, message: String) {
        let mut state = self.shared.lock();
        let seq = state.issued;
        state.failures.push(WriteFailure { seq, op, message });
    }

    /// How many queued operations were dropped in favour of a newer one.
    pub fn superseded_count(&self) -> u64 {
        self.shared.lock().superseded
    }
}

impl Drop for SnapshotWriter {
    fn drop(&mut self) {
        {
            let mut state = self.shared.lock();
            state.shutdown = true;
            self.shared.cv.notify_all();
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("event=writer_shutdown status=error reason=worker_panicked");
            }
        }
    }
}

fn run_worker<B>(shared: Arc<Shared>, backend: Arc<B>, key: String)
where
    B: StorageBackend + ?Sized,
{
    loop {
        let (seq, op) = {
            let mut state = shared.lock();
            loop {
                if let Some(next) = state.pending.take() {
                    break next;
                }
                if state.shutdown {
                    return;
                }
                state = shared.wait(state);
            }
        };

        let kind = op.kind();
        let outcome = match &op {
            WriteOp::Set(value) => backend.set(&key, value),
            WriteOp::Remove => backend.remove(&key),
        };

        let mut state = shared.lock();
        match outcome {
            Ok(()) => {
                debug!("event=snapshot_write status=ok op={} seq={}", kind, seq);
            }
            Err(e) => {
                warn!(
                    "event=snapshot_write status=error op={} seq={} error={}",
                    kind, seq, e
                );
                state.failures.push(WriteFailure {
                    seq,
                    op: kind,
                    message: e.to_string(),
                });
            }
        }
        state.completed = state.completed.max(seq);
        shared.cv.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn last_scheduled_value_wins() {
        let backend = Arc::new(MemBackend::new());
        let writer = SnapshotWriter::spawn(backend.clone(), "slot").unwrap();

        for i in 0..50 {
            writer.schedule(WriteOp::Set(format!("v{}", i)));
        }
        writer.flush();

        assert_eq!(backend.get("slot").unwrap(), Some("v49".to_string()));
        let applied = backend.write_count() as u64;
        assert!(applied <= 50);
        assert_eq!(applied + writer.superseded_count(), 50);
    }

    #[test]
    fn remove_is_ordered_with_sets() {
        let backend = Arc::new(MemBackend::new());
        let writer = SnapshotWriter::spawn(backend.clone(), "slot").unwrap();

        writer.schedule(WriteOp::Set("a".into()));
        writer.schedule(WriteOp::Remove);
        writer.flush();
        assert_eq!(backend.get("slot").unwrap(), None);

        writer.schedule(WriteOp::Remove);
        writer.schedule(WriteOp::Set("b".into()));
        writer.flush();
        assert_eq!(backend.get("slot").unwrap(), Some("b".to_string()));
    }

    #[test]
    fn failures_are_collected_not_raised() {
        let backend = Arc::new(MemBackend::new());
        let writer = SnapshotWriter::spawn(backend.clone(), "slot").unwrap();

        backend.set_simulate_write_error(true);
        let seq = writer.schedule(WriteOp::Set("lost".into()));
        writer.flush();

        let failures = writer.take_failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].seq, seq);
        assert_eq!(failures[0].op, "set");
        assert!(writer.take_failures().is_empty());

        backend.set_simulate_write_error(false);
        writer.schedule(WriteOp::Set("kept".into()));
        writer.flush();
        assert_eq!(backend.get("slot").unwrap(), Some("kept".to_string()));
    }

    #[test]
    fn drop_drains_pending_write() {
        let backend = Arc::new(MemBackend::new());
        {
            let writer = SnapshotWriter::spawn(backend.clone(), "slot").unwrap();
            writer.schedule(WriteOp::Set("final".into()));
        }
        assert_eq!(backend.get("slot").unwrap(), Some("final".to_string()));
    }

    #[test]
    fn flush_without_writes_returns() {
        let backend = Arc::new(MemBackend::new());
        let writer = SnapshotWriter::spawn(backend, "slot").unwrap();
        writer.flush();
        assert!(writer.take_failures().is_empty());
    }
}
