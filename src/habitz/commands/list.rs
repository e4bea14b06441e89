use crate::commands::{CmdResult, Progress};
use crate::error::Result;
use crate::index::index_habits;
use crate::session::Session;
use crate::store::backend::StorageBackend;

pub fn run<B: StorageBackend + 'static>(session: &Session<B>) -> Result<CmdResult> {
    let store = session.store();
    let progress = Progress {
        done: store.completed_count(),
        total: store.len(),
    };
    let result = CmdResult::default()
        .with_listed_habits(index_habits(store.habits()))
        .with_progress(progress);
    Ok(result)
}
