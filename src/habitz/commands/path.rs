use crate::commands::CmdResult;
use crate::error::Result;
use crate::session::Session;
use crate::store::backend::StorageBackend;

pub fn run<B: StorageBackend + 'static>(session: &Session<B>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_paths(vec![session.storage_location()]))
}
