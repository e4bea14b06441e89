use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::session::Session;
use crate::store::backend::StorageBackend;

/// Deletes the stored state; the session continues from the built-in defaults.
pub fn run<B: StorageBackend + 'static>(session: &mut Session<B>) -> Result<CmdResult> {
    session.clear_storage();

    let mut result = CmdResult::default();
    let message = "Stored habits deleted. Back to the default list.";
    result.add_message(CmdMessage::success(message));
    let defaults = session.store().habits().to_vec();
    Ok(result.with_affected_habits(defaults))
}
