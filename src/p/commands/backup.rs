use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::PromptStore;
use std::path::Path;

pub fn backup<S: PromptStore>(store: &S, dest: &Path) -> Result<CmdResult> {
    store.backup(dest)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Database backed up to {}",
        dest.display()
    ))))
}

/// Replaces the live store with a backup. Takes effect immediately.
pub fn restore<S: PromptStore>(store: &mut S, src: &Path) -> Result<CmdResult> {
    store.restore(src)?;
    let count = store.list()?.len();
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Database restored from {} ({} prompts)",
        src.display(),
        count
    ))))
}
