use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::PromptStore;
use std::fs;
use std::path::Path;

/// Writes every prompt to `path` as a pretty-printed JSON array of
/// `{id, name, prompt, tags}` objects.
pub fn run<S: PromptStore>(store: &S, path: &Path) -> Result<CmdResult> {
    let prompts = store.list()?;
    if prompts.is_empty() {
        return Ok(CmdResult::default().with_message(CmdMessage::info("No prompts to export")));
    }

    let data = serde_json::to_string_pretty(&prompts)?;
    fs::write(path, data)?;

    let message = format!("Exported {} prompts to {}", prompts.len(), path.display());
    Ok(CmdResult::default()
        .with_listed_prompts(prompts)
        .with_message(CmdMessage::success(message)))
}
