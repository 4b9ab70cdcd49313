use crate::commands::{CmdMessage, CmdResult};
use crate::editor::{ContentEditor, EditOutcome};
use crate::error::{PromptError, Result};
use crate::model::Prompt;
use crate::store::PromptStore;
use crate::tags::normalize;
use crate::validation::{validate_content, validate_name};

pub const CANCELLED_MESSAGE: &str = "Operation cancelled. No prompt added.";

/// Captures content for a new prompt and stores it.
///
/// A cancelled or blank editor session is a no-op, not an error. The name is
/// checked for conflicts before the editor opens so no typing is lost; the
/// insert still reports a conflict if one appears in between.
pub fn run<S: PromptStore, E: ContentEditor>(
    store: &mut S,
    editor: &mut E,
    name: &str,
    tags: &str,
) -> Result<CmdResult> {
    validate_name(name)?;
    if store.contains(name)? {
        return Err(PromptError::NameConflict(name.to_string()));
    }

    let content = match editor.edit("")? {
        EditOutcome::Submitted(text) if !text.trim().is_empty() => text,
        _ => {
            tracing::debug!(prompt = name, "add cancelled");
            return Ok(CmdResult::default().with_message(CmdMessage::info(CANCELLED_MESSAGE)));
        }
    };
    validate_content(&content)?;

    let tags = normalize(tags);
    let id = store.insert(name, &content, &tags)?;

    Ok(CmdResult::default()
        .with_affected_prompts(vec![Prompt::new(id, name, content, tags)])
        .with_message(CmdMessage::success(format!(
            "Prompt '{}' added successfully!",
            name
        ))))
}
