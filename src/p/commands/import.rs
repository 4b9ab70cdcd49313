use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PromptError, Result};
use crate::model::Prompt;
use crate::store::PromptStore;
use crate::tags::normalize;
use crate::validation::{validate_content, validate_name};
use std::fs;
use std::path::Path;

/// Loads prompts from a JSON export.
///
/// Invalid entries are skipped with a warning. An entry whose name already
/// exists replaces that prompt's content and tags.
pub fn run<S: PromptStore>(store: &mut S, path: &Path) -> Result<CmdResult> {
    if !path.is_file() {
        return Err(PromptError::NotFound(format!(
            "import file '{}'",
            path.display()
        )));
    }
    let entries: Vec<Prompt> = serde_json::from_str(&fs::read_to_string(path)?)?;

    let mut result = CmdResult::default();
    let mut skipped = 0;

    for (i, entry) in entries.into_iter().enumerate() {
        let label = if entry.name.is_empty() {
            format!("#{}", i + 1)
        } else {
            format!("'{}'", entry.name)
        };
        match import_one(store, &entry) {
            Ok(prompt) => result.affected_prompts.push(prompt),
            Err(e) => {
                skipped += 1;
                result.add_message(CmdMessage::warning(format!(
                    "Skipped entry {}: {}",
                    label, e
                )));
            }
        }
    }

    let imported = result.affected_prompts.len();
    tracing::debug!(imported, skipped, "import finished");
    result.add_message(CmdMessage::success(format!(
        "Imported {} prompts, skipped {}",
        imported, skipped
    )));
    Ok(result)
}

fn import_one<S: PromptStore>(store: &mut S, entry: &Prompt) -> Result<Prompt> {
    validate_name(&entry.name)?;
    validate_content(&entry.content)?;
    let tags = normalize(&entry.tags);

    let id = match store.insert(&entry.name, &entry.content, &tags) {
        Ok(id) => id,
        Err(PromptError::NameConflict(_)) => {
            store.update(&entry.name, &entry.content, &tags)?;
            store.get_by_name(&entry.name)?.id
        }
        Err(e) => return Err(e),
    };
    Ok(Prompt::new(id, entry.name.as_str(), entry.content.as_str(), tags))
}
