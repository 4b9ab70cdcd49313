use crate::commands::{CmdMessage, CmdResult};
use crate::editor::{ContentEditor, EditOutcome};
use crate::error::Result;
use crate::model::Prompt;
use crate::store::PromptStore;
use crate::tags::normalize;
use crate::validation::{validate_content, validate_name};

pub const CANCELLED_MESSAGE: &str = "Edit cancelled. No changes made.";
pub const UNCHANGED_MESSAGE: &str = "No changes detected for prompt or tags.";

/// Re-edits an existing prompt, optionally replacing its tags.
///
/// `tags` of `None` keeps the current tags. Unlike add, a blank submission
/// is a validation error: editing must not erase a prompt.
pub fn run<S: PromptStore, E: ContentEditor>(
    store: &mut S,
    editor: &mut E,
    name: &str,
    tags: Option<&str>,
) -> Result<CmdResult> {
    validate_name(name)?;
    let existing = store.get_by_name(name)?;

    let content = match editor.edit(&existing.content)? {
        EditOutcome::Submitted(text) => text,
        EditOutcome::Cancelled => {
            return Ok(CmdResult::default().with_message(CmdMessage::info(CANCELLED_MESSAGE)));
        }
    };
    let tags = match tags {
        Some(raw) => normalize(raw),
        None => existing.tags.clone(),
    };

    if content == existing.content && tags == existing.tags {
        return Ok(CmdResult::default().with_message(CmdMessage::info(UNCHANGED_MESSAGE)));
    }
    validate_content(&content)?;

    store.update(name, &content, &tags)?;
    tracing::debug!(prompt = name, "prompt edited");

    Ok(CmdResult::default()
        .with_affected_prompts(vec![Prompt::new(existing.id, name, content, tags)])
        .with_message(CmdMessage::success(format!(
            "Prompt '{}' edited successfully!",
            name
        ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::editor::fixtures::ScriptedEditor;
    use crate::error::PromptError;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use crate::validation::MAX_NAME_LEN;

    fn greeting_store() -> InMemoryStore {
        StoreFixture::new()
            .with_prompt("greeting", "Hi there", "b,a")
            .store
    }

    #[test]
    fn greeting_scenario() {
        let mut store = InMemoryStore::new();
        add::run(
            &mut store,
            &mut ScriptedEditor::submitting("Hi there"),
            "greeting",
            "b,a",
        )
        .unwrap();

        let mut unchanged = ScriptedEditor::submitting("Hi there");
        let result = run(&mut store, &mut unchanged, "greeting", None).unwrap();
        assert_eq!(unchanged.seen, vec!["Hi there".to_string()]);
        assert!(result.is_noop());
        assert_eq!(result.messages[0].content, UNCHANGED_MESSAGE);

        let result = run(
            &mut store,
            &mut ScriptedEditor::submitting("Hello!"),
            "greeting",
            None,
        )
        .unwrap();
        assert_eq!(result.affected_prompts.len(), 1);

        let stored = store.get_by_name("greeting").unwrap();
        assert_eq!(stored.content, "Hello!");
        assert_eq!(stored.tags, "a,b");
    }

    #[test]
    fn tag_override_alone_is_a_change() {
        let mut store = greeting_store();
        let mut editor = ScriptedEditor::submitting("Hi there");

        run(&mut store, &mut editor, "greeting", Some("c, a,c")).unwrap();
        assert_eq!(store.get_by_name("greeting").unwrap().tags, "a,c");
    }

    #[test]
    fn equivalent_tag_override_is_unchanged() {
        let mut store = greeting_store();
        let mut editor = ScriptedEditor::submitting("Hi there");

        let result = run(&mut store, &mut editor, "greeting", Some("a,b,a")).unwrap();
        assert_eq!(result.messages[0].content, UNCHANGED_MESSAGE);
    }

    #[test]
    fn blank_content_is_rejected() {
        let mut store = greeting_store();
        let mut editor = ScriptedEditor::submitting("   ");

        let err = run(&mut store, &mut editor, "greeting", None).unwrap_err();
        assert!(matches!(err, PromptError::Validation(_)));
        assert_eq!(store.get_by_name("greeting").unwrap().content, "Hi there");
    }

    #[test]
    fn cancel_keeps_prompt() {
        let mut store = greeting_store();
        let result = run(
            &mut store,
            &mut ScriptedEditor::cancelling(),
            "greeting",
            Some("z"),
        )
        .unwrap();
        assert_eq!(result.messages[0].content, CANCELLED_MESSAGE);
        assert_eq!(store.get_by_name("greeting").unwrap().tags, "a,b");
    }

    #[test]
    fn missing_prompt_is_not_found() {
        let mut store = InMemoryStore::new();
        let mut editor = ScriptedEditor::submitting("x");

        let err = run(&mut store, &mut editor, "nope", None).unwrap_err();
        assert!(matches!(err, PromptError::NotFound(_)));
        assert!(!editor.was_invoked());
    }

    #[test]
    fn overlong_name_is_a_validation_error() {
        let mut store = InMemoryStore::new();
        let mut editor = ScriptedEditor::submitting("x");
        let name = "n".repeat(MAX_NAME_LEN + 1);

        let err = run(&mut store, &mut editor, &name, None).unwrap_err();
        assert!(matches!(err, PromptError::Validation(_)));
    }
}
