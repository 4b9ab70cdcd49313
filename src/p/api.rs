//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for all
//! operations, whatever the UI.
//!
//! The API dispatches to the command functions and returns their
//! `Result<CmdResult>`. It does no business logic, no printing and no
//! formatting.
//!
//! `PromptApi<S: PromptStore>` is generic over the storage backend:
//! `PromptApi<SqliteStore>` in production, `PromptApi<InMemoryStore>` in
//! tests. Editing operations additionally take the [`ContentEditor`] to
//! capture text with, chosen by the caller per invocation.

use crate::commands::{self, AppPaths, CmdResult};
use crate::editor::ContentEditor;
use crate::error::Result;
use crate::store::PromptStore;
use crate::tags::TagFilter;
use std::path::Path;

pub struct PromptApi<S: PromptStore> {
    store: S,
    paths: AppPaths,
}

impl<S: PromptStore> PromptApi<S> {
    pub fn new(store: S, paths: AppPaths) -> Self {
        Self { store, paths }
    }

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    pub fn add_prompt<E: ContentEditor>(
        &mut self,
        editor: &mut E,
        name: &str,
        tags: &str,
    ) -> Result<CmdResult> {
        commands::add::run(&mut self.store, editor, name, tags)
    }

    pub fn edit_prompt<E: ContentEditor>(
        &mut self,
        editor: &mut E,
        name: &str,
        tags: Option<&str>,
    ) -> Result<CmdResult> {
        commands::edit::run(&mut self.store, editor, name, tags)
    }

    pub fn delete_prompt(&mut self, name: &str) -> Result<CmdResult> {
        commands::delete::run(&mut self.store, name)
    }

    pub fn list_prompts(&self, filter: Option<&TagFilter>) -> Result<CmdResult> {
        commands::list::run(&self.store, filter)
    }

    pub fn search_prompts(&self, query: &str) -> Result<CmdResult> {
        commands::search::run(&self.store, query)
    }

    pub fn export_prompts(&self, path: &Path) -> Result<CmdResult> {
        commands::export::run(&self.store, path)
    }

    pub fn import_prompts(&mut self, path: &Path) -> Result<CmdResult> {
        commands::import::run(&mut self.store, path)
    }

    pub fn backup(&self, dest: &Path) -> Result<CmdResult> {
        commands::backup::backup(&self.store, dest)
    }

    pub fn restore(&mut self, src: &Path) -> Result<CmdResult> {
        commands::backup::restore(&mut self.store, src)
    }

    pub fn config(&self, action: commands::config::ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.paths, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::fixtures::ScriptedEditor;
    use crate::error::PromptError;
    use crate::store::memory::InMemoryStore;
    use std::path::PathBuf;

    fn make_api() -> PromptApi<InMemoryStore> {
        let root = PathBuf::from("/tmp/p-api-tests");
        PromptApi::new(
            InMemoryStore::new(),
            AppPaths {
                db_path: root.join("prompts.db"),
                config_dir: root,
            },
        )
    }

    #[test]
    fn add_list_delete_flow() {
        let mut api = make_api();
        api.add_prompt(&mut ScriptedEditor::submitting("Hi there"), "greeting", "b,a")
            .unwrap();

        let listed = api.list_prompts(Some(&TagFilter::parse("a"))).unwrap();
        assert_eq!(listed.listed_prompts.len(), 1);
        assert_eq!(listed.listed_prompts[0].tags, "a,b");

        api.delete_prompt("greeting").unwrap();
        assert!(matches!(
            api.delete_prompt("greeting"),
            Err(PromptError::NotFound(_))
        ));
    }

    #[test]
    fn edit_passes_current_content_to_editor() {
        let mut api = make_api();
        api.add_prompt(&mut ScriptedEditor::submitting("v1"), "doc", "")
            .unwrap();

        let mut editor = ScriptedEditor::submitting("v2");
        api.edit_prompt(&mut editor, "doc", Some("t")).unwrap();
        assert_eq!(editor.seen, vec!["v1".to_string()]);

        let found = api.search_prompts("doc").unwrap();
        assert_eq!(found.listed_prompts[0].content, "v2");
        assert_eq!(found.listed_prompts[0].tags, "t");
    }
}
