use super::PromptStore;
use crate::error::{PromptError, Result};
use crate::model::Prompt;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// In-memory storage for testing and development.
/// Does NOT persist data; `backup`/`restore` go through a JSON snapshot.
#[derive(Default)]
pub struct InMemoryStore {
    prompts: BTreeMap<String, Prompt>,
    next_id: i64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PromptStore for InMemoryStore {
    fn insert(&mut self, name: &str, content: &str, tags: &str) -> Result<i64> {
        if self.prompts.contains_key(name) {
            return Err(PromptError::NameConflict(name.to_string()));
        }
        self.next_id += 1;
        let prompt = Prompt::new(self.next_id, name, content, tags);
        self.prompts.insert(name.to_string(), prompt);
        Ok(self.next_id)
    }

    fn get_by_name(&self, name: &str) -> Result<Prompt> {
        self.prompts
            .get(name)
            .cloned()
            .ok_or_else(|| PromptError::prompt_not_found(name))
    }

    fn update(&mut self, name: &str, content: &str, tags: &str) -> Result<()> {
        let prompt = self
            .prompts
            .get_mut(name)
            .ok_or_else(|| PromptError::prompt_not_found(name))?;
        prompt.content = content.to_string();
        prompt.tags = tags.to_string();
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        self.prompts
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| PromptError::prompt_not_found(name))
    }

    fn list(&self) -> Result<Vec<Prompt>> {
        // BTreeMap keeps names in order.
        Ok(self.prompts.values().cloned().collect())
    }

    fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.prompts.contains_key(name))
    }

    fn backup(&self, dest: &Path) -> Result<()> {
        let snapshot: Vec<&Prompt> = self.prompts.values().collect();
        fs::write(dest, serde_json::to_string(&snapshot)?)?;
        Ok(())
    }

    fn restore(&mut self, src: &Path) -> Result<()> {
        if !src.is_file() {
            return Err(PromptError::NotFound(format!(
                "backup file '{}'",
                src.display()
            )));
        }
        let snapshot: Vec<Prompt> = serde_json::from_str(&fs::read_to_string(src)?)?;
        self.next_id = snapshot.iter().map(|p| p.id).max().unwrap_or(0);
        self.prompts = snapshot.into_iter().map(|p| (p.name.clone(), p)).collect();
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_prompt(mut self, name: &str, content: &str, tags: &str) -> Self {
            self.store
                .insert(name, content, &crate::tags::normalize(tags))
                .unwrap();
            self
        }

        pub fn with_prompts(mut self, count: usize) -> Self {
            for i in 0..count {
                let name = format!("prompt-{}", i + 1);
                let content = format!("Content for prompt {}", i + 1);
                self.store.insert(&name, &content, "").unwrap();
            }
            self
        }
    }
}
