//! # Storage Layer
//!
//! The [`PromptStore`] trait is the keyed-record store the command layer talks
//! to. Records are addressed by their unique `name`; ids are assigned by the
//! store and never change.
//!
//! ## Implementations
//!
//! - [`sqlite::SqliteStore`]: Production storage, one SQLite file per user
//!   (`prompts.db` in the application config directory).
//! - [`memory::InMemoryStore`]: In-memory storage for testing.
//!
//! Every method is a single statement against the backend. Nothing here
//! spans more than one write, so there are no explicit transactions.
//!
//! ## Schema
//!
//! ```text
//! prompts(id INTEGER PRIMARY KEY AUTOINCREMENT,
//!         name TEXT NOT NULL UNIQUE,
//!         prompt TEXT NOT NULL,
//!         tags TEXT)
//! ```
//!
//! Callers are expected to pass already-normalized tags; the store persists
//! what it is given.

use crate::error::Result;
use crate::model::Prompt;
use crate::tags::TagFilter;
use std::path::Path;

pub mod memory;
pub mod sqlite;

pub trait PromptStore {
    /// Insert a new prompt and return its id.
    /// Fails with `NameConflict` if the name is taken.
    fn insert(&mut self, name: &str, content: &str, tags: &str) -> Result<i64>;

    /// Fetch a prompt by name. Fails with `NotFound`.
    fn get_by_name(&self, name: &str) -> Result<Prompt>;

    /// Replace content and tags of an existing prompt. Fails with `NotFound`.
    fn update(&mut self, name: &str, content: &str, tags: &str) -> Result<()>;

    /// Remove a prompt permanently. Fails with `NotFound`.
    fn delete(&mut self, name: &str) -> Result<()>;

    /// All prompts, ordered by name.
    fn list(&self) -> Result<Vec<Prompt>>;

    /// Prompts matching a tag filter, ordered by name.
    fn list_filtered(&self, filter: &TagFilter) -> Result<Vec<Prompt>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|p| filter.matches(p))
            .collect())
    }

    /// Whether a prompt with this name exists.
    fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.list()?.iter().any(|p| p.name == name))
    }

    /// Write a full copy of the store to `dest`.
    fn backup(&self, dest: &Path) -> Result<()>;

    /// Replace the store contents with the copy at `src`.
    fn restore(&mut self, src: &Path) -> Result<()>;
}
