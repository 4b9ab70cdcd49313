//! # Command Layer
//!
//! One module per operation, each exposing a `run` function that takes the
//! store (and an editor, where content is captured) and returns a
//! [`CmdResult`]. Commands never print: user-facing outcomes are returned
//! as [`CmdMessage`]s and the prompts they touched or listed.

use crate::config::PromptConfig;
use crate::model::Prompt;
use std::path::PathBuf;

pub mod add;
pub mod backup;
pub mod config;
pub mod delete;
pub mod edit;
pub mod export;
pub mod import;
pub mod list;
pub mod search;

/// Where this installation keeps its files.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub db_path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_prompts: Vec<Prompt>,
    pub listed_prompts: Vec<Prompt>,
    pub config: Option<PromptConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_affected_prompts(mut self, prompts: Vec<Prompt>) -> Self {
        self.affected_prompts = prompts;
        self
    }

    pub fn with_listed_prompts(mut self, prompts: Vec<Prompt>) -> Self {
        self.listed_prompts = prompts;
        self
    }

    pub fn with_config(mut self, config: PromptConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Whether the command changed nothing.
    pub fn is_noop(&self) -> bool {
        self.affected_prompts.is_empty()
    }
}
