//! # Content Editors
//!
//! Prompt text is obtained through the [`ContentEditor`] trait. Commands are
//! generic over it, so tests pass a scripted editor and the CLI picks a real
//! one at runtime.
//!
//! - [`terminal::TerminalEditor`]: Full-screen editor drawn in the terminal.
//!   Its key handling lives in [`session::EditorSession`], a pure state
//!   machine over [`buffer::TextBuffer`].
//! - [`external::ExternalEditor`]: Hands a temporary file to the user's
//!   `$EDITOR`.
//!
//! Cancelling is a normal outcome, not an error: callers decide what a
//! cancelled edit means for them.

use crate::config::PromptConfig;
use crate::error::Result;

pub mod buffer;
pub mod external;
pub mod session;
pub mod terminal;

pub use external::ExternalEditor;
pub use terminal::TerminalEditor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Submitted(String),
    Cancelled,
}

pub trait ContentEditor {
    /// Lets the user edit `initial` and reports what they decided.
    fn edit(&mut self, initial: &str) -> Result<EditOutcome>;
}

/// The editor selected for one invocation.
pub enum EditorChoice {
    Terminal(TerminalEditor),
    External(ExternalEditor),
}

impl EditorChoice {
    /// Picks the external editor when asked for on the command line or in
    /// the config, the terminal editor otherwise.
    pub fn select(use_external: bool, config: &PromptConfig) -> Self {
        if use_external || config.external_editor {
            EditorChoice::External(ExternalEditor::new(config.editor.clone()))
        } else {
            EditorChoice::Terminal(TerminalEditor::default())
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, EditorChoice::External(_))
    }
}

impl ContentEditor for EditorChoice {
    fn edit(&mut self, initial: &str) -> Result<EditOutcome> {
        match self {
            EditorChoice::Terminal(editor) => editor.edit(initial),
            EditorChoice::External(editor) => editor.edit(initial),
        }
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::error::PromptError;

    enum Script {
        Submit(String),
        Cancel,
        Fail(String),
    }

    /// Replays a fixed answer and records what it was shown.
    pub struct ScriptedEditor {
        script: Script,
        pub seen: Vec<String>,
    }

    impl ScriptedEditor {
        pub fn submitting(text: &str) -> Self {
            Self {
                script: Script::Submit(text.to_string()),
                seen: Vec::new(),
            }
        }

        pub fn cancelling() -> Self {
            Self {
                script: Script::Cancel,
                seen: Vec::new(),
            }
        }

        pub fn failing(reason: &str) -> Self {
            Self {
                script: Script::Fail(reason.to_string()),
                seen: Vec::new(),
            }
        }

        pub fn was_invoked(&self) -> bool {
            !self.seen.is_empty()
        }
    }

    impl ContentEditor for ScriptedEditor {
        fn edit(&mut self, initial: &str) -> Result<EditOutcome> {
            self.seen.push(initial.to_string());
            match &self.script {
                Script::Submit(text) => Ok(EditOutcome::Submitted(text.clone())),
                Script::Cancel => Ok(EditOutcome::Cancelled),
                Script::Fail(reason) => Err(PromptError::EditorFailed(reason.clone())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_honours_flag_and_config() {
        let config = PromptConfig::default();
        assert!(!EditorChoice::select(false, &config).is_external());
        assert!(EditorChoice::select(true, &config).is_external());

        let config = PromptConfig {
            external_editor: true,
            ..PromptConfig::default()
        };
        assert!(EditorChoice::select(false, &config).is_external());
    }
}
