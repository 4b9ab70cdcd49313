use super::{ContentEditor, EditOutcome};
use crate::error::{PromptError, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Tried in order when neither the config nor the environment names an editor.
pub const FALLBACK_EDITORS: [&str; 3] = ["vim", "nano", "vi"];

/// Edits prompt text in the user's own editor through a temporary file.
///
/// The result is trimmed. The editor cannot express "cancel", so every run
/// that exits cleanly counts as a submission.
#[derive(Debug, Clone, Default)]
pub struct ExternalEditor {
    configured: Option<String>,
}

/// Picks the editor command: configured value, `$EDITOR`, `$VISUAL`, then
/// the first fallback found by `on_path`. Empty values are skipped.
pub fn resolve_editor<F>(
    configured: Option<&str>,
    env_editor: Option<String>,
    env_visual: Option<String>,
    on_path: F,
) -> Option<String>
where
    F: Fn(&str) -> bool,
{
    let named = configured
        .map(str::to_string)
        .into_iter()
        .chain(env_editor)
        .chain(env_visual)
        .find(|cmd| !cmd.trim().is_empty());
    if named.is_some() {
        return named;
    }
    FALLBACK_EDITORS
        .iter()
        .find(|name| on_path(**name))
        .map(|name| (*name).to_string())
}

fn find_on_path(program: &str) -> bool {
    which::which(program).is_ok()
}

/// Splits an editor command like `code --wait` into program and arguments.
fn split_command(command: &str) -> Vec<String> {
    command.split_whitespace().map(str::to_string).collect()
}

impl ExternalEditor {
    pub fn new(configured: Option<String>) -> Self {
        Self { configured }
    }

    /// The command line that will be run, without the file argument.
    pub fn command(&self) -> Result<Vec<String>> {
        let resolved = resolve_editor(
            self.configured.as_deref(),
            env::var("EDITOR").ok(),
            env::var("VISUAL").ok(),
            find_on_path,
        )
        .ok_or_else(|| {
            PromptError::EditorUnavailable(
                "set $EDITOR or run `p config editor <command>`".to_string(),
            )
        })?;
        Ok(split_command(&resolved))
    }

    fn run(&self, argv: &[String], path: &Path) -> Result<()> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| PromptError::EditorUnavailable("empty editor command".to_string()))?;
        tracing::debug!(editor = %program, file = %path.display(), "launching external editor");

        let status = Command::new(program)
            .args(args)
            .arg(path)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| PromptError::EditorFailed(format!("failed to launch '{}': {}", program, e)))?;

        if !status.success() {
            return Err(PromptError::EditorFailed(format!(
                "'{}' exited with {}",
                program, status
            )));
        }
        Ok(())
    }
}

fn temp_file_error(action: &str, err: std::io::Error) -> PromptError {
    PromptError::EditorFailed(format!("could not {} the temporary file: {}", action, err))
}

impl ContentEditor for ExternalEditor {
    fn edit(&mut self, initial: &str) -> Result<EditOutcome> {
        let argv = self.command()?;

        let mut file = tempfile::Builder::new()
            .prefix("p-prompt-")
            .suffix(".txt")
            .tempfile()
            .map_err(|e| temp_file_error("create", e))?;
        file.write_all(initial.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| temp_file_error("write", e))?;
        // Close our handle so the editor is free to replace the file. The
        // path is still removed when it goes out of scope, on every return.
        let path = file.into_temp_path();

        self.run(&argv, &path)?;

        let edited = fs::read_to_string(&path).map_err(|e| temp_file_error("read back", e))?;
        Ok(EditOutcome::Submitted(edited.trim().to_string()))
    }
}
