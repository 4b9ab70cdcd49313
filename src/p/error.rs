use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("{0}")]
    Validation(String),

    #[error("prompt name '{0}' already exists")]
    NameConflict(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("No editor found: {0}")]
    EditorUnavailable(String),

    #[error("Editor failed: {0}")]
    EditorFailed(String),

    #[error("Terminal unavailable: {0}")]
    TerminalUnavailable(String),

    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Api(String),
}

impl PromptError {
    pub fn prompt_not_found(name: &str) -> Self {
        PromptError::NotFound(format!("prompt '{}'", name))
    }
}

pub type Result<T> = std::result::Result<T, PromptError>;
