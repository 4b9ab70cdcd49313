use crate::error::{PromptError, Result};

pub const MAX_NAME_LEN: usize = 255;
pub const MAX_CONTENT_LEN: usize = 10_000;

/// Names are the external key of every operation: non-empty, at most
/// [`MAX_NAME_LEN`] characters.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(PromptError::Validation(
            "prompt name cannot be empty".to_string(),
        ));
    }
    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(PromptError::Validation(format!(
            "prompt name too long ({} chars), maximum {} characters",
            len, MAX_NAME_LEN
        )));
    }
    Ok(())
}

/// Content is measured after trimming; whitespace-only content is empty.
pub fn validate_content(content: &str) -> Result<()> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(PromptError::Validation(
            "prompt content cannot be empty".to_string(),
        ));
    }
    let len = trimmed.chars().count();
    if len > MAX_CONTENT_LEN {
        return Err(PromptError::Validation(format!(
            "prompt content too long ({} chars), maximum {} characters",
            len, MAX_CONTENT_LEN
        )));
    }
    Ok(())
}
