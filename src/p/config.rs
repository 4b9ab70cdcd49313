use crate::error::{PromptError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "config.json";

/// User settings, stored as `config.json` next to the prompt database.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromptConfig {
    /// Editor command used by `-e`, ahead of `$EDITOR` and `$VISUAL`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,

    /// Use the external editor even without `-e`.
    #[serde(default)]
    pub external_editor: bool,
}

/// Keys accepted by `p config`, in display order.
pub const CONFIG_KEYS: [&str; 2] = ["editor", "external-editor"];

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

impl PromptConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);
        if !config_path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&config_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// The display value of a key, or `None` for unknown keys.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "editor" => Some(self.editor.clone().unwrap_or_default()),
            "external-editor" => Some(self.external_editor.to_string()),
            _ => None,
        }
    }

    /// Sets a key from its string form. An empty `editor` clears it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "editor" => {
                let value = value.trim();
                self.editor = (!value.is_empty()).then(|| value.to_string());
                Ok(())
            }
            "external-editor" => {
                self.external_editor = parse_bool(value).ok_or_else(|| {
                    PromptError::Validation(format!(
                        "invalid value for external-editor: '{}' (expected true or false)",
                        value
                    ))
                })?;
                Ok(())
            }
            _ => Err(PromptError::Validation(format!(
                "unknown config key: '{}' (known keys: {})",
                key,
                CONFIG_KEYS.join(", ")
            ))),
        }
    }
}
