use crate::commands::{AppPaths, CmdMessage, CmdResult};
use crate::config::PromptConfig;
use crate::error::{PromptError, Result};

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &AppPaths, action: ConfigAction) -> Result<CmdResult> {
    let dir = &paths.config_dir;
    let mut config = PromptConfig::load(dir)?;
    match action {
        ConfigAction::ShowAll => Ok(CmdResult::default().with_config(config)),
        ConfigAction::ShowKey(key) => {
            let value = config.get(&key).ok_or_else(|| {
                PromptError::Validation(format!("unknown config key: '{}'", key))
            })?;
            Ok(CmdResult::default().with_message(CmdMessage::info(value)))
        }
        ConfigAction::Set(key, value) => {
            config.set(&key, &value)?;
            config.save(dir)?;
            let shown = config.get(&key).unwrap_or(value);
            let shown = if shown.is_empty() { "(unset)".to_string() } else { shown };
            Ok(CmdResult::default()
                .with_message(CmdMessage::success(format!("{} set to {}", key, shown)))
                .with_config(config))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn paths(dir: &TempDir) -> AppPaths {
        AppPaths {
            config_dir: dir.path().to_path_buf(),
            db_path: dir.path().join("prompts.db"),
        }
    }

    #[test]
    fn set_persists_and_show_reads_back() {
        let dir = TempDir::new().unwrap();
        let paths = paths(&dir);

        let result = run(
            &paths,
            ConfigAction::Set("editor".into(), "nano -w".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].content, "editor set to nano -w");

        let shown = run(&paths, ConfigAction::ShowKey("editor".into())).unwrap();
        assert_eq!(shown.messages[0].content, "nano -w");

        let all = run(&paths, ConfigAction::ShowAll).unwrap();
        assert_eq!(all.config.unwrap().editor.as_deref(), Some("nano -w"));
    }

    #[test]
    fn clearing_the_editor() {
        let dir = TempDir::new().unwrap();
        let paths = paths(&dir);
        run(&paths, ConfigAction::Set("editor".into(), "vim".into())).unwrap();

        let result = run(&paths, ConfigAction::Set("editor".into(), "".into())).unwrap();
        assert_eq!(result.messages[0].content, "editor set to (unset)");
        assert_eq!(PromptConfig::load(dir.path()).unwrap().editor, None);
    }

    #[test]
    fn unknown_keys_are_errors() {
        let dir = TempDir::new().unwrap();
        let paths = paths(&dir);
        assert!(run(&paths, ConfigAction::ShowKey("theme".into())).is_err());
        assert!(run(&paths, ConfigAction::Set("theme".into(), "dark".into())).is_err());
        assert!(!dir.path().join(crate::config::CONFIG_FILENAME).exists());
    }
}
