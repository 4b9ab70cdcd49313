use crate::api::PromptApi;
use crate::commands::AppPaths;
use crate::config::PromptConfig;
use crate::error::{PromptError, Result};
use crate::store::sqlite::{SqliteStore, DB_FILE_NAME};
use directories::ProjectDirs;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides the application directory.
pub const CONFIG_DIR_ENV: &str = "P_CONFIG_DIR";

pub struct PromptContext {
    pub api: PromptApi<SqliteStore>,
    pub config: PromptConfig,
}

/// The application directory: `$P_CONFIG_DIR` when set and non-empty,
/// otherwise the platform config dir (`~/.config/p` on Linux).
pub fn resolve_config_dir(env_override: Option<OsString>) -> Result<PathBuf> {
    if let Some(dir) = env_override.filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("", "", "p")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| PromptError::Api("could not determine the config directory".to_string()))
}

/// Creates `dir` (and parents) if missing, owner-only on Unix.
#[cfg(unix)]
pub fn ensure_private_dir(dir: &Path) -> Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    if !dir.exists() {
        fs::DirBuilder::new().recursive(true).mode(0o700).create(dir)?;
    }
    Ok(())
}

#[cfg(not(unix))]
pub fn ensure_private_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    Ok(())
}

pub fn initialize() -> Result<PromptContext> {
    let dir = resolve_config_dir(env::var_os(CONFIG_DIR_ENV))?;
    initialize_in(&dir)
}

/// Wires config and store rooted at `dir`.
pub fn initialize_in(dir: &Path) -> Result<PromptContext> {
    ensure_private_dir(dir)?;

    let config = PromptConfig::load(dir).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable config, using defaults");
        PromptConfig::default()
    });

    let db_path = dir.join(DB_FILE_NAME);
    let store = SqliteStore::open(&db_path)?;
    let paths = AppPaths {
        config_dir: dir.to_path_buf(),
        db_path,
    };

    Ok(PromptContext {
        api: PromptApi::new(store, paths),
        config,
    })
}
