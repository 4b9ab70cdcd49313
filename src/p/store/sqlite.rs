use super::PromptStore;
use crate::error::{PromptError, Result};
use crate::model::Prompt;
use rusqlite::backup::Progress;
use rusqlite::{params, Connection, DatabaseName, ErrorCode, OptionalExtension};
use std::fs;
use std::path::Path;

pub const DB_FILE_NAME: &str = "prompts.db";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS prompts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    prompt TEXT NOT NULL,
    tags TEXT
);
";

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (creating if needed) the store file at `path`.
    ///
    /// A new file is created with owner-only permissions on Unix, since
    /// prompts may hold sensitive text.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            create_private_file(path)?;
        }
        let conn = Connection::open(path)?;
        tracing::debug!(path = %path.display(), "opened prompt store");
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }
}

#[cfg(unix)]
fn create_private_file(path: &Path) -> Result<()> {
    use std::os::unix::fs::OpenOptionsExt;
    fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(path)?;
    Ok(())
}

#[cfg(not(unix))]
fn create_private_file(path: &Path) -> Result<()> {
    fs::OpenOptions::new().write(true).create_new(true).open(path)?;
    Ok(())
}

#[cfg(unix)]
fn restrict_to_owner(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &Path) -> Result<()> {
    Ok(())
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => {
            e.code == ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        }
        _ => false,
    }
}

fn row_to_prompt(row: &rusqlite::Row<'_>) -> rusqlite::Result<Prompt> {
    Ok(Prompt {
        id: row.get(0)?,
        name: row.get(1)?,
        content: row.get(2)?,
        tags: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
    })
}

impl PromptStore for SqliteStore {
    fn insert(&mut self, name: &str, content: &str, tags: &str) -> Result<i64> {
        let res = self.conn.execute(
            "INSERT INTO prompts (name, prompt, tags) VALUES (?1, ?2, ?3)",
            params![name, content, tags],
        );
        match res {
            Ok(_) => {
                let id = self.conn.last_insert_rowid();
                tracing::debug!(id, prompt = name, "inserted prompt");
                Ok(id)
            }
            Err(e) if is_unique_violation(&e) => Err(PromptError::NameConflict(name.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    fn get_by_name(&self, name: &str) -> Result<Prompt> {
        self.conn
            .query_row(
                "SELECT id, name, prompt, tags FROM prompts WHERE name = ?1",
                params![name],
                row_to_prompt,
            )
            .optional()?
            .ok_or_else(|| PromptError::prompt_not_found(name))
    }

    fn update(&mut self, name: &str, content: &str, tags: &str) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE prompts SET prompt = ?1, tags = ?2 WHERE name = ?3",
            params![content, tags, name],
        )?;
        if changed == 0 {
            return Err(PromptError::prompt_not_found(name));
        }
        tracing::debug!(prompt = name, "updated prompt");
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM prompts WHERE name = ?1", params![name])?;
        if changed == 0 {
            return Err(PromptError::prompt_not_found(name));
        }
        tracing::debug!(prompt = name, "deleted prompt");
        Ok(())
    }

    fn list(&self) -> Result<Vec<Prompt>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, prompt, tags FROM prompts ORDER BY name")?;
        let prompts = stmt
            .query_map([], row_to_prompt)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(prompts)
    }

    fn contains(&self, name: &str) -> Result<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM prompts WHERE name = ?1",
                params![name],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn backup(&self, dest: &Path) -> Result<()> {
        self.conn
            .backup(DatabaseName::Main, dest, None::<fn(Progress)>)?;
        restrict_to_owner(dest)?;
        tracing::debug!(dest = %dest.display(), "store backed up");
        Ok(())
    }

    fn restore(&mut self, src: &Path) -> Result<()> {
        if !src.is_file() {
            return Err(PromptError::NotFound(format!(
                "backup file '{}'",
                src.display()
            )));
        }
        self.conn
            .restore(DatabaseName::Main, src, None::<fn(Progress)>)?;
        // Backups from older layouts may lack the table entirely.
        self.conn.execute_batch(SCHEMA)?;
        tracing::debug!(src = %src.display(), "store restored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, SqliteStore) {
        let dir = TempDir::new().unwrap();
        let store = SqliteStore::open(dir.path().join(DB_FILE_NAME)).unwrap();
        (dir, store)
    }

    #[test]
    fn insert_then_fetch_round_trips() {
        let (_dir, mut store) = temp_store();
        let id = store.insert("greeting", "Hi there", "a,b").unwrap();

        let prompt = store.get_by_name("greeting").unwrap();
        assert_eq!(prompt.id, id);
        assert_eq!(prompt.content, "Hi there");
        assert_eq!(prompt.tags, "a,b");
    }

    #[test]
    fn duplicate_name_is_a_conflict() {
        let (_dir, mut store) = temp_store();
        store.insert("test", "content1", "tag1").unwrap();
        let err = store.insert("test", "content2", "tag2").unwrap_err();
        assert!(matches!(err, PromptError::NameConflict(name) if name == "test"));
    }

    #[test]
    fn missing_names_are_not_found() {
        let (_dir, mut store) = temp_store();
        assert!(matches!(store.get_by_name("x"), Err(PromptError::NotFound(_))));
        assert!(matches!(store.update("x", "c", ""), Err(PromptError::NotFound(_))));
        assert!(matches!(store.delete("x"), Err(PromptError::NotFound(_))));
    }

    #[test]
    fn delete_then_fetch_is_not_found() {
        let (_dir, mut store) = temp_store();
        store.insert("gone", "bye", "").unwrap();
        store.delete("gone").unwrap();
        assert!(matches!(store.get_by_name("gone"), Err(PromptError::NotFound(_))));
        assert!(!store.contains("gone").unwrap());
    }

    #[test]
    fn update_replaces_content_and_tags() {
        let (_dir, mut store) = temp_store();
        store.insert("p", "old", "a").unwrap();
        store.update("p", "new", "b,c").unwrap();
        let prompt = store.get_by_name("p").unwrap();
        assert_eq!(prompt.content, "new");
        assert_eq!(prompt.tags, "b,c");
    }

    #[test]
    fn list_is_ordered_by_name() {
        let (_dir, mut store) = temp_store();
        store.insert("zeta", "z", "").unwrap();
        store.insert("alpha", "a", "").unwrap();
        let names: Vec<_> = store.list().unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn data_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DB_FILE_NAME);
        {
            let mut store = SqliteStore::open(&path).unwrap();
            store.insert("kept", "text", "t").unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.get_by_name("kept").unwrap().content, "text");
    }

    #[cfg(unix)]
    #[test]
    fn store_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let (dir, _store) = temp_store();
        let mode = fs::metadata(dir.path().join(DB_FILE_NAME))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn backup_and_restore() {
        let (dir, mut store) = temp_store();
        store.insert("one", "first", "").unwrap();
        let backup = dir.path().join("backup.db");
        store.backup(&backup).unwrap();

        store.delete("one").unwrap();
        store.insert("two", "second", "").unwrap();

        store.restore(&backup).unwrap();
        let names: Vec<_> = store.list().unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["one"]);
    }

    #[cfg(unix)]
    #[test]
    fn backup_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let (dir, store) = temp_store();
        let backup = dir.path().join("backup.db");
        fs::write(&backup, "").unwrap();
        fs::set_permissions(&backup, fs::Permissions::from_mode(0o644)).unwrap();

        store.backup(&backup).unwrap();
        let mode = fs::metadata(&backup).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn restore_from_missing_file_is_not_found() {
        let (dir, mut store) = temp_store();
        let err = store.restore(&dir.path().join("nope.db")).unwrap_err();
        assert!(matches!(err, PromptError::NotFound(_)));
    }
}
