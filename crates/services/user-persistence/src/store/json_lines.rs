//! JSON-lines file store.
//!
//! Every call appends one JSON object followed by a newline, so the file is
//! an append-only log of saves. Reading back collapses the log: the last line
//! for an id wins, and ids keep the position of their first line.
//!
//! An unterminated final line that does not parse is the remains of an
//! interrupted append. It is never a record: `read_all` skips it and the
//! next `store` truncates it before appending. Malformed complete lines are
//! reported as errors.

use std::io::SeekFrom;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tokio::sync::Mutex;

use common::{AppError, AppResult};
use domain::User;

use super::Store;

/// File-backed store writing one user per line.
#[derive(Debug)]
pub struct JsonLinesStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonLinesStore {
    /// Create a store appending to `path`. The file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read back the latest record for every saved id.
    ///
    /// A missing file reads as empty.
    pub async fn read_all(&self) -> AppResult<Vec<User>> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let (complete, tail) = match contents.rfind('\n') {
            Some(pos) => contents.split_at(pos + 1),
            None => ("", contents.as_str()),
        };

        let mut users = Vec::new();
        for line in complete.lines().filter(|line| !line.trim().is_empty()) {
            let user = serde_json::from_str::<User>(line).map_err(AppError::from)?;
            keep_latest(&mut users, user);
        }

        if !tail.trim().is_empty() {
            match serde_json::from_str::<User>(tail) {
                Ok(user) => keep_latest(&mut users, user),
                Err(e) => tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Skipping partial trailing line"
                ),
            }
        }

        Ok(users)
    }

    /// Make sure the file ends on a line boundary before appending.
    async fn repair_tail(&self) -> AppResult<()> {
        let mut file = match OpenOptions::new().read(true).write(true).open(&self.path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        if file.metadata().await?.len() == 0 {
            return Ok(());
        }
        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1)).await?;
        file.read_exact(&mut last).await?;
        if last[0] == b'\n' {
            return Ok(());
        }

        let bytes = fs::read(&self.path).await?;
        let keep = bytes.iter().rposition(|b| *b == b'\n').map_or(0, |pos| pos + 1);

        if serde_json::from_slice::<User>(&bytes[keep..]).is_ok() {
            file.seek(SeekFrom::End(0)).await?;
            file.write_all(b"\n").await?;
        } else {
            tracing::warn!(
                path = %self.path.display(),
                dropped_bytes = bytes.len() - keep,
                "Truncating partial trailing line"
            );
            file.set_len(keep as u64).await?;
        }
        file.flush().await?;
        Ok(())
    }
}

fn keep_latest(users: &mut Vec<User>, user: User) {
    match users.iter_mut().find(|existing| existing.id == user.id) {
        Some(existing) => *existing = user,
        None => users.push(user),
    }
}

#[async_trait]
impl Store for JsonLinesStore {
    async fn store(&self, user: &User) -> AppResult<()> {
        let mut line = serde_json::to_vec(user)?;
        line.push(b'\n');

        // Appends from concurrent callers must not interleave
        let _guard = self.write_lock.lock().await;
        self.repair_tail().await?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&line).await?;
        file.flush().await?;

        tracing::debug!(user_id = user.id, path = %self.path.display(), "User appended to file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("users-{}.jsonl", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_read_all_missing_file_is_empty() {
        let store = JsonLinesStore::new(temp_path());
        assert!(store.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_appends_one_line_per_save() {
        let path = temp_path();
        let store = JsonLinesStore::new(&path);

        store.store(&User::new(42, "ada@example.com", "Ada")).await.unwrap();
        store.store(&User::new(43, "bob@example.com", "Bob")).await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);

        let users = store.read_all().await.unwrap();
        assert_eq!(users[0].id, 42);
        assert_eq!(users[1].id, 43);

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_store_into_missing_directory_fails() {
        let path = temp_path().join("nested").join("users.jsonl");
        let store = JsonLinesStore::new(path);

        let err = store.store(&User::new(1, "a@example.com", "A")).await.unwrap_err();
        assert!(err.is_persistence_failure());
    }

    #[tokio::test]
    async fn test_read_all_keeps_latest_line_per_id() {
        let path = temp_path();
        let store = JsonLinesStore::new(&path);

        store.store(&User::new(1, "a@example.com", "A")).await.unwrap();
        store.store(&User::new(2, "b@example.com", "B")).await.unwrap();
        store.store(&User::new(1, "a2@example.com", "A2")).await.unwrap();

        let users = store.read_all().await.unwrap();
        let emails: Vec<&str> = users.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails, vec!["a2@example.com", "b@example.com"]);
        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 3);

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_read_all_skips_partial_trailing_line() {
        let path = temp_path();
        let store = JsonLinesStore::new(&path);
        store.store(&User::new(1, "a@example.com", "A")).await.unwrap();

        let mut contents = std::fs::read_to_string(&path).unwrap();
        contents.push_str("{\"id\":2,\"email\":\"b@ex");
        std::fs::write(&path, contents).unwrap();

        let users = store.read_all().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, 1);

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_store_truncates_partial_trailing_line() {
        let path = temp_path();
        let store = JsonLinesStore::new(&path);
        store.store(&User::new(1, "a@example.com", "A")).await.unwrap();

        let mut contents = std::fs::read_to_string(&path).unwrap();
        contents.push_str("{\"id\":2,\"em");
        std::fs::write(&path, contents).unwrap();

        store.store(&User::new(3, "c@example.com", "C")).await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        let ids: Vec<i64> = store.read_all().await.unwrap().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 3]);

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_store_terminates_complete_unterminated_line() {
        let path = temp_path();
        let user = User::new(1, "a@example.com", "A");
        std::fs::write(&path, serde_json::to_string(&user).unwrap()).unwrap();

        let store = JsonLinesStore::new(&path);
        store.store(&User::new(2, "b@example.com", "B")).await.unwrap();

        let ids: Vec<i64> = store.read_all().await.unwrap().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2]);

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_read_all_reports_malformed_complete_line() {
        let path = temp_path();
        std::fs::write(&path, "not json\n").unwrap();

        let err = JsonLinesStore::new(&path).read_all().await.unwrap_err();
        assert!(matches!(err, AppError::Serialization(_)));

        std::fs::remove_file(path).ok();
    }
}
