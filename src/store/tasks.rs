//! Keyed task documents, one JSON file per id.

use std::io::Write;
use std::path::PathBuf;

use async_trait::async_trait;

use super::{Task, TaskRepository, valid_task_id};
use crate::Error;
use crate::crypto::generate_token;

/// Each task is stored as `{id}.json` in the collection directory.
#[derive(Debug, Clone)]
pub struct FileTaskRepository {
    directory: PathBuf,
}

impl FileTaskRepository {
    /// Creates the repository, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the directory cannot be created.
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self, Error> {
        let dir = directory.into();
        std::fs::create_dir_all(&dir)
            .map_err(|e| Error::Storage(format!("failed to create task directory: {e}")))?;
        Ok(Self { directory: dir })
    }

    fn task_path(&self, id: &str) -> PathBuf {
        self.directory.join(format!("{id}.json"))
    }
}

#[async_trait]
impl TaskRepository for FileTaskRepository {
    async fn list(&self) -> Result<Vec<Task>, Error> {
        let entries = std::fs::read_dir(&self.directory)
            .map_err(|e| Error::Storage(format!("failed to read task directory: {e}")))?;

        let mut tasks = Vec::new();

        for entry in entries {
            let entry = entry
                .map_err(|e| Error::Storage(format!("failed to read task directory: {e}")))?;
            let path = entry.path();

            if path.extension().is_some_and(|ext| ext == "json") {
                // All-or-nothing: a corrupt record fails the whole listing
                // rather than silently dropping it.
                let content = std::fs::read_to_string(&path).map_err(|e| {
                    Error::Storage(format!("failed to read task file {}: {e}", path.display()))
                })?;

                let task: Task = serde_json::from_str(&content).map_err(|e| {
                    Error::Storage(format!("corrupt task file {}: {e}", path.display()))
                })?;

                tasks.push(task);
            }
        }

        Ok(tasks)
    }

    async fn create(&self, task: &Task) -> Result<(), Error> {
        if !valid_task_id(&task.id) {
            return Err(Error::Validation("task id must be ASCII alphanumeric".to_owned()));
        }

        let content = serde_json::to_string_pretty(task)
            .map_err(|e| Error::Storage(format!("failed to serialize task: {e}")))?;

        // Write-then-rename: concurrent writers to the same id race to the
        // rename, so the surviving file is always one complete document.
        // The temp name carries a random suffix so the writers never share
        // a scratch file.
        let temp = self
            .directory
            .join(format!(".{}.{}.tmp", task.id, generate_token(8)));

        let write = (|| -> std::io::Result<()> {
            let mut file = std::fs::File::create(&temp)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
            drop(file);
            std::fs::rename(&temp, self.task_path(&task.id))
        })();

        if write.is_err() {
            let _ = std::fs::remove_file(&temp);
        }

        write.map_err(|e| Error::Storage(format!("failed to write task file: {e}")))
    }

    async fn delete(&self, id: &str) -> Result<(), Error> {
        if !valid_task_id(id) {
            // An id that could never have been stored cannot be found.
            return Err(Error::NotFound);
        }

        match std::fs::remove_file(self.task_path(id)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(Error::NotFound),
            Err(e) => Err(Error::Storage(format!("failed to delete task file: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    fn sample_task(id: &str) -> Task {
        Task {
            id: id.to_owned(),
            title: format!("task {id}"),
            notes: "some notes".to_owned(),
            completed: false,
        }
    }

    fn temp_repo() -> FileTaskRepository {
        let dir = env::temp_dir().join(format!("alcove_tasks_{}", generate_token(8)));
        FileTaskRepository::new(dir).unwrap()
    }

    fn cleanup(repo: &FileTaskRepository) {
        let _ = std::fs::remove_dir_all(&repo.directory);
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let repo = temp_repo();
        let task = sample_task("1712345678901");

        repo.create(&task).await.unwrap();

        let listed = repo.list().await.unwrap();
        assert_eq!(listed, vec![task]);

        cleanup(&repo);
    }

    #[tokio::test]
    async fn test_create_same_id_overwrites() {
        let repo = temp_repo();

        repo.create(&sample_task("42")).await.unwrap();

        let mut updated = sample_task("42");
        updated.title = "rewritten".to_owned();
        updated.completed = true;
        repo.create(&updated).await.unwrap();

        let listed = repo.list().await.unwrap();
        assert_eq!(listed, vec![updated]);

        cleanup(&repo);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = temp_repo();
        repo.create(&sample_task("7")).await.unwrap();

        repo.delete("7").await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());

        cleanup(&repo);
    }

    #[tokio::test]
    async fn test_delete_nonexistent_is_not_found() {
        let repo = temp_repo();
        assert_eq!(repo.delete("999").await, Err(Error::NotFound));
        cleanup(&repo);
    }

    #[tokio::test]
    async fn test_path_traversal_id_rejected() {
        let repo = temp_repo();

        let mut task = sample_task("x");
        task.id = "../escape".to_owned();
        assert!(matches!(repo.create(&task).await, Err(Error::Validation(_))));

        assert_eq!(repo.delete("../../etc/passwd").await, Err(Error::NotFound));

        cleanup(&repo);
    }

    #[tokio::test]
    async fn test_corrupt_file_fails_whole_listing() {
        let repo = temp_repo();
        repo.create(&sample_task("1")).await.unwrap();

        std::fs::write(repo.directory.join("2.json"), "{ not json").unwrap();

        assert!(matches!(repo.list().await, Err(Error::Storage(_))));

        cleanup(&repo);
    }

    #[tokio::test]
    async fn test_concurrent_create_same_id_last_writer_wins() {
        let repo = temp_repo();

        let mut a = sample_task("77");
        a.title = "payload a".to_owned();
        let mut b = sample_task("77");
        b.title = "payload b".to_owned();

        let (ra, rb) = tokio::join!(
            {
                let repo = repo.clone();
                let a = a.clone();
                tokio::spawn(async move { repo.create(&a).await })
            },
            {
                let repo = repo.clone();
                let b = b.clone();
                tokio::spawn(async move { repo.create(&b).await })
            },
        );
        ra.unwrap().unwrap();
        rb.unwrap().unwrap();

        // The surviving document is exactly one of the two payloads,
        // never a merge or a torn file.
        let listed = repo.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(listed[0] == a || listed[0] == b);

        cleanup(&repo);
    }
}
