//! In-memory record stores.
//!
//! Suitable for tests and development. State is lost on restart; for
//! persistence use [`FileLedger`](super::FileLedger) and
//! [`FileTaskRepository`](super::FileTaskRepository).

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::{LedgerRepository, Task, TaskRepository, valid_task_id};
use crate::Error;

#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    entries: Arc<RwLock<Vec<String>>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LedgerRepository for InMemoryLedger {
    async fn list(&self) -> Result<Vec<String>, Error> {
        self.entries
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| Error::Storage("lock poisoned".to_owned()))
    }

    async fn append(&self, url: &str) -> Result<(), Error> {
        self.entries
            .write()
            .map_err(|_| Error::Storage("lock poisoned".to_owned()))?
            .push(url.to_owned());
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<BTreeMap<String, Task>>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn list(&self) -> Result<Vec<Task>, Error> {
        self.tasks
            .read()
            .map(|guard| guard.values().cloned().collect())
            .map_err(|_| Error::Storage("lock poisoned".to_owned()))
    }

    async fn create(&self, task: &Task) -> Result<(), Error> {
        if !valid_task_id(&task.id) {
            return Err(Error::Validation("task id must be ASCII alphanumeric".to_owned()));
        }

        self.tasks
            .write()
            .map_err(|_| Error::Storage("lock poisoned".to_owned()))?
            .insert(task.id.clone(), task.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), Error> {
        self.tasks
            .write()
            .map_err(|_| Error::Storage("lock poisoned".to_owned()))?
            .remove(id)
            .map(|_| ())
            .ok_or(Error::NotFound)
    }
}
