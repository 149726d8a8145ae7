//! Record stores backed by flat files.
//!
//! Two shapes over the same retry-free, synchronous-durability contract:
//! an append-only line ledger for purchase URLs and a keyed JSON-document
//! collection for tasks. Neither caches in memory; every read re-reads the
//! backing store and every write is durable before the caller returns a
//! response. The traits are the seam for substituting an embedded
//! key-value store later without touching call sites.

mod ledger;
mod memory;
mod tasks;

pub use ledger::FileLedger;
pub use memory::{InMemoryLedger, InMemoryTaskRepository};
pub use tasks::FileTaskRepository;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Error;

/// A single task document.
///
/// The id doubles as the filename key and the creation timestamp (Unix
/// milliseconds rendered as a decimal string).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub completed: bool,
}

/// Append-only purchase ledger.
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Returns every recorded URL in insertion order. An absent backing
    /// resource is an empty ledger, not an error.
    async fn list(&self) -> Result<Vec<String>, Error>;

    /// Appends a URL. Not idempotent: repeated calls duplicate the entry.
    async fn append(&self, url: &str) -> Result<(), Error>;
}

/// Keyed task collection. `create` is an upsert by id.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Returns all tasks in enumeration order (not guaranteed
    /// chronological). All-or-nothing: one unreadable record fails the
    /// whole listing.
    async fn list(&self) -> Result<Vec<Task>, Error>;

    /// Writes the full document keyed by `task.id`, overwriting any
    /// existing document with the same id.
    async fn create(&self, task: &Task) -> Result<(), Error>;

    /// Removes the document with this id.
    ///
    /// # Errors
    ///
    /// `Error::NotFound` when no such document exists.
    async fn delete(&self, id: &str) -> Result<(), Error>;
}

/// Task ids become filenames; restrict them to ASCII alphanumerics so a
/// crafted id can never escape the collection directory.
pub(crate) fn valid_task_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric())
}
