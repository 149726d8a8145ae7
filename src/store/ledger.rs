//! Append-only purchase ledger backed by a newline-delimited flat file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use async_trait::async_trait;

use super::LedgerRepository;
use crate::Error;

/// One URL per line. Entries are only ever appended; there is no deletion
/// and no identity beyond position.
#[derive(Debug, Clone)]
pub struct FileLedger {
    path: PathBuf,
}

impl FileLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl LedgerRepository for FileLedger {
    async fn list(&self) -> Result<Vec<String>, Error> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::Storage(format!("failed to read ledger: {e}"))),
        };

        Ok(raw
            .split('\n')
            .filter(|line| !line.is_empty())
            .map(ToOwned::to_owned)
            .collect())
    }

    async fn append(&self, url: &str) -> Result<(), Error> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| Error::Storage(format!("failed to open ledger: {e}")))?;

        file.write_all(format!("\n{url}").as_bytes())
            .map_err(|e| Error::Storage(format!("failed to append to ledger: {e}")))?;

        // The response status must reflect persisted state.
        file.sync_all()
            .map_err(|e| Error::Storage(format!("failed to sync ledger: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;
    use crate::crypto::generate_token;

    fn temp_ledger() -> FileLedger {
        let path = env::temp_dir().join(format!("alcove_ledger_{}.txt", generate_token(8)));
        FileLedger::new(path)
    }

    fn cleanup(ledger: &FileLedger) {
        let _ = std::fs::remove_file(&ledger.path);
    }

    #[tokio::test]
    async fn test_list_absent_file_is_empty() {
        let ledger = temp_ledger();
        assert_eq!(ledger.list().await.unwrap(), Vec::<String>::new());
    }

    #[tokio::test]
    async fn test_append_then_list() {
        let ledger = temp_ledger();

        ledger.append("https://example.com/a").await.unwrap();
        ledger.append("https://example.com/b").await.unwrap();

        let entries = ledger.list().await.unwrap();
        assert_eq!(entries, vec!["https://example.com/a", "https://example.com/b"]);

        cleanup(&ledger);
    }

    #[tokio::test]
    async fn test_append_grows_by_one_with_last_element() {
        let ledger = temp_ledger();
        ledger.append("https://example.com/first").await.unwrap();

        let before = ledger.list().await.unwrap().len();
        ledger.append("https://example.com/second").await.unwrap();
        let entries = ledger.list().await.unwrap();

        assert_eq!(entries.len(), before + 1);
        assert_eq!(entries.last().map(String::as_str), Some("https://example.com/second"));

        cleanup(&ledger);
    }

    #[tokio::test]
    async fn test_duplicates_accumulate() {
        let ledger = temp_ledger();

        ledger.append("https://example.com/same").await.unwrap();
        ledger.append("https://example.com/same").await.unwrap();

        assert_eq!(ledger.list().await.unwrap().len(), 2);

        cleanup(&ledger);
    }
}
