//! CSV record store
//!
//! Provides append-only, line-oriented storage for assessment records.
//! Appends take the write half of the store lock and readers take the read
//! half, so a reader in this process never sees a partially written line.

use std::io::SeekFrom;
use std::path::{Path, PathBuf};

use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncSeekExt, AsyncWriteExt, BufReader};
use tokio::sync::{RwLock, RwLockWriteGuard};

use super::codec::{encode_line, header_line, split_line};
use super::error::LedgerError;
use super::types::{AssessmentRecord, RawRow};

/// Bytes read per step when looking back for the last newline
const TAIL_CHUNK: u64 = 4096;

/// CSV file-based record store
pub struct CsvRecordStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl CsvRecordStore {
    /// Create a store at the given path; the file is created on first append
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    /// Get the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Take exclusive access for a read-then-append sequence
    pub async fn writer(&self) -> StoreWriter<'_> {
        StoreWriter {
            store: self,
            _guard: self.lock.write().await,
        }
    }

    /// Append one record, creating the store with its header if absent
    pub async fn append(&self, record: &AssessmentRecord) -> Result<(), LedgerError> {
        self.writer().await.append(record).await
    }

    /// Visit every data row in file order under a shared lock
    ///
    /// Rows are streamed from disk one line at a time. A missing store yields
    /// no rows.
    pub async fn for_each_row<F>(&self, visit: F) -> Result<(), LedgerError>
    where
        F: FnMut(RawRow) + Send,
    {
        let _guard = self.lock.read().await;
        self.scan(visit).await
    }

    /// Collect every data row in file order
    pub async fn read_all(&self) -> Result<Vec<RawRow>, LedgerError> {
        let mut rows = Vec::new();
        self.for_each_row(|row| rows.push(row)).await?;
        Ok(rows)
    }

    /// Ensure the parent directory exists
    async fn ensure_parent_dir(&self) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| LedgerError::io("create directory for", parent, e))?;
            }
        }
        Ok(())
    }

    /// Caller must hold the lock
    async fn scan<F>(&self, mut visit: F) -> Result<(), LedgerError>
    where
        F: FnMut(RawRow) + Send,
    {
        let file = match File::open(&self.path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(LedgerError::io("open", &self.path, e)),
        };

        let mut reader = BufReader::new(file);
        let mut line = String::new();
        let mut first = true;

        loop {
            line.clear();
            let read = reader
                .read_line(&mut line)
                .await
                .map_err(|e| LedgerError::io("read", &self.path, e))?;
            if read == 0 {
                break;
            }

            // A line without its newline is a torn write, never a record
            let Some(content) = line.strip_suffix('\n') else {
                tracing::warn!(path = %self.path.display(), "ignoring incomplete trailing line");
                break;
            };

            if content.trim().is_empty() {
                continue;
            }

            let row = split_line(content);
            if first {
                first = false;
                if row.id().is_none() {
                    // header
                    continue;
                }
            }

            visit(row);
        }

        Ok(())
    }

    /// Caller must hold the write lock
    async fn write_record(&self, record: &AssessmentRecord) -> Result<(), LedgerError> {
        self.ensure_parent_dir().await?;

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| LedgerError::io("open", &self.path, e))?;

        let file_len = file
            .metadata()
            .await
            .map_err(|e| LedgerError::io("stat", &self.path, e))?
            .len();

        // Drop a torn trailing line so the new record starts on its own line
        let len = self.complete_len(&mut file, file_len).await?;
        if len < file_len {
            tracing::warn!(
                path = %self.path.display(),
                dropped = file_len - len,
                "truncating incomplete trailing line before append"
            );
            file.set_len(len)
                .await
                .map_err(|e| LedgerError::io("truncate", &self.path, e))?;
            file.sync_data()
                .await
                .map_err(|e| LedgerError::io("sync", &self.path, e))?;
        }

        let mut buf = if len == 0 {
            header_line()
        } else {
            String::new()
        };
        buf.push_str(&encode_line(record));

        file.write_all(buf.as_bytes())
            .await
            .map_err(|e| LedgerError::io("append to", &self.path, e))?;
        file.flush()
            .await
            .map_err(|e| LedgerError::io("flush", &self.path, e))?;
        file.sync_data()
            .await
            .map_err(|e| LedgerError::io("sync", &self.path, e))?;

        Ok(())
    }

    /// Length of the file up to and including its last newline
    async fn complete_len(&self, file: &mut File, file_len: u64) -> Result<u64, LedgerError> {
        let mut buf = [0u8; TAIL_CHUNK as usize];
        let mut end = file_len;

        while end > 0 {
            let start = end.saturating_sub(TAIL_CHUNK);
            let chunk = &mut buf[..(end - start) as usize];
            file.seek(SeekFrom::Start(start))
                .await
                .map_err(|e| LedgerError::io("seek", &self.path, e))?;
            file.read_exact(chunk)
                .await
                .map_err(|e| LedgerError::io("read", &self.path, e))?;
            if let Some(pos) = chunk.iter().rposition(|b| *b == b'\n') {
                return Ok(start + pos as u64 + 1);
            }
            end = start;
        }

        Ok(0)
    }
}

/// Exclusive handle on a [`CsvRecordStore`]
///
/// Holds the write lock for its whole lifetime, so a scan followed by an
/// append through the same writer cannot interleave with any other writer.
pub struct StoreWriter<'a> {
    store: &'a CsvRecordStore,
    _guard: RwLockWriteGuard<'a, ()>,
}

impl StoreWriter<'_> {
    /// Visit every data row in file order
    pub async fn for_each_row<F>(&self, visit: F) -> Result<(), LedgerError>
    where
        F: FnMut(RawRow) + Send,
    {
        self.store.scan(visit).await
    }

    /// Append one record
    pub async fn append(&self, record: &AssessmentRecord) -> Result<(), LedgerError> {
        self.store.write_record(record).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clinical::tests::sample_input;
    use crate::ledger::NewAssessment;
    use crate::scoring::ScoreResult;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, CsvRecordStore) {
        let dir = TempDir::new().unwrap();
        let store = CsvRecordStore::new(dir.path().join("history.csv"));
        (dir, store)
    }

    fn record(id: u64) -> AssessmentRecord {
        NewAssessment::new(sample_input(), ScoreResult::new(11.2, 72.0, "Normal", "No"))
            .into_record(id)
    }

    #[tokio::test]
    async fn test_read_all_missing_store_is_empty() {
        let (_dir, store) = create_test_store();
        assert!(store.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_writes_header_once() {
        let (_dir, store) = create_test_store();
        store.append(&record(1)).await.unwrap();
        store.append(&record(2)).await.unwrap();

        let contents = tokio::fs::read_to_string(store.path()).await.unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id,age,gender"));
        assert_eq!(contents.matches("id,age,gender").count(), 1);

        let rows = store.read_all().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id(), Some(1));
        assert_eq!(rows[1].id(), Some(2));
    }

    #[tokio::test]
    async fn test_header_only_store_has_no_rows() {
        let (_dir, store) = create_test_store();
        tokio::fs::write(store.path(), header_line()).await.unwrap();
        assert!(store.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_zero_length_store_gets_header() {
        let (_dir, store) = create_test_store();
        tokio::fs::write(store.path(), "").await.unwrap();
        store.append(&record(1)).await.unwrap();

        let contents = tokio::fs::read_to_string(store.path()).await.unwrap();
        assert!(contents.starts_with("id,"));
    }

    #[tokio::test]
    async fn test_torn_trailing_line_is_ignored() {
        let (_dir, store) = create_test_store();
        store.append(&record(1)).await.unwrap();

        let mut file = OpenOptions::new()
            .append(true)
            .open(store.path())
            .await
            .unwrap();
        file.write_all(b"2,30,fem").await.unwrap();
        file.flush().await.unwrap();

        let rows = store.read_all().await.unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_append_after_torn_line_starts_fresh_line() {
        let (_dir, store) = create_test_store();
        store.append(&record(1)).await.unwrap();

        let mut file = OpenOptions::new()
            .append(true)
            .open(store.path())
            .await
            .unwrap();
        file.write_all(b"2,30,fem").await.unwrap();
        file.flush().await.unwrap();

        store.append(&record(2)).await.unwrap();

        let contents = tokio::fs::read_to_string(store.path()).await.unwrap();
        assert!(!contents.contains("fem2"));
        assert!(contents.ends_with('\n'));

        let rows = store.read_all().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].id(), Some(2));
        assert_eq!(rows[1], split_line(encode_line(&record(2)).trim_end()));
    }

    #[tokio::test]
    async fn test_torn_header_is_rewritten() {
        let (_dir, store) = create_test_store();
        tokio::fs::write(store.path(), "id,age,gen").await.unwrap();
        store.append(&record(1)).await.unwrap();

        let contents = tokio::fs::read_to_string(store.path()).await.unwrap();
        assert!(contents.starts_with(&header_line()));
        let rows = store.read_all().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id(), Some(1));
    }

    #[tokio::test]
    async fn test_headerless_file_keeps_first_row() {
        let (_dir, store) = create_test_store();
        tokio::fs::write(store.path(), encode_line(&record(5)))
            .await
            .unwrap();

        let rows = store.read_all().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id(), Some(5));
    }

    #[tokio::test]
    async fn test_creates_parent_dir() {
        let dir = TempDir::new().unwrap();
        let store = CsvRecordStore::new(dir.path().join("nested").join("deep").join("h.csv"));
        store.append(&record(1)).await.unwrap();
        assert_eq!(store.read_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_read_all_is_restartable() {
        let (_dir, store) = create_test_store();
        store.append(&record(1)).await.unwrap();
        let first = store.read_all().await.unwrap();
        let second = store.read_all().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_unwritable_path_is_io_error() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be opened for appending
        let store = CsvRecordStore::new(dir.path());
        let err = store.append(&record(1)).await.unwrap_err();
        assert!(matches!(err, LedgerError::Io { .. }));
    }
}
