//! Append-only feedback log, one JSON object per line.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// A user's rating of an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub query: String,
    pub rating: u8,
    pub feedback: String,
    pub timestamp: String,
}

/// Writes feedback records to a JSON-lines file. Never read back.
///
/// The file grows without bound.
pub struct FeedbackLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FeedbackLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a single line.
    pub async fn append(&self, record: &FeedbackRecord) -> Result<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn record(n: u8) -> FeedbackRecord {
        FeedbackRecord {
            query: format!("query {}", n),
            rating: n,
            feedback: "ok".to_string(),
            timestamp: "2024-01-01T00:00:00.000000".to_string(),
        }
    }

    #[tokio::test]
    async fn test_append_writes_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let log = FeedbackLog::new(dir.path().join("nested").join("feedback.jsonl"));

        log.append(&record(4)).await.unwrap();
        log.append(&record(5)).await.unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: FeedbackRecord = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed, record(5));
    }

    #[tokio::test]
    async fn test_concurrent_appends_do_not_interleave() {
        let dir = tempfile::tempdir().unwrap();
        let log = Arc::new(FeedbackLog::new(dir.path().join("feedback.jsonl")));

        let handles: Vec<_> = (1..=5)
            .map(|n| {
                let log = log.clone();
                tokio::spawn(async move { log.append(&record(n)).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let content = std::fs::read_to_string(log.path()).unwrap();
        let mut ratings: Vec<u8> = content
            .lines()
            .map(|l| serde_json::from_str::<FeedbackRecord>(l).unwrap().rating)
            .collect();
        ratings.sort();
        assert_eq!(ratings, vec![1, 2, 3, 4, 5]);
    }
}
