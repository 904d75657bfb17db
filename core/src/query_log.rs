use anyhow::Result;
use serde::Serialize;
use std::fs::{create_dir_all, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
struct Entry<'a> {
    ts: String,
    q: &'a str,
    n: usize,
}

/// Append-only JSON-lines record of keyword queries.
#[derive(Debug, Clone)]
pub struct QueryLog {
    path: PathBuf,
}

impl QueryLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record one query. Write failures are logged at debug level and otherwise ignored.
    pub fn append(&self, query: &str, results: usize) {
        if let Err(err) = self.try_append(query, results) {
            tracing::debug!(error = %err, path = %self.path.display(), "query log write failed");
        }
    }

    fn try_append(&self, query: &str, results: usize) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            create_dir_all(dir)?;
        }
        let entry = Entry { ts: crate::rfc3339(time::OffsetDateTime::now_utc()), q: query, n: results };
        let mut line = serde_json::to_string(&entry)?;
        line.push('\n');
        let mut f = OpenOptions::new().create(true).append(true).open(&self.path)?;
        f.write_all(line.as_bytes())?;
        Ok(())
    }
}
