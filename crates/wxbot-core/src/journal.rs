//! Append-only delivery journal (`log.txt` by default).
//!
//! One plain line per event, `[YYYY-MM-DD HH:MM:SS TZ] message`, stamped in
//! the configured timezone. Independent of `tracing` output.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tokio::io::AsyncWriteExt;

use crate::error::Result;

#[derive(Debug, Clone)]
pub struct Journal {
    path: PathBuf,
    tz: Tz,
}

impl Journal {
    pub fn new(path: impl Into<PathBuf>, tz: Tz) -> Self {
        Self {
            path: path.into(),
            tz,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render one journal line for `message` at `at`.
    pub fn format_line(&self, at: DateTime<Utc>, message: &str) -> String {
        let local = at.with_timezone(&self.tz);
        format!("[{}] {}", local.format("%Y-%m-%d %H:%M:%S %Z"), message)
    }

    /// Append `message`, stamped with the current time.
    pub async fn append(&self, message: &str) -> Result<()> {
        let line = self.format_line(Utc::now(), message);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.write_all(b"\n").await?;
        file.flush().await?;
        Ok(())
    }
}
