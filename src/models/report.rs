// Summaries printed at the end of a download or install run

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Outcome of handling one extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Downloaded,
    Installed,
    Skipped,
    Failed,
}

/// Per-extension line of a backup report
#[derive(Debug, Clone, Serialize)]
pub struct BackupEntry {
    pub extension: String,
    pub status: ItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BackupEntry {
    pub fn failed(extension: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            status: ItemStatus::Failed,
            version: None,
            path: None,
            size_bytes: None,
            sha256: None,
            error: Some(error.into()),
        }
    }

    /// An identifier that could not be parsed, skipped with a message
    pub fn invalid(extension: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            status: ItemStatus::Skipped,
            version: None,
            path: None,
            size_bytes: None,
            sha256: None,
            error: Some(message.into()),
        }
    }

    pub fn skipped(extension: impl Into<String>, path: PathBuf) -> Self {
        Self {
            extension: extension.into(),
            status: ItemStatus::Skipped,
            version: None,
            path: Some(path),
            size_bytes: None,
            sha256: None,
            error: None,
        }
    }
}

/// Result of a `download` run
#[derive(Debug, Clone, Serialize)]
pub struct BackupReport {
    pub output_dir: PathBuf,
    pub generated_at: DateTime<Utc>,
    pub entries: Vec<BackupEntry>,
}

impl BackupReport {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            generated_at: Utc::now(),
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: BackupEntry) {
        self.entries.push(entry);
    }

    fn count(&self, status: ItemStatus) -> usize {
        self.entries.iter().filter(|e| e.status == status).count()
    }

    pub fn downloaded(&self) -> usize {
        self.count(ItemStatus::Downloaded)
    }

    pub fn skipped(&self) -> usize {
        self.count(ItemStatus::Skipped)
    }

    pub fn failed(&self) -> usize {
        self.count(ItemStatus::Failed)
    }
}

/// Per-file line of an install report
#[derive(Debug, Clone, Serialize)]
pub struct InstallEntry {
    pub extension: String,
    pub path: PathBuf,
    pub status: ItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of an `install` run
#[derive(Debug, Clone, Serialize)]
pub struct InstallReport {
    pub vsix_dir: PathBuf,
    pub generated_at: DateTime<Utc>,
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub entries: Vec<InstallEntry>,
}

impl InstallReport {
    pub fn new(vsix_dir: PathBuf) -> Self {
        Self {
            vsix_dir,
            generated_at: Utc::now(),
            total: 0,
            success: 0,
            failed: 0,
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: InstallEntry) {
        self.total += 1;
        match entry.status {
            ItemStatus::Installed => self.success += 1,
            ItemStatus::Failed => self.failed += 1,
            _ => {}
        }
        self.entries.push(entry);
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}
