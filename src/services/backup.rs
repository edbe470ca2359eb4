use std::path::Path;
use tracing::{info, warn};
use crate::models::extension::ExtensionId;
use crate::models::report::{BackupEntry, BackupReport, ItemStatus};
use crate::services::marketplace_client::{MarketplaceClient, MarketplaceError};
use crate::utils::error::VsixError;

/// Downloads VSIX packages for a list of extension identifiers, one at a time
#[derive(Debug, Clone)]
pub struct ExtensionBackup {
    client: MarketplaceClient,
    /// Leave files that already exist in the output directory alone
    skip_existing: bool,
    /// Suppress progress lines (JSON mode)
    quiet: bool,
}

impl ExtensionBackup {
    pub fn new(client: MarketplaceClient) -> Self {
        Self {
            client,
            skip_existing: false,
            quiet: false,
        }
    }

    pub fn skip_existing(mut self, skip: bool) -> Self {
        self.skip_existing = skip;
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    fn say(&self, line: impl AsRef<str>) {
        if !self.quiet {
            println!("{}", line.as_ref());
        }
    }

    /// Back up every extension in `extensions` into `output_dir`.
    /// A failing extension is recorded and the run moves on to the next one.
    pub async fn run(&self, extensions: &[String], output_dir: &Path) -> Result<BackupReport, VsixError> {
        std::fs::create_dir_all(output_dir)?;

        let mut report = BackupReport::new(output_dir.to_path_buf());

        for raw in extensions {
            let id = match ExtensionId::parse(raw) {
                Ok(id) => id,
                Err(e) => {
                    self.say(e.to_string());
                    report.push(BackupEntry::invalid(raw.trim(), e.to_string()));
                    continue;
                }
            };

            self.say(format!("Processing {id}"));
            let entry = self.backup_one(&id, output_dir).await;
            report.push(entry);
        }

        self.say(format!(
            "Done. Downloaded {} extensions into {}",
            report.downloaded(),
            output_dir.display()
        ));
        info!(
            downloaded = report.downloaded(),
            skipped = report.skipped(),
            failed = report.failed(),
            "backup finished"
        );

        Ok(report)
    }

    async fn backup_one(&self, id: &ExtensionId, output_dir: &Path) -> BackupEntry {
        let dest = output_dir.join(id.vsix_file_name());

        if self.skip_existing && dest.exists() {
            self.say(format!("Skipping {id}: {} already exists", dest.display()));
            return BackupEntry::skipped(id.to_string(), dest);
        }

        self.say(format!("Downloading {id} -> {}", dest.display()));

        match self.fetch(id, &dest).await {
            Ok(entry) => {
                self.say(format!("Successfully downloaded {id}"));
                entry
            }
            Err(e) => {
                let message = match &e {
                    MarketplaceError::RequestFailed(_)
                    | MarketplaceError::ParseError(_)
                    | MarketplaceError::Io(..) => format!("Error downloading {id}: {e}"),
                    _ => e.to_string(),
                };
                warn!(extension = %id, error = %e, "backup failed");
                self.say(&message);
                BackupEntry::failed(id.to_string(), message)
            }
        }
    }

    async fn fetch(&self, id: &ExtensionId, dest: &Path) -> Result<BackupEntry, MarketplaceError> {
        let extension = self.client.query_extension(id).await?;
        let url = self.client.vsix_download_url(id, &extension)?;
        let file = self.client.download_to(id, &url, dest).await?;

        Ok(BackupEntry {
            extension: id.to_string(),
            status: ItemStatus::Downloaded,
            version: extension.latest_version().map(ToString::to_string),
            path: Some(file.path),
            size_bytes: Some(file.size_bytes),
            sha256: Some(file.sha256),
            error: None,
        })
    }
}
