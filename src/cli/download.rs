// Download command implementation
// Backs up installed extensions as .vsix files

use std::path::PathBuf;
use tracing::debug;
use crate::models::settings::Settings;
use crate::services::backup::ExtensionBackup;
use crate::services::editor_cli::EditorCli;
use crate::services::extension_scanner::scan_extensions_dir;
use crate::services::marketplace_client::MarketplaceClient;
use crate::utils::error::{Result, VsixError};
use crate::utils::validation::validate_extension_id;

#[derive(Debug)]
pub struct DownloadCommand {
    pub output_dir: Option<PathBuf>,
    pub extensions_dir: Option<PathBuf>,
    pub extensions: Vec<String>,
    pub skip_existing: bool,
    pub json: bool,
}

impl DownloadCommand {
    pub async fn run(&self, settings: &Settings) -> Result<()> {
        let output_dir = self.output_dir.clone().unwrap_or_else(|| settings.vsix_dir.clone());

        let extensions = self.collect_extensions(settings)?;
        debug!(?extensions, "extensions to back up");
        if !self.json {
            println!("Found {} extensions", extensions.len());
        }

        let client = MarketplaceClient::from_settings(settings)?;

        let report = ExtensionBackup::new(client)
            .skip_existing(self.skip_existing)
            .quiet(self.json)
            .run(&extensions, &output_dir)
            .await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)
                .map_err(|e| VsixError::OutputError(format!("JSON serialization error: {}", e)))?);
        }

        Ok(())
    }

    /// Explicit --extension ids win, then --extensions-dir, then the editor CLI
    fn collect_extensions(&self, settings: &Settings) -> Result<Vec<String>> {
        if !self.extensions.is_empty() {
            return self.extensions
                .iter()
                .map(|raw| validate_extension_id(raw).map(|id| id.to_string()))
                .collect();
        }

        if let Some(dir) = &self.extensions_dir {
            return Ok(scan_extensions_dir(dir)?);
        }

        EditorCli::new(&settings.editor)
            .list_extensions()
            .map_err(|e| match e {
                VsixError::EditorError(msg) => {
                    VsixError::EditorError(format!("Error listing extensions: {msg}"))
                }
                other => other,
            })
    }
}
