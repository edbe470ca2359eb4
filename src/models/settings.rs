use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_EDITOR: &str = "code";
pub const DEFAULT_MARKETPLACE_URL: &str = "https://marketplace.visualstudio.com";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 VSCode Extension Downloader";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_VSIX_DIR: &str = "vsix_files";

/// Tool settings, read from the optional config.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Editor executable used for listing and installing extensions
    pub editor: String,
    /// Base URL of the marketplace gallery
    pub marketplace_url: String,
    /// User-Agent sent with every marketplace request
    pub user_agent: String,
    /// HTTP timeout in seconds
    pub timeout_secs: u64,
    /// Directory where backups are written and read from
    pub vsix_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            editor: DEFAULT_EDITOR.to_string(),
            marketplace_url: DEFAULT_MARKETPLACE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            vsix_dir: PathBuf::from(DEFAULT_VSIX_DIR),
        }
    }
}

impl Settings {
    /// Validate the settings values
    pub fn validate(&self) -> Result<(), String> {
        if self.editor.trim().is_empty() {
            return Err("editor cannot be empty".to_string());
        }

        if !(self.marketplace_url.starts_with("http://") || self.marketplace_url.starts_with("https://")) {
            return Err(format!(
                "marketplace_url must be an http(s) URL, got '{}'",
                self.marketplace_url
            ));
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than zero".to_string());
        }

        if self.vsix_dir.as_os_str().is_empty() {
            return Err("vsix_dir cannot be empty".to_string());
        }

        Ok(())
    }

    /// Apply command-line overrides on top of file values
    pub fn with_overrides(mut self, editor: Option<String>, marketplace_url: Option<String>) -> Self {
        if let Some(editor) = editor {
            self.editor = editor;
        }
        if let Some(url) = marketplace_url {
            self.marketplace_url = url;
        }
        self
    }
}
