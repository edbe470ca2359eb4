// Common error types for vsix-backup

use crate::services::marketplace_client::MarketplaceError;

#[derive(Debug, thiserror::Error)]
pub enum VsixError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Editor error: {0}")]
    EditorError(String),
    #[error("Output error: {0}")]
    OutputError(String),
    #[error("{failed} of {total} extensions failed to install")]
    InstallFailed { failed: usize, total: usize },
    /// Nothing to install; the command has already printed why
    #[error("{0}")]
    NothingToInstall(String),
}

impl From<MarketplaceError> for VsixError {
    fn from(err: MarketplaceError) -> Self {
        VsixError::NetworkError(err.to_string())
    }
}

impl From<anyhow::Error> for VsixError {
    fn from(err: anyhow::Error) -> Self {
        VsixError::IoError(std::io::Error::other(format!("{err:#}")))
    }
}

pub type Result<T> = std::result::Result<T, VsixError>;

/// Error as presented to the person running the command
#[derive(Debug, Clone)]
pub struct UserError {
    pub message: String,
    pub hint: Option<String>,
    pub exit_code: i32,
}

impl UserError {
    /// Map a crate error to its printed form and process exit code
    pub fn from_vsix_error(err: &VsixError) -> Self {
        match err {
            VsixError::ConfigError(msg) => Self {
                message: format!("Configuration error: {msg}"),
                hint: Some("Check the file passed with --config or remove it to use defaults".to_string()),
                exit_code: 2,
            },
            VsixError::EditorError(msg) => Self {
                message: msg.clone(),
                hint: Some("Make sure the editor CLI is on PATH or pass --editor".to_string()),
                exit_code: 1,
            },
            // Already reported on stdout by the install command
            VsixError::InstallFailed { .. } | VsixError::NothingToInstall(_) => Self {
                message: String::new(),
                hint: None,
                exit_code: 1,
            },
            VsixError::ValidationError(msg) => Self {
                message: msg.clone(),
                hint: None,
                exit_code: 1,
            },
            other => Self {
                message: other.to_string(),
                hint: None,
                exit_code: 1,
            },
        }
    }

    /// Print the error to stdout/stderr
    pub fn print(&self) {
        if self.message.is_empty() {
            return;
        }
        eprintln!("Error: {}", self.message);
        if let Some(hint) = &self.hint {
            eprintln!("  hint: {hint}");
        }
    }
}
