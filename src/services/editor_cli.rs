use std::path::Path;
use std::process::Command;
use tracing::debug;
use crate::models::settings::DEFAULT_EDITOR;
use crate::utils::error::VsixError;

/// Wrapper around the editor's command-line interface
#[derive(Debug, Clone)]
pub struct EditorCli {
    /// Editor executable name or path
    program: String,
    /// Arguments placed before every subcommand, e.g. `run com.vscodium.codium` for flatpak
    prefix_args: Vec<String>,
}

/// Result of one `--install-extension` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    /// Whether the editor exited successfully
    pub success: bool,
    /// Trimmed stderr of the editor process
    pub stderr: String,
}

impl Default for EditorCli {
    fn default() -> Self {
        Self::new(DEFAULT_EDITOR)
    }
}

impl EditorCli {
    /// Create a wrapper from an editor command line.
    /// The first whitespace-separated word is the executable.
    pub fn new(command_line: impl AsRef<str>) -> Self {
        let mut words = command_line.as_ref().split_whitespace().map(ToString::to_string);
        let program = words.next().unwrap_or_else(|| DEFAULT_EDITOR.to_string());
        Self {
            program,
            prefix_args: words.collect(),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.prefix_args);
        cmd
    }

    /// Editor executable this wrapper invokes
    pub fn program(&self) -> &str {
        &self.program
    }

    /// List installed extension identifiers, one per non-empty output line
    pub fn list_extensions(&self) -> Result<Vec<String>, VsixError> {
        debug!(program = %self.program, "listing installed extensions");

        let output = self
            .command()
            .arg("--list-extensions")
            .output()
            .map_err(|e| VsixError::EditorError(format!("Failed to run '{}': {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VsixError::EditorError(format!(
                "'{} --list-extensions' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToString::to_string)
            .collect())
    }

    /// Install a package file; `force` replaces an already installed version
    pub fn install_extension(&self, vsix_path: &Path, force: bool) -> Result<InstallOutcome, VsixError> {
        let mut cmd = self.command();
        cmd.arg("--install-extension").arg(vsix_path);
        if force {
            cmd.arg("--force");
        }

        debug!(program = %self.program, path = %vsix_path.display(), force, "installing extension");

        let output = cmd
            .output()
            .map_err(|e| VsixError::EditorError(format!("Failed to run '{}': {}", self.program, e)))?;

        Ok(InstallOutcome {
            success: output.status.success(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}
