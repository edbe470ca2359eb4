use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use crate::models::extension::vsix_stem;
use crate::models::report::{InstallEntry, InstallReport, ItemStatus};
use crate::services::editor_cli::EditorCli;
use crate::utils::error::{Result, VsixError};
use crate::utils::validation::validate_directory;

/// A package file found in the backup directory
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct VsixFile {
    /// File name without the `.vsix` extension
    pub stem: String,
    pub path: PathBuf,
}

/// Installs VSIX package files through the editor CLI
#[derive(Debug, Clone)]
pub struct VsixInstaller {
    editor: EditorCli,
    /// Pass `--force` so already installed extensions are replaced
    force: bool,
    /// Suppress progress lines (JSON mode)
    quiet: bool,
}

/// Collect the `*.vsix` files directly inside `dir`, sorted by stem
pub fn discover_vsix_files(dir: &Path) -> Result<Vec<VsixFile>> {
    validate_directory(dir)?;

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }

        if let Some(stem) = vsix_stem(&path) {
            files.push(VsixFile { stem, path });
        }
    }

    files.sort();
    debug!(dir = %dir.display(), count = files.len(), "discovered package files");
    Ok(files)
}

/// Keep the files whose stem contains `pattern`
pub fn filter_by_extension(files: Vec<VsixFile>, pattern: &str) -> Vec<VsixFile> {
    files.into_iter().filter(|f| f.stem.contains(pattern)).collect()
}

impl VsixInstaller {
    pub fn new(editor: EditorCli) -> Self {
        Self {
            editor,
            force: true,
            quiet: false,
        }
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
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

    /// Install each file in order; failures are recorded and do not stop the run
    pub fn install_all(&self, vsix_dir: &Path, files: &[VsixFile]) -> InstallReport {
        let mut report = InstallReport::new(vsix_dir.to_path_buf());

        for file in files {
            self.say(format!("Installing: {}", file.stem));
            let entry = self.install_one(file);
            report.push(entry);
        }

        self.say("\nInstallation summary:");
        self.say(format!("  Total: {}", report.total));
        self.say(format!("  Success: {}", report.success));
        self.say(format!("  Failed: {}", report.failed));

        report
    }

    fn install_one(&self, file: &VsixFile) -> InstallEntry {
        let (status, error) = match self.editor.install_extension(&file.path, self.force) {
            Ok(outcome) if outcome.success => {
                self.say(format!("✅ Successfully installed {}", file.stem));
                (ItemStatus::Installed, None)
            }
            Ok(outcome) => {
                self.say(format!("❌ Failed to install {}: {}", file.stem, outcome.stderr));
                warn!(extension = %file.stem, stderr = %outcome.stderr, "editor rejected package");
                (ItemStatus::Failed, Some(outcome.stderr))
            }
            Err(e) => {
                let message = match &e {
                    VsixError::EditorError(msg) => msg.clone(),
                    other => other.to_string(),
                };
                self.say(format!("❌ Error installing {}: {}", file.stem, message));
                warn!(extension = %file.stem, error = %message, "could not run editor");
                (ItemStatus::Failed, Some(message))
            }
        };

        InstallEntry {
            extension: file.stem.clone(),
            path: file.path.clone(),
            status,
            error,
        }
    }
}
