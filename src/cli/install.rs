// Install command implementation
// Installs extensions from a directory of .vsix files

use std::path::{Path, PathBuf};
use serde::Serialize;
use crate::models::settings::Settings;
use crate::services::editor_cli::EditorCli;
use crate::services::installer::{discover_vsix_files, filter_by_extension, VsixFile, VsixInstaller};
use crate::utils::error::{Result, VsixError};

#[derive(Debug)]
pub struct InstallCommand {
    pub vsix_dir: Option<PathBuf>,
    pub extension: Option<String>,
    pub install_all: bool,
    pub list: bool,
    pub no_force: bool,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ListResponse<'a> {
    vsix_dir: &'a Path,
    extensions: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
struct NoActionResponse {
    status: &'static str,
    found: usize,
}

impl InstallCommand {
    pub fn run(&self, settings: &Settings) -> Result<()> {
        let vsix_dir = self.vsix_dir.clone().unwrap_or_else(|| settings.vsix_dir.clone());

        let files = discover_vsix_files(&vsix_dir)?;
        if files.is_empty() {
            return Err(nothing_to_install(format!(
                "No .vsix files found in '{}'.",
                vsix_dir.display()
            )));
        }

        if self.list {
            return self.output_list(&vsix_dir, &files);
        }

        let files = match &self.extension {
            Some(pattern) => {
                let matching = filter_by_extension(files, pattern);
                if matching.is_empty() {
                    return Err(nothing_to_install(format!(
                        "No .vsix files found matching '{}'.",
                        pattern
                    )));
                }
                matching
            }
            None if !self.install_all => {
                return self.output_no_action(files.len());
            }
            None => files,
        };

        let report = VsixInstaller::new(EditorCli::new(&settings.editor))
            .force(!self.no_force)
            .quiet(self.json)
            .install_all(&vsix_dir, &files);

        if self.json {
            println!("{}", to_json(&report)?);
        }

        if report.is_success() {
            Ok(())
        } else {
            Err(VsixError::InstallFailed {
                failed: report.failed,
                total: report.total,
            })
        }
    }

    fn output_list(&self, vsix_dir: &Path, files: &[VsixFile]) -> Result<()> {
        if self.json {
            let response = ListResponse {
                vsix_dir,
                extensions: files.iter().map(|f| f.stem.as_str()).collect(),
            };
            println!("{}", to_json(&response)?);
        } else {
            println!("Available .vsix files in '{}':", vsix_dir.display());
            for file in files {
                println!("  {}", file.stem);
            }
        }
        Ok(())
    }

    fn output_no_action(&self, found: usize) -> Result<()> {
        if self.json {
            println!("{}", to_json(&NoActionResponse { status: "no_action", found })?);
        } else {
            println!("Found {found} .vsix files. Use --install-all to install all, or --extension to specify one.");
            println!("Use --list to see available extensions.");
        }
        Ok(())
    }
}

fn nothing_to_install(message: String) -> VsixError {
    println!("{message}");
    VsixError::NothingToInstall(message)
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| VsixError::OutputError(format!("JSON serialization error: {}", e)))
}
