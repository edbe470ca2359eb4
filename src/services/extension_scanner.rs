// Enumerates extensions from an editor extensions directory
// (e.g. ~/.vscode/extensions) without going through the editor CLI

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};
use crate::models::extension::ExtensionId;

/// Subset of an extension's package.json
#[derive(Debug, Deserialize)]
struct ExtensionManifest {
    publisher: Option<String>,
    name: Option<String>,
}

/// Collect `publisher.name` identifiers of the extensions under `dir`, sorted
pub fn scan_extensions_dir(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read extensions directory {}", dir.display()))?;

    let mut ids = BTreeSet::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        let path = entry.path();
        let folder = entry.file_name().to_string_lossy().into_owned();

        if folder.starts_with('.') || !path.is_dir() {
            continue;
        }

        match identify(&path, &folder) {
            Some(id) => {
                ids.insert(id.to_string());
            }
            None => debug!(folder = %folder, "not an extension folder"),
        }
    }

    Ok(ids.into_iter().collect())
}

fn identify(path: &Path, folder: &str) -> Option<ExtensionId> {
    let manifest_path = path.join("package.json");
    if manifest_path.exists() {
        match read_manifest(&manifest_path) {
            Ok(Some(id)) => return Some(id),
            Ok(None) => {}
            Err(e) => warn!("{e:#}"),
        }
    }

    ExtensionId::parse(&strip_version_suffix(folder)).ok()
}

fn read_manifest(path: &Path) -> Result<Option<ExtensionId>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let manifest: ExtensionManifest = serde_json::from_str(&content)
        .with_context(|| format!("Invalid manifest {}", path.display()))?;

    Ok(match (manifest.publisher, manifest.name) {
        (Some(publisher), Some(name)) if !publisher.is_empty() && !name.is_empty() => {
            Some(ExtensionId { publisher, name })
        }
        _ => None,
    })
}

/// `ms-python.python-2024.2.0` -> `ms-python.python`,
/// `rust-lang.rust-analyzer-0.3.1850-linux-x64` -> `rust-lang.rust-analyzer`
fn strip_version_suffix(folder: &str) -> String {
    let mut cut = folder.len();
    for (idx, _) in folder.match_indices('-') {
        let rest = &folder[idx + 1..];
        if rest.starts_with(|c: char| c.is_ascii_digit()) && rest.contains('.') {
            cut = idx;
            break;
        }
    }
    folder[..cut].to_string()
}
