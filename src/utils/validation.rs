// Common validation utilities for CLI arguments

use crate::models::extension::ExtensionId;
use crate::utils::error::{Result, VsixError};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

fn segment_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("static regex is valid")
    })
}

/// Validate an extension identifier passed on the command line
pub fn validate_extension_id(raw: &str) -> Result<ExtensionId> {
    let id = ExtensionId::parse(raw).map_err(|_| {
        VsixError::ValidationError(format!(
            "Invalid extension identifier '{}'.\n\nUse the publisher.name form:\n  ✓ ms-python.python\n  ✓ rust-lang.rust-analyzer\n  ✗ python",
            raw.trim()
        ))
    })?;

    if !segment_pattern().is_match(&id.publisher) || !segment_pattern().is_match(&id.name) {
        return Err(VsixError::ValidationError(format!(
            "Invalid extension identifier '{}' - only letters, digits, '.', '-' and '_' are allowed.",
            raw.trim()
        )));
    }

    Ok(id)
}

/// Validate that a path is an existing directory
pub fn validate_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(VsixError::ValidationError(format!(
            "Directory '{}' does not exist.",
            path.display()
        )));
    }

    if !path.is_dir() {
        return Err(VsixError::ValidationError(format!(
            "'{}' is not a directory.",
            path.display()
        )));
    }

    Ok(())
}
