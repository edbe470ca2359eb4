use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Identifier of an installed editor extension (`publisher.name`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExtensionId {
    /// Marketplace publisher
    pub publisher: String,
    /// Extension name, may itself contain dots
    pub name: String,
}

/// Errors raised while parsing extension identifiers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtensionIdError {
    #[error("Skipping invalid extension identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Not a .vsix file: {0}")]
    NotVsixFile(String),
}

impl ExtensionId {
    /// Parse a `publisher.name` identifier, splitting on the first dot
    pub fn parse(raw: &str) -> Result<Self, ExtensionIdError> {
        let trimmed = raw.trim();
        let (publisher, name) = trimmed
            .split_once('.')
            .ok_or_else(|| ExtensionIdError::InvalidIdentifier(trimmed.to_string()))?;

        if publisher.is_empty() || name.is_empty() {
            return Err(ExtensionIdError::InvalidIdentifier(trimmed.to_string()));
        }

        Ok(Self {
            publisher: publisher.to_string(),
            name: name.to_string(),
        })
    }

    /// File name used for the backup of this extension
    pub fn vsix_file_name(&self) -> String {
        format!("{self}.vsix")
    }

    /// Recover the identifier from a backup file path
    pub fn from_vsix_path(path: &Path) -> Result<Self, ExtensionIdError> {
        let stem = vsix_stem(path)
            .ok_or_else(|| ExtensionIdError::NotVsixFile(path.display().to_string()))?;
        Self::parse(&stem)
    }
}

/// File name without the extension, if `path` names a `.vsix` file (any case)
pub fn vsix_stem(path: &Path) -> Option<String> {
    let is_vsix = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("vsix"));
    if !is_vsix {
        return None;
    }

    path.file_stem().map(|s| s.to_string_lossy().into_owned())
}

impl fmt::Display for ExtensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.publisher, self.name)
    }
}

impl FromStr for ExtensionId {
    type Err = ExtensionIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ExtensionId {
    type Error = ExtensionIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ExtensionId> for String {
    fn from(id: ExtensionId) -> Self {
        id.to_string()
    }
}
