// Marketplace gallery wire format
// Request and response bodies of the public extensionquery endpoint

use serde::{Deserialize, Serialize};

/// Filter type selecting an extension by its `publisher.name` identifier
pub const FILTER_TYPE_EXTENSION_NAME: u32 = 7;

/// Query flags: versions, files, categories, statistics, latest version only
pub const QUERY_FLAGS: u32 = 2151;

/// Asset type of the installable package inside a version's file list
pub const VSIX_ASSET_TYPE: &str = "Microsoft.VisualStudio.Services.VSIXPackage";

/// Body of `POST /_apis/public/gallery/extensionquery`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionQuery {
    pub filters: Vec<QueryFilter>,
    pub flags: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryFilter {
    pub criteria: Vec<FilterCriterion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriterion {
    #[serde(rename = "filterType")]
    pub filter_type: u32,
    pub value: String,
}

impl ExtensionQuery {
    /// Query for a single extension by identifier
    pub fn by_name(extension_id: &str) -> Self {
        Self {
            filters: vec![QueryFilter {
                criteria: vec![FilterCriterion {
                    filter_type: FILTER_TYPE_EXTENSION_NAME,
                    value: extension_id.to_string(),
                }],
            }],
            flags: QUERY_FLAGS,
        }
    }
}

/// Response from the extensionquery endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtensionQueryResponse {
    #[serde(default)]
    pub results: Vec<QueryResult>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub extensions: Vec<GalleryExtension>,
}

/// One extension record from the marketplace
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryExtension {
    #[serde(default)]
    pub publisher: GalleryPublisher,
    #[serde(default)]
    pub extension_name: String,
    pub display_name: Option<String>,
    pub short_description: Option<String>,
    #[serde(default)]
    pub versions: Vec<GalleryVersion>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryPublisher {
    #[serde(default)]
    pub publisher_name: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryVersion {
    #[serde(default)]
    pub version: String,
    pub target_platform: Option<String>,
    #[serde(default)]
    pub files: Vec<GalleryFile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryFile {
    #[serde(default)]
    pub asset_type: String,
    pub source: Option<String>,
}

impl ExtensionQueryResponse {
    /// First extension of the first result, if the marketplace returned any
    pub fn into_first_extension(self) -> Option<GalleryExtension> {
        self.results
            .into_iter()
            .next()
            .and_then(|result| result.extensions.into_iter().next())
    }
}

impl GalleryExtension {
    /// Version string of the newest published version
    pub fn latest_version(&self) -> Option<&str> {
        self.versions.first().map(|v| v.version.as_str())
    }

    /// VSIX asset of the newest version. Older versions are not considered.
    pub fn vsix_asset(&self) -> Option<&GalleryFile> {
        self.versions
            .first()?
            .files
            .iter()
            .find(|file| file.asset_type == VSIX_ASSET_TYPE)
    }
}
