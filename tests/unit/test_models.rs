use std::path::Path;

use vsix_backup::models::extension::ExtensionId;
use vsix_backup::models::gallery::{ExtensionQuery, ExtensionQueryResponse, VSIX_ASSET_TYPE};
use vsix_backup::models::settings::Settings;
use vsix_backup::utils::config::ConfigParser;
use vsix_backup::utils::validation::validate_extension_id;

/// Test module for extension identifiers
#[cfg(test)]
mod extension_id_tests {
    use super::*;

    #[test]
    fn test_identifier_round_trip_through_file_name() {
        let id = ExtensionId::parse("ms-toolsai.jupyter-keymap").unwrap();
        let file_name = id.vsix_file_name();
        let back = ExtensionId::from_vsix_path(Path::new(&file_name)).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_identifiers_sort_by_publisher_then_name() {
        let mut ids: Vec<ExtensionId> = ["zeta.a", "alpha.z", "alpha.b"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        ids.sort();
        let rendered: Vec<String> = ids.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["alpha.b", "alpha.z", "zeta.a"]);
    }

    #[test]
    fn test_cli_validation_matches_parser() {
        assert_eq!(
            validate_extension_id(" golang.go ").unwrap(),
            ExtensionId::parse("golang.go").unwrap()
        );
        assert!(validate_extension_id("golang").is_err());
    }
}

/// Test module for the marketplace wire format
#[cfg(test)]
mod gallery_tests {
    use super::*;

    #[test]
    fn test_query_serializes_camel_case() {
        let text = serde_json::to_string(&ExtensionQuery::by_name("golang.go")).unwrap();
        assert!(text.contains("\"filterType\":7"));
        assert!(text.contains("\"flags\":2151"));
    }

    #[test]
    fn test_vsix_asset_among_many() {
        let response: ExtensionQueryResponse = serde_json::from_value(serde_json::json!({
            "results": [{"extensions": [{
                "extensionName": "go",
                "versions": [{"version": "0.41.0", "targetPlatform": null, "files": [
                    {"assetType": "Microsoft.VisualStudio.Code.Manifest", "source": "https://cdn/manifest"},
                    {"assetType": VSIX_ASSET_TYPE, "source": "https://cdn/go.vsix"},
                    {"assetType": "Microsoft.VisualStudio.Services.Icons.Small", "source": "https://cdn/icon"}
                ]}]
            }]}]
        }))
        .unwrap();

        let extension = response.into_first_extension().unwrap();
        assert_eq!(extension.vsix_asset().unwrap().source.as_deref(), Some("https://cdn/go.vsix"));
    }
}

/// Test module for settings
#[cfg(test)]
mod settings_tests {
    use super::*;

    #[test]
    fn test_empty_config_yields_defaults() {
        let settings = ConfigParser::parse_settings("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let settings = ConfigParser::parse_settings("editor = \"code-insiders\"\ntheme = \"dark\"\n").unwrap();
        assert_eq!(settings.editor, "code-insiders");
    }
}

/// Test module for the backup service without network access
#[cfg(test)]
mod backup_tests {
    use vsix_backup::services::backup::ExtensionBackup;
    use vsix_backup::services::marketplace_client::MarketplaceClient;

    #[test]
    fn test_empty_run_creates_output_dir() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let output = temp_dir.path().join("vsix_files");

        let backup = ExtensionBackup::new(MarketplaceClient::new()).quiet(true);
        let report = tokio_test::block_on(backup.run(&[], &output)).unwrap();

        assert!(output.is_dir());
        assert!(report.entries.is_empty());
        assert_eq!(report.output_dir, output);
    }
}
