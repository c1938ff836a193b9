use crate::extract::extract_error::ExtractError;
use config::Config;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// configuration for one extraction run, read from a TOML file. nothing here
/// is process-global, so independent runs (and tests) can carry different
/// configurations side by side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// where to download the national feed archive from.
    pub feed_url: String,
    /// directory for cached downloads and region outputs.
    pub output_directory: PathBuf,
    /// geometry endpoint with a `{code}` placeholder for the region code.
    pub geometry_url_template: String,
    /// field of the geometry document holding the Polygon/MultiPolygon.
    #[serde(default = "default_geometry_field")]
    pub geometry_field: String,
    /// optional agency allow-list, matched against agency names. all
    /// agencies are accepted when absent.
    #[serde(default)]
    pub agency_allow: Option<Vec<String>>,
    /// the regions to build, each one an output graph.
    pub regions: Vec<RegionConfig>,
}

/// one named output region assembled from one or more boundary geometries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionConfig {
    /// label used in output filenames, e.g. `OSLO`.
    pub label: String,
    /// geometry codes whose union forms this region's boundary.
    pub codes: Vec<String>,
}

fn default_geometry_field() -> String {
    String::from("omrade")
}

impl ExtractConfig {
    pub fn from_file(config_file: &str) -> Result<ExtractConfig, ExtractError> {
        let file = config::File::new(config_file, config::FileFormat::Toml);
        let config = Config::builder().add_source(file).build().map_err(|e| {
            ExtractError::ConfigReadError {
                msg: format!("failed reading '{config_file}'"),
                source: e,
            }
        })?;
        config
            .try_deserialize::<ExtractConfig>()
            .map_err(|e| ExtractError::ConfigReadError {
                msg: format!("failed deserializing '{config_file}'"),
                source: e,
            })
    }

    pub fn feed_cache_path(&self) -> PathBuf {
        self.output_directory.join("gtfs.zip")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_deserializes_with_defaults() {
        let toml = r#"
            feed_url = "https://example.test/gtfs.zip"
            output_directory = "out"
            geometry_url_template = "https://example.test/regions/{code}"

            [[regions]]
            label = "OSLO"
            codes = ["03"]

            [[regions]]
            label = "ALL_FYLKER"
            codes = ["03", "32", "33", "31"]
        "#;
        let config: ExtractConfig = toml::from_str(toml).expect("config should deserialize");
        assert_eq!(config.geometry_field, "omrade");
        assert!(config.agency_allow.is_none());
        assert_eq!(config.regions.len(), 2);
        assert_eq!(config.regions[1].codes.len(), 4);
    }
}
