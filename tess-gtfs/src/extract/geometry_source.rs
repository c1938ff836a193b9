use crate::extract::extract_error::ExtractError;
use crate::extract::region_geometry::RegionGeometry;
use std::path::{Path, PathBuf};

/// placeholder in the geometry URL template replaced by the region code.
pub const CODE_PLACEHOLDER: &str = "{code}";

/// fetches and caches one boundary geometry document per region code.
///
/// each document is expected to expose a GeoJSON Polygon or MultiPolygon
/// under `geometry_field`; anything else is a fatal load error for that
/// region code.
pub struct GeometrySource {
    pub url_template: String,
    pub geometry_field: String,
    pub cache_dir: PathBuf,
}

impl GeometrySource {
    pub fn new(url_template: &str, geometry_field: &str, cache_dir: &Path) -> GeometrySource {
        GeometrySource {
            url_template: url_template.to_string(),
            geometry_field: geometry_field.to_string(),
            cache_dir: cache_dir.to_path_buf(),
        }
    }

    /// loads the geometry for `code`, downloading the document on first use.
    /// an HTTP 404 from the geometry endpoint means the code does not resolve
    /// to a region.
    pub fn load(&self, code: &str) -> Result<RegionGeometry, ExtractError> {
        let document = self.ensure_document(code)?;
        self.parse_document(code, &document)
    }

    fn ensure_document(&self, code: &str) -> Result<String, ExtractError> {
        let path = self.cache_dir.join(format!("{code}.json"));
        if path.exists() {
            log::info!("using cached geometry for region {code}");
            return Ok(std::fs::read_to_string(path)?);
        }
        std::fs::create_dir_all(&self.cache_dir)?;
        let url = self.url_template.replace(CODE_PLACEHOLDER, code);
        log::info!("downloading geometry for region {code}");
        let response = reqwest::blocking::get(&url)?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ExtractError::UnknownRegionError(code.to_string()));
        }
        let body = response.error_for_status()?.text()?;
        std::fs::write(&path, &body)?;
        Ok(body)
    }

    fn parse_document(&self, code: &str, document: &str) -> Result<RegionGeometry, ExtractError> {
        let value: serde_json::Value =
            serde_json::from_str(document).map_err(|e| ExtractError::GeometryParseError {
                region: code.to_string(),
                msg: format!("invalid JSON document: {e}"),
            })?;
        let field = value.get(&self.geometry_field).cloned().ok_or_else(|| {
            ExtractError::GeometryFieldMissingError {
                region: code.to_string(),
                field: self.geometry_field.clone(),
            }
        })?;
        let geometry =
            geojson::Geometry::try_from(field).map_err(|e| ExtractError::GeometryParseError {
                region: code.to_string(),
                msg: format!("{e}"),
            })?;
        RegionGeometry::from_geojson(&geometry, code)
    }
}
