#[derive(thiserror::Error, Debug)]
pub enum ExtractError {
    /// a configured region code that the geometry source could not resolve.
    #[error("unknown region code '{0}'")]
    UnknownRegionError(String),
    #[error("table '{0}' not found in feed archive")]
    TableNotFoundError(String),
    #[error("geometry document for region '{region}' has no '{field}' field")]
    GeometryFieldMissingError { region: String, field: String },
    #[error("geometry for region '{region}' is not Polygon/MultiPolygon: {found}")]
    UnsupportedGeometryTypeError { region: String, found: String },
    #[error("failed parsing geometry for region '{region}': {msg}")]
    GeometryParseError { region: String, msg: String },
    #[error("failed reading feed archive: {0}")]
    ArchiveReadError(#[from] zip::result::ZipError),
    #[error("failure streaming table rows: {0}")]
    CsvError(#[from] csv::Error),
    #[error("{0}")]
    IoError(#[from] std::io::Error),
    #[error("download failed: {0}")]
    DownloadError(#[from] reqwest::Error),
    #[error("{msg}: {source}")]
    ConfigReadError {
        msg: String,
        source: config::ConfigError,
    },
    #[error("failed writing region outputs: {0}")]
    OutputWriteError(String),
}
