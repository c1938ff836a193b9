#[derive(thiserror::Error, Debug)]
pub enum EnrichError {
    #[error("edges file '{0}' has no 'lineId' column")]
    MissingLineIdColumnError(String),
    #[error("failure reading edges file: {0}")]
    CsvError(#[from] csv::Error),
    #[error("{0}")]
    IoError(#[from] std::io::Error),
    #[error("planner request failed: {0}")]
    PlannerRequestError(#[from] reqwest::Error),
    #[error("planner returned errors for line {line}: {detail}")]
    PlannerResponseError { line: String, detail: String },
}
