use crate::enrich::enrich_error::EnrichError;
use crate::enrich::planner_client::PlannerClient;
use chrono::NaiveDate;
use csv::StringRecord;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

const LINE_ID_COLUMN: &str = "lineId";

/// merges journey-planner trip counts into extracted edge files.
///
/// every file's unique `lineId` values are queried once against the planner;
/// each row then gains a count column for the target date, with lines the
/// planner does not know treated as zero. results land next to each input as
/// `<name>_with_trips.csv`, the inputs are left untouched.
pub fn enrich_edge_files(
    paths: &[PathBuf],
    client: &PlannerClient,
    date: NaiveDate,
) -> Result<(), EnrichError> {
    let mut files: Vec<EdgeFile> = vec![];
    let mut line_ids: BTreeSet<String> = BTreeSet::new();
    for path in paths {
        let file = EdgeFile::read(path)?;
        line_ids.extend(file.line_ids().map(String::from));
        files.push(file);
    }

    let mut counts: HashMap<String, u32> = HashMap::new();
    for line_id in &line_ids {
        let count = client
            .service_journey_count(line_id, date)
            .unwrap_or_else(|e| {
                log::warn!("no journey count for line {line_id}, using 0: {e}");
                0
            });
        counts.insert(line_id.clone(), count);
    }

    for file in &files {
        let out_path = output_path(&file.path);
        file.write_with_counts(&out_path, &counts, &count_column_name(date))?;
        log::info!("wrote {} enriched rows to {out_path:?}", file.records.len());
    }
    Ok(())
}

/// an edges CSV held in memory with its `lineId` column located. all other
/// columns pass through enrichment untouched.
struct EdgeFile {
    path: PathBuf,
    headers: StringRecord,
    records: Vec<StringRecord>,
    line_id_index: usize,
}

impl EdgeFile {
    fn read(path: &Path) -> Result<EdgeFile, EnrichError> {
        let mut reader = csv::Reader::from_path(path)?;
        let headers = reader.headers()?.clone();
        let line_id_index = headers
            .iter()
            .position(|h| h == LINE_ID_COLUMN)
            .ok_or_else(|| {
                EnrichError::MissingLineIdColumnError(path.to_string_lossy().to_string())
            })?;
        let records = reader.records().collect::<Result<Vec<_>, _>>()?;
        log::info!("loaded {} edges from {path:?}", records.len());
        Ok(EdgeFile {
            path: path.to_path_buf(),
            headers,
            records,
            line_id_index,
        })
    }

    fn line_ids(&self) -> impl Iterator<Item = &str> {
        self.records
            .iter()
            .filter_map(|record| record.get(self.line_id_index))
            .filter(|id| !id.is_empty())
    }

    fn write_with_counts(
        &self,
        out_path: &Path,
        counts: &HashMap<String, u32>,
        column: &str,
    ) -> Result<(), EnrichError> {
        let mut writer = csv::Writer::from_path(out_path)?;
        let mut headers = self.headers.clone();
        headers.push_field(column);
        writer.write_record(&headers)?;
        for record in &self.records {
            let count = record
                .get(self.line_id_index)
                .and_then(|id| counts.get(id))
                .copied()
                .unwrap_or(0);
            let mut row = record.clone();
            row.push_field(&count.to_string());
            writer.write_record(&row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn output_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    path.with_file_name(format!("{stem}_with_trips.csv"))
}

fn count_column_name(date: NaiveDate) -> String {
    format!("tripsOn{}", date.format("%Y_%m_%d"))
}
