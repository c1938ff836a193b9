use crate::extract::extract_error::ExtractError;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// read access to the tables of a zipped feed. tables are decoded lazily, one
/// row at a time, so peak memory tracks the grouping structures downstream
/// rather than raw file size.
pub struct FeedArchive<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl FeedArchive<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, ExtractError> {
        let file = File::open(path)?;
        FeedArchive::from_reader(BufReader::new(file))
    }
}

impl<R: Read + Seek> FeedArchive<R> {
    pub fn from_reader(reader: R) -> Result<Self, ExtractError> {
        let archive = ZipArchive::new(reader)?;
        Ok(FeedArchive { archive })
    }

    /// streams `table`, invoking `row_fn` once per decoded row in file order.
    ///
    /// the table is located by case-insensitive basename match against the
    /// archive entries, so `stops.txt` matches `gtfs/Stops.TXT`. rows are
    /// addressed by column name via the header row.
    pub fn stream<T, F>(&mut self, table: &str, mut row_fn: F) -> Result<(), ExtractError>
    where
        T: DeserializeOwned,
        F: FnMut(T),
    {
        let entry_name = self
            .archive
            .file_names()
            .find(|name| {
                let basename = name.rsplit('/').next().unwrap_or(name);
                basename.eq_ignore_ascii_case(table)
            })
            .map(String::from)
            .ok_or_else(|| ExtractError::TableNotFoundError(table.to_string()))?;

        let entry = self.archive.by_name(&entry_name)?;
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(entry);
        for row in reader.deserialize::<T>() {
            row_fn(row?);
        }
        Ok(())
    }
}
