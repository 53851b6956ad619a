//! Dataset sources: plain CSV files and ZIP archives of CSV files.
//!
//! Every source yields named datasets of raw rows. Each dataset is analysed
//! on its own; rows from different archive entries are never merged.

mod csv_file;
mod zip_archive;

pub use csv_file::CsvFileSource;
pub use zip_archive::ZipArchiveSource;

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::Result;
use crate::parser::RawRow;

/// Rows from one CSV file or archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub name: String,
    pub rows: Vec<RawRow>,
}

pub trait DatasetSource {
    fn load(&self) -> Result<Vec<Dataset>>;
}

/// Picks a source by extension: `.zip` (any case) is an archive, anything
/// else is read as CSV.
pub fn open_source(path: &Path) -> Box<dyn DatasetSource> {
    let is_zip = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("zip"));

    if is_zip {
        Box::new(ZipArchiveSource::new(path))
    } else {
        Box::new(CsvFileSource::new(path))
    }
}

/// Reads CSV text with a header line into raw rows.
///
/// Records may have any width; short rows are left for the parser to skip.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}
