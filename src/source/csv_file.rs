use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Dataset, DatasetSource, read_rows};
use crate::error::{AnalyzerError, Result};

/// A single CSV file on disk.
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DatasetSource for CsvFileSource {
    fn load(&self) -> Result<Vec<Dataset>> {
        if !self.path.exists() {
            return Err(AnalyzerError::SourceNotFound {
                path: self.path.clone(),
            });
        }

        let rows = read_rows(File::open(&self.path)?)?;
        debug!(path = %self.path.display(), rows = rows.len(), "CSV file read");

        Ok(vec![Dataset {
            name: self.path.to_string_lossy().into_owned(),
            rows,
        }])
    }
}
