use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use tracing::{debug, error};
use zip::ZipArchive;

use super::{Dataset, DatasetSource, read_rows};
use crate::error::{AnalyzerError, Result};

const MACOS_METADATA: &str = "__MACOSX";

/// A ZIP archive whose `.csv` entries are each a separate dataset.
pub struct ZipArchiveSource {
    path: PathBuf,
}

impl ZipArchiveSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DatasetSource for ZipArchiveSource {
    fn load(&self) -> Result<Vec<Dataset>> {
        if !self.path.exists() {
            return Err(AnalyzerError::SourceNotFound {
                path: self.path.clone(),
            });
        }

        let datasets = read_archive(File::open(&self.path)?)?;
        if datasets.is_empty() {
            return Err(AnalyzerError::EmptyArchive {
                path: self.path.clone(),
            });
        }
        Ok(datasets)
    }
}

/// Reads every CSV entry of an archive, in archive order.
///
/// An entry that cannot be opened or decoded is logged and skipped; the
/// other entries are still returned.
pub(crate) fn read_archive<R: Read + Seek>(reader: R) -> Result<Vec<Dataset>> {
    let mut archive = ZipArchive::new(reader)?;
    let mut datasets = Vec::new();

    for i in 0..archive.len() {
        let entry = match archive.by_index(i) {
            Ok(entry) => entry,
            Err(e) => {
                error!(index = i, error = %e, "Skipping unreadable archive entry");
                continue;
            }
        };
        let entry_name = entry.name().to_string();

        if entry.is_dir() || !is_csv_entry(&entry_name) {
            debug!(entry = %entry_name, "Skipping archive entry");
            continue;
        }

        let rows = match read_rows(entry) {
            Ok(rows) => rows,
            Err(e) => {
                error!(entry = %entry_name, error = %e, "Skipping unreadable CSV entry");
                continue;
            }
        };
        debug!(entry = %entry_name, rows = rows.len(), "Archive entry read");

        datasets.push(Dataset {
            name: entry_base_name(&entry_name).to_string(),
            rows,
        });
    }

    Ok(datasets)
}

fn is_csv_entry(name: &str) -> bool {
    !name.contains(MACOS_METADATA) && name.to_ascii_lowercase().ends_with(".csv")
}

fn entry_base_name(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    fn archive(entries: &[(&str, &str)]) -> Cursor<Vec<u8>> {
        let entries: Vec<(&str, &[u8])> = entries.iter().map(|(n, b)| (*n, b.as_bytes())).collect();
        archive_bytes(&entries)
    }

    fn archive_bytes(entries: &[(&str, &[u8])]) -> Cursor<Vec<u8>> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(body).unwrap();
        }
        let mut cursor = writer.finish().unwrap();
        cursor.set_position(0);
        cursor
    }

    const HEADER: &str = "Group,MemberID,MemberName,Friends,Subjects,Reports,Times\n";

    #[test]
    fn test_reads_csv_entries_in_order() {
        let a = format!("{HEADER}1,101,Alice,,Math,3,60\n");
        let b = format!("{HEADER}2,201,Cho,,CS,1,10\n2,202,Dae,,CS,1,10\n");
        let cursor = archive(&[
            ("term/a.csv", a.as_str()),
            ("readme.txt", "ignored"),
            ("__MACOSX/term/._a.csv", "junk"),
            ("B.CSV", b.as_str()),
        ]);

        let datasets = read_archive(cursor).unwrap();
        let names: Vec<&str> = datasets.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["a.csv", "B.CSV"]);
        assert_eq!(datasets[1].rows.len(), 2);
    }

    #[test]
    fn test_undecodable_entry_is_skipped() {
        let good = format!("{HEADER}1,101,Alice,,Math,3,60\n");
        let mut bad = HEADER.as_bytes().to_vec();
        bad.extend_from_slice(b"1,102,\xff\xfe,,Math,2,40\n");
        let cursor = archive_bytes(&[("bad.csv", bad.as_slice()), ("good.csv", good.as_bytes())]);

        let datasets = read_archive(cursor).unwrap();
        assert_eq!(datasets.len(), 1);
        assert_eq!(datasets[0].name, "good.csv");
        assert_eq!(datasets[0].rows[0][2], "Alice");
    }

    #[test]
    fn test_load_fails_when_no_entry_is_readable() {
        let mut bad = HEADER.as_bytes().to_vec();
        bad.extend_from_slice(b"1,102,\xff,,Math,2,40\n");
        let mut file = tempfile::Builder::new().suffix(".zip").tempfile().unwrap();
        file.write_all(archive_bytes(&[("bad.csv", bad.as_slice())]).get_ref())
            .unwrap();
        file.flush().unwrap();

        let err = ZipArchiveSource::new(file.path()).load().unwrap_err();
        assert!(matches!(err, AnalyzerError::EmptyArchive { .. }));
    }

    #[test]
    fn test_archive_without_csv_is_empty() {
        let cursor = archive(&[("notes.txt", "hello")]);
        assert!(read_archive(cursor).unwrap().is_empty());
    }

    #[test]
    fn test_entry_base_name() {
        assert_eq!(entry_base_name("dir/sub/file.csv"), "file.csv");
        assert_eq!(entry_base_name("file.csv"), "file.csv");
    }

    #[test]
    fn test_load_reports_empty_archive() {
        let mut file = tempfile::Builder::new().suffix(".zip").tempfile().unwrap();
        file.write_all(archive(&[("notes.txt", "hello")]).get_ref())
            .unwrap();
        file.flush().unwrap();

        let err = ZipArchiveSource::new(file.path()).load().unwrap_err();
        assert!(matches!(err, AnalyzerError::EmptyArchive { .. }));
    }
}
