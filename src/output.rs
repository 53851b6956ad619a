//! Output formatting and persistence for analysis results.
//!
//! Supports JSON rendering of statistics and CSV files for course reports.

use std::fs;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use tracing::{debug, info};

use crate::analyzers::report::CourseReportRow;
use crate::error::Result;
use crate::stats::GroupStats;

/// Renders group statistics as pretty-printed JSON.
pub fn statistics_json(stats: &[GroupStats]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(stats)
}

/// Base name of a data source with a trailing `.csv` or `.zip` removed.
pub fn source_base_name(source: &str) -> &str {
    let name = Path::new(source)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(source);

    [".csv", ".zip"]
        .iter()
        .find_map(|ext| strip_suffix_ignore_case(name, ext))
        .unwrap_or(name)
}

fn strip_suffix_ignore_case<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    let split = name.len().checked_sub(suffix.len())?;
    let tail = name.get(split..)?;
    tail.eq_ignore_ascii_case(suffix).then(|| &name[..split])
}

/// `<output_dir>/<base>-<course>.csv`, with the course made safe for a
/// single file-name component.
pub fn report_path(output_dir: &Path, source: &str, course: &str) -> PathBuf {
    output_dir.join(format!(
        "{}-{}.csv",
        source_base_name(source),
        file_name_component(course)
    ))
}

/// Replaces path separators and control characters with `_`.
pub fn file_name_component(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Writes course report rows to a CSV file with a header line.
///
/// Creates `output_dir` if it does not already exist. A failure part-way
/// through leaves whatever was already written.
pub fn write_course_report(
    output_dir: &Path,
    source: &str,
    course: &str,
    rows: &[CourseReportRow],
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let path = report_path(output_dir, source, course);
    debug!(path = %path.display(), rows = rows.len(), "Writing course report");

    let mut writer = WriterBuilder::new().has_headers(true).from_path(&path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!(path = %path.display(), "Course report saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::report::REPORT_HEADER;

    fn sample_row() -> CourseReportRow {
        CourseReportRow {
            group: 1,
            member_ids: "101, 102".to_string(),
            member_names: "Alice, Bob".to_string(),
            reports: "2.50".to_string(),
            times: "50".to_string(),
        }
    }

    #[test]
    fn test_source_base_name_strips_extension() {
        assert_eq!(source_base_name("data/groups.csv"), "groups");
        assert_eq!(source_base_name("archive.ZIP"), "archive");
        assert_eq!(source_base_name("notes.txt"), "notes.txt");
        assert_eq!(source_base_name("plain"), "plain");
    }

    #[test]
    fn test_report_path() {
        let path = report_path(Path::new("output"), "in/groups.csv", "Math");
        assert_eq!(path, Path::new("output").join("groups-Math.csv"));
    }

    #[test]
    fn test_report_path_stays_in_output_dir() {
        let out = Path::new("output");

        assert_eq!(report_path(out, "g.csv", "I/O"), out.join("g-I_O.csv"));
        assert_eq!(report_path(out, "g.csv", "../x"), out.join("g-.._x.csv"));
        assert_eq!(report_path(out, "g.csv", "a\\b"), out.join("g-a_b.csv"));
        assert_eq!(report_path(out, "g.csv", "..").parent(), Some(out));
    }

    #[test]
    fn test_write_course_report_with_separator_in_course() {
        let dir = tempfile::tempdir().unwrap();

        let path = write_course_report(dir.path(), "g.csv", "I/O", &[sample_row()]).unwrap();

        assert_eq!(path, dir.path().join("g-I_O.csv"));
        assert!(path.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_course_report_creates_dir_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("nested").join("output");

        let path = write_course_report(&out_dir, "groups.csv", "Math", &[sample_row()]).unwrap();

        assert_eq!(path, out_dir.join("groups-Math.csv"));
        let content = fs::read_to_string(&path).unwrap();
        let header = REPORT_HEADER.join(",");
        assert_eq!(
            content.lines().collect::<Vec<_>>(),
            vec![header.as_str(), "1,\"101, 102\",\"Alice, Bob\",2.50,50"]
        );
    }

    #[test]
    fn test_write_course_report_overwrites() {
        let dir = tempfile::tempdir().unwrap();

        write_course_report(dir.path(), "g.csv", "CS", &[sample_row(), sample_row()]).unwrap();
        let path = write_course_report(dir.path(), "g.csv", "CS", &[sample_row()]).unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_statistics_json() {
        let stats = vec![GroupStats {
            group: 2,
            members: 3,
            courses: 1,
            total_reports: 4,
            total_minutes: 90,
        }];
        let json = statistics_json(&stats).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["group"], 2);
        assert_eq!(value[0]["total_minutes"], 90);
    }
}
