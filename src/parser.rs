//! Record parser for study group CSV rows.
//!
//! Column layout: `Group,MemberID,MemberName,Friends,Subjects,Reports,Times`.
//! The `Friends` column is accepted but never read.

use std::str::FromStr;

use tracing::{debug, warn};

use crate::analyzers::types::Student;
use crate::error::{AnalyzerError, Result};

/// One row exactly as read from the source, before any coercion.
pub type RawRow = Vec<String>;

/// Number of columns a row must carry to be parsed.
pub const FIELD_COUNT: usize = 7;

pub const FIELD_NAMES: [&str; FIELD_COUNT] = [
    "Group",
    "MemberID",
    "MemberName",
    "Friends",
    "Subjects",
    "Reports",
    "Times",
];

const GROUP: usize = 0;
const MEMBER_ID: usize = 1;
const MEMBER_NAME: usize = 2;
const SUBJECTS: usize = 4;
const REPORTS: usize = 5;
const TIMES: usize = 6;

/// Decodes one raw row into a [`Student`].
///
/// `row_number` is the 1-based data row used in error messages.
///
/// # Errors
///
/// Returns [`AnalyzerError::MalformedRecord`] if a numeric column is missing,
/// not an integer, or negative where a count is expected.
pub fn parse_student(row: &[String], row_number: usize) -> Result<Student> {
    Ok(Student {
        group: parse_field(row, GROUP, row_number)?,
        member_id: parse_field(row, MEMBER_ID, row_number)?,
        member_name: field(row, MEMBER_NAME, row_number)?.trim().to_string(),
        courses: split_courses(field(row, SUBJECTS, row_number)?),
        reports: parse_field(row, REPORTS, row_number)?,
        minutes: parse_field(row, TIMES, row_number)?,
    })
}

/// Parses every row of a dataset.
///
/// Rows shorter than [`FIELD_COUNT`] are skipped with a warning. The first
/// malformed numeric field aborts the whole dataset.
pub fn parse_students(rows: &[RawRow]) -> Result<Vec<Student>> {
    let mut students = Vec::with_capacity(rows.len());

    for (idx, row) in rows.iter().enumerate() {
        let row_number = idx + 1;
        if row.len() < FIELD_COUNT {
            warn!(row = row_number, fields = row.len(), "Skipping short row");
            continue;
        }
        students.push(parse_student(row, row_number)?);
    }

    debug!(parsed = students.len(), total = rows.len(), "Rows parsed");
    Ok(students)
}

/// Splits a comma-separated subject list, dropping blanks and repeats.
pub fn split_courses(subjects: &str) -> Vec<String> {
    let mut courses: Vec<String> = Vec::new();
    for course in subjects.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        if !courses.iter().any(|c| c == course) {
            courses.push(course.to_string());
        }
    }
    courses
}

fn field(row: &[String], idx: usize, row_number: usize) -> Result<&str> {
    row.get(idx)
        .map(String::as_str)
        .ok_or_else(|| AnalyzerError::MalformedRecord {
            row: row_number,
            field: FIELD_NAMES[idx],
            value: String::new(),
        })
}

fn parse_field<T: FromStr>(row: &[String], idx: usize, row_number: usize) -> Result<T> {
    let raw = field(row, idx, row_number)?;
    raw.trim()
        .parse()
        .map_err(|_| AnalyzerError::MalformedRecord {
            row: row_number,
            field: FIELD_NAMES[idx],
            value: raw.to_string(),
        })
}
