use std::io::Write;
use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::analyzers::aggregate::aggregate_groups;
use crate::analyzers::course_index::CourseIndex;
use crate::analyzers::report::{build_course_report, render_course_table};
use crate::error::{AnalyzerError, Result};
use crate::output::{statistics_json, write_course_report};
use crate::parser::parse_students;
use crate::source::{Dataset, DatasetSource};
use crate::stats::{GroupStats, render_statistics};

/// What to produce for each dataset.
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    pub statistics: bool,
    pub json: bool,
    pub course: Option<String>,
    pub output_dir: PathBuf,
}

/// Outcome of running one dataset through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSummary {
    pub name: String,
    pub groups: usize,
    pub students: usize,
    pub report_path: Option<PathBuf>,
    pub course_missing: bool,
}

/// Parses, aggregates and reports a single dataset, writing console text to `out`.
///
/// A missing course is printed and recorded in the summary; it is not an error.
#[tracing::instrument(skip_all, fields(dataset = %dataset.name))]
pub fn analyze_dataset<W: Write>(
    dataset: &Dataset,
    request: &AnalysisRequest,
    out: &mut W,
) -> Result<DatasetSummary> {
    writeln!(out, "Loading the study group data file, {}...", dataset.name)?;

    let students = parse_students(&dataset.rows)?;
    let groups = aggregate_groups(&students)?;

    writeln!(out, "The data file is loaded...")?;
    writeln!(out, "The number of groups: {}", groups.len())?;
    writeln!(out, "The number of students: {}", students.len())?;

    let mut summary = DatasetSummary {
        name: dataset.name.clone(),
        groups: groups.len(),
        students: students.len(),
        report_path: None,
        course_missing: false,
    };

    if request.statistics {
        let stats = GroupStats::from_groups(&groups);
        writeln!(out)?;
        writeln!(out, "==== Statistics ====")?;
        if request.json {
            writeln!(out, "{}", statistics_json(&stats)?)?;
        } else {
            write!(out, "{}", render_statistics(&stats))?;
        }
    }

    if let Some(course) = request.course.as_deref() {
        writeln!(out)?;
        let index = CourseIndex::build(&groups);

        match index.groups_for(course) {
            Ok(selected) => {
                let rows = build_course_report(selected);
                let path = write_course_report(&request.output_dir, &dataset.name, course, &rows)?;
                writeln!(out, "The output file, {}, is saved!!", path.display())?;
                write!(out, "{}", render_course_table(&rows))?;
                summary.report_path = Some(path);
            }
            Err(e @ AnalyzerError::CourseNotFound(_)) => {
                warn!(course, "Course not found");
                writeln!(out, "{e}")?;
                if !index.is_empty() {
                    writeln!(out, "Available courses: {}", index.course_names().join(", "))?;
                }
                summary.course_missing = true;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(summary)
}

/// Loads every dataset from `source` and analyses each one independently.
///
/// A failing source or dataset is logged and reported on `out`; the
/// remaining datasets still run.
pub fn analyze_source<W: Write>(
    source: &dyn DatasetSource,
    request: &AnalysisRequest,
    out: &mut W,
) -> Result<Vec<DatasetSummary>> {
    let datasets = match source.load() {
        Ok(datasets) => datasets,
        Err(e) => {
            error!(error = %e, "Failed to load data source");
            writeln!(out, "Error: {e}")?;
            return Ok(Vec::new());
        }
    };

    info!(datasets = datasets.len(), "Data source loaded");

    let mut summaries = Vec::with_capacity(datasets.len());
    for dataset in &datasets {
        match analyze_dataset(dataset, request, out) {
            Ok(summary) => summaries.push(summary),
            Err(e) => {
                error!(dataset = %dataset.name, error = %e, "Dataset analysis failed");
                writeln!(out, "Error: {e}")?;
            }
        }
    }

    Ok(summaries)
}
