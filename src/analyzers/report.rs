//! Course report records: one row per group studying the requested course.

use serde::Serialize;

use crate::analyzers::types::StudyGroup;
use crate::analyzers::utility::{format_average, per_member};

/// Column headers shared by the console table and the CSV file.
pub const REPORT_HEADER: [&str; 5] = ["Group", "MemberIDs", "MemberNames", "Reports", "Times"];

/// A formatted report row. Field order matches [`REPORT_HEADER`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseReportRow {
    #[serde(rename = "Group")]
    pub group: i64,
    #[serde(rename = "MemberIDs")]
    pub member_ids: String,
    #[serde(rename = "MemberNames")]
    pub member_names: String,
    #[serde(rename = "Reports")]
    pub reports: String,
    #[serde(rename = "Times")]
    pub times: String,
}

impl CourseReportRow {
    pub fn from_group(group: &StudyGroup) -> Self {
        let members = group.member_count();

        CourseReportRow {
            group: group.group_number(),
            member_ids: group
                .member_ids()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(", "),
            member_names: group.member_names().collect::<Vec<_>>().join(", "),
            reports: format_average(per_member(group.total_reports(), members)),
            times: format_average(per_member(group.total_minutes(), members)),
        }
    }

    /// Console rendering: ID and name lists are wrapped in double quotes.
    pub fn to_console_line(&self) -> String {
        format!(
            "{},\"{}\",\"{}\",{},{}",
            self.group, self.member_ids, self.member_names, self.reports, self.times
        )
    }
}

/// Builds one report row per group, preserving the given order.
pub fn build_course_report(groups: &[&StudyGroup]) -> Vec<CourseReportRow> {
    groups.iter().map(|g| CourseReportRow::from_group(g)).collect()
}

/// Renders the header and rows as console text, one line each.
pub fn render_course_table(rows: &[CourseReportRow]) -> String {
    let mut out = REPORT_HEADER.join(",");
    out.push('\n');
    for row in rows {
        out.push_str(&row.to_console_line());
        out.push('\n');
    }
    out
}
