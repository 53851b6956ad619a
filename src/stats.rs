use serde::Serialize;

use crate::analyzers::types::{GroupMap, StudyGroup};

/// Per-group summary used by the statistics output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupStats {
    pub group: i64,
    pub members: usize,
    pub courses: usize,
    pub total_reports: u64,
    pub total_minutes: u64,
}

impl GroupStats {
    pub fn from_group(group: &StudyGroup) -> Self {
        GroupStats {
            group: group.group_number(),
            members: group.member_count(),
            courses: group.course_count(),
            total_reports: group.total_reports(),
            total_minutes: group.total_minutes(),
        }
    }

    /// Summaries for every group, in group-map order.
    pub fn from_groups(groups: &GroupMap) -> Vec<Self> {
        groups.iter().map(Self::from_group).collect()
    }

    pub fn summary_line(&self) -> String {
        format!(
            "Group{}, # of students: {}, # of courses for study: {}",
            self.group, self.members, self.courses
        )
    }
}

/// One summary line per group.
pub fn render_statistics(stats: &[GroupStats]) -> String {
    stats
        .iter()
        .map(|s| s.summary_line() + "\n")
        .collect()
}
