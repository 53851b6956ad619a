use crate::analyzers::types::{GroupMap, Student};
use crate::error::Result;
use tracing::debug;

/// Folds students into per-group aggregates.
///
/// Totals are accumulated, not assigned: feeding the same student twice
/// counts it twice. Build one aggregator per dataset.
#[derive(Debug, Default)]
pub struct GroupAggregator {
    groups: GroupMap,
}

impl GroupAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges one student into its group, creating the group on first sight.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::TotalOverflow`](crate::AnalyzerError::TotalOverflow)
    /// when a group total no longer fits; the group is left as it was.
    pub fn accumulate(&mut self, student: &Student) -> Result<()> {
        let group = self.groups.entry(student.group);
        group.accumulate_totals(student.reports, student.minutes)?;

        if group.record_member(student.member_id, &student.member_name) {
            debug!(
                group = student.group,
                member_id = student.member_id,
                name = %student.member_name,
                "Member renamed by later row"
            );
        }

        for course in &student.courses {
            group.add_course(course);
        }
        Ok(())
    }

    pub fn accumulate_all<'a>(
        &mut self,
        students: impl IntoIterator<Item = &'a Student>,
    ) -> Result<()> {
        for student in students {
            self.accumulate(student)?;
        }
        Ok(())
    }

    pub fn groups(&self) -> &GroupMap {
        &self.groups
    }

    pub fn finish(self) -> GroupMap {
        self.groups
    }
}

/// Aggregates a full dataset with a fresh [`GroupAggregator`].
pub fn aggregate_groups(students: &[Student]) -> Result<GroupMap> {
    let mut aggregator = GroupAggregator::new();
    aggregator.accumulate_all(students)?;
    let groups = aggregator.finish();
    debug!(groups = groups.len(), students = students.len(), "Groups aggregated");
    Ok(groups)
}
