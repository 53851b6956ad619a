//! Data types used by the aggregation pipeline.

use std::collections::HashMap;

use crate::error::{AnalyzerError, Result};

/// Name rendered for a roster entry that never received a non-blank name.
pub const UNKNOWN_MEMBER: &str = "Unknown";

/// A single parsed input row. Never mutated after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub(crate) group: i64,
    pub(crate) member_id: i64,
    pub(crate) member_name: String,
    pub(crate) courses: Vec<String>,
    pub(crate) reports: u64,
    pub(crate) minutes: u64,
}

impl Student {
    pub fn group(&self) -> i64 {
        self.group
    }

    pub fn member_id(&self) -> i64 {
        self.member_id
    }

    pub fn member_name(&self) -> &str {
        &self.member_name
    }

    pub fn courses(&self) -> &[String] {
        &self.courses
    }

    pub fn reports(&self) -> u64 {
        self.reports
    }

    pub fn minutes(&self) -> u64 {
        self.minutes
    }
}

/// Running aggregate for one study group.
///
/// The roster keeps members in first-seen order; a later row with the same
/// member ID replaces the stored name. Totals only ever grow through the
/// `accumulate_*` methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyGroup {
    group_number: i64,
    roster: Vec<(i64, Option<String>)>,
    roster_index: HashMap<i64, usize>,
    courses: Vec<String>,
    total_reports: u64,
    total_minutes: u64,
}

impl StudyGroup {
    pub fn new(group_number: i64) -> Self {
        Self {
            group_number,
            roster: Vec::new(),
            roster_index: HashMap::new(),
            courses: Vec::new(),
            total_reports: 0,
            total_minutes: 0,
        }
    }

    /// Records `member_id` with `name`. Returns true when an existing member
    /// was renamed.
    pub(crate) fn record_member(&mut self, member_id: i64, name: &str) -> bool {
        let name = Some(name.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        match self.roster_index.get(&member_id) {
            Some(&pos) => {
                let slot = &mut self.roster[pos].1;
                if *slot == name {
                    return false;
                }
                *slot = name;
                true
            }
            None => {
                self.roster_index.insert(member_id, self.roster.len());
                self.roster.push((member_id, name));
                false
            }
        }
    }

    pub(crate) fn add_course(&mut self, course: &str) {
        if !self.courses.iter().any(|c| c == course) {
            self.courses.push(course.to_string());
        }
    }

    /// Adds one row's reports and minutes to the running totals.
    ///
    /// Both sums are checked before either is stored, so an overflow leaves
    /// the totals unchanged.
    pub(crate) fn accumulate_totals(&mut self, reports: u64, minutes: u64) -> Result<()> {
        let overflow = |field| AnalyzerError::TotalOverflow {
            group: self.group_number,
            field,
        };
        let total_reports = self
            .total_reports
            .checked_add(reports)
            .ok_or_else(|| overflow("Reports"))?;
        let total_minutes = self
            .total_minutes
            .checked_add(minutes)
            .ok_or_else(|| overflow("Times"))?;

        self.total_reports = total_reports;
        self.total_minutes = total_minutes;
        Ok(())
    }

    pub fn group_number(&self) -> i64 {
        self.group_number
    }

    pub fn member_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.roster.iter().map(|(id, _)| *id)
    }

    /// Member names in roster order, with [`UNKNOWN_MEMBER`] for unnamed IDs.
    pub fn member_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.roster
            .iter()
            .map(|(_, name)| name.as_deref().unwrap_or(UNKNOWN_MEMBER))
    }

    pub fn member_name(&self, member_id: i64) -> Option<&str> {
        self.roster_index
            .get(&member_id)
            .map(|&pos| self.roster[pos].1.as_deref().unwrap_or(UNKNOWN_MEMBER))
    }

    pub fn member_count(&self) -> usize {
        self.roster.len()
    }

    pub fn courses(&self) -> &[String] {
        &self.courses
    }

    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    pub fn total_reports(&self) -> u64 {
        self.total_reports
    }

    pub fn total_minutes(&self) -> u64 {
        self.total_minutes
    }
}

/// Groups keyed by number, iterated in the order each number first appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupMap {
    groups: Vec<StudyGroup>,
    index: HashMap<i64, usize>,
}

impl GroupMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn entry(&mut self, group_number: i64) -> &mut StudyGroup {
        let pos = match self.index.get(&group_number) {
            Some(&pos) => pos,
            None => {
                let pos = self.groups.len();
                self.groups.push(StudyGroup::new(group_number));
                self.index.insert(group_number, pos);
                pos
            }
        };
        &mut self.groups[pos]
    }

    pub fn get(&self, group_number: i64) -> Option<&StudyGroup> {
        self.index.get(&group_number).map(|&pos| &self.groups[pos])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StudyGroup> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'a> IntoIterator for &'a GroupMap {
    type Item = &'a StudyGroup;
    type IntoIter = std::slice::Iter<'a, StudyGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}
