use std::collections::HashMap;

use crate::analyzers::types::{GroupMap, StudyGroup};
use crate::error::{AnalyzerError, Result};

/// Course name to the groups studying it, borrowed from a [`GroupMap`].
#[derive(Debug, Default)]
pub struct CourseIndex<'a> {
    courses: HashMap<String, Vec<&'a StudyGroup>>,
}

impl<'a> CourseIndex<'a> {
    /// Inverts `groups`. Each course lists its groups in group-map order,
    /// each group at most once.
    pub fn build(groups: &'a GroupMap) -> Self {
        let mut courses: HashMap<String, Vec<&'a StudyGroup>> = HashMap::new();

        for group in groups {
            for course in group.courses() {
                let entry = courses.entry(course.clone()).or_default();
                if !entry
                    .iter()
                    .any(|g| g.group_number() == group.group_number())
                {
                    entry.push(group);
                }
            }
        }

        Self { courses }
    }

    /// # Errors
    ///
    /// Returns [`AnalyzerError::CourseNotFound`] when no group studies `course`.
    pub fn groups_for(&self, course: &str) -> Result<&[&'a StudyGroup]> {
        self.courses
            .get(course)
            .map(Vec::as_slice)
            .ok_or_else(|| AnalyzerError::CourseNotFound(course.to_string()))
    }

    /// Indexed course names, sorted.
    pub fn course_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.courses.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::aggregate::aggregate_groups;
    use crate::parser::parse_students;

    fn groups() -> GroupMap {
        let rows: Vec<Vec<String>> = [
            ["2", "201", "Cho", "", "CS,Math", "1", "10"],
            ["1", "101", "Alice", "", "Math", "3", "60"],
            ["2", "202", "Dae", "", "Math", "1", "10"],
        ]
        .iter()
        .map(|r| r.iter().map(|f| f.to_string()).collect())
        .collect();

        aggregate_groups(&parse_students(&rows).unwrap()).unwrap()
    }

    #[test]
    fn test_groups_listed_once_in_map_order() {
        let groups = groups();
        let index = CourseIndex::build(&groups);

        let math: Vec<i64> = index
            .groups_for("Math")
            .unwrap()
            .iter()
            .map(|g| g.group_number())
            .collect();
        assert_eq!(math, vec![2, 1]);
        assert_eq!(index.groups_for("CS").unwrap().len(), 1);
    }

    #[test]
    fn test_missing_course_is_an_error() {
        let groups = groups();
        let index = CourseIndex::build(&groups);

        let err = index.groups_for("History").unwrap_err();
        assert!(matches!(err, AnalyzerError::CourseNotFound(ref c) if c == "History"));
        assert!(index.groups_for("math").is_err());
    }

    #[test]
    fn test_course_names_sorted() {
        let groups = groups();
        let index = CourseIndex::build(&groups);
        assert_eq!(index.course_names(), vec!["CS", "Math"]);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_empty_map_has_no_courses() {
        let groups = GroupMap::new();
        assert!(CourseIndex::build(&groups).is_empty());
    }
}
