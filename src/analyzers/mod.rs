//! Study group aggregation and course reporting.
//!
//! This module folds parsed student rows into per-group aggregates, indexes
//! the groups by course, and formats per-member averages for a course report.

pub mod aggregate;
pub mod analyzer;
pub mod course_index;
pub mod report;
pub mod types;
pub mod utility;
