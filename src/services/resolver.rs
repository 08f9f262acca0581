// src/services/resolver.rs

//! Course resolver service.
//!
//! Maps course codes to destination project ids using the static course
//! table from the configuration.

use std::collections::BTreeMap;

use crate::utils::page_id_from_ref;

/// Outcome of resolving one course code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Route to this project id
    Project(String),
    /// Known course, deliberately not synced
    Excluded,
    /// No code, or the code is not in the table
    Unmapped,
}

/// Service for resolving course codes to projects.
#[derive(Debug, Clone, Default)]
pub struct CourseResolver {
    courses: BTreeMap<String, String>,
}

impl CourseResolver {
    /// Create a resolver over a course table. Empty values mark exclusions.
    pub fn new(courses: &BTreeMap<String, String>) -> Self {
        let courses = courses
            .iter()
            .map(|(code, project)| (code.trim().to_string(), project.trim().to_string()))
            .collect();
        Self { courses }
    }

    /// Resolve a course code: exact match first, then ignoring whitespace,
    /// then by subject alone (`CITL` covers `CITL 100`).
    pub fn resolve(&self, course_code: Option<&str>) -> Resolution {
        let Some(code) = course_code.map(str::trim).filter(|c| !c.is_empty()) else {
            return Resolution::Unmapped;
        };

        let project = self
            .courses
            .get(code)
            .or_else(|| self.find_compact(code))
            .or_else(|| {
                let subject: String = code.chars().take_while(|c| c.is_alphabetic()).collect();
                (!subject.is_empty() && subject != code)
                    .then(|| self.find_compact(&subject))
                    .flatten()
            });

        match project {
            Some(project) if project.is_empty() => Resolution::Excluded,
            Some(project) => Resolution::Project(page_id_from_ref(project)),
            None => Resolution::Unmapped,
        }
    }

    fn find_compact(&self, code: &str) -> Option<&String> {
        let compact = strip_whitespace(code);
        self.courses
            .iter()
            .find(|(key, _)| strip_whitespace(key) == compact)
            .map(|(_, project)| project)
    }

    /// Number of configured courses.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Number of courses marked as excluded.
    pub fn excluded_count(&self) -> usize {
        self.courses.values().filter(|p| p.is_empty()).count()
    }
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}
