//! Assignment data structures.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One calendar event normalized into a sync candidate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssignmentRecord {
    /// Cleaned assignment name
    pub name: String,

    /// Course code such as `CS 124`, if one could be extracted
    pub course_code: Option<String>,

    /// Whole-day due date
    pub due_date: Option<NaiveDate>,

    /// Link to the assignment page
    pub canvas_url: Option<String>,

    /// Calendar event UID
    pub uid: String,
}

/// An assignment whose course resolved to a destination project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlannedTask {
    pub assignment_name: String,
    pub course_code: String,
    #[serde(default, deserialize_with = "due_date::deserialize")]
    pub due_date: Option<NaiveDate>,
    pub project_id: String,
    pub canvas_url: Option<String>,
}

impl PlannedTask {
    /// Build a task for `assignment` routed to `project_id`.
    pub fn new(assignment: &AssignmentRecord, course_code: &str, project_id: &str) -> Self {
        Self {
            assignment_name: assignment.name.clone(),
            course_code: course_code.to_string(),
            due_date: assignment.due_date,
            project_id: project_id.to_string(),
            canvas_url: assignment.canvas_url.clone(),
        }
    }
}

/// Hand-off files may carry full timestamps; accept those and keep the date.
mod due_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, de::Error};

    use crate::utils::date::parse_due_date;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.trim().is_empty() => parse_due_date(&raw)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid due date: {raw}"))),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planned_task_accepts_timestamp_due_date() {
        let json = r#"{
            "assignment_name": "Quiz 2",
            "course_code": "CS 124",
            "due_date": "2026-10-20T23:59:00+00:00",
            "project_id": "abc",
            "canvas_url": null
        }"#;
        let task: PlannedTask = serde_json::from_str(json).unwrap();
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2026, 10, 20));
    }

    #[test]
    fn test_planned_task_serializes_date_only() {
        let task = PlannedTask {
            assignment_name: "Essay".to_string(),
            course_code: "HIST 281".to_string(),
            due_date: NaiveDate::from_ymd_opt(2026, 11, 2),
            project_id: "p".to_string(),
            canvas_url: None,
        };
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["due_date"], "2026-11-02");

        let back: PlannedTask = serde_json::from_value(value).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn test_planned_task_missing_due_date() {
        let json = r#"{"assignment_name": "A", "course_code": "CS 100", "project_id": "p", "canvas_url": null}"#;
        let task: PlannedTask = serde_json::from_str(json).unwrap();
        assert!(task.due_date.is_none());
    }
}
