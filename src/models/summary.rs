//! Run outcome structures: skip tally, hand-off document and final summary.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::PlannedTask;

/// Why an assignment did not produce a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// A task with the same title already exists
    Duplicate,
    /// No course code, or the code is not in the mapping
    Unmapped,
    /// The course is mapped to the excluded sentinel
    Excluded,
    /// Due before today
    PastDue,
    /// No due date
    Undated,
}

impl SkipReason {
    pub const ALL: [SkipReason; 5] = [
        SkipReason::Duplicate,
        SkipReason::Unmapped,
        SkipReason::Excluded,
        SkipReason::PastDue,
        SkipReason::Undated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Duplicate => "duplicate",
            SkipReason::Unmapped => "unmapped",
            SkipReason::Excluded => "excluded",
            SkipReason::PastDue => "past_due",
            SkipReason::Undated => "undated",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::Duplicate => "Task already exists",
            SkipReason::Unmapped => "No matching Notion project found",
            SkipReason::Excluded => "Course excluded from sync",
            SkipReason::PastDue => "Due date has passed",
            SkipReason::Undated => "No due date",
        };
        f.write_str(text)
    }
}

/// An assignment that was accounted for without creating a task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkippedAssignment {
    pub assignment: String,
    pub course: String,
    pub reason: SkipReason,
}

impl SkippedAssignment {
    pub fn new(assignment: &str, course: Option<&str>, reason: SkipReason) -> Self {
        Self {
            assignment: assignment.to_string(),
            course: course.unwrap_or("Unknown").to_string(),
            reason,
        }
    }
}

/// Document written in hand-off mode and read back by `publish`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandoffDocument {
    pub tasks_to_create: Vec<PlannedTask>,
    #[serde(default)]
    pub skipped: Vec<SkippedAssignment>,
    pub sync_date: DateTime<Local>,
}

impl HandoffDocument {
    pub fn new(tasks_to_create: Vec<PlannedTask>, skipped: Vec<SkippedAssignment>) -> Self {
        Self {
            tasks_to_create,
            skipped,
            sync_date: Local::now(),
        }
    }

    /// Task names grouped by course code, sorted by course.
    pub fn by_course(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut grouped: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for task in &self.tasks_to_create {
            grouped
                .entry(task.course_code.as_str())
                .or_default()
                .push(task.assignment_name.as_str());
        }
        grouped
    }
}

/// Which publishing path a run took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    Direct,
    Handoff,
}

/// Final result of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncSummary {
    pub success: bool,
    pub mode: SyncMode,
    pub total_assignments: usize,
    pub created: usize,
    /// Tasks written to the hand-off file instead of being created
    pub planned: usize,
    pub skipped: usize,
    pub skip_breakdown: BTreeMap<String, usize>,
    pub skipped_items: Vec<SkippedAssignment>,
    /// Untitled calendar events, excluded before counting
    pub ignored_events: usize,
    pub errors: Vec<String>,
    pub timestamp: DateTime<Local>,
}

impl SyncSummary {
    /// Start an empty summary for the given mode.
    pub fn new(mode: SyncMode) -> Self {
        Self {
            success: true,
            mode,
            total_assignments: 0,
            created: 0,
            planned: 0,
            skipped: 0,
            skip_breakdown: BTreeMap::new(),
            skipped_items: Vec::new(),
            ignored_events: 0,
            errors: Vec::new(),
            timestamp: Local::now(),
        }
    }

    /// Record skipped assignments and refresh the per-reason tally.
    pub fn record_skips(&mut self, skipped: impl IntoIterator<Item = SkippedAssignment>) {
        self.skipped_items.extend(skipped);
        self.skipped = self.skipped_items.len();
        self.skip_breakdown = SkipReason::ALL
            .iter()
            .map(|reason| {
                let count = self
                    .skipped_items
                    .iter()
                    .filter(|s| s.reason == *reason)
                    .count();
                (reason.as_str().to_string(), count)
            })
            .collect();
    }

    /// Number of skips recorded for one reason.
    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skip_breakdown
            .get(reason.as_str())
            .copied()
            .unwrap_or(0)
    }

    /// Stamp the completion time.
    pub fn finish(mut self) -> Self {
        self.timestamp = Local::now();
        self
    }
}
