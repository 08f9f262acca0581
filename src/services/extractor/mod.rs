// src/services/extractor/mod.rs

//! Event extractor service.
//!
//! Turns an ICS document into assignment records: drops untitled events,
//! derives course codes, cleans titles, normalizes due dates and picks out
//! the assignment link.

mod course_code;
mod ics;
mod title;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::Result;
use crate::models::{AssignmentRecord, Config, SkipReason, SkippedAssignment};

pub use course_code::{CourseMatcher, MATCHERS, extract_course_code};
pub use ics::{CalendarEvent, parse_events};
pub use title::clean_title;

/// Assignments derived from one feed.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Candidates for publishing, in feed order
    pub assignments: Vec<AssignmentRecord>,
    /// Past-due or undated assignments
    pub skipped: Vec<SkippedAssignment>,
    /// Untitled events, not counted as assignments
    pub ignored_events: usize,
}

impl Extraction {
    /// Number of assignments seen, skipped ones included.
    pub fn total(&self) -> usize {
        self.assignments.len() + self.skipped.len()
    }
}

/// Service for extracting assignments from calendar events.
pub struct EventExtractor {
    link_pattern: Regex,
    filter_future_only: bool,
    keep_undated: bool,
}

impl EventExtractor {
    /// Create an extractor from the feed and sync settings.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            link_pattern: Regex::new(&config.feed.link_pattern)?,
            filter_future_only: config.sync.filter_future_only,
            keep_undated: config.sync.keep_undated,
        })
    }

    /// Parse `document` and derive assignments relative to `today`.
    pub fn extract(&self, document: &str, today: NaiveDate) -> Result<Extraction> {
        let events = parse_events(document)?;
        log::info!("Parsed {} calendar events", events.len());
        Ok(self.extract_events(&events, today))
    }

    /// Derive assignments from already parsed events.
    pub fn extract_events(&self, events: &[CalendarEvent], today: NaiveDate) -> Extraction {
        let mut extraction = Extraction::default();

        for event in events {
            let summary = event.summary.trim();
            if summary.is_empty() {
                log::debug!("Ignoring untitled event {}", event.uid);
                extraction.ignored_events += 1;
                continue;
            }

            let record = self.to_record(event);

            match record.due_date {
                None if !self.keep_undated => {
                    extraction.skipped.push(SkippedAssignment::new(
                        &record.name,
                        record.course_code.as_deref(),
                        SkipReason::Undated,
                    ));
                }
                Some(due) if self.filter_future_only && due < today => {
                    extraction.skipped.push(SkippedAssignment::new(
                        &record.name,
                        record.course_code.as_deref(),
                        SkipReason::PastDue,
                    ));
                }
                _ => extraction.assignments.push(record),
            }
        }

        extraction
    }

    fn to_record(&self, event: &CalendarEvent) -> AssignmentRecord {
        let summary = event.summary.trim();
        let course_code = extract_course_code(summary, &event.location);

        let mut name = clean_title(summary);
        if name.is_empty() {
            name = summary.to_string();
        }

        AssignmentRecord {
            name,
            course_code,
            due_date: event.start,
            canvas_url: self.extract_link(&event.description),
            uid: event.uid.clone(),
        }
    }

    /// First assignment link in a description.
    pub fn extract_link(&self, description: &str) -> Option<String> {
        self.link_pattern
            .find(description)
            .map(|m| m.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(summary: &str, start: Option<NaiveDate>) -> CalendarEvent {
        CalendarEvent {
            summary: summary.to_string(),
            uid: format!("uid-{summary}"),
            start,
            ..Default::default()
        }
    }

    fn extractor(filter_future_only: bool, keep_undated: bool) -> EventExtractor {
        let mut config = Config::default();
        config.sync.filter_future_only = filter_future_only;
        config.sync.keep_undated = keep_undated;
        EventExtractor::new(&config).unwrap()
    }

    #[test]
    fn test_record_fields() {
        let mut ev = event("Quiz 2 [cs_124_120258_248828]", Some(date(2026, 10, 20)));
        ev.description =
            "Take it here: https://canvas.illinois.edu/courses/77/quizzes/9 before class".into();

        let extraction = extractor(true, false).extract_events(&[ev], date(2026, 10, 16));
        let record = &extraction.assignments[0];
        assert_eq!(record.name, "Quiz 2");
        assert_eq!(record.course_code.as_deref(), Some("CS 124"));
        assert_eq!(record.due_date, Some(date(2026, 10, 20)));
        assert_eq!(
            record.canvas_url.as_deref(),
            Some("https://canvas.illinois.edu/courses/77/quizzes/9")
        );
        assert_eq!(record.uid, "uid-Quiz 2 [cs_124_120258_248828]");
    }

    #[test]
    fn test_untitled_events_are_ignored() {
        let events = vec![event("   ", Some(date(2026, 10, 20))), event("", None)];
        let extraction = extractor(true, false).extract_events(&events, date(2026, 10, 16));
        assert_eq!(extraction.ignored_events, 2);
        assert_eq!(extraction.total(), 0);
    }

    #[test]
    fn test_past_due_filter() {
        let events = vec![
            event("Yesterday", Some(date(2026, 10, 15))),
            event("Today", Some(date(2026, 10, 16))),
        ];

        let filtered = extractor(true, false).extract_events(&events, date(2026, 10, 16));
        assert_eq!(filtered.assignments.len(), 1);
        assert_eq!(filtered.assignments[0].name, "Today");
        assert_eq!(filtered.skipped[0].reason, SkipReason::PastDue);
        assert_eq!(filtered.total(), 2);

        let unfiltered = extractor(false, false).extract_events(&events, date(2026, 10, 16));
        assert_eq!(unfiltered.assignments.len(), 2);
    }

    #[test]
    fn test_undated_policy() {
        let events = vec![event("Participation", None)];

        let dropped = extractor(true, false).extract_events(&events, date(2026, 10, 16));
        assert!(dropped.assignments.is_empty());
        assert_eq!(dropped.skipped[0].reason, SkipReason::Undated);

        let kept = extractor(true, true).extract_events(&events, date(2026, 10, 16));
        assert_eq!(kept.assignments.len(), 1);
        assert_eq!(kept.assignments[0].due_date, None);
    }

    #[test]
    fn test_name_falls_back_to_summary() {
        let events = vec![event("[cs_124_120258_248828]", Some(date(2026, 10, 20)))];
        let extraction = extractor(true, false).extract_events(&events, date(2026, 10, 16));
        assert_eq!(extraction.assignments[0].name, "[cs_124_120258_248828]");
    }

    #[test]
    fn test_extract_link_absent() {
        let ex = extractor(true, false);
        assert_eq!(ex.extract_link("See https://example.com/other"), None);
        assert_eq!(ex.extract_link(""), None);
    }
}
