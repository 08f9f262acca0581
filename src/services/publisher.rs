// src/services/publisher.rs

//! Task publisher service.
//!
//! Deduplicates assignments against the destination by exact title and
//! creates one task per remaining assignment whose course resolves to a
//! project. Individual creation failures are recorded, not fatal.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{AssignmentRecord, PlannedTask, SkipReason, SkippedAssignment};
use crate::services::resolver::{CourseResolver, Resolution};

/// Trait for task destinations.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Titles of every task currently in the destination.
    async fn existing_titles(&self) -> Result<HashSet<String>>;

    /// Create one task.
    async fn create_task(&self, task: &PlannedTask) -> Result<()>;
}

/// Outcome of a publishing pass.
#[derive(Debug, Default)]
pub struct PublishReport {
    /// Names of created tasks
    pub created: Vec<String>,
    pub skipped: Vec<SkippedAssignment>,
    /// Names of tasks whose creation failed
    pub errors: Vec<String>,
}

/// Resolve assignments to tasks without touching the destination.
pub fn plan(
    resolver: &CourseResolver,
    assignments: &[AssignmentRecord],
) -> (Vec<PlannedTask>, Vec<SkippedAssignment>) {
    let mut planned = Vec::new();
    let mut skipped = Vec::new();

    for assignment in assignments {
        match route(resolver, assignment) {
            Ok(task) => planned.push(task),
            Err(skip) => skipped.push(skip),
        }
    }
    (planned, skipped)
}

fn route(
    resolver: &CourseResolver,
    assignment: &AssignmentRecord,
) -> std::result::Result<PlannedTask, SkippedAssignment> {
    let course = assignment.course_code.as_deref();
    match resolver.resolve(course) {
        Resolution::Project(project_id) => Ok(PlannedTask::new(
            assignment,
            course.unwrap_or_default(),
            &project_id,
        )),
        Resolution::Excluded => Err(SkippedAssignment::new(
            &assignment.name,
            course,
            SkipReason::Excluded,
        )),
        Resolution::Unmapped => Err(SkippedAssignment::new(
            &assignment.name,
            course,
            SkipReason::Unmapped,
        )),
    }
}

/// Service for publishing assignments to a task store.
pub struct TaskPublisher<S> {
    store: S,
    resolver: CourseResolver,
}

impl<S: TaskStore> TaskPublisher<S> {
    pub fn new(store: S, resolver: CourseResolver) -> Self {
        Self { store, resolver }
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Publish assignments in order: duplicate, unmapped and excluded ones
    /// are skipped, the rest are created.
    pub async fn publish(&self, assignments: &[AssignmentRecord]) -> Result<PublishReport> {
        let mut existing = self.load_titles().await?;
        let mut report = PublishReport::default();

        for assignment in assignments {
            if existing.contains(&assignment.name) {
                report.skipped.push(SkippedAssignment::new(
                    &assignment.name,
                    assignment.course_code.as_deref(),
                    SkipReason::Duplicate,
                ));
                continue;
            }

            match route(&self.resolver, assignment) {
                Ok(task) => self.create(&task, &mut existing, &mut report).await,
                Err(skip) => {
                    log::debug!("Skipping {}: {}", skip.assignment, skip.reason);
                    report.skipped.push(skip);
                }
            }
        }

        Ok(report)
    }

    /// Publish already planned tasks, skipping duplicates.
    pub async fn publish_planned(&self, tasks: &[PlannedTask]) -> Result<PublishReport> {
        let mut existing = self.load_titles().await?;
        let mut report = PublishReport::default();

        for task in tasks {
            if existing.contains(&task.assignment_name) {
                report.skipped.push(SkippedAssignment::new(
                    &task.assignment_name,
                    Some(&task.course_code),
                    SkipReason::Duplicate,
                ));
                continue;
            }
            self.create(task, &mut existing, &mut report).await;
        }

        Ok(report)
    }

    async fn load_titles(&self) -> Result<HashSet<String>> {
        let titles = self.store.existing_titles().await?;
        log::info!("Found {} existing tasks", titles.len());
        Ok(titles)
    }

    async fn create(
        &self,
        task: &PlannedTask,
        existing: &mut HashSet<String>,
        report: &mut PublishReport,
    ) {
        match self.store.create_task(task).await {
            Ok(()) => {
                log::info!("Created task {} ({})", task.assignment_name, task.course_code);
                existing.insert(task.assignment_name.clone());
                report.created.push(task.assignment_name.clone());
            }
            Err(e) => {
                log::warn!("Failed to create task {}: {}", task.assignment_name, e);
                report.errors.push(task.assignment_name.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use chrono::NaiveDate;

    use super::*;
    use crate::error::AppError;

    /// In-memory task store.
    #[derive(Default)]
    pub struct MemoryStore {
        pub titles: HashSet<String>,
        pub created: Mutex<Vec<PlannedTask>>,
        pub fail_on: HashSet<String>,
    }

    #[async_trait]
    impl TaskStore for MemoryStore {
        async fn existing_titles(&self) -> Result<HashSet<String>> {
            Ok(self.titles.clone())
        }

        async fn create_task(&self, task: &PlannedTask) -> Result<()> {
            if self.fail_on.contains(&task.assignment_name) {
                return Err(AppError::api(400, "validation_error"));
            }
            self.created.lock().unwrap().push(task.clone());
            Ok(())
        }
    }

    fn resolver() -> CourseResolver {
        let mut courses = BTreeMap::new();
        courses.insert("CS 124".to_string(), "cs124".to_string());
        courses.insert("CITL".to_string(), String::new());
        CourseResolver::new(&courses)
    }

    fn assignment(name: &str, course: Option<&str>) -> AssignmentRecord {
        AssignmentRecord {
            name: name.to_string(),
            course_code: course.map(str::to_string),
            due_date: NaiveDate::from_ymd_opt(2026, 10, 20),
            canvas_url: None,
            uid: format!("uid-{name}"),
        }
    }

    #[tokio::test]
    async fn test_duplicate_title_is_skipped() {
        let store = MemoryStore {
            titles: HashSet::from(["Homework 3".to_string()]),
            ..Default::default()
        };
        let publisher = TaskPublisher::new(store, resolver());

        let report = publisher
            .publish(&[assignment("Homework 3", Some("CS 124"))])
            .await
            .unwrap();

        assert!(report.created.is_empty());
        assert_eq!(report.skipped[0].reason, SkipReason::Duplicate);
        assert!(publisher.store().created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_excluded_and_unmapped_are_skipped() {
        let publisher = TaskPublisher::new(MemoryStore::default(), resolver());

        let report = publisher
            .publish(&[
                assignment("Workshop", Some("CITL")),
                assignment("Midterm", Some("MATH 231")),
                assignment("Announcement", None),
            ])
            .await
            .unwrap();

        let reasons: Vec<_> = report.skipped.iter().map(|s| s.reason).collect();
        assert_eq!(
            reasons,
            vec![SkipReason::Excluded, SkipReason::Unmapped, SkipReason::Unmapped]
        );
        assert!(report.created.is_empty());
        assert!(report.errors.is_empty());
    }

    #[tokio::test]
    async fn test_creates_and_records_failures() {
        let store = MemoryStore {
            fail_on: HashSet::from(["MP2".to_string()]),
            ..Default::default()
        };
        let publisher = TaskPublisher::new(store, resolver());

        let report = publisher
            .publish(&[
                assignment("MP1", Some("CS 124")),
                assignment("MP2", Some("CS 124")),
                assignment("MP3", Some("CS124")),
            ])
            .await
            .unwrap();

        assert_eq!(report.created, vec!["MP1", "MP3"]);
        assert_eq!(report.errors, vec!["MP2"]);

        let created = publisher.store().created.lock().unwrap();
        assert_eq!(created[0].project_id, "cs124");
        assert_eq!(created[1].course_code, "CS124");
    }

    #[tokio::test]
    async fn test_same_title_twice_in_one_run_creates_once() {
        let publisher = TaskPublisher::new(MemoryStore::default(), resolver());

        let report = publisher
            .publish(&[
                assignment("Quiz 1", Some("CS 124")),
                assignment("Quiz 1", Some("CS 124")),
            ])
            .await
            .unwrap();

        assert_eq!(report.created.len(), 1);
        assert_eq!(report.skipped[0].reason, SkipReason::Duplicate);
    }

    #[tokio::test]
    async fn test_publish_planned_dedups() {
        let store = MemoryStore {
            titles: HashSet::from(["Essay".to_string()]),
            ..Default::default()
        };
        let publisher = TaskPublisher::new(store, resolver());
        let (planned, skipped) = plan(
            &resolver(),
            &[
                assignment("Essay", Some("CS 124")),
                assignment("MP4", Some("CS 124")),
                assignment("Workshop", Some("CITL")),
            ],
        );
        assert_eq!(planned.len(), 2);
        assert_eq!(skipped[0].reason, SkipReason::Excluded);

        let report = publisher.publish_planned(&planned).await.unwrap();
        assert_eq!(report.created, vec!["MP4"]);
        assert_eq!(report.skipped[0].reason, SkipReason::Duplicate);
    }
}
