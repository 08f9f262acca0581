// src/services/mod.rs

//! Service layer for the sync application.
//!
//! This module contains the business logic for:
//! - Feed retrieval (`FeedFetcher`)
//! - Assignment extraction from calendar events (`EventExtractor`)
//! - Course to project resolution (`CourseResolver`)
//! - Task publishing (`TaskPublisher`) over a `TaskStore` such as `NotionClient`

pub mod extractor;
mod feed;
pub mod notion;
pub mod publisher;
pub mod resolver;

pub use extractor::{EventExtractor, Extraction};
pub use feed::FeedFetcher;
pub use notion::NotionClient;
pub use publisher::{PublishReport, TaskPublisher, TaskStore, plan};
pub use resolver::{CourseResolver, Resolution};
