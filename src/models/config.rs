//! Application configuration structures.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Calendar feed settings
    #[serde(default)]
    pub feed: FeedConfig,

    /// Destination workspace settings
    #[serde(default)]
    pub notion: NotionConfig,

    /// Pipeline behavior switches
    #[serde(default)]
    pub sync: SyncConfig,

    /// Course code to project id. An empty value marks a course as excluded.
    #[serde(default)]
    pub courses: BTreeMap<String, String>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Overlay values from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary variable lookup.
    ///
    /// Recognized variables: `CANVAS_ICS_URL`, `NOTION_API_TOKEN`,
    /// `TASKS_DATABASE_ID`, and `COURSE_MAPPING` (a JSON object whose
    /// `null` values mark excluded courses). Empty values are ignored.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty("CANVAS_ICS_URL") {
            self.feed.url = url;
        }
        if let Some(token) = non_empty("NOTION_API_TOKEN") {
            self.notion.token = token;
        }
        if let Some(id) = non_empty("TASKS_DATABASE_ID") {
            self.notion.database_id = id;
        }
        if let Some(raw) = non_empty("COURSE_MAPPING") {
            let mapping: HashMap<String, Option<String>> = serde_json::from_str(&raw)
                .map_err(|e| AppError::config(format!("COURSE_MAPPING is not valid JSON: {e}")))?;
            self.courses = mapping
                .into_iter()
                .map(|(code, project)| (code, project.unwrap_or_default()))
                .collect();
        }
        Ok(())
    }

    /// Validate everything a sync run needs.
    ///
    /// Missing fields are reported together in one error. Destination
    /// credentials are only required when publishing directly.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.feed.url.trim().is_empty() {
            missing.push("feed.url (CANVAS_ICS_URL)".to_string());
        }
        if self.sync.direct_publish {
            missing.extend(self.missing_destination_fields());
        }
        if !missing.is_empty() {
            return Err(AppError::MissingConfig(missing));
        }

        url::Url::parse(&self.feed.url)?;
        self.check_common()
    }

    /// Validate the fields needed to talk to the destination workspace.
    pub fn validate_destination(&self) -> Result<()> {
        let missing = self.missing_destination_fields();
        if !missing.is_empty() {
            return Err(AppError::MissingConfig(missing));
        }
        self.check_common()
    }

    fn missing_destination_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.notion.token.trim().is_empty() {
            missing.push("notion.token (NOTION_API_TOKEN)".to_string());
        }
        if self.notion.database_id.trim().is_empty() {
            missing.push("notion.database_id (TASKS_DATABASE_ID)".to_string());
        }
        missing
    }

    fn check_common(&self) -> Result<()> {
        if self.feed.timeout_secs == 0 {
            return Err(AppError::validation("feed.timeout_secs must be > 0"));
        }
        if self.feed.user_agent.trim().is_empty() {
            return Err(AppError::validation("feed.user_agent is empty"));
        }
        Regex::new(&self.feed.link_pattern)?;
        url::Url::parse(&self.notion.api_base)?;
        Ok(())
    }
}

/// Calendar feed and HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// ICS feed URL
    #[serde(default)]
    pub url: String,

    /// Pattern matching assignment links inside event descriptions
    #[serde(default = "defaults::link_pattern")]
    pub link_pattern: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            link_pattern: defaults::link_pattern(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Destination workspace settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotionConfig {
    /// Integration bearer token
    #[serde(default)]
    pub token: String,

    /// Tasks database id
    #[serde(default)]
    pub database_id: String,

    /// API base URL
    #[serde(default = "defaults::api_base")]
    pub api_base: String,

    /// Value sent in the `Notion-Version` header
    #[serde(default = "defaults::api_version")]
    pub api_version: String,

    /// Status given to newly created tasks
    #[serde(default = "defaults::initial_status")]
    pub initial_status: String,

    /// Database property names
    #[serde(default)]
    pub properties: PropertyNames,
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            database_id: String::new(),
            api_base: defaults::api_base(),
            api_version: defaults::api_version(),
            initial_status: defaults::initial_status(),
            properties: PropertyNames::default(),
        }
    }
}

/// Names of the task database properties written on creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyNames {
    #[serde(default = "defaults::title_property")]
    pub title: String,
    #[serde(default = "defaults::status_property")]
    pub status: String,
    #[serde(default = "defaults::due_date_property")]
    pub due_date: String,
    #[serde(default = "defaults::project_property")]
    pub project: String,
}

impl Default for PropertyNames {
    fn default() -> Self {
        Self {
            title: defaults::title_property(),
            status: defaults::status_property(),
            due_date: defaults::due_date_property(),
            project: defaults::project_property(),
        }
    }
}

/// Pipeline behavior switches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Skip assignments due before today
    #[serde(default = "defaults::enabled")]
    pub filter_future_only: bool,

    /// Create tasks directly instead of writing a hand-off file
    #[serde(default = "defaults::enabled")]
    pub direct_publish: bool,

    /// Keep events without a due date instead of skipping them
    #[serde(default)]
    pub keep_undated: bool,

    /// Hand-off file name, relative to the storage directory
    #[serde(default = "defaults::handoff_file")]
    pub handoff_file: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            filter_future_only: true,
            direct_publish: true,
            keep_undated: false,
            handoff_file: defaults::handoff_file(),
        }
    }
}

mod defaults {
    // Feed defaults
    pub fn link_pattern() -> String {
        r#"https://canvas\.illinois\.edu/[^\s<>"]+"#.into()
    }
    pub fn user_agent() -> String {
        concat!("canvas-sync/", env!("CARGO_PKG_VERSION")).into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Notion defaults
    pub fn api_base() -> String {
        "https://api.notion.com/v1".into()
    }
    pub fn api_version() -> String {
        "2022-06-28".into()
    }
    pub fn initial_status() -> String {
        "Not started".into()
    }
    pub fn title_property() -> String {
        "Name".into()
    }
    pub fn status_property() -> String {
        "Status".into()
    }
    pub fn due_date_property() -> String {
        "Due Date".into()
    }
    pub fn project_property() -> String {
        "💡 Project".into()
    }

    // Sync defaults
    pub fn enabled() -> bool {
        true
    }
    pub fn handoff_file() -> String {
        "canvas_sync_data.json".into()
    }
}
