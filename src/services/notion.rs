// src/services/notion.rs

//! Notion-backed task store.
//!
//! Talks to the public REST API with a static integration token:
//! `POST /databases/{id}/query` for existing titles (all pages, following
//! `next_cursor`) and `POST /pages` for creation.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::{AppError, Result};
use crate::models::{NotionConfig, PlannedTask};
use crate::services::publisher::TaskStore;
use crate::utils::http::error_body;

const PAGE_SIZE: u32 = 100;
const LINK_LABEL: &str = "View in Canvas";

/// Database query request body.
#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_cursor: Option<&'a str>,
}

/// One page of database query results.
#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<PageObject>,
    #[serde(default)]
    has_more: bool,
    next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PageObject {
    #[serde(default)]
    properties: HashMap<String, Value>,
}

impl PageObject {
    /// Plain text of the title property.
    ///
    /// Falls back to whichever property has type `title` when the
    /// configured name is not present.
    fn title(&self, property: &str) -> Option<String> {
        let prop = self.properties.get(property).or_else(|| {
            self.properties
                .values()
                .find(|v| v.get("type").and_then(Value::as_str) == Some("title"))
        })?;

        let text: String = prop
            .get("title")?
            .as_array()?
            .iter()
            .filter_map(|run| run.get("plain_text").and_then(Value::as_str))
            .collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

/// Client for a Notion tasks database.
pub struct NotionClient {
    client: Client,
    config: NotionConfig,
}

impl NotionClient {
    pub fn new(client: Client, config: NotionConfig) -> Self {
        Self { client, config }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_base.trim_end_matches('/'), path)
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> Result<reqwest::Response> {
        let response = self
            .client
            .post(self.endpoint(path))
            .bearer_auth(&self.config.token)
            .header("Notion-Version", &self.config.api_version)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = error_body(response).await;
            return Err(AppError::api(status.as_u16(), message));
        }
        Ok(response)
    }

    /// Build the page creation payload for a task.
    pub fn page_payload(&self, task: &PlannedTask) -> Value {
        let names = &self.config.properties;

        let mut properties = serde_json::Map::new();
        properties.insert(
            names.title.clone(),
            json!({ "title": [{ "text": { "content": task.assignment_name } }] }),
        );
        properties.insert(
            names.status.clone(),
            json!({ "status": { "name": self.config.initial_status } }),
        );
        if !task.project_id.is_empty() {
            properties.insert(
                names.project.clone(),
                json!({ "relation": [{ "id": task.project_id }] }),
            );
        }
        if let Some(due) = task.due_date {
            properties.insert(
                names.due_date.clone(),
                json!({ "date": { "start": due.format("%Y-%m-%d").to_string() } }),
            );
        }

        let children: Vec<Value> = task
            .canvas_url
            .iter()
            .map(|url| {
                json!({
                    "object": "block",
                    "type": "paragraph",
                    "paragraph": {
                        "rich_text": [{
                            "type": "text",
                            "text": { "content": LINK_LABEL, "link": { "url": url } }
                        }]
                    }
                })
            })
            .collect();

        json!({
            "parent": { "database_id": self.config.database_id },
            "properties": properties,
            "children": children,
        })
    }
}

#[async_trait]
impl TaskStore for NotionClient {
    async fn existing_titles(&self) -> Result<HashSet<String>> {
        let path = format!("databases/{}/query", self.config.database_id);
        let mut titles = HashSet::new();
        let mut cursor: Option<String> = None;

        loop {
            let request = QueryRequest {
                page_size: PAGE_SIZE,
                start_cursor: cursor.as_deref(),
            };
            let page: QueryResponse = self.post(&path, &request).await?.json().await?;

            titles.extend(
                page.results
                    .iter()
                    .filter_map(|p| p.title(&self.config.properties.title)),
            );

            match page.next_cursor {
                Some(next) if page.has_more => {
                    if cursor.as_deref() == Some(next.as_str()) {
                        log::warn!("Query returned cursor {} again, stopping", next);
                        break;
                    }
                    cursor = Some(next);
                }
                _ => break,
            }
        }

        Ok(titles)
    }

    async fn create_task(&self, task: &PlannedTask) -> Result<()> {
        self.post("pages", &self.page_payload(task)).await?;
        Ok(())
    }
}
