// src/lambda/mod.rs

//! AWS Lambda handler for the sync.
//!
//! Accepts function-URL and API Gateway proxy events as well as direct
//! invocations:
//! 1. Loads configuration (`CANVAS_SYNC_CONFIG` file plus environment)
//! 2. Runs the sync against the Notion database
//! 3. Returns the summary as a JSON proxy response

use std::collections::BTreeMap;

use chrono::Local;
use lambda_runtime::{Error as LambdaError, LambdaEvent};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{error, info, instrument};

use crate::config::{lambda_config_path, load_config};
use crate::error::Result;
use crate::models::SyncSummary;
use crate::pipeline::run_sync;
use crate::services::NotionClient;
use crate::storage::LocalStorage;
use crate::utils::http::create_async_client;

/// Proxy integration response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl HttpResponse {
    fn new(status_code: u16, body: String) -> Self {
        let headers = [
            ("Content-Type", "application/json"),
            ("Access-Control-Allow-Origin", "*"),
            ("Access-Control-Allow-Methods", "GET, POST, OPTIONS"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            status_code,
            headers,
            body,
        }
    }

    fn json(status_code: u16, value: &Value) -> Self {
        let body = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
        Self::new(status_code, body)
    }

    fn error(status_code: u16, message: impl Into<String>) -> Self {
        Self::json(status_code, &json!({ "error": message.into() }))
    }

    fn failure(error_type: &str, message: impl Into<String>) -> Self {
        Self::json(
            500,
            &json!({ "error": message.into(), "error_type": error_type }),
        )
    }
}

/// What to do with an incoming request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Sync,
    Preflight,
    NotAllowed(String),
}

/// HTTP method of a proxy event, upper-cased. `None` for direct invocations.
pub fn request_method(event: &Value) -> Option<String> {
    event
        .pointer("/requestContext/http/method")
        .or_else(|| event.get("httpMethod"))
        .and_then(Value::as_str)
        .map(str::to_ascii_uppercase)
}

pub fn route(method: Option<&str>) -> Route {
    match method {
        None | Some("GET") | Some("POST") => Route::Sync,
        Some("OPTIONS") => Route::Preflight,
        Some(other) => Route::NotAllowed(other.to_string()),
    }
}

/// Main Lambda handler function.
#[instrument(skip(event))]
pub async fn handler(event: LambdaEvent<Value>) -> std::result::Result<HttpResponse, LambdaError> {
    let (payload, _context) = event.into_parts();
    let method = request_method(&payload);

    match route(method.as_deref()) {
        Route::Preflight => Ok(HttpResponse::new(204, String::new())),
        Route::NotAllowed(method) => {
            info!("Rejecting method {}", method);
            Ok(HttpResponse::error(405, format!("Method {method} not allowed")))
        }
        Route::Sync => Ok(respond(sync_once().await)),
    }
}

/// Turn a run outcome into a response.
pub fn respond(outcome: Result<SyncSummary>) -> HttpResponse {
    match outcome {
        Ok(summary) => {
            info!(
                "Sync completed: {} total, {} created, {} skipped, {} errors",
                summary.total_assignments,
                summary.created,
                summary.skipped,
                summary.errors.len()
            );
            match serde_json::to_value(&summary) {
                Ok(value) => HttpResponse::json(200, &value),
                Err(e) => HttpResponse::failure("serialization", e.to_string()),
            }
        }
        Err(e) if e.is_configuration() => {
            error!("Configuration error: {}", e);
            HttpResponse::failure("configuration", e.to_string())
        }
        Err(e) => {
            error!("Sync failed: {}", e);
            HttpResponse::failure("sync", e.to_string())
        }
    }
}

async fn sync_once() -> Result<SyncSummary> {
    let config_path = lambda_config_path();
    info!("Loading config from {}", config_path.display());
    let config = load_config(&config_path)?;

    let client = create_async_client(&config.feed)?;
    let store = NotionClient::new(client.clone(), config.notion.clone());
    let storage = LocalStorage::new(std::env::temp_dir());

    run_sync(&config, &client, store, &storage, Local::now().date_naive()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::SyncMode;

    #[test]
    fn test_request_method_function_url() {
        let event = json!({ "requestContext": { "http": { "method": "post" } } });
        assert_eq!(request_method(&event), Some("POST".to_string()));
    }

    #[test]
    fn test_request_method_rest_api_and_direct() {
        assert_eq!(
            request_method(&json!({ "httpMethod": "OPTIONS" })),
            Some("OPTIONS".to_string())
        );
        assert_eq!(request_method(&json!({})), None);
    }

    #[test]
    fn test_route() {
        assert_eq!(route(None), Route::Sync);
        assert_eq!(route(Some("GET")), Route::Sync);
        assert_eq!(route(Some("OPTIONS")), Route::Preflight);
        assert_eq!(route(Some("DELETE")), Route::NotAllowed("DELETE".to_string()));
    }

    #[test]
    fn test_response_shape() {
        let response = respond(Ok(SyncSummary::new(SyncMode::Direct)));
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["statusCode"], 200);
        assert_eq!(value["headers"]["Content-Type"], "application/json");
        assert_eq!(value["headers"]["Access-Control-Allow-Origin"], "*");
        let body: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["success"], true);
    }

    #[test]
    fn test_configuration_error_is_500() {
        let response = respond(Err(AppError::MissingConfig(vec![
            "feed.url (CANVAS_ICS_URL)".to_string(),
        ])));
        assert_eq!(response.status_code, 500);
        let body: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["error_type"], "configuration");
        assert!(body["error"].as_str().unwrap().contains("CANVAS_ICS_URL"));
    }

    #[test]
    fn test_pipeline_error_is_distinguished() {
        let response = respond(Err(AppError::fetch(
            "https://canvas.illinois.edu/feed.ics",
            "status 503",
        )));
        assert_eq!(response.status_code, 500);
        let body: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["error_type"], "sync");
    }
}
