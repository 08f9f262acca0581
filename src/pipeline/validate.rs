// src/pipeline/validate.rs

use std::path::Path;

use crate::error::Result;
use crate::models::Config;
use crate::services::CourseResolver;
use crate::utils::console;

/// Validate a loaded configuration and report its key settings.
pub fn run_validate(config: &Config, config_path: &Path) -> Result<()> {
    console::header("Validating configuration");
    console::info(&format!("Config file: {}", config_path.display()));

    if let Err(e) = config.validate() {
        console::error(&format!("Validation failed: {e}"));
        return Err(e);
    }

    let resolver = CourseResolver::new(&config.courses);
    console::success("Configuration OK");
    console::sub_item(&format!("Feed: {}", feed_host(&config.feed.url)));
    console::sub_item(&format!(
        "Timeout: {}s, User-Agent: {}",
        config.feed.timeout_secs, config.feed.user_agent
    ));
    console::sub_item(&format!(
        "Courses: {} mapped, {} excluded",
        resolver.len() - resolver.excluded_count(),
        resolver.excluded_count()
    ));
    console::sub_item(&format!(
        "Mode: {}, future only: {}, keep undated: {}",
        if config.sync.direct_publish {
            "direct"
        } else {
            "hand-off"
        },
        config.sync.filter_future_only,
        config.sync.keep_undated
    ));
    if resolver.is_empty() {
        console::warn("No courses configured; every assignment will be skipped as unmapped");
    }
    Ok(())
}

/// Host part of the feed URL. The path carries a private token.
fn feed_host(feed_url: &str) -> String {
    url::Url::parse(feed_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| "(invalid)".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_feed_host_hides_token() {
        assert_eq!(
            feed_host("https://canvas.illinois.edu/feeds/calendars/user_secret.ics"),
            "canvas.illinois.edu"
        );
        assert_eq!(feed_host("not a url"), "(invalid)");
    }

    #[test]
    fn test_run_validate_reports_missing_fields() {
        let err = run_validate(&Config::default(), Path::new("config.toml")).unwrap_err();
        assert!(matches!(err, AppError::MissingConfig(_)));
    }

    #[test]
    fn test_run_validate_ok() {
        let mut config = Config::default();
        config.feed.url = "https://canvas.illinois.edu/feed.ics".to_string();
        config.sync.direct_publish = false;
        assert!(run_validate(&config, Path::new("config.toml")).is_ok());
    }
}
