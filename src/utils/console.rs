// src/utils/console.rs

//! Console report output with server-style formatting.
//!
//! Provides consistent run reports with timestamps and levels. Diagnostic
//! logging goes through the `log` facade instead.

use std::sync::OnceLock;

use chrono::Local;

/// Report level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }

    fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "warn" => Level::Warn,
            "error" => Level::Error,
            _ => Level::Info,
        }
    }
}

/// Current report level
static LEVEL: OnceLock<Level> = OnceLock::new();

/// Set the minimum level. Only the first call takes effect.
pub fn init(level: &str) {
    let _ = LEVEL.set(Level::from_str(level));
}

fn should_print(level: Level) -> bool {
    allows(LEVEL.get().copied().unwrap_or(Level::Info), level)
}

fn allows(threshold: Level, level: Level) -> bool {
    level >= threshold
}

/// Format a line with timestamp and level
fn format_line(level: Level, message: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    format!("[{}] [{}] {}", timestamp, level.as_str(), message)
}

pub fn info(message: &str) {
    if should_print(Level::Info) {
        println!("{}", format_line(Level::Info, message));
    }
}

pub fn warn(message: &str) {
    if should_print(Level::Warn) {
        eprintln!("{}", format_line(Level::Warn, message));
    }
}

pub fn error(message: &str) {
    if should_print(Level::Error) {
        eprintln!("{}", format_line(Level::Error, message));
    }
}

/// Success line, shown at INFO
pub fn success(message: &str) {
    info(&format!("✓ {}", message));
}

/// A numbered step of a multi-stage run
pub fn step(step_num: usize, total: usize, message: &str) {
    info(&format!("[STEP {}/{}] {}", step_num, total, message));
}

/// Boxed title line
pub fn header(title: &str) {
    if should_print(Level::Info) {
        let border = "═".repeat(60);
        println!("{}", format_line(Level::Info, &border));
        println!("{}", format_line(Level::Info, &format!("  {}", title)));
        println!("{}", format_line(Level::Info, &border));
    }
}

/// Indented line under the previous one
pub fn sub_item(message: &str) {
    info(&format!("    {}", message));
}

/// Titled key/value block
pub fn summary(title: &str, items: &[(&str, String)]) {
    if should_print(Level::Info) {
        println!("{}", format_line(Level::Info, &format!("[SUMMARY] {}", title)));
        for (key, value) in items {
            println!("{}", format_line(Level::Info, &format!("    {}: {}", key, value)));
        }
    }
}
