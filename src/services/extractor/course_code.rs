// src/services/extractor/course_code.rs

//! Course code matchers.
//!
//! Each matcher looks at one shape of course reference and returns the code
//! it found. [`extract_course_code`] runs them in priority order and keeps
//! the first hit.

use std::sync::LazyLock;

use regex::Regex;

/// A single course code matcher over `(title, location)`.
pub type CourseMatcher = fn(&str, &str) -> Option<String>;

/// Matchers in priority order.
pub const MATCHERS: &[(&str, CourseMatcher)] = &[
    ("context_tag", from_context_tag),
    ("location", from_location),
    ("bracketed_code", from_bracketed_code),
    ("parenthesized_name", from_parenthesized_name),
    ("title_prefix", from_title_prefix),
];

/// Run all matchers and return the first course code found.
pub fn extract_course_code(title: &str, location: &str) -> Option<String> {
    MATCHERS.iter().find_map(|(name, matcher)| {
        let code = matcher(title, location)?;
        log::debug!("Course code {code:?} from {name} matcher for {title:?}");
        Some(code)
    })
}

fn subject_number(subject: &str, number: &str) -> String {
    format!("{} {}", subject.to_uppercase(), number)
}

/// `Quiz 2 [cs_124_120258_248828]` -> `CS 124`
pub fn from_context_tag(title: &str, _location: &str) -> Option<String> {
    static CONTEXT_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?i)\[([a-z]+)_(\d+)_[\d_]+\]").expect("valid regex")
    });

    let caps = CONTEXT_TAG_RE.captures(title)?;
    Some(subject_number(&caps[1], &caps[2]))
}

/// Location `math_231_120258_248828` -> `MATH 231`
pub fn from_location(_title: &str, location: &str) -> Option<String> {
    static LOCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?i)([a-z]+)_(\d+)(?:_|$)").expect("valid regex")
    });

    if location.is_empty() {
        return None;
    }
    let caps = LOCATION_RE.captures(location)?;
    Some(subject_number(&caps[1], &caps[2]))
}

/// `[HIST 281] Essay` or `Lab (PHYS 100A)` -> code as written
pub fn from_bracketed_code(title: &str, _location: &str) -> Option<String> {
    static BRACKETED_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"[\[(]([A-Z]+\s*\d+[A-Z]*)[\])]").expect("valid regex")
    });

    let caps = BRACKETED_RE.captures(title)?;
    Some(caps[1].to_string())
}

/// `Midterm (MATH 231 Calculus I)` -> `MATH 231`
pub fn from_parenthesized_name(title: &str, _location: &str) -> Option<String> {
    static COURSE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"\(([A-Z]+\s+\d+[A-Z]*.*?)\)").expect("valid regex")
    });
    static CODE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"([A-Z]+\s+\d+)").expect("valid regex"));

    let caps = COURSE_NAME_RE.captures(title)?;
    let code = CODE_RE.captures(&caps[1])?;
    Some(code[1].to_string())
}

/// `CS 124: MP3` or `ENG 100 - Reflection` -> `CS 124`, `ENG 100`
pub fn from_title_prefix(title: &str, _location: &str) -> Option<String> {
    static PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^([A-Z]+\s*\d+[A-Z]*)\s*[:-]").expect("valid regex")
    });

    let caps = PREFIX_RE.captures(title)?;
    Some(caps[1].to_string())
}
