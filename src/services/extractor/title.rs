// src/services/extractor/title.rs

//! Assignment title cleanup.

use std::sync::LazyLock;

use regex::Regex;

static TRAILING_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*\[[a-z_\d]+\]\s*$").expect("valid regex"));
static LONG_ID_PARENS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\d{5,}[^)]*\)\s*").expect("valid regex"));
static SPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid regex"));
static BRACKET_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([A-Z]+\s*\d+[A-Z]*)\]\s*").expect("valid regex"));
static CODE_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]+\s*\d+[A-Z]*)\s*[:-]\s*").expect("valid regex"));

/// Strip course markers from a calendar title.
///
/// Removes, in order: a trailing machine tag (`[cs_124_120258_248828]`),
/// parenthesized segments holding a 5+ digit id, a leading `[CODE]`, and a
/// leading `CODE:` / `CODE -`. A removed segment leaves one space behind;
/// whitespace runs are collapsed and the result is trimmed.
pub fn clean_title(title: &str) -> String {
    let cleaned = TRAILING_TAG_RE.replace(title, "");
    let cleaned = LONG_ID_PARENS_RE.replace_all(&cleaned, " ");
    let cleaned = SPACE_RUN_RE.replace_all(cleaned.trim(), " ");
    let cleaned = BRACKET_PREFIX_RE.replace(&cleaned, "");
    let cleaned = CODE_PREFIX_RE.replace(&cleaned, "");
    cleaned.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_machine_tag() {
        assert_eq!(clean_title("Quiz 2 [cs_124_120258_248828]"), "Quiz 2");
        assert_eq!(clean_title("  Quiz 2  [CS_124_120258_248828]  "), "Quiz 2");
    }

    #[test]
    fn test_long_id_parens() {
        assert_eq!(
            clean_title("Homework 4 (MATH 231 AL1 Spring 2026 120258)"),
            "Homework 4"
        );
    }

    #[test]
    fn test_long_id_parens_mid_title_keeps_word_gap() {
        assert_eq!(clean_title("Homework (ID 12345) Part 2"), "Homework Part 2");
        assert_eq!(
            clean_title("(Section 120258) Lab  Report"),
            "Lab Report"
        );
    }

    #[test]
    fn test_bracket_prefix() {
        assert_eq!(clean_title("[HIST 281] Essay Draft"), "Essay Draft");
    }

    #[test]
    fn test_code_prefix() {
        assert_eq!(clean_title("CS 124: Machine Project 3"), "Machine Project 3");
        assert_eq!(clean_title("ENG 100 - Reflection"), "Reflection");
    }

    #[test]
    fn test_keeps_other_punctuation() {
        assert_eq!(
            clean_title("Lab 3: Forces & Motion (part 2) [phys_100_120258_1]"),
            "Lab 3: Forces & Motion (part 2)"
        );
        assert_eq!(clean_title("Reading - Chapter 4"), "Reading - Chapter 4");
    }
}
