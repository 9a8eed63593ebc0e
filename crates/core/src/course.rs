//! Course key and display-name validation.
//!
//! Courses are addressed in URLs by their key (e.g. `course-v1:Org+Num+Run`),
//! so the key alphabet excludes `/`, `?`, `#` and whitespace.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Maximum length for a course key.
pub const MAX_COURSE_KEY_LEN: usize = 255;

/// Maximum length for a course or video display name.
pub const MAX_DISPLAY_NAME_LEN: usize = 255;

static COURSE_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._:+\-]+$").expect("valid regex"));

/// Validate a course key: non-empty, bounded, URL-path safe.
pub fn validate_course_key(key: &str) -> Result<(), CoreError> {
    if key.is_empty() {
        return Err(CoreError::Validation(
            "Course key must not be empty".to_string(),
        ));
    }
    if key.chars().count() > MAX_COURSE_KEY_LEN {
        return Err(CoreError::Validation(format!(
            "Course key too long: {} chars (max {MAX_COURSE_KEY_LEN})",
            key.chars().count()
        )));
    }
    if !COURSE_KEY_RE.is_match(key) {
        return Err(CoreError::Validation(format!(
            "Invalid course key '{key}'. Allowed characters: letters, digits, '.', '_', ':', '+', '-'"
        )));
    }
    Ok(())
}

/// Validate a display name: non-blank and within length limit.
pub fn validate_display_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Display name must not be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_DISPLAY_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Display name too long: {} chars (max {MAX_DISPLAY_NAME_LEN})",
            name.chars().count()
        )));
    }
    Ok(())
}
