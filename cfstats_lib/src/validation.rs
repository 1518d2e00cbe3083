//! Validation of user-supplied handles and display names.

use std::collections::HashSet;

use regex::Regex;

use crate::error::CfStatsError;

pub const MAX_NAME_LENGTH: usize = 64;
pub const MAX_HANDLES: usize = 16;

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, CfStatsError> {
    if input.len() > max_len {
        return Err(CfStatsError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(CfStatsError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

fn handle_pattern() -> Result<Regex, CfStatsError> {
    Regex::new(r"^[A-Za-z0-9_.\-]{3,24}$").map_err(|e| {
        tracing::error!("Failed to compile handle pattern: {}", e);
        CfStatsError::InvalidInput("handle pattern unavailable".to_string())
    })
}

fn check_handle(pattern: &Regex, input: &str) -> Result<String, CfStatsError> {
    let trimmed = input.trim();
    if pattern.is_match(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(CfStatsError::InvalidInput(format!(
            "invalid handle '{}': expected 3-24 letters, digits, '_', '.' or '-'",
            input
        )))
    }
}

/// Validate a platform handle: 3-24 characters of letters, digits, `_`, `.` or `-`.
pub fn validate_handle(input: &str) -> Result<String, CfStatsError> {
    check_handle(&handle_pattern()?, input)
}

/// Validate a list of handles belonging to one person. Handles are compared
/// case-insensitively, as the platform does.
pub fn validate_handles(inputs: &[String]) -> Result<Vec<String>, CfStatsError> {
    if inputs.is_empty() {
        return Err(CfStatsError::InvalidInput(
            "at least one handle is required".to_string(),
        ));
    }
    if inputs.len() > MAX_HANDLES {
        return Err(CfStatsError::InvalidInput(format!(
            "at most {} handles can be merged",
            MAX_HANDLES
        )));
    }
    let pattern = handle_pattern()?;
    let mut seen = HashSet::new();
    let mut handles = Vec::with_capacity(inputs.len());
    for input in inputs {
        let handle = check_handle(&pattern, input)?;
        if !seen.insert(handle.to_lowercase()) {
            return Err(CfStatsError::InvalidInput(format!(
                "handle '{}' given more than once",
                handle
            )));
        }
        handles.push(handle);
    }
    Ok(handles)
}

/// Validate a display name: enforce length, strip control chars, trim.
pub fn validate_display_name(input: &str) -> Result<String, CfStatsError> {
    sanitize_text(input, MAX_NAME_LENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    // -- Handle validation --

    #[test]
    fn handle_valid() {
        assert_eq!(validate_handle("tourist").unwrap(), "tourist");
        assert_eq!(validate_handle("Um_nik").unwrap(), "Um_nik");
        assert_eq!(validate_handle("a.b-c").unwrap(), "a.b-c");
    }

    #[test]
    fn handle_trimmed() {
        assert_eq!(validate_handle("  alice_cf \n").unwrap(), "alice_cf");
    }

    #[test]
    fn handle_too_short() {
        assert!(validate_handle("ab").is_err());
    }

    #[test]
    fn handle_too_long() {
        assert!(validate_handle(&"a".repeat(25)).is_err());
    }

    #[test]
    fn handle_bad_chars() {
        assert!(validate_handle("alice;bob").is_err());
        assert!(validate_handle("alice cf").is_err());
        assert!(validate_handle("\u{00E9}lise").is_err());
    }

    // -- Handle lists --

    #[test]
    fn handles_valid() {
        let out = validate_handles(&strings(&["alice_cf", "alice_alt"])).unwrap();
        assert_eq!(out, strings(&["alice_cf", "alice_alt"]));
    }

    #[test]
    fn handles_share_one_pattern() {
        let out = validate_handles(&strings(&[" tourist ", "Um_nik", "a.b-c"])).unwrap();
        assert_eq!(out, vec!["tourist", "Um_nik", "a.b-c"]);

        let err = validate_handles(&strings(&["tourist", "no spaces"])).unwrap_err();
        assert!(err.to_string().contains("no spaces"));
    }

    #[test]
    fn handles_empty() {
        assert!(validate_handles(&[]).is_err());
    }

    #[test]
    fn handles_duplicate_case_insensitive() {
        let err = validate_handles(&strings(&["Alice_CF", "alice_cf"])).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn handles_too_many() {
        let many: Vec<String> = (0..17).map(|i| format!("handle{}", i)).collect();
        assert!(validate_handles(&many).is_err());
    }

    // -- Display names --

    #[test]
    fn name_strips_control_chars() {
        assert_eq!(validate_display_name(" Alice\u{0007} ").unwrap(), "Alice");
    }

    #[test]
    fn name_keeps_unicode() {
        assert_eq!(validate_display_name("Алиса").unwrap(), "Алиса");
    }

    #[test]
    fn name_empty_after_sanitize() {
        assert!(validate_display_name("\t\n").is_err());
    }

    #[test]
    fn name_too_long() {
        assert!(validate_display_name(&"x".repeat(65)).is_err());
    }
}
