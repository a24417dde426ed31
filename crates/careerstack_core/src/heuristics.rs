//! Static configuration for the extraction heuristic.
//!
//! Kept as plain data so the heuristic's coverage can be unit-tested and
//! extended without touching the fetch or cache logic.

/// Keywords that mark a hyperlink as job-related, matched
/// case-insensitively against the href and the link text.
pub const LINK_KEYWORDS: &[&str] = &["job", "careers", "openings", "positions", "apply"];

/// Secondary whitelist for the container pass: a container's text must
/// mention at least one of these role words to be considered.
pub const ROLE_KEYWORDS: &[&str] = &[
    "engineer",
    "developer",
    "analyst",
    "manager",
    "intern",
    "security",
    "cyber",
];

/// Structural selectors for the container pass: elements whose class or
/// id hints at a job listing, plus generic list items and table rows.
pub const CONTAINER_SELECTORS: &[&str] = &[
    r#"[class*="job"]"#,
    r#"[id*="job"]"#,
    r#"[class*="opening"]"#,
    r#"[class*="position"]"#,
    "li",
    "tr",
];

/// Containers with flattened text shorter than this are ignored.
pub const MIN_CONTAINER_TEXT_CHARS: usize = 15;

/// Fallback title length when a container's link has no text of its own.
pub const CONTAINER_TITLE_MAX_CHARS: usize = 80;

/// True if `text` contains any link keyword, case-insensitively.
pub fn contains_link_keyword(text: &str) -> bool {
    let lower = text.to_lowercase();
    LINK_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// True if `text` contains any role keyword, case-insensitively.
pub fn contains_role_keyword(text: &str) -> bool {
    let lower = text.to_lowercase();
    ROLE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}
