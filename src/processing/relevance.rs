//! Relevance filtering for candidate keyword phrases

/// Generic phrases that show up in almost every posting and carry no skill signal.
pub const IRRELEVANT_PHRASES: &[&str] = &[
    "the needs",
    "their needs",
    "a focus",
    "customer",
    "user",
    "project",
    "projects",
    "stakeholders",
    "your responsibilities",
    "multiple customers",
    "role",
    "good understanding",
    "responsibility",
    "background",
    "team",
    "client",
    "clients",
    "tasks",
    "services",
    "approach",
    "environment",
];

/// Phrases opening with these are boilerplate ("the needs of", "our team").
pub const REJECTED_PREFIXES: &[&str] = &["the ", "your ", "our "];

pub const MAX_PHRASE_TOKENS: usize = 4;

/// Whether a normalized (trimmed, lowercased) phrase may become a keyword.
///
/// Length and numeric checks are the caller's job; see [`is_candidate`].
pub fn is_relevant_keyword(keyword: &str) -> bool {
    !IRRELEVANT_PHRASES.contains(&keyword)
        && keyword.split_whitespace().count() <= MAX_PHRASE_TOKENS
        && !REJECTED_PREFIXES.iter().any(|p| keyword.starts_with(p))
}

/// Cheap shape checks applied before the relevance filter: longer than two
/// characters and not a bare number.
pub fn is_candidate(keyword: &str) -> bool {
    keyword.chars().count() > 2 && !keyword.chars().all(char::is_numeric)
}
