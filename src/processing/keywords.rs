//! Trigger-gated noun-phrase keyword extraction

use crate::error::{Result, ResumeMatcherError};
use crate::nlp::LinguisticModel;
use crate::processing::relevance::{is_candidate, is_relevant_keyword};
use aho_corasick::AhoCorasick;
use log::debug;
use std::collections::BTreeSet;

/// Words and phrases that mark a sentence as describing a skill or duty.
/// Matching is plain substring containment on the lowercased sentence, so
/// "experienced" matches "experience".
pub const TRIGGER_PHRASES: &[&str] = &[
    "experience",
    "proficient",
    "familiar",
    "design",
    "develop",
    "build",
    "manage",
    "implement",
    "hands-on",
    "expertise",
    "knowledge",
    "skills in",
    "tools like",
];

/// A keyword set. Ordered so reports and suggestion lists are stable.
pub type KeywordSet = BTreeSet<String>;

/// Extracts keyword sets from free text using a borrowed linguistic model.
pub struct KeywordExtractor {
    triggers: AhoCorasick,
}

impl KeywordExtractor {
    pub fn new() -> Result<Self> {
        let triggers = AhoCorasick::new(TRIGGER_PHRASES).map_err(|e| {
            ResumeMatcherError::InvalidInput(format!("Failed to build trigger matcher: {}", e))
        })?;
        Ok(Self { triggers })
    }

    /// Whether an already-lowercased sentence contains any trigger phrase.
    pub fn is_triggered(&self, sentence_lower: &str) -> bool {
        self.triggers.is_match(sentence_lower)
    }

    pub fn extract(&self, model: &dyn LinguisticModel, text: &str) -> KeywordSet {
        let mut keywords = KeywordSet::new();
        let mut retained = 0usize;

        for sentence in model.parse(text) {
            if !self.is_triggered(&sentence.text.to_lowercase()) {
                continue;
            }
            retained += 1;

            for chunk in &sentence.noun_chunks {
                let keyword = chunk.trim().to_lowercase();
                if is_candidate(&keyword) && is_relevant_keyword(&keyword) {
                    keywords.insert(keyword);
                }
            }
        }

        debug!(
            "Extracted {} keywords from {} trigger sentences",
            keywords.len(),
            retained
        );
        keywords
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::Sentence;

    /// Splits on '.' and treats every comma-separated piece as a chunk.
    struct FakeModel;

    impl LinguisticModel for FakeModel {
        fn name(&self) -> &str {
            "fake"
        }

        fn parse(&self, text: &str) -> Vec<Sentence> {
            text.split('.')
                .filter(|s| !s.trim().is_empty())
                .map(|s| {
                    let (head, chunks) = s.split_once(':').unwrap_or((s, ""));
                    Sentence {
                        text: head.to_string(),
                        noun_chunks: chunks.split(',').map(str::to_string).collect(),
                    }
                })
                .collect()
        }
    }

    fn extract(text: &str) -> KeywordSet {
        KeywordExtractor::new().unwrap().extract(&FakeModel, text)
    }

    #[test]
    fn test_sentences_without_trigger_are_ignored() {
        let keywords = extract("We love lunch: Python, Rust");
        assert!(keywords.is_empty());
    }

    #[test]
    fn test_trigger_is_substring_match() {
        let keywords = extract("Experienced engineer: Python");
        assert!(keywords.contains("python"));

        let keywords = extract("Great Skills In: Rust");
        assert!(keywords.contains("rust"));
    }

    #[test]
    fn test_chunks_are_normalized_and_filtered() {
        let keywords = extract(
            "Experience with:  Apache Airflow ,SQL,AI,2024,the needs,team,one two three four five",
        );
        let expected: KeywordSet = ["apache airflow", "sql"].iter().map(|s| s.to_string()).collect();
        assert_eq!(keywords, expected);
    }

    #[test]
    fn test_duplicates_collapse() {
        let keywords = extract("Build: Docker, docker. Manage: DOCKER");
        assert_eq!(keywords.len(), 1);
    }
}
