//! Report structures handed to the output formatters

use crate::config::ReportConfig;
use crate::processing::keywords::KeywordSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Three-tier severity of a match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Good,
    Medium,
    Low,
}

impl ScoreBand {
    pub fn from_score(score: f64, config: &ReportConfig) -> Self {
        if score >= config.good_threshold {
            ScoreBand::Good
        } else if score >= config.medium_threshold {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Good => "good",
            ScoreBand::Medium => "medium",
            ScoreBand::Low => "low",
        }
    }
}

/// Everything the presentation layer needs from one analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// 0..=100, two decimals.
    pub score: f64,
    pub band: ScoreBand,
    pub matched_keywords: KeywordSet,
    pub missing_keywords: KeywordSet,
    /// `missing_keywords` truncated to the display cap.
    pub missing_display: Vec<String>,
    /// One suggestion per missing keyword, truncated to the suggestion cap.
    pub suggestions: Vec<String>,
    pub resume_keyword_count: usize,
    pub job_keyword_count: usize,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub matcher_version: String,
    pub resume_source: String,
    pub job_source: String,
    pub model_name: String,
    pub processing_time_ms: u64,
}

impl AnalysisReport {
    /// True when no job keyword is missing, including when the job
    /// description yielded none at all.
    pub fn covers_everything(&self) -> bool {
        self.missing_keywords.is_empty()
    }
}
