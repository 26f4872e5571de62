//! Analysis engine: runs the keyword pipeline over a resume/job pair

use crate::config::ReportConfig;
use crate::error::Result;
use crate::nlp::LinguisticModel;
use crate::output::report::{AnalysisReport, ReportMetadata, ScoreBand};
use crate::processing::keywords::{KeywordExtractor, KeywordSet};
use crate::processing::scorer::calculate_score;
use crate::processing::suggestions::suggestions_for;
use chrono::Utc;
use log::info;
use std::time::Instant;

/// A piece of input text and where it came from.
#[derive(Debug, Clone, Copy)]
pub struct Source<'a> {
    pub label: &'a str,
    pub text: &'a str,
}

/// Runs one analysis at a time against a model loaded at startup.
pub struct AnalysisEngine<'m> {
    model: &'m dyn LinguisticModel,
    extractor: KeywordExtractor,
    report_config: ReportConfig,
}

impl<'m> AnalysisEngine<'m> {
    pub fn new(model: &'m dyn LinguisticModel, report_config: ReportConfig) -> Result<Self> {
        Ok(Self {
            model,
            extractor: KeywordExtractor::new()?,
            report_config,
        })
    }

    pub fn extract_keywords(&self, text: &str) -> KeywordSet {
        self.extractor.extract(self.model, text)
    }

    pub fn analyze(&self, resume: Source<'_>, job: Source<'_>) -> AnalysisReport {
        let start_time = Instant::now();

        let resume_keywords = self.extract_keywords(resume.text);
        let job_keywords = self.extract_keywords(job.text);
        info!(
            "Keywords extracted: resume={}, job description={}",
            resume_keywords.len(),
            job_keywords.len()
        );

        let result = calculate_score(&resume_keywords, &job_keywords);
        let band = ScoreBand::from_score(result.score, &self.report_config);

        let missing_display: Vec<String> = result
            .missing
            .iter()
            .take(self.report_config.missing_display_cap)
            .cloned()
            .collect();
        let suggestions = suggestions_for(&result.missing, self.report_config.suggestion_cap);

        info!(
            "Match score {:.2} ({}), {} matched, {} missing",
            result.score,
            band.label(),
            result.matched.len(),
            result.missing.len()
        );

        AnalysisReport {
            score: result.score,
            band,
            matched_keywords: result.matched,
            missing_keywords: result.missing,
            missing_display,
            suggestions,
            resume_keyword_count: resume_keywords.len(),
            job_keyword_count: job_keywords.len(),
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                matcher_version: env!("CARGO_PKG_VERSION").to_string(),
                resume_source: resume.label.to_string(),
                job_source: job.label.to_string(),
                model_name: self.model.name().to_string(),
                processing_time_ms: start_time.elapsed().as_millis() as u64,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::Sentence;

    /// Every sentence is triggered; chunks are the sentence's comma pieces.
    struct ListModel;

    impl LinguisticModel for ListModel {
        fn name(&self) -> &str {
            "list"
        }

        fn parse(&self, text: &str) -> Vec<Sentence> {
            if text.trim().is_empty() {
                return Vec::new();
            }
            vec![Sentence {
                text: format!("experience {}", text),
                noun_chunks: text.split(',').map(str::to_string).collect(),
            }]
        }
    }

    fn source(text: &str) -> Source<'_> {
        Source { label: "inline", text }
    }

    #[test]
    fn test_caps_are_applied() {
        let engine = AnalysisEngine::new(&ListModel, ReportConfig::default()).unwrap();
        let job: Vec<String> = (0..15).map(|i| format!("tool{:02}", i)).collect();
        let report = engine.analyze(source("python"), source(&job.join(",")));

        assert_eq!(report.missing_keywords.len(), 15);
        assert_eq!(report.missing_display.len(), 10);
        assert_eq!(report.suggestions.len(), 7);
        assert_eq!(report.score, 0.0);
        assert_eq!(report.band, ScoreBand::Low);
    }

    #[test]
    fn test_empty_job_description() {
        let engine = AnalysisEngine::new(&ListModel, ReportConfig::default()).unwrap();
        let report = engine.analyze(source("python,sql"), source(""));

        assert_eq!(report.score, 0.0);
        assert!(report.matched_keywords.is_empty());
        assert!(report.missing_keywords.is_empty());
        assert!(report.suggestions.is_empty());
        assert!(report.covers_everything());
    }

    #[test]
    fn test_full_match_is_good() {
        let engine = AnalysisEngine::new(&ListModel, ReportConfig::default()).unwrap();
        let report = engine.analyze(source("python,sql,docker"), source("python,sql"));

        assert_eq!(report.score, 100.0);
        assert_eq!(report.band, ScoreBand::Good);
        assert_eq!(report.metadata.model_name, "list");
        assert_eq!(report.resume_keyword_count, 3);
        assert_eq!(report.job_keyword_count, 2);
    }
}
