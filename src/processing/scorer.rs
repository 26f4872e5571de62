//! Set-overlap scoring of resume keywords against job description keywords

use crate::processing::keywords::KeywordSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    /// Percentage of job keywords present in the resume, 0..=100, two decimals.
    pub score: f64,
    pub matched: KeywordSet,
    pub missing: KeywordSet,
}

/// Score `resume` against `job`. Every job keyword counts once.
///
/// An empty job set scores 0 with nothing matched or missing.
pub fn calculate_score(resume: &KeywordSet, job: &KeywordSet) -> MatchScore {
    let matched: KeywordSet = job.intersection(resume).cloned().collect();
    let missing: KeywordSet = job.difference(resume).cloned().collect();

    let score = if job.is_empty() {
        0.0
    } else {
        round2(100.0 * matched.len() as f64 / job.len() as f64)
    };

    MatchScore {
        score,
        matched,
        missing,
    }
}

/// Two-decimal rounding with exact ties going to the even neighbour.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> KeywordSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_partition_of_job_keywords() {
        let resume = set(&["python", "sql", "excel"]);
        let job = set(&["python", "sql", "docker"]);
        let result = calculate_score(&resume, &job);

        assert_eq!(result.matched, set(&["python", "sql"]));
        assert_eq!(result.missing, set(&["docker"]));
        assert!(result.matched.is_disjoint(&result.missing));
        let union: KeywordSet = result.matched.union(&result.missing).cloned().collect();
        assert_eq!(union, job);
        assert_eq!(result.score, 66.67);
    }

    #[test]
    fn test_empty_job_scores_zero() {
        let result = calculate_score(&set(&["python"]), &KeywordSet::new());
        assert_eq!(result.score, 0.0);
        assert!(result.matched.is_empty());
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_bounds() {
        let job = set(&["python", "sql"]);
        assert_eq!(calculate_score(&KeywordSet::new(), &job).score, 0.0);
        assert_eq!(calculate_score(&job, &job).score, 100.0);

        let big_resume = set(&["python", "sql", "rust", "go", "java"]);
        let result = calculate_score(&big_resume, &job);
        assert!(result.score >= 0.0 && result.score <= 100.0);
    }

    #[test]
    fn test_two_decimal_rounding() {
        let job = set(&["a1", "a2", "a3", "a4", "a5", "a6", "a7"]);
        let resume = set(&["a1"]);
        assert_eq!(calculate_score(&resume, &job).score, 14.29);

        // 100 * 1/32 = 3.125 exactly, a tie
        let job: KeywordSet = (0..32).map(|i| format!("tool{:02}", i)).collect();
        let resume = set(&["tool00"]);
        assert_eq!(calculate_score(&resume, &job).score, 3.12);
    }
}
