//! Canned resume bullet suggestions for missing keywords

/// Curated bullets for well-known technology keywords.
pub const SUGGESTION_TEMPLATES: &[(&str, &str)] = &[
    ("airflow", "✔ Built and scheduled automated ETL workflows using Apache Airflow."),
    ("snowflake", "✔ Implemented cloud-based data warehousing using Snowflake."),
    ("aws", "✔ Deployed scalable data infrastructure using AWS services like S3, Lambda, and EC2."),
    ("gcp", "✔ Built and managed big data solutions on Google Cloud Platform (GCP)."),
    ("etl", "✔ Designed and optimized ETL pipelines for real-time and batch processing."),
    ("sql", "✔ Developed complex SQL queries and stored procedures for reporting."),
    ("python", "✔ Built data pipelines and models using Python and data science libraries."),
    ("dbt", "✔ Created dbt models to transform warehouse data into analytics-ready tables."),
    ("docker", "✔ Containerized applications using Docker for reproducible deployment."),
    ("kubernetes", "✔ Managed containerized apps with Kubernetes for scaling."),
    ("ci/cd", "✔ Automated deployment with CI/CD pipelines using GitHub Actions and Jenkins."),
];

/// Suggest a resume bullet for `keyword`.
///
/// Known keywords get their curated bullet; anything else gets a generic
/// prompt naming the keyword.
pub fn generate_suggestion(keyword: &str) -> String {
    let keyword = keyword.to_lowercase();
    SUGGESTION_TEMPLATES
        .iter()
        .find(|(known, _)| *known == keyword)
        .map(|(_, template)| template.to_string())
        .unwrap_or_else(|| {
            format!(
                "✔ Consider adding a bullet point that shows hands-on experience with <b>{}</b>.",
                keyword
            )
        })
}

/// One suggestion per keyword, in iteration order, stopping at `cap`.
pub fn suggestions_for<'a, I>(keywords: I, cap: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    keywords
        .into_iter()
        .take(cap)
        .map(|k| generate_suggestion(k))
        .collect()
}
