//! Output formatters: console, JSON, Markdown and HTML renderings of a report

use crate::config::OutputFormat;
use crate::error::{Result, ResumeMatcherError};
use crate::output::report::{AnalysisReport, ScoreBand};
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

const ALL_COVERED_MESSAGE: &str = "🎉 Great! Your resume covers all major requirements.";

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

/// A suggestion split into plain and emphasised runs. Suggestions mark the
/// keyword with `<b>…</b>`; each renderer decides how to show it.
fn emphasis_runs(suggestion: &str) -> Vec<(bool, &str)> {
    let mut runs = Vec::new();
    let mut rest = suggestion;
    while let Some(open) = rest.find("<b>") {
        let after_open = &rest[open + 3..];
        let Some(close) = after_open.find("</b>") else {
            break;
        };
        if open > 0 {
            runs.push((false, &rest[..open]));
        }
        runs.push((true, &after_open[..close]));
        rest = &after_open[close + 4..];
    }
    if !rest.is_empty() {
        runs.push((false, rest));
    }
    runs
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn band_color(band: ScoreBand) -> Color {
    match band {
        ScoreBand::Good => Color::Green,
        ScoreBand::Medium => Color::Yellow,
        ScoreBand::Low => Color::Red,
    }
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>ATS Resume Analysis</title>
    {% if include_styles %}
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 900px; margin: 0 auto; padding: 20px; color: #444; }
        h1 { color: #2F80ED; }
        .score-good { color: #27ae60; }
        .score-medium { color: #f39c12; }
        .score-low { color: #c0392b; }
        .progress { background: #eee; border-radius: 4px; height: 12px; }
        .progress-fill { background: #2F80ED; border-radius: 4px; height: 12px; }
        .badge { background: #ddd; color: #111; border-radius: 8px; padding: 6px 10px; margin: 2px; display: inline-block; }
        .suggestion { background: #f7f9fc; color: #222; padding: 10px 15px; border-left: 5px solid #2F80ED; border-radius: 4px; margin: 8px 0; }
        .success { background: #e8f8ef; padding: 10px 15px; border-radius: 4px; }
        .metadata { font-size: 0.9em; color: #6c757d; margin-top: 30px; }
    </style>
    {% endif %}
</head>
<body>
    <h1>📄 ATS Resume Analyzer</h1>
    <h3 class="score-{{ band }}">✅ Match Score: {{ score }}/100</h3>
    <div class="progress"><div class="progress-fill" style="width: {{ score }}%"></div></div>
    {% if has_missing %}
    <h3>❌ Missing Keywords</h3>
    <div>
        {% for keyword in missing_display %}<span class="badge">{{ keyword }}</span> {% endfor %}
    </div>
    <h3>✍️ Suggestions to Improve Your Resume</h3>
    {% for suggestion in suggestions_html %}
    <div class="suggestion">{{ suggestion|safe }}</div>
    {% endfor %}
    {% else %}
    <div class="success">{{ all_covered }}</div>
    {% endif %}
    <div class="metadata">
        <p>Resume: {{ resume_source }} | Job description: {{ job_source }}</p>
        <p>Generated {{ generated_at }} by ATS Keyword Matcher v{{ version }} using {{ model_name }}</p>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate<'a> {
    include_styles: bool,
    score: String,
    band: &'static str,
    has_missing: bool,
    missing_display: &'a [String],
    suggestions_html: Vec<String>,
    all_covered: &'static str,
    resume_source: &'a str,
    job_source: &'a str,
    generated_at: String,
    version: &'a str,
    model_name: &'a str,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{}\n", title.color(Color::Blue).bold())
        } else {
            format!("\n{}\n", title)
        }
    }

    fn progress_bar(score: f64) -> String {
        const WIDTH: usize = 30;
        let filled = ((score / 100.0) * WIDTH as f64).round().clamp(0.0, WIDTH as f64) as usize;
        format!("[{}{}]", "#".repeat(filled), "-".repeat(WIDTH - filled))
    }

    fn render_suggestion(&self, suggestion: &str) -> String {
        emphasis_runs(suggestion)
            .into_iter()
            .map(|(bold, text)| {
                if bold && self.use_colors {
                    text.bold().to_string()
                } else {
                    text.to_string()
                }
            })
            .collect()
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📄 ATS RESUME ANALYSIS"));
        let score_line = format!("✅ Match Score: {}/100", report.score);
        output.push_str(&format!(
            "{} [{}]\n",
            self.colorize(&score_line, band_color(report.band)),
            report.band.label().to_uppercase()
        ));
        output.push_str(&format!("{}\n", Self::progress_bar(report.score)));

        if report.covers_everything() {
            output.push('\n');
            output.push_str(&self.colorize(ALL_COVERED_MESSAGE, Color::Green));
            output.push('\n');
        } else {
            output.push_str(&self.format_header("❌ Missing Keywords"));
            let badges: Vec<String> = report
                .missing_display
                .iter()
                .map(|k| format!("[{}]", k))
                .collect();
            output.push_str(&format!("  {}\n", badges.join(" ")));

            output.push_str(&self.format_header("✍️  Suggestions to Improve Your Resume"));
            for suggestion in &report.suggestions {
                output.push_str(&format!("  {}\n", self.render_suggestion(suggestion)));
            }
        }

        if self.detailed {
            output.push_str(&self.format_header("📊 Details"));
            output.push_str(&format!(
                "Resume keywords: {} | Job description keywords: {}\n",
                report.resume_keyword_count, report.job_keyword_count
            ));
            if !report.matched_keywords.is_empty() {
                let matched: Vec<&str> = report.matched_keywords.iter().map(String::as_str).collect();
                output.push_str(&format!(
                    "Matched: {}\n",
                    self.colorize(&matched.join(", "), Color::Green)
                ));
            }
            if report.missing_keywords.len() > report.missing_display.len() {
                output.push_str(&format!(
                    "({} more missing keywords not shown)\n",
                    report.missing_keywords.len() - report.missing_display.len()
                ));
            }
        }

        output.push_str(&format!(
            "\n{} ATS Keyword Matcher v{} | Model: {} | {}ms\n",
            self.colorize("ℹ️", Color::Blue),
            report.metadata.matcher_version,
            report.metadata.model_name,
            report.metadata.processing_time_ms
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# 📄 ATS Resume Analysis\n\n");
        output.push_str(&format!(
            "**Match Score:** {}/100 ({})\n\n",
            report.score,
            report.band.label()
        ));

        if report.covers_everything() {
            output.push_str(&format!("{}\n\n", ALL_COVERED_MESSAGE));
        } else {
            output.push_str("## ❌ Missing Keywords\n\n");
            let badges: Vec<String> = report
                .missing_display
                .iter()
                .map(|k| format!("`{}`", k))
                .collect();
            output.push_str(&format!("{}\n\n", badges.join(" ")));

            output.push_str("## ✍️ Suggestions to Improve Your Resume\n\n");
            for suggestion in &report.suggestions {
                let line: String = emphasis_runs(suggestion)
                    .into_iter()
                    .map(|(bold, text)| {
                        if bold {
                            format!("**{}**", text)
                        } else {
                            text.to_string()
                        }
                    })
                    .collect();
                output.push_str(&format!("- {}\n", line));
            }
            output.push('\n');
        }

        if !report.matched_keywords.is_empty() {
            let matched: Vec<&str> = report.matched_keywords.iter().map(String::as_str).collect();
            output.push_str(&format!("**Matched keywords:** {}\n\n", matched.join(", ")));
        }

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!(
                "*Resume: `{}` | Job description: `{}` | Generated {} by ATS Keyword Matcher v{} using {}*\n",
                report.metadata.resume_source,
                report.metadata.job_source,
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.matcher_version,
                report.metadata.model_name
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn suggestion_html(suggestion: &str) -> String {
        emphasis_runs(suggestion)
            .into_iter()
            .map(|(bold, text)| {
                if bold {
                    format!("<b>{}</b>", escape_html(text))
                } else {
                    escape_html(text)
                }
            })
            .collect()
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let template = HtmlTemplate {
            include_styles: self.include_styles,
            score: format!("{}", report.score),
            band: report.band.label(),
            has_missing: !report.covers_everything(),
            missing_display: &report.missing_display,
            suggestions_html: report
                .suggestions
                .iter()
                .map(|s| Self::suggestion_html(s))
                .collect(),
            all_covered: ALL_COVERED_MESSAGE,
            resume_source: &report.metadata.resume_source,
            job_source: &report.metadata.job_source,
            generated_at: report
                .metadata
                .generated_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
            version: &report.metadata.matcher_version,
            model_name: &report.metadata.model_name,
        };

        template
            .render()
            .map_err(|e| ResumeMatcherError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true, true)
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };
    format!("{}_ats{}.{}", base_name, timestamp_suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::ReportMetadata;
    use crate::processing::keywords::KeywordSet;

    fn set(items: &[&str]) -> KeywordSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sample_report(missing: &[&str]) -> AnalysisReport {
        let missing_keywords = set(missing);
        AnalysisReport {
            score: 60.0,
            band: ScoreBand::Medium,
            matched_keywords: set(&["python", "sql"]),
            missing_display: missing_keywords.iter().cloned().collect(),
            suggestions: missing_keywords
                .iter()
                .map(|k| crate::processing::suggestions::generate_suggestion(k))
                .collect(),
            missing_keywords,
            resume_keyword_count: 3,
            job_keyword_count: 5,
            metadata: ReportMetadata {
                generated_at: chrono::Utc::now(),
                matcher_version: "0.1.0".to_string(),
                resume_source: "resume.pdf".to_string(),
                job_source: "inline".to_string(),
                model_name: "en_lexicon_sm".to_string(),
                processing_time_ms: 3,
            },
        }
    }

    #[test]
    fn test_emphasis_runs() {
        let runs = emphasis_runs("use <b>graphql</b> daily");
        assert_eq!(runs, vec![(false, "use "), (true, "graphql"), (false, " daily")]);
        assert_eq!(emphasis_runs("plain"), vec![(false, "plain")]);
        assert_eq!(emphasis_runs("broken <b>tag"), vec![(false, "broken <b>tag")]);
    }

    #[test]
    fn test_console_without_colors() {
        let formatter = ConsoleFormatter::new(false, true);
        let output = formatter.format_report(&sample_report(&["docker", "graphql"])).unwrap();

        assert!(output.contains("✅ Match Score: 60/100 [MEDIUM]"));
        assert!(output.contains("[docker] [graphql]"));
        assert!(output.contains("Containerized applications using Docker"));
        assert!(output.contains("hands-on experience with graphql."));
        assert!(output.contains("Matched: python, sql"));
        assert!(!output.contains("<b>"));
    }

    #[test]
    fn test_console_all_covered() {
        let formatter = ConsoleFormatter::new(false, false);
        let output = formatter.format_report(&sample_report(&[])).unwrap();
        assert!(output.contains(ALL_COVERED_MESSAGE));
        assert!(!output.contains("Missing Keywords"));
    }

    #[test]
    fn test_json_contains_band_and_sets() {
        let output = JsonFormatter::new(false)
            .format_report(&sample_report(&["docker"]))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["band"], "medium");
        assert_eq!(value["score"], 60.0);
        assert_eq!(value["missing_keywords"][0], "docker");
    }

    #[test]
    fn test_markdown_bolds_keyword() {
        let output = MarkdownFormatter::new(true)
            .format_report(&sample_report(&["graphql"]))
            .unwrap();
        assert!(output.contains("**Match Score:** 60/100 (medium)"));
        assert!(output.contains("hands-on experience with **graphql**."));
        assert!(output.contains("`resume.pdf`"));
    }

    #[test]
    fn test_html_escapes_keywords() {
        let output = HtmlFormatter::new(false)
            .format_report(&sample_report(&["<script>"]))
            .unwrap();
        assert!(output.contains("<b>&lt;script&gt;</b>"));
        assert!(!output.contains("<script>"));
        assert!(output.contains("score-medium"));
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(&OutputFormat::Json, "/tmp/jane_resume.pdf", false),
            "jane_resume_ats.json"
        );
        assert!(suggest_filename(&OutputFormat::Html, "cv.pdf", true).ends_with(".html"));
    }
}
