//! CLI interface for the keyword matcher

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// File types accepted for a resume.
pub const RESUME_EXTENSIONS: &[&str] = &["pdf", "txt", "md"];
/// File types accepted for a job description file.
pub const JOB_EXTENSIONS: &[&str] = &["pdf", "txt", "md"];

#[derive(Parser)]
#[command(name = "ats-keyword-matcher")]
#[command(about = "Score a resume against a job description the way an ATS keyword filter would")]
#[command(long_about = "Extract requirement keywords from a job description, check which of them appear in a resume, and suggest resume bullets for the missing ones")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a resume against a job description
    Analyze {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (PDF, TXT, MD)
        #[arg(short, long, conflicts_with = "job_text", required_unless_present = "job_text")]
        job: Option<PathBuf>,

        /// Job description text given inline
        #[arg(long)]
        job_text: Option<String>,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include matched keywords and counts
        #[arg(short, long)]
        detailed: bool,
    },

    /// Linguistic model commands
    Model {
        #[command(subcommand)]
        action: ModelAction,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ModelAction {
    /// Show information about the configured model
    Info,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("cv.PDF"), RESUME_EXTENSIONS).is_ok());
        assert!(validate_file_extension(Path::new("cv.docx"), RESUME_EXTENSIONS).is_err());
        assert!(validate_file_extension(Path::new("cv"), RESUME_EXTENSIONS).is_err());
    }

    #[test]
    fn test_job_file_and_text_conflict() {
        let parsed = Cli::try_parse_from([
            "ats-keyword-matcher",
            "analyze",
            "--resume",
            "cv.pdf",
            "--job",
            "jd.txt",
            "--job-text",
            "Python",
        ]);
        assert!(parsed.is_err());

        let parsed = Cli::try_parse_from(["ats-keyword-matcher", "analyze", "--resume", "cv.pdf"]);
        assert!(parsed.is_err());

        let parsed = Cli::try_parse_from([
            "ats-keyword-matcher",
            "analyze",
            "-r",
            "cv.pdf",
            "--job-text",
            "Experience with Rust",
        ]);
        assert!(parsed.is_ok());
    }
}
