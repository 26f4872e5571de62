//! ATS keyword matcher: score a resume against a job description

use anyhow::Context;
use ats_keyword_matcher::cli::{self, Cli, Commands, ConfigAction, ModelAction};
use ats_keyword_matcher::config::{Config, OutputFormat};
use ats_keyword_matcher::input::InputManager;
use ats_keyword_matcher::nlp::lexicon::LexiconModel;
use ats_keyword_matcher::nlp::model_manager::{self, Startup};
use ats_keyword_matcher::output::formatter::{
    save_report_to_file, suggest_filename, ReportGenerator,
};
use ats_keyword_matcher::output::progress::Spinner;
use ats_keyword_matcher::processing::analyzer::{AnalysisEngine, Source};
use ats_keyword_matcher::ResumeMatcherError;
use clap::Parser;
use log::{error, info};
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

/// Bring up the linguistic model or stop the process. Nothing runs without it.
fn require_model(config: &Config) -> LexiconModel {
    match model_manager::start(&config.model) {
        Startup::Ready(model) => model,
        Startup::Halted(failure) => {
            eprintln!("❌ {}", failure);
            process::exit(1);
        }
    }
}

async fn run_command(command: Commands, config: Config) -> anyhow::Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            job_text,
            output,
            save,
            detailed,
        } => {
            cli::validate_file_extension(&resume, cli::RESUME_EXTENSIONS)
                .map_err(|e| ResumeMatcherError::InvalidInput(format!("Resume file: {}", e)))?;
            if let Some(job) = &job {
                cli::validate_file_extension(job, cli::JOB_EXTENSIONS).map_err(|e| {
                    ResumeMatcherError::InvalidInput(format!("Job description file: {}", e))
                })?;
            }

            let output_format = match output {
                Some(format) => {
                    cli::parse_output_format(&format).map_err(ResumeMatcherError::InvalidInput)?
                }
                None => config.output.format,
            };

            let model = require_model(&config);
            let input_manager = InputManager::new();

            // Cleared on drop, including when extraction fails below.
            let spinner = if output_format == OutputFormat::Console {
                Spinner::start("Analyzing your resume...")
            } else {
                Spinner::hidden()
            };

            let resume_text = input_manager
                .extract_text(&resume)
                .await
                .with_context(|| format!("could not read resume {}", resume.display()))?;

            let (job_label, job_text) = match (job, job_text) {
                (Some(path), _) => {
                    let text = input_manager.extract_text(&path).await.with_context(|| {
                        format!("could not read job description {}", path.display())
                    })?;
                    (file_label(&path), text)
                }
                (None, Some(text)) => ("inline".to_string(), text),
                (None, None) => {
                    return Err(ResumeMatcherError::InvalidInput(
                        "a job description is required (--job or --job-text)".to_string(),
                    )
                    .into())
                }
            };
            info!(
                "Resume text {} chars, job description {} chars",
                resume_text.len(),
                job_text.len()
            );

            let engine = AnalysisEngine::new(&model, config.report.clone())?;
            let resume_label = file_label(&resume);
            let report = engine.analyze(
                Source {
                    label: &resume_label,
                    text: &resume_text,
                },
                Source {
                    label: &job_label,
                    text: &job_text,
                },
            );

            drop(spinner);

            let detailed = detailed || config.output.detailed;
            // Files never get terminal color codes.
            let use_colors = config.output.color_output && save.is_none();
            let generator = ReportGenerator::with_options(use_colors, detailed, true, true, true);
            let rendered = generator.generate_report(&report, &output_format)?;

            match save {
                Some(path) => {
                    let path = if path.is_dir() {
                        path.join(suggest_filename(&output_format, &resume_label, true))
                    } else {
                        path
                    };
                    save_report_to_file(&rendered, &path)
                        .with_context(|| format!("could not save report to {}", path.display()))?;
                    println!("💾 Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Model { action } => match action {
            ModelAction::Info => {
                let model = require_model(&config);
                let info = model.info();
                println!("📋 Linguistic Model\n");
                println!("Name: {}", info.name);
                println!("Version: {}", info.version);
                println!("Language: {}", info.lang);
                println!("Lexicon entries: {}", info.lexicon_entries);
                if let Some(path) = &info.path {
                    println!("Location: {}", path.display());
                }
            }
        },

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("{}", config.to_toml()?);
            }
            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save()?;
                println!("✅ Configuration reset successfully!");
            }
            Some(ConfigAction::Path) => {
                println!("{}", Config::config_path().display());
            }
        },
    }

    Ok(())
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
