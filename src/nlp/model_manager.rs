//! Locating and loading the bundled linguistic model at startup

use crate::config::ModelConfig;
use crate::error::StartupFailure;
use crate::nlp::lexicon::{LexiconModel, MODEL_CONFIG_FILE};
use log::{debug, error, info};
use std::path::{Path, PathBuf};

/// Result of bringing the model up. The entry point must match on this before
/// any analysis can run.
pub enum Startup {
    Ready(LexiconModel),
    Halted(StartupFailure),
}

/// Candidate directories for `configured`, in the order they are tried.
///
/// Absolute paths are used as given. Relative paths are tried next to the
/// running executable first, then against the working directory.
pub fn candidate_dirs(configured: &Path) -> Vec<PathBuf> {
    if configured.is_absolute() {
        return vec![configured.to_path_buf()];
    }

    let mut candidates = Vec::new();
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(exe_dir.join(configured));
    }
    if let Ok(cwd) = std::env::current_dir() {
        let from_cwd = cwd.join(configured);
        if !candidates.contains(&from_cwd) {
            candidates.push(from_cwd);
        }
    }
    candidates
}

/// Resolve and load the model once. Never panics; every failure becomes
/// [`Startup::Halted`].
pub fn start(config: &ModelConfig) -> Startup {
    let searched = candidate_dirs(&config.path);

    let found = searched
        .iter()
        .find(|dir| dir.join(MODEL_CONFIG_FILE).is_file())
        .cloned();
    let Some(dir) = found else {
        error!(
            "No linguistic model found for '{}' (missing {})",
            config.path.display(),
            MODEL_CONFIG_FILE
        );
        return Startup::Halted(StartupFailure {
            reason: format!(
                "no model directory containing '{}' was found",
                MODEL_CONFIG_FILE
            ),
            searched,
        });
    };

    debug!("Loading linguistic model from {}", dir.display());
    match LexiconModel::load(&dir) {
        Ok(model) => {
            info!("Linguistic model ready");
            Startup::Ready(model)
        }
        Err(e) => {
            error!("Linguistic model at {} is unusable: {}", dir.display(), e);
            Startup::Halted(StartupFailure {
                reason: e.to_string(),
                searched: vec![dir],
            })
        }
    }
}
