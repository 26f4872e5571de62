//! Console progress feedback

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// A spinner that clears itself when dropped, whichever way the work ends.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    /// Start a ticking spinner with `message`.
    pub fn start(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    /// A spinner that draws nothing, for non-console output.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_document(_spinner: Spinner) -> Result<String, String> {
        Err("extraction failed".to_string())
    }

    #[test]
    fn test_spinner_cleared_on_error_path() {
        let spinner = Spinner::hidden();
        let bar = spinner.bar.clone();

        assert!(read_document(spinner).is_err());
        assert!(bar.is_finished());
    }

    #[test]
    fn test_spinner_running_until_dropped() {
        let spinner = Spinner::hidden();
        let bar = spinner.bar.clone();
        assert!(!bar.is_finished());

        drop(spinner);
        assert!(bar.is_finished());
    }
}
