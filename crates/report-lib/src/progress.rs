//! Operator progress feedback
//!
//! A per-namespace counter advanced once per processed pod. Purely
//! cosmetic: it never affects the report or the exit status. The display
//! is a capability that may be absent (compiled out via the `progress`
//! feature, or disabled for the run), in which case every call is a no-op.

#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};

/// Progress counter for one namespace's pod iteration
pub struct Progress {
    #[cfg(feature = "progress")]
    bar: Option<ProgressBar>,
}

impl Progress {
    /// Whether progress display was compiled into this build
    pub fn available() -> bool {
        cfg!(feature = "progress")
    }

    /// Start a counter over `total` pods in `namespace`. With `enabled`
    /// false (or the feature compiled out) the counter is inert.
    #[cfg(feature = "progress")]
    pub fn start(namespace: &str, total: u64, enabled: bool) -> Self {
        if !enabled {
            return Self { bar: None };
        }

        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/blue}] {pos}/{len}")
                .expect("progress bar template is valid")
                .progress_chars("=> "),
        );
        bar.set_message(format!("Namespace: {namespace}"));
        Self { bar: Some(bar) }
    }

    #[cfg(not(feature = "progress"))]
    pub fn start(_namespace: &str, _total: u64, _enabled: bool) -> Self {
        Self {}
    }

    /// Advance by one processed pod
    pub fn tick(&self) {
        #[cfg(feature = "progress")]
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    /// Close out the namespace's counter
    pub fn finish(&self) {
        #[cfg(feature = "progress")]
        if let Some(bar) = &self.bar {
            bar.finish();
        }
    }
}
