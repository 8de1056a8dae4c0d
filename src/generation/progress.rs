//! Progress reporting hooks
//!
//! The allocator reports progress through [`ProgressSink`] and never looks at
//! terminal state itself. Callers decide whether to pass a visible bar or
//! the no-op default.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::env;
use std::fmt;

/// Bar layout used on a capable terminal
const BAR_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";

/// Receiver of generation progress events
pub trait ProgressSink {
    /// Called once before the first draw
    fn on_start(&mut self, _total: usize) {}

    /// Called after each accepted record
    fn on_record(&mut self, done: usize, total: usize);

    /// Called once after the last record, also on failure
    fn on_finish(&mut self, _done: usize, _total: usize) {}
}

/// Progress sink that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn on_record(&mut self, _done: usize, _total: usize) {}
}

/// Progress bar on standard error, or a hidden one when output is unwanted
pub struct BarProgress {
    bar: ProgressBar,
}

impl fmt::Debug for BarProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BarProgress")
            .field("position", &self.bar.position())
            .field("length", &self.bar.length())
            .field("hidden", &self.bar.is_hidden())
            .finish()
    }
}

impl BarProgress {
    /// Create a bar drawing to stderr when `visible`, hidden otherwise
    pub fn new(visible: bool) -> Self {
        let target =
            if visible { ProgressDrawTarget::stderr() } else { ProgressDrawTarget::hidden() };
        let bar = ProgressBar::with_draw_target(Some(0), target);

        let style = ProgressStyle::default_bar()
            .template(BAR_TEMPLATE)
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        bar.set_message("Generating VLANs");

        Self { bar }
    }

    /// Bar that never draws
    pub fn hidden() -> Self {
        Self::new(false)
    }

    /// Underlying bar
    pub fn bar(&self) -> &ProgressBar {
        &self.bar
    }
}

impl ProgressSink for BarProgress {
    fn on_start(&mut self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
    }

    fn on_record(&mut self, done: usize, _total: usize) {
        self.bar.set_position(done as u64);
    }

    fn on_finish(&mut self, done: usize, total: usize) {
        self.bar.set_position(done as u64);
        if done == total {
            self.bar.finish_with_message("VLAN records generated");
        } else {
            self.bar.abandon_with_message("generation stopped");
        }
    }
}

/// Whether a visible progress indicator should be shown, from the environment
pub fn progress_enabled(quiet: bool) -> bool {
    let no_color = env::var_os("NO_COLOR").is_some();
    let term = env::var("TERM").ok();
    progress_enabled_with(quiet, no_color, term.as_deref())
}

/// Pure form of [`progress_enabled`]
pub fn progress_enabled_with(quiet: bool, no_color_set: bool, term: Option<&str>) -> bool {
    !quiet && !no_color_set && term != Some("dumb")
}
