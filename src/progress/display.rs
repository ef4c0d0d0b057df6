//! Progress bar display management and coordination.
//!
//! [`ProgressDisplay`] owns the main bar for one download phase and hands out
//! child bars for individual assets.

use crate::progress::StyleOptions;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};

/// Progress display manager that coordinates multiple progress bars.
pub struct ProgressDisplay {
    /// The multi-progress instance for coordinating multiple progress bars.
    multi: MultiProgress,
    /// The main progress bar for overall progress.
    main: ProgressBar,
    /// Style options for progress bars.
    style_options: StyleOptions,
}

impl ProgressDisplay {
    /// Create a new progress display manager for `total_downloads` assets.
    pub fn new(style_options: StyleOptions, total_downloads: usize) -> Self {
        let multi = match style_options.is_enabled() {
            true => MultiProgress::new(),
            false => MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
        };

        let main = multi.add(
            style_options
                .main()
                .clone()
                .to_progress_bar(total_downloads as u64),
        );
        main.tick();

        Self {
            multi,
            main,
            style_options,
        }
    }

    /// A display drawing nothing.
    pub fn hidden() -> Self {
        Self::new(StyleOptions::hidden(), 0)
    }

    /// Create a child progress bar of `size` bytes.
    pub fn create_child_progress(&self, size: u64) -> ProgressBar {
        self.multi
            .add(self.style_options.child().clone().to_progress_bar(size))
    }

    /// Increment the main progress bar by one.
    pub fn increment_main(&self) {
        self.main.inc(1);
    }

    /// Finish the progress display, clearing or keeping the main bar.
    pub fn finish(self) {
        if self.style_options.main().clear {
            self.main.finish_and_clear();
        } else {
            self.main.finish();
        }
    }

    /// Finish a child progress bar based on configuration.
    pub fn finish_child(&self, pb: ProgressBar) {
        if self.style_options.child().clear {
            pb.finish_and_clear();
        } else {
            pb.finish();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_bar_counts_completions() {
        let display = ProgressDisplay::hidden();
        display.increment_main();
        display.increment_main();
        assert_eq!(display.main.position(), 2);
        display.finish();
    }

    #[test]
    fn test_hidden_child_bar() {
        let display = ProgressDisplay::new(StyleOptions::hidden(), 3);
        let pb = display.create_child_progress(1024);
        assert!(pb.is_hidden());
        display.finish_child(pb);
    }
}
