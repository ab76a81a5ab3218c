//! Terminal progress display for a single collapse run

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix} [{bar:30.cyan/blue}] {pos}/{len} cells {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar tracking resolved cells out of the grid total
pub struct RunProgress {
    bar: ProgressBar,
}

impl RunProgress {
    /// Start a bar for a grid of `cell_count` cells
    pub fn new(catalog: &Path, cell_count: usize) -> Self {
        let bar = ProgressBar::new(cell_count as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_prefix(
            catalog
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string(),
        );
        Self { bar }
    }

    /// Report resolved cells after a step
    pub fn update(&self, resolved: usize, step: usize) {
        self.bar.set_position(resolved as u64);
        self.bar.set_message(format!("step {step}"));
    }

    /// Close the bar with a final summary
    pub fn finish(&self, resolved: usize, contradictions: usize) {
        self.bar.set_position(resolved as u64);
        if contradictions == 0 {
            self.bar.finish_with_message("done");
        } else {
            self.bar
                .finish_with_message(format!("done, {contradictions} contradictions"));
        }
    }
}
