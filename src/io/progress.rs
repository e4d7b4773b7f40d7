//! Terminal progress display for palette builds and conversions

use crate::io::configuration::{CUBE_EDGE, PROGRESS_BAR_WIDTH};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "{{msg:>10}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{elapsed_precise}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates one progress bar per processing phase
///
/// Bars are cloned out to the worker callbacks; `ProgressBar` is a shared
/// handle, so increments from any rayon thread land on the same bar.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    bars: Vec<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            bars: Vec::new(),
        }
    }

    fn add_bar(&mut self, label: &'static str, length: usize) -> ProgressBar {
        let bar = self.multi_progress.add(ProgressBar::new(length as u64));
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_message(label);
        self.bars.push(bar.clone());
        bar
    }

    /// Bar advanced once per finished red slab of the color cube
    pub fn start_palette(&mut self) -> ProgressBar {
        self.add_bar("palette", CUBE_EDGE)
    }

    /// Bar advanced once per finished output row
    pub fn start_conversion(&mut self, rows: usize) -> ProgressBar {
        self.add_bar("convert", rows)
    }

    /// Number of phases started so far
    pub fn phase_count(&self) -> usize {
        self.bars.len()
    }

    /// Mark every phase complete and clear the display
    pub fn finish(&self) {
        for bar in &self.bars {
            bar.finish();
        }
        let _ = self.multi_progress.clear();
    }
}
