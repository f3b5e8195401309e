//! Progress bar rendering for pipeline runs.

use indicatif::{ProgressBar, ProgressStyle};

use crate::types::{ProgressEvent, StageId};

/// Renders pipeline progress against the size of the source file.
///
/// The bar position tracks the cumulative byte count of the active stage.
/// Stage 2 operates on the intermediate artifact, whose size differs from
/// the original, so the percentage is an approximation against the source
/// size. That matches the presentation the tool has always used.
pub struct Bar {
    bar: ProgressBar,
}

impl Bar {
    pub fn new(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})")
            .expect("valid template")
            .progress_chars("●○ ");

        bar.set_style(style);

        Self { bar }
    }

    /// Applies one pipeline progress event to the bar.
    pub fn update(&self, event: &ProgressEvent) {
        self.bar.set_message(format!("{} (stage {}/{})", event.kind.label(), event.stage.number(), StageId::TOTAL));
        self.bar.set_position(event.bytes);
    }

    pub fn finish(&self) {
        self.bar.finish_with_message("Done");
    }

    /// Clears the bar without a completion message, for failed runs.
    pub fn abandon(&self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for Bar {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish();
        }
    }
}
