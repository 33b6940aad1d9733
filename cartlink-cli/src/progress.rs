//! Progress bar for block and bank transfers.

use indicatif::{ProgressBar, ProgressStyle};

use cartlink_lib::TransferProgress;

/// Drives one progress bar from a transfer's progress callbacks.
pub(crate) struct TransferBar {
    pb: ProgressBar,
    unit_name: &'static str,
}

impl TransferBar {
    /// Create a bar labelled with the unit being counted ("block", "bank").
    ///
    /// When `quiet` is true the bar is hidden.
    pub(crate) fn new(unit_name: &'static str, quiet: bool) -> Self {
        let pb = if quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(0);
            pb.set_style(
                ProgressStyle::with_template("  {spinner:.cyan} [{bar:30.cyan/blue}] {msg}")
                    .expect("static pattern")
                    .progress_chars("=> ")
                    .tick_chars("/-\\|"),
            );
            pb
        };
        Self { pb, unit_name }
    }

    pub(crate) fn update(&self, progress: TransferProgress) {
        match progress {
            TransferProgress::Started { units, .. } => {
                self.pb.set_length(units as u64);
                self.pb.set_position(0);
            }
            TransferProgress::Unit { done, total } => {
                self.pb.set_position(done as u64);
                self.pb
                    .set_message(format!("{} {}/{}", self.unit_name, done, total));
            }
            TransferProgress::Completed { .. } => {
                self.pb.finish_and_clear();
            }
        }
    }
}

impl Drop for TransferBar {
    fn drop(&mut self) {
        // Clear a bar left behind by a failed transfer
        if !self.pb.is_finished() {
            self.pb.abandon();
        }
    }
}
