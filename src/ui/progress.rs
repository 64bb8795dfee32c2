use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Progress over a batch of input files, drawn on stderr
pub fn create_file_progress(len: usize) -> ProgressBar {
    let pb = ProgressBar::with_draw_target(Some(len as u64), ProgressDrawTarget::stderr());
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{prefix:.bold} [{bar:40.cyan}] {pos}/{len} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("⣀⣤⣦⣶⣷⣿ "),
    );
    pb.set_prefix("Encoding");
    pb
}

/// A bar that draws nothing, for single-file runs
pub fn create_hidden_progress() -> ProgressBar {
    ProgressBar::hidden()
}
