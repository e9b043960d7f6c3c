use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown while a fetch is in flight. Callers must clear it before
/// printing results.
pub fn start(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .expect("static spinner template")
        .tick_strings(&["▁▁▁", "▁▂▁", "▂▄▂", "▄▆▄", "▆█▆", "▄▆▄", "▂▄▂", "▁▂▁"]);

    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
