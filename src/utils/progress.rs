//! Spinner and bar helpers that become no-ops when the `progress` feature is disabled

use std::borrow::Cow;
use std::time::Duration;

#[cfg(feature = "progress")]
pub use indicatif::ProgressBar;

#[cfg(not(feature = "progress"))]
pub use self::noop::ProgressBar;

#[cfg(feature = "progress")]
const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";
#[cfg(feature = "progress")]
const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}";

/// Start a spinner with a message, or nothing when running silently
pub fn spinner(message: impl Into<Cow<'static, str>>, silent: bool) -> Option<ProgressBar> {
    if silent {
        return None;
    }

    let spinner = ProgressBar::new_spinner();
    #[cfg(feature = "progress")]
    if let Ok(style) = indicatif::ProgressStyle::default_spinner().template(SPINNER_TEMPLATE) {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    Some(spinner)
}

/// Start a bar of `len` steps, or nothing when running silently
pub fn bar(len: u64, message: impl Into<Cow<'static, str>>, silent: bool) -> Option<ProgressBar> {
    if silent {
        return None;
    }

    let bar = ProgressBar::new(len);
    #[cfg(feature = "progress")]
    if let Ok(style) = indicatif::ProgressStyle::default_bar().template(BAR_TEMPLATE) {
        bar.set_style(style.progress_chars("█▓▒░  "));
    }
    bar.set_message(message);
    Some(bar)
}

/// Finish an optional progress indicator with a final message
pub fn finish(progress: Option<ProgressBar>, message: impl Into<Cow<'static, str>>) {
    if let Some(pb) = progress {
        pb.finish_with_message(message);
    }
}

#[cfg(not(feature = "progress"))]
#[allow(dead_code)]
mod noop {
    use std::borrow::Cow;
    use std::time::Duration;

    #[derive(Clone)]
    pub struct ProgressBar;

    impl ProgressBar {
        pub fn new(_len: u64) -> Self {
            ProgressBar
        }

        pub fn new_spinner() -> Self {
            ProgressBar
        }

        pub fn set_message(&self, _msg: impl Into<Cow<'static, str>>) {}
        pub fn enable_steady_tick(&self, _interval: Duration) {}
        pub fn inc(&self, _delta: u64) {}
        pub fn finish_with_message(&self, _msg: impl Into<Cow<'static, str>>) {}
    }
}
