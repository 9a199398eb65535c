//! Shared fixtures for the bootstage integration tests.
//!
//! Each backend gets its own test binary under `tests/`, so link-time and
//! load-time state never leaks between them. Within a binary, tests touching
//! that state run under `#[serial]` and reset the recorders below first.

use core::fmt::{self, Write};

use bootstage_boot::config::init_logging;
use bootstage_boot::{BootHooks, Level, RunSummary};
use bootstage_lib::{KlogLevel, klog_detach_sink, klog_set_level};
use spin::Mutex;

/// Records the order in which initializers and hooks ran.
pub struct CallLog {
    calls: Mutex<Vec<&'static str>>,
}

impl CallLog {
    pub const fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn record(&self, name: &'static str) {
        self.calls.lock().push(name);
    }

    pub fn snapshot(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }

    pub fn take(&self) -> Vec<&'static str> {
        core::mem::take(&mut *self.calls.lock())
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| **call == name)
            .count()
    }
}

impl Default for CallLog {
    fn default() -> Self {
        Self::new()
    }
}

static CAPTURED: Mutex<Vec<String>> = Mutex::new(Vec::new());

/// Log sink that keeps every line as `"<tag> <message>"`.
pub fn capture_sink(level: KlogLevel, args: fmt::Arguments<'_>) {
    let mut line = String::new();
    let _ = write!(line, "{} {}", level.tag(), args);
    CAPTURED.lock().push(line);
}

/// Bring up logging into [`capture_sink`], then raise or lower it to
/// `level`. Anything captured earlier is dropped.
pub fn start_capture(level: KlogLevel) {
    CAPTURED.lock().clear();
    init_logging(capture_sink);
    klog_set_level(level);
}

/// Detach the sink and return what it saw.
pub fn finish_capture() -> Vec<String> {
    klog_detach_sink();
    klog_set_level(KlogLevel::Info);
    core::mem::take(&mut *CAPTURED.lock())
}

/// Hooks that record `"pre"` and `"post"` into `log`.
///
/// Hooks are plain function pointers, so the log has to be a static.
#[macro_export]
macro_rules! recording_hooks {
    ($log:path) => {{
        fn pre() {
            $log.record("pre");
        }
        fn post() {
            $log.record("post");
        }
        ::bootstage_boot::BootHooks::new(pre, post)
    }};
}

/// Per-level invoked counts, for compact assertions.
pub fn invoked_by_level(summary: &RunSummary) -> Vec<(Level, usize)> {
    Level::ALL
        .iter()
        .map(|level| (*level, summary.level(*level).invoked))
        .filter(|(_, invoked)| *invoked != 0)
        .collect()
}

/// `BootHooks` that attach and detach the capture sink around a run.
pub fn capture_hooks() -> BootHooks {
    fn pre() {
        start_capture(KlogLevel::Trace);
    }
    fn post() {
        klog_detach_sink();
    }
    BootHooks::new(pre, post)
}

/// Lines captured so far, without detaching the sink.
pub fn captured_lines() -> Vec<String> {
    CAPTURED.lock().clone()
}
