//! Build-time configuration as seen from the running program.
//!
//! The backend and default log level are chosen when the crate is built
//! (`BOOTSTAGE_BACKEND`, `BOOTSTAGE_LOG`); `build.rs` validates them, so the
//! values here are always well formed.

mod select;

pub use select::{
    BackendKind, ConfigError, DEFAULT_BACKEND, DEFAULT_LOG_LEVEL, LOG_LEVELS, select_backend,
    select_log_level,
};

use bootstage_lib::{KlogLevel, KlogSink, klog_attach_sink, klog_set_level};

#[cfg(bootstage_backend = "section")]
pub const ACTIVE_BACKEND: BackendKind = BackendKind::Section;
#[cfg(bootstage_backend = "load_time")]
pub const ACTIVE_BACKEND: BackendKind = BackendKind::LoadTime;
#[cfg(bootstage_backend = "registry")]
pub const ACTIVE_BACKEND: BackendKind = BackendKind::Registry;

pub const LOG_LEVEL_NAME: &str = env!("BOOTSTAGE_LOG_LEVEL");

pub fn default_log_level() -> KlogLevel {
    KlogLevel::from_name(LOG_LEVEL_NAME).unwrap_or(KlogLevel::Info)
}

/// Bring up logging at the configured level. Meant to be called from the
/// pre-init hook.
pub fn init_logging(sink: KlogSink) {
    klog_set_level(default_log_level());
    klog_attach_sink(sink);
}
