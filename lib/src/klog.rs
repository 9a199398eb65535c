use core::fmt;
use core::sync::atomic::{AtomicU8, Ordering};

use spin::Mutex;

use crate::init_flag::InitFlag;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum KlogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl KlogLevel {
    fn from_raw(raw: u8) -> Self {
        match raw {
            0 => KlogLevel::Error,
            1 => KlogLevel::Warn,
            2 => KlogLevel::Info,
            3 => KlogLevel::Debug,
            _ => KlogLevel::Trace,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "error" => Some(KlogLevel::Error),
            "warn" => Some(KlogLevel::Warn),
            "info" => Some(KlogLevel::Info),
            "debug" => Some(KlogLevel::Debug),
            "trace" => Some(KlogLevel::Trace),
            _ => None,
        }
    }

    pub const fn tag(self) -> &'static str {
        match self {
            KlogLevel::Error => "E",
            KlogLevel::Warn => "W",
            KlogLevel::Info => "I",
            KlogLevel::Debug => "D",
            KlogLevel::Trace => "T",
        }
    }
}

/// Output channel for log lines. Receives one formatted line per call,
/// without a trailing newline.
pub type KlogSink = fn(KlogLevel, fmt::Arguments<'_>);

static CURRENT_LEVEL: AtomicU8 = AtomicU8::new(KlogLevel::Info as u8);
static SINK_READY: InitFlag = InitFlag::new();
static SINK: Mutex<Option<KlogSink>> = Mutex::new(None);

#[inline(always)]
fn is_enabled(level: KlogLevel) -> bool {
    level as u8 <= CURRENT_LEVEL.load(Ordering::Relaxed)
}

fn current_sink() -> Option<KlogSink> {
    if !SINK_READY.is_set_relaxed() {
        return None;
    }
    // Copy out so the sink runs unlocked and may log itself.
    *SINK.lock()
}

pub fn log_args(level: KlogLevel, args: fmt::Arguments<'_>) {
    if !is_enabled(level) {
        return;
    }
    if let Some(sink) = current_sink() {
        sink(level, args);
    }
}

pub fn klog_init() {
    CURRENT_LEVEL.store(KlogLevel::Info as u8, Ordering::Relaxed);
    klog_detach_sink();
}

/// Route log lines to `sink`. Lines emitted before this are dropped.
pub fn klog_attach_sink(sink: KlogSink) {
    *SINK.lock() = Some(sink);
    SINK_READY.mark_set();
}

pub fn klog_detach_sink() {
    SINK_READY.reset();
    *SINK.lock() = None;
}

pub fn klog_has_sink() -> bool {
    SINK_READY.is_set()
}

pub fn klog_set_level(level: KlogLevel) {
    CURRENT_LEVEL.store(level as u8, Ordering::Relaxed);
}

pub fn klog_get_level() -> KlogLevel {
    KlogLevel::from_raw(CURRENT_LEVEL.load(Ordering::Relaxed))
}

pub fn klog_is_enabled(level: KlogLevel) -> bool {
    is_enabled(level)
}

#[macro_export]
macro_rules! klog {
    ($level:expr, $($arg:tt)*) => {{
        $crate::klog::log_args($level, ::core::format_args!($($arg)*));
    }};
}

#[macro_export]
macro_rules! klog_error {
    ($($arg:tt)*) => {
        $crate::klog::log_args($crate::klog::KlogLevel::Error, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! klog_warn {
    ($($arg:tt)*) => {
        $crate::klog::log_args($crate::klog::KlogLevel::Warn, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! klog_info {
    ($($arg:tt)*) => {
        $crate::klog::log_args($crate::klog::KlogLevel::Info, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! klog_debug {
    ($($arg:tt)*) => {
        $crate::klog::log_args($crate::klog::KlogLevel::Debug, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! klog_trace {
    ($($arg:tt)*) => {
        $crate::klog::log_args($crate::klog::KlogLevel::Trace, ::core::format_args!($($arg)*))
    };
}
