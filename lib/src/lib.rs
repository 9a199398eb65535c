#![cfg_attr(not(test), no_std)]

pub mod init_flag;
pub mod klog;

pub use init_flag::InitFlag;
pub use klog::{
    KlogLevel, KlogSink, klog_attach_sink, klog_detach_sink, klog_get_level, klog_has_sink,
    klog_init, klog_is_enabled, klog_set_level,
};

#[doc(hidden)]
pub use paste;
