//! Atomic one-shot flags.
//!
//! `InitFlag` tracks whether something has happened yet, such as a log sink
//! being attached. It replaces hand-rolled `AtomicBool`
//! statics and their accessor functions.
//!
//! # Memory Ordering
//!
//! - `init_once()` uses `SeqCst` swap so exactly one caller wins
//! - `mark_set()` uses `Release` to publish side-effects
//! - `is_set()` uses `Acquire` to observe them
//! - `is_set_relaxed()` is for guards that need no ordering (logging)

use core::sync::atomic::{AtomicBool, Ordering};

#[repr(transparent)]
pub struct InitFlag {
    flag: AtomicBool,
}

impl InitFlag {
    #[inline]
    pub const fn new() -> Self {
        Self {
            flag: AtomicBool::new(false),
        }
    }

    /// Returns `true` if this call set the flag, `false` if it was already set.
    #[inline]
    pub fn init_once(&self) -> bool {
        !self.flag.swap(true, Ordering::SeqCst)
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    #[inline]
    pub fn is_set_relaxed(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn mark_set(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Clear the flag. Only for owners that support re-initialization.
    #[inline]
    pub fn reset(&self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl Default for InitFlag {
    fn default() -> Self {
        Self::new()
    }
}
