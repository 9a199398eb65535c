//! Link-time section backend.
//!
//! Every call site places a [`SectionStep`] into the `SECTION_STEPS`
//! distributed slice; the linker gathers them into one contiguous array that
//! exists before the program starts. Link order across object files is not
//! something we rely on: each entry carries its level, and the backend walks
//! the array once per level in [`Level`] order. Within one level, entries come
//! out in link order.

use bootstage_abi::{InitStep, Level};
use bootstage_lib::klog_debug;
use linkme::distributed_slice;

use super::StepSource;
use crate::config::BackendKind;

/// A descriptor tagged with the level it belongs to.
#[derive(Clone, Copy, Debug)]
pub struct SectionStep {
    level: Level,
    step: InitStep,
}

impl SectionStep {
    pub const fn new(level: Level, step: InitStep) -> Self {
        Self { level, step }
    }

    #[inline]
    pub const fn level(&self) -> Level {
        self.level
    }

    #[inline]
    pub const fn step(&self) -> &InitStep {
        &self.step
    }
}

#[distributed_slice]
pub static SECTION_STEPS: [SectionStep];

pub struct SectionBackend {
    entries: &'static [SectionStep],
}

impl SectionBackend {
    /// Backend over the link-time `SECTION_STEPS` array.
    pub fn new() -> Self {
        Self {
            entries: &SECTION_STEPS,
        }
    }

    /// Backend over an explicit table, laid out as if by the linker.
    pub const fn from_entries(entries: &'static [SectionStep]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &'static [SectionStep] {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, level: Level) -> usize {
        self.entries.iter().filter(|e| e.level == level).count()
    }

    /// Whether the raw array already happens to be in level order.
    pub fn is_level_sorted(&self) -> bool {
        self.entries.windows(2).all(|w| w[0].level <= w[1].level)
    }
}

impl Default for SectionBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StepSource for SectionBackend {
    const KIND: BackendKind = BackendKind::Section;

    fn prepare(&mut self) {
        if !self.is_level_sorted() {
            klog_debug!(
                "[boot:section] {} entries not in level order, dispatching by level tag",
                self.entries.len()
            );
        }
    }

    fn level_steps(&self, level: Level) -> impl Iterator<Item = &'static InitStep> + '_ {
        let entries: &'static [SectionStep] = self.entries;
        entries
            .iter()
            .filter(move |entry| entry.level == level)
            .map(|entry| &entry.step)
    }
}

/// Place `$func` into the link-time section at `$level`.
#[macro_export]
macro_rules! section_step {
    ($level:ident, $func:ident) => {
        $crate::__private::paste::paste! {
            #[$crate::__private::distributed_slice($crate::backend::section::SECTION_STEPS)]
            #[linkme(crate = $crate::__private::linkme)]
            #[doc(hidden)]
            static [<__BOOTSTAGE_SECTION_ $func:upper>]: $crate::backend::section::SectionStep =
                $crate::backend::section::SectionStep::new(
                    $crate::Level::$level,
                    $crate::InitStep::new($func, ::core::stringify!($func)),
                );
        }
    };
}
