//! Collection backends.
//!
//! Each backend gathers [`InitStep`]s in its own way but hands them to the
//! dispatcher through the same interface: one ordered sequence per level.

pub mod load_time;
pub mod manifest;
pub mod section;

use bootstage_abi::{InitStep, Level};

use crate::config::BackendKind;

pub use load_time::{LOAD_TIME_STEPS, LoadTimeBackend};
pub use manifest::{ManifestBackend, ManifestEntry, RegisterFn};
pub use section::{SECTION_STEPS, SectionBackend, SectionStep};

/// A source of staged initializers.
pub trait StepSource {
    const KIND: BackendKind;

    /// Runs at the start of every dispatch pass, before the pre-init hook.
    fn prepare(&mut self) {}

    /// Steps registered for `level`, in dispatch order.
    fn level_steps(&self, level: Level) -> impl Iterator<Item = &'static InitStep> + '_;
}
