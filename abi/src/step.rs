//! Initializer descriptors.

use core::fmt;

/// Signature of every staged initializer: no arguments, integer status.
pub type InitFn = fn() -> i32;

/// Status returned by an initializer that succeeded.
pub const INIT_OK: i32 = 0;

/// Immutable `{function, name}` pair identifying one registered initializer.
///
/// The function slot may be empty; dispatch skips such a slot without
/// treating it as an error.
#[derive(Clone, Copy)]
pub struct InitStep {
    func: Option<InitFn>,
    name: &'static str,
}

impl InitStep {
    pub const fn new(func: InitFn, name: &'static str) -> Self {
        Self {
            func: Some(func),
            name,
        }
    }

    /// A slot that occupies a position but runs nothing.
    pub const fn null(name: &'static str) -> Self {
        Self { func: None, name }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn func(&self) -> Option<InitFn> {
        self.func
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        self.func.is_none()
    }

    /// Run the initializer. Returns `None` for a null slot.
    #[inline]
    pub fn invoke(&self) -> Option<i32> {
        self.func.map(|func| func())
    }
}

impl fmt::Debug for InitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InitStep")
            .field("name", &self.name)
            .field("null", &self.is_null())
            .finish()
    }
}

/// Result of running one step, as seen by the dispatcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The initializer returned [`INIT_OK`].
    Ok,
    /// The initializer returned a non-zero status.
    Failed(i32),
    /// Null slot, nothing ran.
    Skipped,
}

impl StepOutcome {
    pub fn from_status(status: Option<i32>) -> Self {
        match status {
            None => StepOutcome::Skipped,
            Some(INIT_OK) => StepOutcome::Ok,
            Some(rc) => StepOutcome::Failed(rc),
        }
    }

    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, StepOutcome::Failed(_))
    }
}
